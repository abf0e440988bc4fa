//! Bridge configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::session::DEFAULT_ACCEPT_CONFIDENCE;

// ════════════════════════════════════════════════════════════════════════════
// BridgeConfig
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BridgeConfig {
    #[serde(default)]
    pub serial: SerialConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub model: ModelConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerialConfig {
    /// Device path or fragment; empty means autodetect.
    pub port: String,
    /// Link bit rate.
    pub baud: u32,
    /// Listener polling read timeout in milliseconds.
    pub read_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Confidence a match must strictly exceed.
    pub accept_confidence: f32,
    /// Bound on the post-completion acknowledge wait.
    pub ack_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Path to the learned predictor bundle.
    pub path: String,
    /// Whether to attempt the learned path at all.
    pub enabled: bool,
}

impl Default for SerialConfig {
    fn default() -> Self {
        SerialConfig {
            port: String::new(),
            baud: sign_link::DEFAULT_BAUD,
            read_timeout_ms: 50,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            accept_confidence: DEFAULT_ACCEPT_CONFIDENCE,
            ack_timeout_secs: 10,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig { path: "sign_model.bin".to_string(), enabled: true }
    }
}

impl BridgeConfig {
    /// Validate field ranges.  Returns the first offending field.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.serial.baud == 0 {
            return Err(crate::Error::Config("baud must be > 0".to_string()));
        }
        if self.serial.read_timeout_ms == 0 {
            return Err(crate::Error::Config("read_timeout_ms must be > 0".to_string()));
        }
        if !(0.0..=1.0).contains(&self.session.accept_confidence) {
            return Err(crate::Error::Config(format!(
                "accept_confidence must be in [0, 1], got {}",
                self.session.accept_confidence
            )));
        }
        if self.session.ack_timeout_secs == 0 {
            return Err(crate::Error::Config("ack_timeout_secs must be > 0".to_string()));
        }
        if self.model.enabled && self.model.path.trim().is_empty() {
            return Err(crate::Error::Config(
                "model.path must not be empty while model.enabled".to_string(),
            ));
        }
        Ok(())
    }

    /// Load from a file.
    pub fn load(path: &Path) -> Result<Self, crate::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the default location, falling back to defaults when the
    /// file does not exist.
    pub fn load_default() -> Result<Self, crate::Error> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save to a file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), crate::Error> {
        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn default_path() -> PathBuf {
        PathBuf::from("sign_bridge.toml")
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
