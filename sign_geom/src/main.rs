//! Interactive explorer for the finger-spelling rule table.

use sign_geom::{classify, classify_pattern, synth, FingerPattern, RULES};
use std::io::{self, Write};

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║          Finger-Spelling Rule Table Explorer         ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    loop {
        print_menu();
        let choice = read_line("Command (1–3, or q to quit): ");

        match choice.trim() {
            "1" => print_table(),
            "2" => classify_mask(),
            "3" => classify_letter_fixture(),
            c if c.eq_ignore_ascii_case("q") => {
                println!("\nGoodbye!\n");
                break;
            }
            _ => println!("  ⚠  Please enter 1–3 or q.\n"),
        }
    }
}

fn print_menu() {
    println!("  1. Show the rule table in priority order");
    println!("  2. Classify a finger mask (e.g. T...P, .IM..)");
    println!("  3. Classify a letter's own synthesized hand shape");
}

fn print_table() {
    println!();
    println!("  #   mask    letter  confidence");
    for (i, rule) in RULES.iter().enumerate() {
        let shadowed = RULES[..i].iter().any(|r| r.pattern == rule.pattern);
        println!(
            "  {:>2}  {}   {}       {:.1}{}",
            i,
            rule.pattern,
            rule.letter,
            rule.confidence,
            if shadowed { "   (shadowed)" } else { "" }
        );
    }
    println!();
}

fn classify_mask() {
    let mask = read_line("  Mask, thumb→pinky, letter = extended (e.g. T...P): ");
    let mask = mask.trim();
    if mask.len() != 5 {
        println!("  ⚠  Exactly five characters, '.' for retracted.\n");
        return;
    }
    let s: Vec<bool> = mask.chars().map(|c| c != '.').collect();
    let pattern = FingerPattern::new(s[0], s[1], s[2], s[3], s[4]);
    println!("  {}  →  {}\n", pattern, classify_pattern(pattern));
}

fn classify_letter_fixture() {
    let letter = read_line("  Letter: ");
    match letter.trim().chars().next().and_then(synth::hand_for) {
        Some(hand) => {
            let got = classify(Some(&hand));
            println!("  Synthesized hand classifies as: {}\n", got);
        }
        None => println!("  ⚠  That letter is not in the table.\n"),
    }
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
