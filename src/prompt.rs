//! Interactive terminal prompts.
//!
//! The sorting pipeline asks two kinds of questions: how many days back to
//! look, and a per-playlist yes/no before inserting tracks. Both go through
//! the [`Prompter`] trait so the reconciliation logic can be exercised in
//! tests with scripted answers instead of a live terminal.

use std::io::{self, Write};

/// Source of interactive answers. The only capability is reading one line
/// in response to a question.
pub trait Prompter {
    fn read_line(&mut self, question: &str) -> String;
}

/// Reads answers from stdin, printing the question to stdout first.
pub struct TermPrompter;

impl Prompter for TermPrompter {
    fn read_line(&mut self, question: &str) -> String {
        print!("{} ", question);
        let _ = io::stdout().flush();

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            return String::new();
        }
        input.trim().to_string()
    }
}

/// Asks how many days back to check, re-prompting until the answer parses
/// as a non-negative integer.
pub fn ask_days_back<P: Prompter>(prompter: &mut P) -> u32 {
    let mut answer = prompter.read_line("How many days back should I check?");
    loop {
        match answer.parse::<u32>() {
            Ok(days) => return days,
            Err(_) => answer = prompter.read_line("Please type a number!"),
        }
    }
}

/// Single yes/no confirmation. Only an answer starting with `y` or `Y`
/// counts as yes; anything else, including empty input, declines.
pub fn confirm<P: Prompter>(prompter: &mut P, question: &str) -> bool {
    let answer = prompter.read_line(question);
    matches!(answer.chars().next(), Some('y') | Some('Y'))
}
