//! Single-key confirmation prompts.
//!
//! Keys are read in raw mode so a choice takes effect without Enter. The raw
//! switch is scoped to each read by a guard, so the terminal comes back in
//! cooked mode on every path out of here, including an abort.

use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use crossterm::tty::IsTty;

/// A single decoded keypress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Return or Enter: take the default option.
    Accept,
    /// ^C or Escape.
    Abort,
    /// Any other character key.
    Char(char),
}

/// Outcome of a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Choice(String),
    Abort,
}

/// Marker error carried through `anyhow` when the user aborts at a prompt.
/// `main` downcasts it into a non-zero process exit instead of an error report.
#[derive(Debug)]
pub struct UserAbort;

impl std::fmt::Display for UserAbort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "aborted by user")
    }
}

impl std::error::Error for UserAbort {}

/// Source of decoded keypresses.
pub trait KeySource {
    fn read_key(&mut self) -> Result<Key>;
}

/// Restores the terminal to cooked mode when dropped.
struct RawModeGuard;

impl RawModeGuard {
    fn new() -> Result<Self> {
        terminal::enable_raw_mode().context("failed to switch the terminal to raw mode")?;
        Ok(RawModeGuard)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Reads keypresses from the controlling terminal.
pub struct TerminalKeys;

impl TerminalKeys {
    pub fn new() -> Result<Self> {
        if !io::stdin().is_tty() {
            bail!("standard input is not a terminal; cannot prompt for confirmation (use --yes)");
        }
        Ok(TerminalKeys)
    }
}

impl KeySource for TerminalKeys {
    fn read_key(&mut self) -> Result<Key> {
        let _guard = RawModeGuard::new()?;
        loop {
            match event::read().context("failed to read a key from the terminal")? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Enter => return Ok(Key::Accept),
                    KeyCode::Esc => return Ok(Key::Abort),
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(Key::Abort)
                    }
                    KeyCode::Char(c) => return Ok(Key::Char(c)),
                    _ => {}
                },
                _ => {}
            }
        }
    }
}

/// Ask the user to pick one of `options` with a single keypress.
///
/// The first character of each option selects it, case-insensitively, first
/// match in list order winning; Return picks the first option. The chosen
/// option is echoed to `out` with a trailing newline. ^C and Escape echo
/// `^C` and yield [`Selection::Abort`]. Unrecognized keys are silently
/// re-read.
pub fn prompt_with<K: KeySource, W: Write>(
    keys: &mut K,
    out: &mut W,
    message: &str,
    options: &[&str],
) -> Result<Selection> {
    write!(out, "{} ({})? ", message, options.join("/"))?;
    out.flush()?;

    loop {
        match keys.read_key()? {
            Key::Accept => return select(out, options[0]),
            Key::Abort => {
                writeln!(out, "^C")?;
                return Ok(Selection::Abort);
            }
            Key::Char(c) => {
                let c = c.to_ascii_lowercase();
                for option in options {
                    let first = option.chars().next();
                    if first.is_some_and(|f| f.to_ascii_lowercase() == c) {
                        return select(out, option);
                    }
                }
            }
        }
    }
}

fn select<W: Write>(out: &mut W, option: &str) -> Result<Selection> {
    writeln!(out, "{option}")?;
    Ok(Selection::Choice(option.to_string()))
}

/// Prompt on the controlling terminal, echoing to standard output.
pub fn prompt(message: &str, options: &[&str]) -> Result<Selection> {
    let mut keys = TerminalKeys::new()?;
    prompt_with(&mut keys, &mut io::stdout(), message, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    struct ScriptedKeys {
        keys: VecDeque<Key>,
    }

    impl ScriptedKeys {
        fn new(keys: &[Key]) -> Self {
            ScriptedKeys {
                keys: keys.iter().copied().collect(),
            }
        }
    }

    impl KeySource for ScriptedKeys {
        fn read_key(&mut self) -> Result<Key> {
            Ok(self.keys.pop_front().expect("prompt read past the script"))
        }
    }

    fn run(keys: &[Key], message: &str, options: &[&str]) -> (Selection, String) {
        let mut source = ScriptedKeys::new(keys);
        let mut out = Vec::new();
        let selection = prompt_with(&mut source, &mut out, message, options).unwrap();
        (selection, String::from_utf8(out).unwrap())
    }

    #[test]
    fn return_key_picks_the_default() {
        let (selection, out) = run(&[Key::Accept], "", &["AAA", "BBB"]);
        assert_eq!(Selection::Choice("AAA".into()), selection);
        assert!(out.ends_with("AAA\n"));
    }

    #[test]
    fn first_letter_match_is_case_insensitive() {
        let (selection, out) = run(&[Key::Char('b')], "", &["AAA", "BBB"]);
        assert_eq!(Selection::Choice("BBB".into()), selection);
        assert!(out.ends_with("BBB\n"));

        let (selection, _) = run(&[Key::Char('B')], "", &["AAA", "BBB"]);
        assert_eq!(Selection::Choice("BBB".into()), selection);
    }

    #[test]
    fn first_match_wins_in_list_order() {
        let (selection, _) = run(&[Key::Char('a')], "", &["Always", "abort"]);
        assert_eq!(Selection::Choice("Always".into()), selection);
    }

    #[test]
    fn abort_echoes_caret_c() {
        let (selection, out) = run(&[Key::Abort], "", &["AAA"]);
        assert_eq!(Selection::Abort, selection);
        assert!(out.ends_with("^C\n"));
    }

    #[test]
    fn unmatched_keys_are_reread_silently() {
        let (selection, out) = run(&[Key::Char('x'), Key::Char('z'), Key::Char('b')], "", &["AAA", "BBB"]);
        assert_eq!(Selection::Choice("BBB".into()), selection);
        // nothing between the header and the final echo
        assert_eq!(" (AAA/BBB)? BBB\n", out);
    }

    #[test]
    fn header_names_the_options() {
        let (_, out) = run(&[Key::Accept], "Submit this commit", &["Yes", "No"]);
        assert!(out.starts_with("Submit this commit (Yes/No)? "));
    }
}
