//! Interactive REPL mode
//!
//! Keeps one persister open across commands, which is the only way the
//! in-memory backend is useful from the command line.

use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand};
use dimension_domain::{DimensionPersister, DimensionService};

use crate::commands::dimension::DimensionSubcommand;
use crate::commands::ColumnCommand;

/// One REPL line, parsed with the same definitions as the CLI
#[derive(Debug, Parser)]
#[command(name = "dimensions", no_binary_name = true, disable_version_flag = true)]
struct ReplLine {
    #[command(subcommand)]
    command: ReplCommand,
}

#[derive(Debug, Subcommand)]
enum ReplCommand {
    #[command(flatten)]
    Dimension(DimensionSubcommand),
    /// Describe report columns
    Column(ColumnCommand),
}

/// What a line asked the REPL to do
#[derive(Debug, PartialEq, Eq)]
pub enum LineOutcome {
    Output(String),
    Quit,
}

/// Interactive CLI over a dimension service
pub struct InteractiveCli<P: DimensionPersister> {
    service: DimensionService<P>,
    json: bool,
}

impl<P: DimensionPersister> InteractiveCli<P> {
    pub fn new(service: DimensionService<P>, json: bool) -> Self {
        Self { service, json }
    }

    /// Run the interactive REPL on stdin/stdout
    pub fn run(&mut self) -> anyhow::Result<()> {
        println!("Dimension Registry Interactive Mode");
        println!("Type help for commands, /quit to exit");
        println!();

        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();

        loop {
            print!("dimensions> ");
            io::stdout().flush()?;

            let Some(line) = lines.next() else {
                break;
            };

            match self.execute_line(&line?) {
                Ok(LineOutcome::Quit) => break,
                Ok(LineOutcome::Output(out)) if out.is_empty() => continue,
                Ok(LineOutcome::Output(out)) => println!("{}", out),
                Err(e) => println!("Error: {}", e),
            }
        }

        Ok(())
    }

    /// Parse and execute one line of input
    pub fn execute_line(&mut self, input: &str) -> anyhow::Result<LineOutcome> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(LineOutcome::Output(String::new()));
        }
        if matches!(input, "/quit" | "/exit") {
            return Ok(LineOutcome::Quit);
        }

        let words = split_words(input)?;
        let parsed = match ReplLine::try_parse_from(words) {
            Ok(parsed) => parsed,
            // Help and usage errors are shown, not treated as failures
            Err(e) => return Ok(LineOutcome::Output(e.render().to_string())),
        };

        let out = match parsed.command {
            ReplCommand::Dimension(cmd) => cmd.run(&mut self.service, self.json)?,
            ReplCommand::Column(cmd) => cmd.run(self.json),
        };
        Ok(LineOutcome::Output(out))
    }
}

/// Split a line the way a POSIX shell would for plain words.
///
/// Single quotes are literal, double quotes allow `\"` and `\\`, and a
/// backslash outside quotes escapes the next character. No expansion.
fn split_words(input: &str) -> anyhow::Result<Vec<String>> {
    #[derive(Clone, Copy, PartialEq)]
    enum Quote {
        None,
        Single,
        Double,
    }

    let mut words = Vec::new();
    let mut current = String::new();
    let mut quote = Quote::None;
    let mut has_word = false;
    let mut chars = input.chars();

    while let Some(ch) = chars.next() {
        match (quote, ch) {
            (Quote::Single, '\'') | (Quote::Double, '"') => quote = Quote::None,
            (Quote::Single, c) => current.push(c),
            (Quote::Double, '\\') => match chars.next() {
                Some(c @ ('"' | '\\')) => current.push(c),
                Some(c) => {
                    current.push('\\');
                    current.push(c);
                }
                None => anyhow::bail!("unterminated quote"),
            },
            (Quote::Double, c) => current.push(c),
            (Quote::None, '\'') => {
                quote = Quote::Single;
                has_word = true;
            }
            (Quote::None, '"') => {
                quote = Quote::Double;
                has_word = true;
            }
            (Quote::None, '\\') => match chars.next() {
                Some(c) => {
                    current.push(c);
                    has_word = true;
                }
                None => anyhow::bail!("trailing backslash"),
            },
            (Quote::None, c) if c.is_whitespace() => {
                if has_word {
                    words.push(std::mem::take(&mut current));
                    has_word = false;
                }
            }
            (Quote::None, c) => {
                current.push(c);
                has_word = true;
            }
        }
    }

    if quote != Quote::None {
        anyhow::bail!("unterminated quote");
    }
    if has_word {
        words.push(current);
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dimension_adapter::InMemoryDimensionPersister;

    fn repl() -> InteractiveCli<InMemoryDimensionPersister> {
        InteractiveCli::new(DimensionService::new(InMemoryDimensionPersister::new()), true)
    }

    fn output(outcome: LineOutcome) -> serde_json::Value {
        match outcome {
            LineOutcome::Output(out) => serde_json::from_str(&out).unwrap(),
            LineOutcome::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn test_split_words_with_quotes() {
        assert_eq!(
            split_words(r#"add "Age Group" -d "five year bands""#).unwrap(),
            vec!["add", "Age Group", "-d", "five year bands"]
        );
        assert!(split_words(r#"add "Age"#).is_err());
    }

    #[test]
    fn test_split_words_with_escapes_and_single_quotes() {
        assert_eq!(
            split_words(r#"add "a\"b" 'it''s' O\'Neil 'c:\dir' """#).unwrap(),
            vec!["add", "a\"b", "its", "O'Neil", "c:\\dir", ""]
        );
        assert!(split_words("add 'open").is_err());
        assert!(split_words("add trailing\\").is_err());
    }

    #[test]
    fn test_state_kept_between_lines() {
        let mut repl = repl();

        repl.execute_line(r#"add "Age Group""#).unwrap();
        repl.execute_line("add Gender").unwrap();

        let found = output(repl.execute_line("search group").unwrap());
        assert_eq!(found.as_array().unwrap().len(), 1);
        assert_eq!(found[0]["name"], "Age Group");
    }

    #[test]
    fn test_column_command() {
        let mut repl = repl();

        let column = output(repl.execute_line("column person-id --name ID").unwrap());
        assert_eq!(column["dataType"], "Integer");
    }

    #[test]
    fn test_quit_and_blank() {
        let mut repl = repl();

        assert_eq!(repl.execute_line("/quit").unwrap(), LineOutcome::Quit);
        assert_eq!(
            repl.execute_line("   ").unwrap(),
            LineOutcome::Output(String::new())
        );
    }

    #[test]
    fn test_unknown_command_is_reported() {
        let mut repl = repl();

        match repl.execute_line("frobnicate").unwrap() {
            LineOutcome::Output(out) => assert!(!out.is_empty()),
            LineOutcome::Quit => panic!("unexpected quit"),
        }
    }
}
