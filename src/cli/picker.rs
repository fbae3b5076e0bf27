//! Interactive numbered menus.
//!
//! This is intentionally kept separate from clap parsing:
//! - clap handles structured flags/subcommands
//! - the picker provides the "run `ostat` and choose from menus" UX
//!
//! Prompts read from any `BufRead` and write to any `Write`, so the menu logic
//! is testable without a terminal. `q` cancels at every prompt.

use std::io::{BufRead, Write};

use crate::error::AppError;

/// Line-based prompt over an input/output pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// List `options` and return the 0-based index of the chosen one.
    pub fn choose(&mut self, title: &str, options: &[String]) -> Result<usize, AppError> {
        if options.is_empty() {
            return Err(AppError::new(2, format!("Nothing to choose for '{title}'.")));
        }

        self.say(&format!("{title}:"))?;
        for (idx, option) in options.iter().enumerate() {
            self.say(&format!("{:>3}) {option}", idx + 1))?;
        }

        loop {
            let input = self.ask(&format!("Select by number (1-{}, q to quit): ", options.len()))?;
            match input.parse::<usize>() {
                Ok(choice) if (1..=options.len()).contains(&choice) => return Ok(choice - 1),
                Ok(choice) => {
                    self.say(&format!("Invalid choice: {choice}. Enter a number between 1 and {}.", options.len()))?
                }
                Err(_) => self.say(&format!("Not a number: '{input}'."))?,
            }
        }
    }

    /// Ask for a year within `min..=max`; an empty answer takes `default`.
    pub fn year(&mut self, label: &str, default: i32, min: i32, max: i32) -> Result<i32, AppError> {
        loop {
            let input = self.ask(&format!("{label} [{default}] ({min}-{max}): "))?;
            if input.is_empty() {
                return Ok(default);
            }
            match input.parse::<i32>() {
                Ok(year) if (min..=max).contains(&year) => return Ok(year),
                Ok(year) => self.say(&format!("Year {year} is outside {min}-{max}."))?,
                Err(_) => self.say(&format!("Not a year: '{input}'."))?,
            }
        }
    }

    /// Yes/no question; an empty answer takes `default`.
    pub fn confirm(&mut self, question: &str, default: bool) -> Result<bool, AppError> {
        let hint = if default { "Y/n" } else { "y/N" };
        loop {
            let input = self.ask(&format!("{question} [{hint}]: "))?;
            match input.to_ascii_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.say("Please answer y or n.")?,
            }
        }
    }

    /// Free-text answer; an empty answer takes `default`.
    pub fn text(&mut self, label: &str, default: &str) -> Result<String, AppError> {
        let input = self.ask(&format!("{label} [{default}]: "))?;
        Ok(if input.is_empty() { default.to_string() } else { input })
    }

    pub fn say(&mut self, line: &str) -> Result<(), AppError> {
        writeln!(self.output, "{line}").map_err(|e| AppError::new(2, format!("Failed to write prompt: {e}")))
    }

    fn ask(&mut self, prompt: &str) -> Result<String, AppError> {
        write!(self.output, "{prompt}")
            .and_then(|_| self.output.flush())
            .map_err(|e| AppError::new(2, format!("Failed to write prompt: {e}")))?;

        let mut input = String::new();
        let bytes = self
            .input
            .read_line(&mut input)
            .map_err(|e| AppError::new(2, format!("Failed to read input: {e}")))?;
        if bytes == 0 {
            return Err(AppError::new(
                2,
                "No input received. Use `ostat fetch` for non-interactive queries.",
            ));
        }

        let input = input.trim();
        if input.eq_ignore_ascii_case("q") {
            return Err(AppError::new(2, "Canceled."));
        }
        Ok(input.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn options() -> Vec<String> {
        vec!["Economy".to_string(), "Population".to_string()]
    }

    #[test]
    fn choose_retries_until_valid() {
        let mut p = prompter("x\n7\n2\n");
        assert_eq!(p.choose("Domain", &options()).unwrap(), 1);
        let out = String::from_utf8(p.output).unwrap();
        assert!(out.contains("  1) Economy"));
        assert!(out.contains("Not a number: 'x'."));
        assert!(out.contains("Invalid choice: 7."));
    }

    #[test]
    fn q_cancels_and_eof_fails() {
        assert_eq!(prompter("q\n").choose("Domain", &options()).unwrap_err().message(), "Canceled.");
        assert_eq!(prompter("").choose("Domain", &options()).unwrap_err().exit_code(), 2);
    }

    #[test]
    fn year_uses_default_and_bounds() {
        assert_eq!(prompter("\n").year("Start year", 2010, 1990, 2025).unwrap(), 2010);
        assert_eq!(prompter("1980\n2001\n").year("Start year", 2010, 1990, 2025).unwrap(), 2001);
    }

    #[test]
    fn confirm_answers() {
        assert!(prompter("\n").confirm("Export?", true).unwrap());
        assert!(!prompter("maybe\nNO\n").confirm("Export?", true).unwrap());
    }

    #[test]
    fn text_default() {
        assert_eq!(prompter("\n").text("File", "out.csv").unwrap(), "out.csv");
        assert_eq!(prompter("mine.csv\n").text("File", "out.csv").unwrap(), "mine.csv");
    }
}
