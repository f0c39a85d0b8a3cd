//! Live console adapters for the `Diagnostics` and `Prompter` ports.

use std::io::{BufRead, Write as _};

use crate::ports::diagnostics::Diagnostics;
use crate::ports::prompter::Prompter;

/// Diagnostics sink that writes to stderr.
pub struct ConsoleDiagnostics;

impl Diagnostics for ConsoleDiagnostics {
    fn info(&self, message: &str) {
        eprintln!("{message}");
    }

    fn warn(&self, message: &str) {
        eprintln!("warning: {message}");
    }

    fn error(&self, message: &str) {
        eprintln!("error: {message}");
    }
}

/// Prompter that asks on stderr and reads answers from stdin.
pub struct ConsolePrompter;

impl ConsolePrompter {
    fn read_line() -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let mut line = String::new();
        std::io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| format!("Failed to read input: {e}"))?;
        Ok(line.trim().to_string())
    }
}

impl Prompter for ConsolePrompter {
    fn input(
        &self,
        prompt: &str,
        default: Option<&str>,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let mut stderr = std::io::stderr().lock();
        match default {
            Some(d) if !d.is_empty() => write!(stderr, "{prompt} [{d}]: "),
            _ => write!(stderr, "{prompt}: "),
        }
        .map_err(|e| format!("Failed to write prompt: {e}"))?;
        stderr.flush().map_err(|e| format!("Failed to write prompt: {e}"))?;
        drop(stderr);

        let answer = Self::read_line()?;
        if answer.is_empty() {
            if let Some(d) = default {
                return Ok(d.to_string());
            }
        }
        Ok(answer)
    }

    fn confirm(
        &self,
        prompt: &str,
        default: bool,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        let hint = if default { "Y/n" } else { "y/N" };
        let answer = self.input(&format!("{prompt} ({hint})"), None)?;
        match answer.to_lowercase().as_str() {
            "" => Ok(default),
            "y" | "yes" => Ok(true),
            "n" | "no" => Ok(false),
            other => Err(format!("Unrecognized answer: {other}").into()),
        }
    }

    fn select(
        &self,
        prompt: &str,
        options: &[&str],
    ) -> Result<usize, Box<dyn std::error::Error + Send + Sync>> {
        let mut stderr = std::io::stderr().lock();
        writeln!(stderr, "{prompt}").map_err(|e| format!("Failed to write prompt: {e}"))?;
        for (i, option) in options.iter().enumerate() {
            writeln!(stderr, "  {}. {option}", i + 1)
                .map_err(|e| format!("Failed to write prompt: {e}"))?;
        }
        write!(stderr, "Choice [1]: ").map_err(|e| format!("Failed to write prompt: {e}"))?;
        stderr.flush().map_err(|e| format!("Failed to write prompt: {e}"))?;
        drop(stderr);

        let answer = Self::read_line()?;
        if answer.is_empty() {
            return Ok(0);
        }
        // Accept either the option number or its literal text.
        if let Ok(n) = answer.parse::<usize>() {
            if n >= 1 && n <= options.len() {
                return Ok(n - 1);
            }
        }
        options
            .iter()
            .position(|o| o.eq_ignore_ascii_case(&answer))
            .ok_or_else(|| format!("Invalid choice: {answer}").into())
    }
}
