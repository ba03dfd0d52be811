use std::io::{self, BufRead, IsTerminal, Write};

use dialoguer::{Input, theme::ColorfulTheme};
use tracing::debug;

use crate::{
    constants::MFA_CODE_LENGTH,
    error::{Result, RotateError},
};

/// Source of one-time MFA codes
pub trait MfaPrompt {
    /// Reads one code for `device`. Called at most once per rotation.
    fn read_code(&self, device: &str) -> io::Result<String>;
}

/// Prompts the operator on the terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl MfaPrompt for TerminalPrompt {
    fn read_code(&self, device: &str) -> io::Result<String> {
        let prompt = if device.is_empty() {
            "Enter MFA code".to_string()
        } else {
            format!("Enter MFA code for {device}")
        };

        if !io::stdin().is_terminal() {
            eprint!("{prompt}: ");
            io::stderr().flush()?;
            return read_line_from(&mut io::stdin().lock());
        }

        let theme = ColorfulTheme::default();

        // Empty input is returned as-is so it fails validation instead of re-prompting
        Input::<String>::with_theme(&theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(io::Error::other)
    }
}

/// Reads a single line from piped input, without its line ending.
fn read_line_from<R: BufRead>(reader: &mut R) -> io::Result<String> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "no MFA code on stdin",
        ));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Reads a code from `prompt` and checks its shape.
pub fn challenge<P: MfaPrompt + ?Sized>(prompt: &P, device: &str) -> Result<String> {
    let code = prompt.read_code(device).map_err(RotateError::Prompt)?;
    let code = validate_code(&code)?;
    debug!("MFA code accepted");
    Ok(code.to_string())
}

/// Trims `code` and requires exactly six ASCII digits.
pub fn validate_code(code: &str) -> Result<&str> {
    let code = code.trim();
    let well_formed =
        code.chars().count() == MFA_CODE_LENGTH && code.chars().all(|c| c.is_ascii_digit());

    if well_formed {
        Ok(code)
    } else {
        Err(RotateError::InvalidMfaCode {
            expected: MFA_CODE_LENGTH,
            actual: code.to_string(),
        })
    }
}
