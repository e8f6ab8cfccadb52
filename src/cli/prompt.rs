//! Terminal prompts.
//!
//! Every prompt falls back to its default when stdin is not a terminal, so
//! commands run unattended in scripts and tests.

use std::io::{self, IsTerminal};

use dialoguer::{Confirm, Password, Select};

use crate::cli::output;
use crate::error::Result;

/// Minimum length accepted for a newly chosen secret.
pub const MIN_SECRET_LEN: usize = 8;

/// Whether prompts can be shown.
pub fn interactive() -> bool {
    io::stdin().is_terminal() && io::stderr().is_terminal()
}

/// Ask a yes/no question. `assume_yes` answers yes without asking.
pub fn confirm(message: &str, default: bool, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    if !interactive() {
        return Ok(default);
    }

    Ok(Confirm::new()
        .with_prompt(message)
        .default(default)
        .interact()?)
}

/// Answer to an overwrite prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overwrite {
    No,
    Yes,
    All,
}

/// Ask whether to overwrite a changed file. Defaults to `No`.
pub fn overwrite(path: &str) -> Result<Overwrite> {
    if !interactive() {
        return Ok(Overwrite::No);
    }

    let choice = Select::new()
        .with_prompt(format!("{} has different content, overwrite?", path))
        .items(&[
            "No - skip this file",
            "Yes - overwrite this file",
            "All - overwrite all remaining files",
        ])
        .default(0)
        .interact()?;

    Ok(match choice {
        1 => Overwrite::Yes,
        2 => Overwrite::All,
        _ => Overwrite::No,
    })
}

/// Prompt for a new secret, twice. Returns `None` when not interactive.
pub fn new_secret() -> Result<Option<String>> {
    if !interactive() {
        return Ok(None);
    }

    loop {
        let secret = Password::new()
            .with_prompt("Encryption secret")
            .with_confirmation("Confirm secret", "secrets do not match")
            .interact()?;

        if secret.chars().count() >= MIN_SECRET_LEN {
            return Ok(Some(secret));
        }
        output::warn(&format!("use at least {} characters", MIN_SECRET_LEN));
    }
}

/// Prompt for an existing secret. Returns `None` when not interactive.
pub fn secret() -> Result<Option<String>> {
    if !interactive() {
        return Ok(None);
    }

    let secret = Password::new()
        .with_prompt("Decryption secret")
        .interact()?;

    Ok(Some(secret))
}
