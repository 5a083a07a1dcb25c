//
//  scribe-cli
//  interactive/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Terminal prompts built on `dialoguer`.
//!
//! All prompts fail when stdin is not a terminal; commands offer flags
//! (`--email`, `--password-stdin`, `--yes`) for scripted use.

use std::io::{BufRead, IsTerminal};

use anyhow::{bail, Result};
use dialoguer::{Confirm, Input, Password};

pub fn prompt_input(message: &str) -> Result<String> {
    let input: String = Input::new().with_prompt(message).interact_text()?;
    Ok(input)
}

pub fn prompt_password(message: &str) -> Result<String> {
    let password = Password::new().with_prompt(message).interact()?;
    Ok(password)
}

pub fn prompt_confirm_with_default(message: &str, default: bool) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(default)
        .interact()?;
    Ok(confirmed)
}

/// Asks before a destructive action unless `assume_yes` is set.
///
/// Refuses rather than prompting when stdin is not a terminal.
pub fn confirm_destructive(message: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        bail!("Refusing to continue without confirmation; pass --yes");
    }
    prompt_confirm_with_default(message, false)
}

/// Reads a single line (a password) from stdin, without the newline.
pub fn read_secret_from_stdin() -> Result<String> {
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let secret = line.trim_end_matches(['\r', '\n']).to_string();
    if secret.is_empty() {
        bail!("No input received on stdin");
    }
    Ok(secret)
}
