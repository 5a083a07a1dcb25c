//
//  scribe-cli
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod api;
mod auth;
mod completion;
mod config;
mod form_fill;
mod ocr;
mod profile;
mod transcription;

pub use api::ApiCommand;
pub use auth::AuthCommand;
pub use completion::CompletionCommand;
pub use config::ConfigCommand;
pub use form_fill::FormFillCommand;
pub use ocr::OcrCommand;
pub use profile::ProfileCommand;
pub use transcription::TranscriptionCommand;

pub(crate) use api::parse_fields;

use clap::{Parser, Subcommand};

/// Scribe CLI - Forms, OCR and transcriptions from the command line
#[derive(Parser, Debug)]
#[command(
    name = "scribe",
    version,
    about = "Work with a Scribe server from the command line",
    long_about = "scribe fills forms, manages work profiles, runs OCR on scans and \
                  transcribes recordings against a Scribe backend.\n\n\
                  Route prefixes and resource spellings are discovered automatically.",
    propagate_version = true,
    after_help = "Use 'scribe <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Scribe server origin, e.g. https://scribe.example.com
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Keep the token in memory only; nothing is read from or written to the keyring
    #[arg(long, global = true, env = "SCRIBE_NO_KEYRING")]
    pub no_keyring: bool,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in, log out and show the current user
    #[command(visible_alias = "login")]
    Auth(AuthCommand),

    /// Manage form fills
    #[command(name = "form-fill", visible_alias = "ff")]
    FormFill(FormFillCommand),

    /// Manage work profiles
    Profile(ProfileCommand),

    /// Upload scans and read recognised text
    Ocr(OcrCommand),

    /// Upload recordings and read transcripts
    #[command(visible_alias = "tx")]
    Transcription(TranscriptionCommand),

    /// Make API requests through the adaptive client
    Api(ApiCommand),

    /// Manage CLI configuration
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),

    /// Print version information
    Version,
}
