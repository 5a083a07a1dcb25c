//
//  scribe-cli
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Scribe CLI Library
//!
//! Client library and command-line interface for a Scribe backend: form
//! fills, work profiles, OCR documents and transcriptions.
//!
//! ## Overview
//!
//! Scribe deployments do not agree on where the API lives. Some mount it at
//! the root, some under `/api`, some under `/api/v1`, and older builds spell
//! resource paths and payload fields differently. The [`api::ScribeClient`]
//! hides all of that:
//!
//! - **Prefix discovery**: a 404 on a root-relative path is retried under the
//!   other prefixes, and the prefix that works is remembered for the session
//! - **Route cascades**: each resource family tries its known path spellings
//!   in order until one exists
//! - **Payload shapes**: writes retry with alternative field names when the
//!   server rejects the body with 400 or 422
//! - **Token lifecycle**: a bearer token is attached to every request and
//!   cleared the first time the server answers 401
//!
//! ## Module Structure
//!
//! - [`cli`]: Command-line interface definitions using clap
//! - [`api`]: Adaptive client, transport and resource wrappers
//! - [`auth`]: Token storage (system keyring or memory)
//! - [`config`]: Configuration file management
//! - [`context`]: Builds the client and output writer for a command
//! - [`output`]: Table and JSON output
//! - [`interactive`]: Prompts and confirmations
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use scribe_cli::api::{HttpTransport, ScribeClient};
//! use scribe_cli::auth::MemoryTokenStore;
//!
//! # async fn demo() -> Result<(), scribe_cli::api::ApiError> {
//! let transport = HttpTransport::new("http://localhost:8000", std::time::Duration::from_secs(30))?;
//! let client = ScribeClient::new(Arc::new(transport), Arc::new(MemoryTokenStore::new()));
//!
//! let fills = client.form_fills().list().await?;
//! println!("{}", fills.body);
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions.
///
/// Each command module handles parsing and execution of its own subcommands.
pub mod cli;

/// The adaptive API client.
///
/// Prefix resolution, request and response interception, per-family
/// fallback cascades and the typed resource wrappers built on them.
pub mod api;

/// Bearer token storage.
pub mod auth;

/// Configuration file management.
///
/// Stored in platform-specific locations:
/// - Linux: `~/.config/scribe/config.toml`
/// - macOS: `~/Library/Application Support/scribe/config.toml`
/// - Windows: `%APPDATA%\scribe\config.toml`
pub mod config;

/// Per-invocation wiring of configuration, client and output.
pub mod context;

/// Output formatting (table and JSON).
pub mod output;

/// Interactive terminal prompts.
pub mod interactive;

pub use api::{ApiError, ScribeClient};
pub use cli::Cli;
pub use config::Config;
pub use context::AppContext;

/// Name of the CLI binary, also used for the config directory.
pub const APP_NAME: &str = "scribe";

/// Crate version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// # Exit Code Ranges
///
/// - `0`: Success
/// - `1-3`: General errors and usage issues
/// - `4-7`: Authentication-related issues
/// - `8-15`: Resource-related issues
/// - `16-31`: Server capability issues
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error. Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Authentication required or failed.
    ///
    /// The stored token has been cleared. Run `scribe auth login`.
    pub const AUTH_ERROR: i32 = 4;

    /// The requested item does not exist under any route prefix.
    pub const NOT_FOUND: i32 = 8;

    /// The server has none of the known routes for a resource family.
    pub const UNAVAILABLE: i32 = 16;
}

/// Maps an error to the process exit code.
///
/// Anything that is not an [`ApiError`] with a dedicated code exits with
/// [`exit_codes::ERROR`].
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<ApiError>() {
        Some(ApiError::Unauthorized { .. }) => exit_codes::AUTH_ERROR,
        Some(ApiError::NotFound { .. }) => exit_codes::NOT_FOUND,
        Some(ApiError::FamilyRouteUnavailable { .. }) => exit_codes::UNAVAILABLE,
        _ => exit_codes::ERROR,
    }
}
