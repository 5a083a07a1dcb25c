//
//  scribe-cli
//  context/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Command Context
//!
//! Every command that talks to the backend needs the same three things: the
//! effective configuration, a client wired to the right token store, and an
//! output writer. [`AppContext::resolve`] builds them from the global
//! options.
//!
//! ## Resolution Order
//!
//! 1. `--base-url`
//! 2. `SCRIBE_BASE_URL`
//! 3. `[api] base_url` in the config file
//! 4. `http://localhost:8000`
//!
//! The output format is `--json` if given, otherwise `[core] output`.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use crate::api::ScribeClient;
use crate::auth::{KeyringTokenStore, MemoryTokenStore, TokenStore};
use crate::cli::GlobalOptions;
use crate::config::Config;
use crate::output::{OutputFormat, OutputWriter};

/// Everything a command needs to run against one backend.
pub struct AppContext {
    pub config: Config,
    pub client: ScribeClient,
    pub output: OutputWriter,
}

impl AppContext {
    pub fn resolve(global: &GlobalOptions) -> Result<Self> {
        let config = Config::load()?.with_overrides(global.base_url.as_deref());
        Self::from_config(config, global)
    }

    /// Builds a context from an already loaded configuration.
    pub fn from_config(config: Config, global: &GlobalOptions) -> Result<Self> {
        let tokens = token_store(&config, global.no_keyring);
        let client = ScribeClient::from_config(&config.api, tokens)
            .with_context(|| format!("Could not create a client for {}", config.api.base_url))?;

        debug!(base_url = %config.api.base_url, "resolved backend");
        Ok(Self {
            output: OutputWriter::new(output_format(&config, global)),
            config,
            client,
        })
    }

    pub fn host(&self) -> String {
        self.config.api.host()
    }
}

/// The keyring entry for the configured host, or a throwaway in-memory store.
pub fn token_store(config: &Config, no_keyring: bool) -> Arc<dyn TokenStore> {
    if no_keyring {
        Arc::new(MemoryTokenStore::new())
    } else {
        Arc::new(KeyringTokenStore::for_host(config.api.host()))
    }
}

/// `--json` wins; otherwise the configured format, falling back to tables.
pub fn output_format(config: &Config, global: &GlobalOptions) -> OutputFormat {
    if global.json {
        return OutputFormat::Json;
    }
    config.core.output.parse().unwrap_or_default()
}
