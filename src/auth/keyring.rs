//
//  scribe-cli
//  auth/keyring.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Secure Token Storage
//!
//! Stores the Scribe bearer token in the platform's native keyring:
//!
//! - **macOS**: Keychain Services
//! - **Linux**: Secret Service API (GNOME Keyring, KWallet)
//! - **Windows**: Windows Credential Manager
//!
//! ## Storage Model
//!
//! - **Service**: `scribe-cli`
//! - **Username/Key**: the Scribe host (e.g. `scribe.example.com`)
//! - **Password/Value**: the bearer token
//!
//! ## Example
//!
//! ```rust,no_run
//! use scribe_cli::auth::{KeyringTokenStore, TokenStore};
//!
//! fn remember(token: &str) -> anyhow::Result<()> {
//!     let store = KeyringTokenStore::for_host("scribe.example.com");
//!     store.store(token)?;
//!     assert!(store.get()?.is_some());
//!     Ok(())
//! }
//! ```

use anyhow::Result;
use keyring::Entry;

use super::TokenStore;

/// The service name identifying this application in the system keyring.
const SERVICE_NAME: &str = "scribe-cli";

/// [`TokenStore`] backed by the system keyring, scoped to one host.
///
/// # Notes
///
/// - The keyring may require user interaction (password, biometrics) on first access.
/// - Entries persist across application restarts and system reboots.
/// - On Linux, a secret service daemon (GNOME Keyring, KWallet) must be running.
#[derive(Debug, Clone)]
pub struct KeyringTokenStore {
    service: String,
    host: String,
}

impl KeyringTokenStore {
    /// Creates a store for the given host.
    ///
    /// No keyring access occurs during construction.
    ///
    /// # Parameters
    ///
    /// - `host`: The normalized Scribe host used as the entry key
    ///   (see [`normalize_host`](crate::config::normalize_host)).
    pub fn for_host(host: impl Into<String>) -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
            host: host.into(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    fn entry(&self) -> Result<Entry> {
        Ok(Entry::new(&self.service, &self.host)?)
    }
}

impl TokenStore for KeyringTokenStore {
    /// Returns `Ok(None)` for a missing entry rather than an error.
    fn get(&self) -> Result<Option<String>> {
        match self.entry()?.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Existing entries for the same host are silently replaced.
    fn store(&self, token: &str) -> Result<()> {
        self.entry()?.set_password(token)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match self.entry()?.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()), // Already deleted
            Err(e) => Err(e.into()),
        }
    }
}
