//
//  scribe-cli
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Scribe authenticates every call with a single bearer token obtained from
//! the login endpoint. This module stores that token and hands it to the
//! request interceptor.
//!
//! ## Token Stores
//!
//! - [`KeyringTokenStore`]: the system keyring (Keychain, Secret Service,
//!   Credential Manager), one entry per Scribe host
//! - [`MemoryTokenStore`]: process-local storage for tests and `--no-keyring` sessions
//!
//! The client only ever reads and clears the token. A 401 response clears it;
//! there is no refresh flow, the user logs in again.
//!
//! ## Example
//!
//! ```rust
//! use scribe_cli::auth::{MemoryTokenStore, TokenStore};
//!
//! let store = MemoryTokenStore::with_token("secret");
//! assert_eq!(store.get().unwrap(), Some("secret".to_string()));
//!
//! store.clear().unwrap();
//! assert_eq!(store.get().unwrap(), None);
//! ```

mod keyring;

pub use keyring::*;

use std::sync::Mutex;

use anyhow::Result;

/// Key-value storage for the bearer token of one Scribe host.
pub trait TokenStore: Send + Sync {
    /// Returns the stored token, or `None` when logged out.
    fn get(&self) -> Result<Option<String>>;

    /// Replaces the stored token.
    fn store(&self, token: &str) -> Result<()>;

    /// Removes the stored token. Clearing an empty store succeeds.
    fn clear(&self) -> Result<()>;
}

/// In-memory [`TokenStore`].
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }

    fn slot(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>> {
        self.token
            .lock()
            .map_err(|_| anyhow::anyhow!("token store lock poisoned"))
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Result<Option<String>> {
        Ok(self.slot()?.clone())
    }

    fn store(&self, token: &str) -> Result<()> {
        *self.slot()? = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot()? = None;
        Ok(())
    }
}

/// Masks a token for display, keeping the first and last four characters.
///
/// ```rust
/// use scribe_cli::auth::mask_token;
///
/// assert_eq!(mask_token("abcd1234efgh5678"), "abcd********5678");
/// assert_eq!(mask_token("short"), "*****");
/// ```
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}{}", head, "*".repeat(chars.len() - 8), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.get().unwrap(), None);

        store.store("t1").unwrap();
        assert_eq!(store.get().unwrap(), Some("t1".to_string()));

        store.store("t2").unwrap();
        assert_eq!(store.get().unwrap(), Some("t2".to_string()));

        store.clear().unwrap();
        store.clear().unwrap();
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token(""), "");
        assert_eq!(mask_token("123456789"), "1234*6789");
    }
}
