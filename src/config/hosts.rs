//
//  scribe-cli
//  config/hosts.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Host naming helpers.
//!
//! Tokens are stored per host, so `https://Scribe.example.com/` and
//! `scribe.example.com` must map to the same keyring entry.

use url::Url;

/// Backend used when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Environment variable overriding the configured base URL.
pub const BASE_URL_ENV: &str = "SCRIBE_BASE_URL";

/// Reduces a base URL or bare hostname to `host[:port]`, lowercased.
///
/// # Example
///
/// ```rust
/// use scribe_cli::config::normalize_host;
///
/// assert_eq!(normalize_host("https://Scribe.Example.com/api/"), "scribe.example.com");
/// assert_eq!(normalize_host("http://localhost:8000"), "localhost:8000");
/// assert_eq!(normalize_host("scribe.example.com"), "scribe.example.com");
/// ```
pub fn normalize_host(base_url: &str) -> String {
    let trimmed = base_url.trim();

    if let Ok(url) = Url::parse(trimmed) {
        if let Some(host) = url.host_str() {
            return match url.port() {
                Some(port) => format!("{}:{}", host, port).to_lowercase(),
                None => host.to_lowercase(),
            };
        }
    }

    trimmed
        .split('/')
        .next()
        .unwrap_or_default()
        .to_lowercase()
}
