//
//  scribe-cli
//  api/prefix.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Route Prefix Resolution
//!
//! Scribe deployments disagree on where the REST routes live. Some serve them
//! at the root (`/form-fills`), some under `/api` (`/api/form-fills`), and the
//! newer ones under `/api/v1` (`/api/v1/form-fills`). This module knows how to
//! recognise each layout, move a path from one layout to another, and remember
//! which layout the backend last accepted.
//!
//! ## Layouts
//!
//! | Candidate | Prefix | Example |
//! |-----------|--------|---------|
//! | [`PrefixCandidate::None`] | *(none)* | `/transcriptions` |
//! | [`PrefixCandidate::Api`] | `/api` | `/api/transcriptions` |
//! | [`PrefixCandidate::ApiV1`] | `/api/v1` | `/api/v1/transcriptions` |
//!
//! ## Example
//!
//! ```rust
//! use scribe_cli::api::prefix::{classify, rebuild, strip, PrefixCandidate};
//!
//! let path = "/api/v1/form-fills/42";
//! assert_eq!(classify(path), PrefixCandidate::ApiV1);
//!
//! let bare = strip(path);
//! assert_eq!(bare, "/form-fills/42");
//! assert_eq!(rebuild(&bare, PrefixCandidate::Api), "/api/form-fills/42");
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

const API_PREFIX: &str = "/api";
const API_V1_PREFIX: &str = "/api/v1";

/// A URL path prefix family a backend deployment may require.
///
/// The declaration order is the order used when reporting candidates; the
/// order in which they are *retried* is defined by [`retry_order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum PrefixCandidate {
    /// Routes are served from the root of the origin.
    #[default]
    None,
    /// Routes are served under `/api`.
    Api,
    /// Routes are served under `/api/v1`.
    ApiV1,
}

impl PrefixCandidate {
    /// All known candidates.
    pub const ALL: [PrefixCandidate; 3] = [Self::None, Self::Api, Self::ApiV1];

    /// Returns the literal path prefix, or an empty string for [`PrefixCandidate::None`].
    pub fn as_prefix(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Api => API_PREFIX,
            Self::ApiV1 => API_V1_PREFIX,
        }
    }

    fn to_u8(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Api => 1,
            Self::ApiV1 => 2,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Api,
            2 => Self::ApiV1,
            _ => Self::None,
        }
    }
}

impl fmt::Display for PrefixCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Api => write!(f, "/api"),
            Self::ApiV1 => write!(f, "/api/v1"),
        }
    }
}

/// Adds a leading slash when missing and maps empty input to `/`.
///
/// # Example
///
/// ```rust
/// use scribe_cli::api::prefix::normalize;
///
/// assert_eq!(normalize(""), "/");
/// assert_eq!(normalize("form-fills"), "/form-fills");
/// assert_eq!(normalize("/api"), "/api");
/// ```
pub fn normalize(path: &str) -> String {
    if path.is_empty() {
        "/".to_string()
    } else if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

fn has_prefix(path: &str, prefix: &str) -> bool {
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Determines which prefix family a path belongs to.
///
/// The path is normalized first (see [`normalize`]). `/api/v1` wins over
/// `/api` because it is the more specific match.
///
/// # Parameters
///
/// * `path` - The request path, with or without a leading slash
///
/// # Returns
///
/// * [`PrefixCandidate::ApiV1`] for `/api/v1` and anything under `/api/v1/`
/// * [`PrefixCandidate::Api`] for `/api` and anything under `/api/`
/// * [`PrefixCandidate::None`] otherwise (including `/apis` and `/api-docs`)
///
/// # Example
///
/// ```rust
/// use scribe_cli::api::prefix::{classify, PrefixCandidate};
///
/// assert_eq!(classify("/api/v1/ocr-documents"), PrefixCandidate::ApiV1);
/// assert_eq!(classify("api/form-fills"), PrefixCandidate::Api);
/// assert_eq!(classify("/api-docs"), PrefixCandidate::None);
/// assert_eq!(classify(""), PrefixCandidate::None);
/// ```
pub fn classify(path: &str) -> PrefixCandidate {
    let path = normalize(path);
    if has_prefix(&path, API_V1_PREFIX) {
        PrefixCandidate::ApiV1
    } else if has_prefix(&path, API_PREFIX) {
        PrefixCandidate::Api
    } else {
        PrefixCandidate::None
    }
}

/// Removes a detected `/api/v1` or `/api` prefix.
///
/// The bare prefix itself (`/api`, `/api/v1`) strips to `/`. Paths without a
/// known prefix are returned normalized but otherwise unchanged.
pub fn strip(path: &str) -> String {
    let path = normalize(path);
    let prefix = classify(&path).as_prefix();
    if prefix.is_empty() {
        return path;
    }

    match &path[prefix.len()..] {
        "" => "/".to_string(),
        rest => rest.to_string(),
    }
}

/// Places a prefix-less path under the given prefix family.
///
/// `/` rebuilds to exactly `<prefix>/` rather than a doubled slash, and
/// [`PrefixCandidate::None`] leaves the (normalized) path untouched.
///
/// # Example
///
/// ```rust
/// use scribe_cli::api::prefix::{rebuild, PrefixCandidate};
///
/// assert_eq!(rebuild("/", PrefixCandidate::Api), "/api/");
/// assert_eq!(rebuild("/form-fills", PrefixCandidate::ApiV1), "/api/v1/form-fills");
/// assert_eq!(rebuild("/form-fills", PrefixCandidate::None), "/form-fills");
/// ```
pub fn rebuild(stripped: &str, candidate: PrefixCandidate) -> String {
    let path = normalize(stripped);
    match candidate {
        PrefixCandidate::None => path,
        _ if path == "/" => format!("{}/", candidate.as_prefix()),
        _ => format!("{}{}", candidate.as_prefix(), path),
    }
}

/// The order in which the remaining prefixes are tried after `current` fails.
///
/// This ordering mirrors the deployment shapes seen in the wild and must not
/// be changed without checking the backend's routing table:
///
/// | Current | Then try |
/// |---------|----------|
/// | `/api/v1` | `/api`, none |
/// | `/api` | `/api/v1`, none |
/// | none | `/api`, `/api/v1` |
pub fn retry_order(current: PrefixCandidate) -> [PrefixCandidate; 2] {
    match current {
        PrefixCandidate::ApiV1 => [PrefixCandidate::Api, PrefixCandidate::None],
        PrefixCandidate::Api => [PrefixCandidate::ApiV1, PrefixCandidate::None],
        PrefixCandidate::None => [PrefixCandidate::Api, PrefixCandidate::ApiV1],
    }
}

/// The most recently confirmed working prefix.
///
/// One instance is created at startup and shared (via `Arc`) by every client
/// talking to the same origin. Reads and writes are relaxed atomics: two calls
/// racing to record different prefixes converge on whichever the backend
/// accepts, and a stale read only costs one extra round trip.
///
/// # Example
///
/// ```rust
/// use scribe_cli::api::prefix::{PrefixCandidate, PrefixState};
///
/// let state = PrefixState::new();
/// assert_eq!(state.get(), PrefixCandidate::None);
///
/// state.set(PrefixCandidate::ApiV1);
/// assert_eq!(state.get(), PrefixCandidate::ApiV1);
///
/// state.reset();
/// assert_eq!(state.get(), PrefixCandidate::None);
/// ```
#[derive(Debug, Default)]
pub struct PrefixState {
    current: AtomicU8,
}

impl PrefixState {
    /// Creates a state holding [`PrefixCandidate::None`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state seeded with a known prefix.
    pub fn with(candidate: PrefixCandidate) -> Self {
        Self {
            current: AtomicU8::new(candidate.to_u8()),
        }
    }

    pub fn get(&self) -> PrefixCandidate {
        PrefixCandidate::from_u8(self.current.load(Ordering::Relaxed))
    }

    pub fn set(&self, candidate: PrefixCandidate) {
        self.current.store(candidate.to_u8(), Ordering::Relaxed);
    }

    /// Forgets the memoized prefix.
    pub fn reset(&self) {
        self.set(PrefixCandidate::None);
    }
}
