//
//  scribe-cli
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module talks to a Scribe backend whose route layout is not known in
//! advance. Deployments differ in three ways:
//!
//! - **Path prefix**: routes may live at `/`, `/api` or `/api/v1`
//! - **Collection spelling**: `/form-fills` vs `/form_fills` vs `/formfills`
//! - **Field naming**: `field_values` vs `fieldValues` vs `answers`
//!
//! ## Architecture
//!
//! - [`transport`]: one HTTP request, no interpretation
//! - [`prefix`]: prefix classification and the memoized working prefix
//! - [`client`]: [`ScribeClient`], the interceptor chain and prefix fallback
//! - [`cascade`]: resource-family route and field-shape cascades
//! - [`resources`]: typed wrappers per resource
//! - [`common`]: errors and the normalized response
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use scribe_cli::api::{decode_list, FormFill, ScribeClient};
//! use scribe_cli::auth::MemoryTokenStore;
//! use scribe_cli::config::ApiConfig;
//!
//! # async fn run() -> Result<(), scribe_cli::api::ApiError> {
//! let config = ApiConfig::default();
//! let client = ScribeClient::from_config(&config, Arc::new(MemoryTokenStore::new()))?;
//!
//! let response = client.form_fills().list().await?;
//! let fills: Vec<FormFill> = decode_list(&response)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Internal retries never surface; what the caller sees is the outcome that
//! ended the strategy:
//!
//! - `NotFound`: 404 after every prefix was tried
//! - `FamilyRouteUnavailable`: no spelling of a resource family exists
//! - `Unauthorized`: 401, stored token already cleared
//! - `Status`: any other non-success response

pub mod cascade;
pub mod client;
pub mod common;
pub mod prefix;
pub mod resources;
pub mod transport;

#[cfg(test)]
pub(crate) mod test_support;

pub use cascade::{CascadeOutcome, FieldShape, ResourceFamily};
pub use client::ScribeClient;
pub use common::{ApiError, ApiResponse, ApiResult};
pub use prefix::{PrefixCandidate, PrefixState};
pub use resources::*;
pub use transport::{
    ApiRequest, HttpTransport, OutgoingRequest, RawResponse, Transport, TransportError,
};
