//
//  scribe-cli
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Adaptive HTTP Client for the Scribe API
//!
//! [`ScribeClient`] sits between the resource wrappers and the [`Transport`].
//! Every call passes through two interceptors:
//!
//! ## Request interceptor
//!
//! - A root-relative path without a prefix (`/transcriptions`) is moved under
//!   the last prefix the backend accepted (`/api/transcriptions`).
//! - The bearer token, when one is stored, is attached as `Authorization`.
//!
//! ## Response interceptor
//!
//! ```text
//! 2xx                       -> remember the prefix of the path that worked -> return
//! 401                       -> clear the stored token -> propagate
//! 404, untried prefixes left -> rebuild the path under the next prefix -> dispatch again
//! 404, all prefixes tried    -> propagate the first 404
//! anything else             -> propagate
//! ```
//!
//! A logical call therefore makes at most three round trips, and never sends
//! the same path twice.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use tracing::{debug, warn};

use super::common::{ApiError, ApiResponse, ApiResult};
use super::prefix::{classify, rebuild, retry_order, strip, PrefixCandidate, PrefixState};
use super::resources::{AuthApi, FormFillsApi, OcrDocumentsApi, TranscriptionsApi, WorkProfilesApi};
use super::transport::{ApiRequest, HttpTransport, OutgoingRequest, Transport};
use crate::auth::TokenStore;
use crate::config::ApiConfig;

/// Default timeout applied to file uploads when none is configured.
pub const DEFAULT_UPLOAD_TIMEOUT: Duration = Duration::from_secs(300);

/// The adaptive client.
///
/// Cloning is cheap; clones share the transport, the token store and the
/// memoized prefix.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use scribe_cli::api::ScribeClient;
/// use scribe_cli::auth::KeyringTokenStore;
/// use scribe_cli::config::ApiConfig;
///
/// let config = ApiConfig::default();
/// let tokens = Arc::new(KeyringTokenStore::for_host(config.host()));
/// let client = ScribeClient::from_config(&config, tokens)?;
/// # Ok::<(), scribe_cli::api::ApiError>(())
/// ```
#[derive(Clone)]
pub struct ScribeClient {
    transport: Arc<dyn Transport>,
    tokens: Arc<dyn TokenStore>,
    prefix: Arc<PrefixState>,
    upload_timeout: Duration,
}

impl ScribeClient {
    /// Creates a client over an arbitrary transport with a fresh prefix memo.
    pub fn new(transport: Arc<dyn Transport>, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            transport,
            tokens,
            prefix: Arc::new(PrefixState::new()),
            upload_timeout: DEFAULT_UPLOAD_TIMEOUT,
        }
    }

    /// Creates a reqwest-backed client from configuration.
    ///
    /// # Errors
    ///
    /// Fails if the configured base URL is invalid or the HTTP client cannot
    /// be built.
    pub fn from_config(config: &ApiConfig, tokens: Arc<dyn TokenStore>) -> ApiResult<Self> {
        let transport = HttpTransport::new(&config.base_url, config.timeout())?;
        Ok(Self::new(Arc::new(transport), tokens).with_upload_timeout(config.upload_timeout()))
    }

    /// Shares an existing prefix memo, e.g. one owned by the application.
    pub fn with_prefix_state(mut self, prefix: Arc<PrefixState>) -> Self {
        self.prefix = prefix;
        self
    }

    pub fn with_upload_timeout(mut self, timeout: Duration) -> Self {
        self.upload_timeout = timeout;
        self
    }

    pub fn prefix_state(&self) -> &Arc<PrefixState> {
        &self.prefix
    }

    pub fn current_prefix(&self) -> PrefixCandidate {
        self.prefix.get()
    }

    pub fn upload_timeout(&self) -> Duration {
        self.upload_timeout
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    // -------------------------------------------------------------------------
    // Resource accessors
    // -------------------------------------------------------------------------

    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.clone())
    }

    pub fn form_fills(&self) -> FormFillsApi {
        FormFillsApi::new(self.clone())
    }

    pub fn work_profiles(&self) -> WorkProfilesApi {
        WorkProfilesApi::new(self.clone())
    }

    pub fn ocr_documents(&self) -> OcrDocumentsApi {
        OcrDocumentsApi::new(self.clone())
    }

    pub fn transcriptions(&self) -> TranscriptionsApi {
        TranscriptionsApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Interceptor chain
    // -------------------------------------------------------------------------

    /// Executes one logical call, cascading through path prefixes on 404.
    ///
    /// # Errors
    ///
    /// - [`ApiError::NotFound`] once every prefix has returned 404 (the error
    ///   of the first attempt), or immediately when prefix fallback is disabled
    /// - [`ApiError::Unauthorized`] on 401, after the stored token was cleared
    /// - [`ApiError::Status`] for any other non-success status
    /// - [`ApiError::Transport`] when no response was received
    pub async fn execute(&self, request: &ApiRequest) -> ApiResult<ApiResponse> {
        self.execute_at(request, self.resolve_path(&request.path)).await
    }

    /// Runs the response interceptor chain for an already resolved path.
    ///
    /// The memoized prefix is not applied again; `path` is dispatched as is.
    pub(crate) async fn execute_at(
        &self,
        request: &ApiRequest,
        mut path: String,
    ) -> ApiResult<ApiResponse> {
        let original = match self.dispatch(request, &path).await {
            Ok(response) => return Ok(response),
            Err(err) => err,
        };

        if !original.is_not_found() || !request.prefix_fallback || !path.starts_with('/') {
            return Err(original);
        }

        let mut current = classify(&path);
        let mut tried = BTreeSet::from([current]);

        while let Some(next) = retry_order(current)
            .into_iter()
            .find(|candidate| !tried.contains(candidate))
        {
            tried.insert(next);
            let retry_path = rebuild(&strip(&path), next);
            debug!(
                method = %request.method,
                from = %path,
                to = %retry_path,
                "404, retrying under another prefix"
            );
            path = retry_path;

            match self.dispatch(request, &path).await {
                Err(err) if err.is_not_found() => current = next,
                other => return other,
            }
        }

        debug!(
            method = %request.method,
            path = %request.path,
            "every path prefix returned 404"
        );
        Err(original)
    }

    /// Request interceptor, path half: applies the memoized prefix.
    ///
    /// Only root-relative paths without an explicit prefix are rewritten.
    pub fn resolve_path(&self, path: &str) -> String {
        let memo = self.prefix.get();
        if path.starts_with('/')
            && memo != PrefixCandidate::None
            && classify(path) == PrefixCandidate::None
        {
            rebuild(path, memo)
        } else {
            path.to_string()
        }
    }

    /// Request interceptor, header half: attaches the bearer token.
    ///
    /// A failing token store is treated as "no token" so that public
    /// endpoints keep working.
    fn authorize(&self, headers: &HeaderMap) -> HeaderMap {
        let mut headers = headers.clone();

        let token = match self.tokens.get() {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "could not read stored token, sending without one");
                None
            }
        };

        if let Some(token) = token {
            match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => warn!("stored token is not a valid header value, sending without one"),
            }
        }

        headers
    }

    /// One attempt: transport call plus response interception, no retries.
    async fn dispatch(&self, request: &ApiRequest, path: &str) -> ApiResult<ApiResponse> {
        let outgoing = OutgoingRequest {
            method: request.method.clone(),
            path: path.to_string(),
            query: request.query.clone(),
            headers: self.authorize(&request.headers),
            body: request.body.clone(),
            timeout: request.timeout,
        };

        debug!(method = %outgoing.method, path = %path, "sending request");
        let raw = self.transport.send(&outgoing).await.map_err(|e| {
            warn!(method = %outgoing.method, path = %path, error = %e, "transport failure");
            e
        })?;

        if raw.is_success() {
            self.remember_prefix(path);
            return Ok(ApiResponse::from_text(raw.status, &raw.body));
        }

        debug!(method = %outgoing.method, path = %path, status = raw.status, "request failed");
        let err = ApiError::from_status(raw.status, path, &raw.body);
        if err.is_unauthorized() {
            self.discard_token();
        }
        Err(err)
    }

    /// Records the prefix of a path that just worked, including "no prefix".
    fn remember_prefix(&self, path: &str) {
        if !path.starts_with('/') {
            return;
        }
        let candidate = classify(path);
        if self.prefix.get() != candidate {
            debug!(prefix = %candidate, "backend prefix updated");
        }
        self.prefix.set(candidate);
    }

    fn discard_token(&self) {
        debug!("401 received, clearing stored token");
        if let Err(e) = self.tokens.clear() {
            warn!(error = %e, "could not clear stored token");
        }
    }
}
