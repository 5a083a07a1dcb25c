//
//  scribe-cli
//  api/cascade.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Resource Family Cascades
//!
//! Some Scribe deployments spell the same collection differently
//! (`/form-fills`, `/form_fills`, `/formfills`), nest sub-resources under
//! different suffixes, and expect different field names in request bodies.
//! A [`ResourceFamily`] lists the candidate spellings in the order they are
//! tried; a [`FieldShape`] describes one way of naming the body fields.
//!
//! ## Route cascade
//!
//! ```text
//! for suffix in suffixes:
//!     for base in family.bases:
//!         404   -> next candidate
//!         other -> done (success or error, returned as-is)
//! all 404 -> same sweep under each remaining prefix, in retry order
//! all 404 under every prefix -> FamilyRouteUnavailable
//! ```
//!
//! ## Shape cascade
//!
//! Writes first locate the route using the first shape. If the located
//! route answers 400 or 422, the remaining shapes are sent to that same path
//! until one is accepted.
//!
//! Each attempt is dispatched once, with the bearer token attached and no
//! per-request prefix retry; the prefix sweep above replaces it. Only the
//! prefix is remembered between calls, never the winning spelling.

use std::iter;

use reqwest::Method;
use serde_json::{Map, Value};
use tracing::debug;

use super::client::ScribeClient;
use super::common::{ApiError, ApiResponse, ApiResult};
use super::prefix::{rebuild, retry_order};
use super::transport::ApiRequest;

/// A resource collection with several possible base paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceFamily {
    /// Human-readable name used in errors and logs
    pub name: &'static str,
    /// Candidate base paths, tried in order
    pub bases: &'static [&'static str],
}

pub const FORM_FILLS: ResourceFamily = ResourceFamily {
    name: "form fills",
    bases: &["/form-fills", "/form_fills", "/formfills"],
};

pub const WORK_PROFILES: ResourceFamily = ResourceFamily {
    name: "work profiles",
    bases: &["/work-profiles", "/work_profiles", "/workprofiles"],
};

pub const OCR_DOCUMENTS: ResourceFamily = ResourceFamily {
    name: "ocr documents",
    bases: &["/ocr-documents", "/ocr/documents"],
};

/// One naming convention for request body fields.
///
/// Keys without a rename are sent unchanged.
///
/// # Example
///
/// ```rust
/// use scribe_cli::api::cascade::FieldShape;
/// use serde_json::json;
///
/// const CAMEL: FieldShape = FieldShape {
///     name: "camel",
///     renames: &[("field_values", "fieldValues")],
/// };
///
/// let fields = json!({"title": "Lease", "field_values": {}});
/// let body = CAMEL.apply(fields.as_object().unwrap());
/// assert_eq!(body, json!({"title": "Lease", "fieldValues": {}}));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldShape {
    pub name: &'static str,
    /// `(logical, wire)` pairs
    pub renames: &'static [(&'static str, &'static str)],
}

impl FieldShape {
    /// Renames the logical fields into this shape's wire names.
    pub fn apply(&self, fields: &Map<String, Value>) -> Value {
        let body: Map<String, Value> = fields
            .iter()
            .map(|(key, value)| (self.wire_name(key).to_string(), value.clone()))
            .collect();
        Value::Object(body)
    }

    fn wire_name<'a>(&self, logical: &'a str) -> &'a str {
        self.renames
            .iter()
            .find(|(from, _)| *from == logical)
            .map(|(_, to)| *to)
            .unwrap_or(logical)
    }
}

/// Where a route cascade stopped and what it got there.
///
/// `result` is never a 404; those move the cascade on.
#[derive(Debug)]
pub struct CascadeOutcome {
    /// The dispatched path, prefix included, that produced `result`
    pub path: String,
    pub result: ApiResult<ApiResponse>,
}

impl ScribeClient {
    /// Probes `family`'s candidate routes until one answers with anything
    /// other than 404.
    ///
    /// Within one prefix, suffixes come first: every base is tried with the first
    /// suffix before any base is tried with the second. The first sweep runs
    /// under the memoized prefix. When it ends with every route at 404, the
    /// same sweep is repeated under the remaining prefixes in
    /// [`retry_order`]. A success there updates the memo.
    ///
    /// # Parameters
    ///
    /// * `family` - The candidate base paths
    /// * `suffixes` - Route suffixes appended to each base (`""`, `"/42"`, ...)
    /// * `template` - Method, body, query and headers; its path is ignored
    ///
    /// # Errors
    ///
    /// [`ApiError::FamilyRouteUnavailable`] when every candidate returned 404
    /// under every prefix. Any other error ends up in
    /// [`CascadeOutcome::result`].
    pub async fn cascade<S: AsRef<str>>(
        &self,
        family: &ResourceFamily,
        suffixes: &[S],
        template: &ApiRequest,
    ) -> ApiResult<CascadeOutcome> {
        let memo = self.current_prefix();
        let mut tried = Vec::new();

        for prefix in iter::once(memo).chain(retry_order(memo)) {
            if prefix != memo {
                debug!(
                    family = family.name,
                    prefix = %prefix,
                    "sweeping routes under another prefix"
                );
            }

            for suffix in suffixes {
                for base in family.bases {
                    let path = rebuild(&format!("{}{}", base, suffix.as_ref()), prefix);
                    tried.push(path.clone());

                    let attempt = template.with_path(path.as_str()).without_prefix_fallback();
                    match self.execute_at(&attempt, path.clone()).await {
                        Err(e) if e.is_not_found() => {
                            debug!(family = family.name, path = %path, "route not found");
                        }
                        result => return Ok(CascadeOutcome { path, result }),
                    }
                }
            }
        }

        debug!(family = family.name, tried = ?tried, "no candidate route exists");
        Err(ApiError::FamilyRouteUnavailable {
            family: family.name.to_string(),
            tried,
        })
    }

    /// Route cascade that returns the response directly.
    pub async fn family_call<S: AsRef<str>>(
        &self,
        family: &ResourceFamily,
        suffixes: &[S],
        template: &ApiRequest,
    ) -> ApiResult<ApiResponse> {
        self.cascade(family, suffixes, template).await?.result
    }

    /// Sends `fields` to a family route, cascading through both routes and
    /// field shapes.
    ///
    /// # Errors
    ///
    /// - [`ApiError::FamilyRouteUnavailable`] if no route exists
    /// - the last shape rejection if every shape was refused
    /// - [`ApiError::InvalidRequest`] if `shapes` is empty
    pub async fn family_write<S: AsRef<str>>(
        &self,
        family: &ResourceFamily,
        suffixes: &[S],
        method: Method,
        fields: &Map<String, Value>,
        shapes: &[FieldShape],
    ) -> ApiResult<ApiResponse> {
        let Some((first, rest)) = shapes.split_first() else {
            return Err(ApiError::InvalidRequest("no field shapes given".to_string()));
        };

        let template = ApiRequest::new(method, "").json_body(first.apply(fields));
        let CascadeOutcome { path, result } = self.cascade(family, suffixes, &template).await?;

        let mut last = match result {
            Err(e) if e.is_shape_rejection() => e,
            other => return other,
        };

        for shape in rest {
            debug!(
                family = family.name,
                path = %path,
                status = ?last.status(),
                shape = shape.name,
                "payload rejected, trying next field shape"
            );
            let attempt = template
                .with_path(path.as_str())
                .without_prefix_fallback()
                .json_body(shape.apply(fields));

            match self.execute_at(&attempt, path.clone()).await {
                Err(e) if e.is_shape_rejection() => last = e,
                other => return other,
            }
        }

        Err(last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::prefix::PrefixCandidate;
    use crate::api::test_support::{client_with, ScriptedTransport};
    use crate::api::transport::RawResponse;
    use serde_json::json;

    const WIDGETS: ResourceFamily = ResourceFamily {
        name: "widgets",
        bases: &["/a", "/b", "/c"],
    };

    const SNAKE: FieldShape = FieldShape {
        name: "snake",
        renames: &[],
    };

    const CAMEL: FieldShape = FieldShape {
        name: "camel",
        renames: &[("full_name", "fullName")],
    };

    const LEGACY: FieldShape = FieldShape {
        name: "legacy",
        renames: &[("full_name", "name")],
    };

    fn fields() -> Map<String, Value> {
        json!({"full_name": "Ada", "company": "Engines"})
            .as_object()
            .cloned()
            .unwrap()
    }

    #[tokio::test]
    async fn test_third_candidate_wins_after_two_not_found() {
        let transport = ScriptedTransport::routes(|req| match req.path.as_str() {
            "/c" => RawResponse::new(200, r#"{"data":[]}"#),
            _ => RawResponse::new(404, ""),
        });
        let client = client_with(transport.clone());

        let outcome = client
            .cascade(&WIDGETS, &[""], &ApiRequest::get(""))
            .await
            .unwrap();

        assert_eq!(outcome.path, "/c");
        assert_eq!(outcome.result.unwrap().body, json!({"data": []}));
        assert_eq!(transport.paths(), vec!["/a", "/b", "/c"]);
    }

    #[tokio::test]
    async fn test_all_not_found_is_family_unavailable() {
        let transport = ScriptedTransport::always(404, "");
        let client = client_with(transport.clone());

        let err = client
            .family_call(&WIDGETS, &["/1"], &ApiRequest::get(""))
            .await
            .unwrap_err();

        match err {
            ApiError::FamilyRouteUnavailable { family, tried } => {
                assert_eq!(family, "widgets");
                assert_eq!(
                    tried,
                    vec![
                        "/a/1",
                        "/b/1",
                        "/c/1",
                        "/api/a/1",
                        "/api/b/1",
                        "/api/c/1",
                        "/api/v1/a/1",
                        "/api/v1/b/1",
                        "/api/v1/c/1",
                    ]
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(transport.calls().len(), 9);
        assert_eq!(client.current_prefix(), PrefixCandidate::None);
    }

    #[tokio::test]
    async fn test_other_error_stops_the_cascade() {
        let transport = ScriptedTransport::routes(|req| match req.path.as_str() {
            "/a" => RawResponse::new(404, ""),
            _ => RawResponse::new(500, r#"{"message":"boom"}"#),
        });
        let client = client_with(transport.clone());

        let err = client
            .family_call(&WIDGETS, &[""], &ApiRequest::get(""))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(500));
        assert_eq!(transport.paths(), vec!["/a", "/b"]);
    }

    #[tokio::test]
    async fn test_suffixes_are_exhausted_across_bases_in_order() {
        let transport = ScriptedTransport::routes(|req| match req.path.as_str() {
            "/b/7/fields" => RawResponse::new(200, "{}"),
            _ => RawResponse::new(404, ""),
        });
        let client = client_with(transport.clone());

        let outcome = client
            .cascade(&WIDGETS, &["/7", "/7/fields"], &ApiRequest::patch(""))
            .await
            .unwrap();

        assert_eq!(outcome.path, "/b/7/fields");
        assert_eq!(
            transport.paths(),
            vec!["/a/7", "/b/7", "/c/7", "/a/7/fields", "/b/7/fields"]
        );
    }

    #[tokio::test]
    async fn test_memoized_prefix_is_swept_first() {
        let transport = ScriptedTransport::always(404, "");
        let client = client_with(transport.clone());
        client.prefix_state().set(PrefixCandidate::Api);

        let _ = client.family_call(&WIDGETS, &[""], &ApiRequest::get("")).await;

        assert_eq!(
            transport.paths(),
            vec![
                "/api/a",
                "/api/b",
                "/api/c",
                "/api/v1/a",
                "/api/v1/b",
                "/api/v1/c",
                "/a",
                "/b",
                "/c",
            ]
        );
        assert!(transport.calls().iter().all(|c| c.method == Method::GET));
    }

    #[tokio::test]
    async fn test_prefix_found_by_sweep_is_memoized() {
        let transport = ScriptedTransport::routes(|req| match req.path.as_str() {
            "/api/v1/b" => RawResponse::new(200, r#"{"data":[]}"#),
            _ => RawResponse::new(404, ""),
        });
        let client = client_with(transport.clone());

        let outcome = client
            .cascade(&WIDGETS, &[""], &ApiRequest::get(""))
            .await
            .unwrap();

        assert_eq!(outcome.path, "/api/v1/b");
        assert!(outcome.result.is_ok());
        assert_eq!(client.current_prefix(), PrefixCandidate::ApiV1);
        assert_eq!(transport.calls().len(), 8);

        // The next call starts under the discovered prefix
        client.family_call(&WIDGETS, &[""], &ApiRequest::get("")).await.unwrap();
        assert_eq!(transport.paths()[8..], ["/api/v1/a", "/api/v1/b"]);
    }

    #[tokio::test]
    async fn test_shapes_follow_route_found_under_other_prefix() {
        let transport = ScriptedTransport::routes(|req| {
            let body = req.body.clone().unwrap_or_default();
            match req.path.as_str() {
                "/api/c/1" if body.get("fullName").is_some() => RawResponse::new(200, "{}"),
                "/api/c/1" => RawResponse::new(422, ""),
                _ => RawResponse::new(404, ""),
            }
        });
        let client = client_with(transport.clone());

        client
            .family_write(&WIDGETS, &["/1"], Method::PATCH, &fields(), &[SNAKE, CAMEL])
            .await
            .unwrap();

        let paths = transport.paths();
        assert_eq!(paths.len(), 7);
        assert_eq!(paths[5..], ["/api/c/1", "/api/c/1"]);
        assert_eq!(client.current_prefix(), PrefixCandidate::Api);
    }

    #[tokio::test]
    async fn test_cascade_does_not_remember_the_winning_base() {
        let transport = ScriptedTransport::routes(|req| match req.path.as_str() {
            "/b" => RawResponse::new(200, "{}"),
            _ => RawResponse::new(404, ""),
        });
        let client = client_with(transport.clone());

        client.family_call(&WIDGETS, &[""], &ApiRequest::get("")).await.unwrap();
        client.family_call(&WIDGETS, &[""], &ApiRequest::get("")).await.unwrap();

        assert_eq!(transport.paths(), vec!["/a", "/b", "/a", "/b"]);
    }

    #[tokio::test]
    async fn test_shape_cascade_retries_located_path() {
        let transport = ScriptedTransport::routes(|req| {
            let body = req.body.clone().unwrap_or_default();
            match req.path.as_str() {
                "/b/1" if body.get("name").is_some() => RawResponse::new(200, r#"{"id":"1"}"#),
                "/b/1" => RawResponse::new(422, r#"{"detail":"unknown field"}"#),
                _ => RawResponse::new(404, ""),
            }
        });
        let client = client_with(transport.clone());

        let response = client
            .family_write(&WIDGETS, &["/1"], Method::PUT, &fields(), &[SNAKE, CAMEL, LEGACY])
            .await
            .unwrap();

        assert_eq!(response.body, json!({"id": "1"}));
        let calls = transport.calls();
        assert_eq!(
            transport.paths(),
            vec!["/a/1", "/b/1", "/b/1", "/b/1"]
        );
        assert_eq!(calls[1].body, Some(json!({"full_name": "Ada", "company": "Engines"})));
        assert_eq!(calls[2].body, Some(json!({"fullName": "Ada", "company": "Engines"})));
        assert_eq!(calls[3].body, Some(json!({"name": "Ada", "company": "Engines"})));
        assert!(calls.iter().all(|c| c.method == Method::PUT));
    }

    #[tokio::test]
    async fn test_all_shapes_rejected_returns_last_error() {
        let transport = ScriptedTransport::always(400, r#"{"message":"bad body"}"#);
        let client = client_with(transport.clone());

        let err = client
            .family_write(&WIDGETS, &["/1"], Method::PATCH, &fields(), &[SNAKE, CAMEL])
            .await
            .unwrap_err();

        assert!(err.is_shape_rejection());
        assert_eq!(transport.paths(), vec!["/a/1", "/a/1"]);
    }

    #[tokio::test]
    async fn test_shape_cascade_stops_on_non_rejection() {
        let transport = ScriptedTransport::routes(|req| {
            if req.body.as_ref().and_then(|b| b.get("fullName")).is_some() {
                RawResponse::new(403, "")
            } else {
                RawResponse::new(422, "")
            }
        });
        let client = client_with(transport.clone());

        let err = client
            .family_write(&WIDGETS, &[""], Method::POST, &fields(), &[SNAKE, CAMEL, LEGACY])
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(403));
        assert_eq!(transport.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_family_write_requires_a_shape() {
        let client = client_with(ScriptedTransport::always(200, "{}"));
        let err = client
            .family_write(&WIDGETS, &[""], Method::POST, &fields(), &[])
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }

    #[test]
    fn test_field_shape_passes_unmapped_keys_through() {
        assert_eq!(
            LEGACY.apply(&fields()),
            json!({"name": "Ada", "company": "Engines"})
        );
        assert_eq!(SNAKE.apply(&Map::new()), json!({}));
    }
}
