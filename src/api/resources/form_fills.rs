//
//  scribe-cli
//  api/resources/form_fills.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Form fill API types and operations.
//!
//! A form fill is a document template being completed field by field. The
//! collection lives under one of the [`FORM_FILLS`] spellings, and field
//! updates go to either `/{id}` or `/{id}/fields` depending on the server.
//!
//! # Example
//!
//! ```rust,no_run
//! use scribe_cli::api::{decode_list, FormFill, ScribeClient};
//!
//! async fn titles(client: &ScribeClient) -> Result<Vec<String>, scribe_cli::api::ApiError> {
//!     let response = client.form_fills().list().await?;
//!     let fills: Vec<FormFill> = decode_list(&response)?;
//!     Ok(fills.into_iter().filter_map(|f| f.title).collect())
//! }
//! ```

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{id_string, item};
use crate::api::cascade::{FieldShape, FORM_FILLS};
use crate::api::client::ScribeClient;
use crate::api::common::{ApiResponse, ApiResult};
use crate::api::transport::ApiRequest;

/// Body field conventions seen across form fill backends, in the order tried.
///
/// Logical field names are `title`, `status` and `field_values`.
pub const FORM_FILL_SHAPES: &[FieldShape] = &[
    FieldShape {
        name: "snake_case",
        renames: &[],
    },
    FieldShape {
        name: "camelCase",
        renames: &[("field_values", "fieldValues")],
    },
    FieldShape {
        name: "legacy",
        renames: &[
            ("title", "name"),
            ("status", "state"),
            ("field_values", "answers"),
        ],
    },
];

/// A form being filled in.
///
/// Every field except `id` is optional; older servers omit most of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormFill {
    #[serde(alias = "_id", deserialize_with = "id_string")]
    pub id: String,

    #[serde(default, alias = "name")]
    pub title: Option<String>,

    /// e.g. `draft`, `submitted`
    #[serde(default, alias = "state")]
    pub status: Option<String>,

    #[serde(default, alias = "fieldValues", alias = "answers")]
    pub field_values: Map<String, Value>,

    #[serde(default, alias = "createdAt")]
    pub created_at: Option<String>,

    #[serde(default, alias = "updatedAt")]
    pub updated_at: Option<String>,
}

/// Form fill operations.
#[derive(Clone)]
pub struct FormFillsApi {
    client: ScribeClient,
}

impl FormFillsApi {
    pub fn new(client: ScribeClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ApiResult<ApiResponse> {
        self.client
            .family_call(&FORM_FILLS, &[""], &ApiRequest::get(""))
            .await
    }

    pub async fn get(&self, id: &str) -> ApiResult<ApiResponse> {
        self.client
            .family_call(&FORM_FILLS, &[item(id)], &ApiRequest::get(""))
            .await
    }

    /// Creates a form fill from logical fields (`title`, `status`, `field_values`).
    pub async fn create(&self, fields: &Map<String, Value>) -> ApiResult<ApiResponse> {
        self.client
            .family_write(&FORM_FILLS, &[""], Method::POST, fields, FORM_FILL_SHAPES)
            .await
    }

    /// Updates a form fill.
    ///
    /// Routes tried: every base with `/{id}`, then every base with
    /// `/{id}/fields`. Each located route is offered every field shape.
    pub async fn update(&self, id: &str, fields: &Map<String, Value>) -> ApiResult<ApiResponse> {
        let id = item(id);
        let suffixes = [id.clone(), format!("{}/fields", id)];
        self.client
            .family_write(&FORM_FILLS, &suffixes, Method::PATCH, fields, FORM_FILL_SHAPES)
            .await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<ApiResponse> {
        self.client
            .family_call(&FORM_FILLS, &[item(id)], &ApiRequest::delete(""))
            .await
    }

    /// Marks a form fill as complete.
    pub async fn submit(&self, id: &str) -> ApiResult<ApiResponse> {
        self.client
            .family_call(
                &FORM_FILLS,
                &[format!("{}/submit", item(id))],
                &ApiRequest::post(""),
            )
            .await
    }
}
