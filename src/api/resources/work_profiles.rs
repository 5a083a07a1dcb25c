//
//  scribe-cli
//  api/resources/work_profiles.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Work profile API types and operations.
//!
//! Work profiles hold the personal and employer details used to pre-fill
//! forms. One profile can be marked as the default.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{id_string, item};
use crate::api::cascade::{FieldShape, WORK_PROFILES};
use crate::api::client::ScribeClient;
use crate::api::common::{ApiResponse, ApiResult};
use crate::api::transport::ApiRequest;

/// Body field conventions for work profiles, in the order tried.
pub const WORK_PROFILE_SHAPES: &[FieldShape] = &[
    FieldShape {
        name: "snake_case",
        renames: &[],
    },
    FieldShape {
        name: "camelCase",
        renames: &[
            ("full_name", "fullName"),
            ("job_title", "jobTitle"),
            ("is_default", "isDefault"),
        ],
    },
    FieldShape {
        name: "legacy",
        renames: &[
            ("full_name", "name"),
            ("job_title", "title"),
            ("company", "organization"),
        ],
    },
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkProfile {
    #[serde(alias = "_id", deserialize_with = "id_string")]
    pub id: String,

    #[serde(default, alias = "fullName", alias = "name")]
    pub full_name: Option<String>,

    #[serde(default, alias = "jobTitle", alias = "title")]
    pub job_title: Option<String>,

    #[serde(default, alias = "organization")]
    pub company: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default, alias = "isDefault")]
    pub is_default: bool,
}

/// Work profile operations.
#[derive(Clone)]
pub struct WorkProfilesApi {
    client: ScribeClient,
}

impl WorkProfilesApi {
    pub fn new(client: ScribeClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ApiResult<ApiResponse> {
        self.client
            .family_call(&WORK_PROFILES, &[""], &ApiRequest::get(""))
            .await
    }

    pub async fn get(&self, id: &str) -> ApiResult<ApiResponse> {
        self.client
            .family_call(&WORK_PROFILES, &[item(id)], &ApiRequest::get(""))
            .await
    }

    pub async fn create(&self, fields: &Map<String, Value>) -> ApiResult<ApiResponse> {
        self.client
            .family_write(&WORK_PROFILES, &[""], Method::POST, fields, WORK_PROFILE_SHAPES)
            .await
    }

    /// Updates a profile at `/{id}`, or `/{id}/details` on servers without
    /// a writable item route.
    pub async fn update(&self, id: &str, fields: &Map<String, Value>) -> ApiResult<ApiResponse> {
        let id = item(id);
        let suffixes = [id.clone(), format!("{}/details", id)];
        self.client
            .family_write(&WORK_PROFILES, &suffixes, Method::PUT, fields, WORK_PROFILE_SHAPES)
            .await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<ApiResponse> {
        self.client
            .family_call(&WORK_PROFILES, &[item(id)], &ApiRequest::delete(""))
            .await
    }

    /// Makes this profile the default used for new form fills.
    pub async fn set_default(&self, id: &str) -> ApiResult<ApiResponse> {
        self.client
            .family_call(
                &WORK_PROFILES,
                &[format!("{}/default", item(id))],
                &ApiRequest::post(""),
            )
            .await
    }
}
