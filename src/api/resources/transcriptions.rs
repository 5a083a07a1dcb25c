//
//  scribe-cli
//  api/resources/transcriptions.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Transcription API types and operations.
//!
//! Transcriptions have a single well-known route, so they rely on the prefix
//! fallback alone rather than a family cascade.

use serde::{Deserialize, Serialize};

use super::{id_string, item, Upload};
use crate::api::client::ScribeClient;
use crate::api::common::{ApiResponse, ApiResult};
use crate::api::transport::ApiRequest;

const TRANSCRIPTIONS: &str = "/transcriptions";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcription {
    #[serde(alias = "_id", deserialize_with = "id_string")]
    pub id: String,

    #[serde(default, alias = "filename", alias = "fileName")]
    pub title: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub language: Option<String>,

    #[serde(default, alias = "transcript")]
    pub text: Option<String>,

    #[serde(default, alias = "duration", alias = "durationSeconds")]
    pub duration_seconds: Option<f64>,

    #[serde(default, alias = "createdAt")]
    pub created_at: Option<String>,
}

/// Transcription operations.
#[derive(Clone)]
pub struct TranscriptionsApi {
    client: ScribeClient,
}

impl TranscriptionsApi {
    pub fn new(client: ScribeClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ApiResult<ApiResponse> {
        self.client.execute(&ApiRequest::get(TRANSCRIPTIONS)).await
    }

    pub async fn get(&self, id: &str) -> ApiResult<ApiResponse> {
        let path = format!("{}{}", TRANSCRIPTIONS, item(id));
        self.client.execute(&ApiRequest::get(path)).await
    }

    /// Uploads a recording for transcription.
    ///
    /// # Parameters
    ///
    /// * `upload` - The audio file
    /// * `language` - Optional language hint, e.g. `en`
    pub async fn create(&self, upload: &Upload, language: Option<&str>) -> ApiResult<ApiResponse> {
        let mut body = upload.to_body();
        if let (Some(language), Some(fields)) = (language, body.as_object_mut()) {
            fields.insert("language".to_string(), language.into());
        }

        let request = ApiRequest::post(TRANSCRIPTIONS)
            .json_body(body)
            .timeout(self.client.upload_timeout());
        self.client.execute(&request).await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<ApiResponse> {
        let path = format!("{}{}", TRANSCRIPTIONS, item(id));
        self.client.execute(&ApiRequest::delete(path)).await
    }
}
