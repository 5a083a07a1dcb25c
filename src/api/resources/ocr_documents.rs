//
//  scribe-cli
//  api/resources/ocr_documents.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! OCR document API types and operations.
//!
//! Scanned images and PDFs are uploaded inline as base64. Recognised text is
//! served from `/{id}/text` or, on older servers, `/{id}/result`.

use serde::{Deserialize, Serialize};

use super::{id_string, item, Upload};
use crate::api::cascade::OCR_DOCUMENTS;
use crate::api::client::ScribeClient;
use crate::api::common::{ApiResponse, ApiResult};
use crate::api::transport::ApiRequest;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrDocument {
    #[serde(alias = "_id", deserialize_with = "id_string")]
    pub id: String,

    #[serde(default, alias = "fileName", alias = "name")]
    pub filename: Option<String>,

    /// e.g. `pending`, `processing`, `done`, `failed`
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default, alias = "pageCount", alias = "pages")]
    pub page_count: Option<u32>,

    #[serde(default, alias = "createdAt")]
    pub created_at: Option<String>,
}

/// Recognised text of a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrText {
    #[serde(default, alias = "content", alias = "result")]
    pub text: String,

    #[serde(default)]
    pub confidence: Option<f64>,
}

/// OCR document operations.
#[derive(Clone)]
pub struct OcrDocumentsApi {
    client: ScribeClient,
}

impl OcrDocumentsApi {
    pub fn new(client: ScribeClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ApiResult<ApiResponse> {
        self.client
            .family_call(&OCR_DOCUMENTS, &[""], &ApiRequest::get(""))
            .await
    }

    pub async fn get(&self, id: &str) -> ApiResult<ApiResponse> {
        self.client
            .family_call(&OCR_DOCUMENTS, &[item(id)], &ApiRequest::get(""))
            .await
    }

    /// Uploads a scan for recognition, with the client's upload timeout.
    pub async fn upload(&self, upload: &Upload) -> ApiResult<ApiResponse> {
        let request = ApiRequest::post("")
            .json_body(upload.to_body())
            .timeout(self.client.upload_timeout());
        self.client.family_call(&OCR_DOCUMENTS, &[""], &request).await
    }

    pub async fn text(&self, id: &str) -> ApiResult<ApiResponse> {
        let id = item(id);
        let suffixes = [format!("{}/text", id), format!("{}/result", id)];
        self.client
            .family_call(&OCR_DOCUMENTS, &suffixes, &ApiRequest::get(""))
            .await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<ApiResponse> {
        self.client
            .family_call(&OCR_DOCUMENTS, &[item(id)], &ApiRequest::delete(""))
            .await
    }
}
