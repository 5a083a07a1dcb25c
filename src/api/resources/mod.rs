//
//  scribe-cli
//  api/resources/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Resource Wrappers
//!
//! Typed entry points for each Scribe resource. Every wrapper holds a cheap
//! clone of [`ScribeClient`](super::ScribeClient) and returns the normalized
//! [`ApiResponse`]; the models in each submodule can be decoded from it with
//! [`decode_list`] or [`ApiResponse::json`].
//!
//! | Wrapper | Routing |
//! |---------|---------|
//! | [`AuthApi`] | fixed paths, prefix fallback |
//! | [`FormFillsApi`] | family cascade with field shapes |
//! | [`WorkProfilesApi`] | family cascade with field shapes |
//! | [`OcrDocumentsApi`] | family cascade |
//! | [`TranscriptionsApi`] | fixed paths, prefix fallback |

mod auth;
mod form_fills;
mod ocr_documents;
mod transcriptions;
mod work_profiles;

pub use auth::*;
pub use form_fills::*;
pub use ocr_documents::*;
pub use transcriptions::*;
pub use work_profiles::*;

use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};

use super::common::{ApiResponse, ApiResult};

/// Route suffix for a single item.
pub(crate) fn item(id: &str) -> String {
    format!("/{}", id.trim_matches('/'))
}

/// Decodes a list response.
///
/// Accepts a bare array, a `{"data": [...]}` envelope, or an object carrying
/// the array under `items` or `results`. An empty body is an empty list.
pub fn decode_list<T: DeserializeOwned>(response: &ApiResponse) -> ApiResult<Vec<T>> {
    let value = match response.data() {
        None => Value::Array(Vec::new()),
        Some(data) => ["items", "results"]
            .iter()
            .find_map(|key| data.get(*key))
            .unwrap_or(data)
            .clone(),
    };
    Ok(serde_json::from_value(value)?)
}

/// Accepts ids sent as either strings or numbers.
pub(crate) fn id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("invalid id: {}", other))),
    }
}

/// A file to be sent inline as base64.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        let filename = filename.into();
        let content_type = guess_content_type(&filename).to_string();
        Self {
            filename,
            content_type,
            bytes,
        }
    }

    /// Reads a file from disk, naming the upload after the file.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(filename, bytes))
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// The JSON body fields describing this file.
    pub fn to_body(&self) -> Value {
        json!({
            "filename": self.filename,
            "content_type": self.content_type,
            "data": STANDARD.encode(&self.bytes),
        })
    }
}

/// MIME type from the file extension.
pub fn guess_content_type(filename: &str) -> &'static str {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "tif" | "tiff" => "image/tiff",
        "pdf" => "application/pdf",
        "m4a" => "audio/mp4",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "webm" => "audio/webm",
        "aac" => "audio/aac",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Thing {
        #[serde(deserialize_with = "id_string")]
        id: String,
    }

    #[test]
    fn test_decode_list_envelopes() {
        let expected = vec![
            Thing { id: "1".into() },
            Thing { id: "b".into() },
        ];
        for body in [
            json!([{"id": 1}, {"id": "b"}]),
            json!({"data": [{"id": 1}, {"id": "b"}]}),
            json!({"items": [{"id": 1}, {"id": "b"}]}),
            json!({"data": {"results": [{"id": 1}, {"id": "b"}]}}),
        ] {
            let response = ApiResponse::new(200, body);
            assert_eq!(decode_list::<Thing>(&response).unwrap(), expected);
        }

        let empty = ApiResponse::from_text(204, "");
        assert!(decode_list::<Thing>(&empty).unwrap().is_empty());
    }

    #[test]
    fn test_item_suffix() {
        assert_eq!(item("42"), "/42");
        assert_eq!(item("/42/"), "/42");
    }

    #[test]
    fn test_upload_body_is_base64() {
        let upload = Upload::new("Scan.JPG", b"hello".to_vec());
        assert_eq!(upload.content_type, "image/jpeg");
        assert_eq!(
            upload.to_body(),
            json!({"filename": "Scan.JPG", "content_type": "image/jpeg", "data": "aGVsbG8="})
        );
        assert_eq!(guess_content_type("notes"), "application/octet-stream");
    }

    #[test]
    fn test_upload_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memo.m4a");
        std::fs::write(&path, [1u8, 2, 3]).unwrap();

        let upload = Upload::from_path(&path).unwrap();
        assert_eq!(upload.filename, "memo.m4a");
        assert_eq!(upload.content_type, "audio/mp4");
        assert_eq!(upload.size(), 3);
    }
}
