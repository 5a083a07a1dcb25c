//
//  scribe-cli
//  tests/adaptive_client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! End-to-end behaviour of the adaptive client against a real HTTP server.

use std::sync::Arc;
use std::time::Duration;

use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

use scribe_cli::api::{
    decode_list, ApiError, ApiRequest, FormFill, HttpTransport, PrefixCandidate, ScribeClient,
};
use scribe_cli::auth::{MemoryTokenStore, TokenStore};

fn client_for(server: &ServerGuard, tokens: Arc<MemoryTokenStore>) -> ScribeClient {
    let transport = HttpTransport::new(&server.url(), Duration::from_secs(5)).unwrap();
    ScribeClient::new(Arc::new(transport), tokens)
}

#[tokio::test]
async fn form_fill_list_finds_third_spelling() {
    let mut server = Server::new_async().await;
    let dashed = server
        .mock("GET", "/form-fills")
        .with_status(404)
        .expect(1)
        .create_async()
        .await;
    let snake = server
        .mock("GET", "/form_fills")
        .with_status(404)
        .expect(1)
        .create_async()
        .await;
    let joined = server
        .mock("GET", "/formfills")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data":[]}"#)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server, Arc::new(MemoryTokenStore::new()));
    let response = client.form_fills().list().await.unwrap();
    let fills: Vec<FormFill> = decode_list(&response).unwrap();

    assert!(fills.is_empty());
    assert_eq!(client.current_prefix(), PrefixCandidate::None);
    dashed.assert_async().await;
    snake.assert_async().await;
    joined.assert_async().await;
}

#[tokio::test]
async fn discovered_prefix_is_reused() {
    let mut server = Server::new_async().await;
    let bare = server
        .mock("GET", "/auth/me")
        .with_status(404)
        .expect(1)
        .create_async()
        .await;
    let api = server
        .mock("GET", "/api/auth/me")
        .with_status(404)
        .expect(1)
        .create_async()
        .await;
    let v1 = server
        .mock("GET", "/api/v1/auth/me")
        .with_status(200)
        .with_body(r#"{"id": 1, "email": "ada@example.com"}"#)
        .expect(1)
        .create_async()
        .await;
    let fills = server
        .mock("GET", "/api/v1/form-fills")
        .with_status(200)
        .with_body(r#"[{"id": 3, "title": "Lease"}]"#)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server, Arc::new(MemoryTokenStore::new()));
    client.auth().me().await.unwrap();
    assert_eq!(client.current_prefix(), PrefixCandidate::ApiV1);

    let response = client.form_fills().list().await.unwrap();
    let items: Vec<FormFill> = decode_list(&response).unwrap();
    assert_eq!(items[0].id, "3");

    bare.assert_async().await;
    api.assert_async().await;
    v1.assert_async().await;
    fills.assert_async().await;
}

#[tokio::test]
async fn missing_everywhere_surfaces_first_not_found() {
    let mut server = Server::new_async().await;
    let mocks = [
        server
            .mock("GET", "/transcriptions/9")
            .with_status(404)
            .with_body(r#"{"detail": "Transcription not found"}"#)
            .create_async()
            .await,
        server
            .mock("GET", "/api/transcriptions/9")
            .with_status(404)
            .create_async()
            .await,
        server
            .mock("GET", "/api/v1/transcriptions/9")
            .with_status(404)
            .with_body(r#"{"detail": "Not Found"}"#)
            .create_async()
            .await,
    ];

    let client = client_for(&server, Arc::new(MemoryTokenStore::new()));
    let err = client.transcriptions().get("9").await.unwrap_err();

    match err {
        ApiError::NotFound { path, message } => {
            assert_eq!(path, "/transcriptions/9");
            assert_eq!(message, "Transcription not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    for mock in &mocks {
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn form_fill_list_discovers_versioned_prefix() {
    let mut server = Server::new_async().await;
    let versioned = server
        .mock("GET", "/api/v1/form-fills")
        .with_status(200)
        .with_body(r#"{"data": [{"id": 5, "title": "Lease"}]}"#)
        .expect(2)
        .create_async()
        .await;
    let _elsewhere = server
        .mock("GET", Matcher::Regex("^/(api/)?form".to_string()))
        .with_status(404)
        .create_async()
        .await;

    let client = client_for(&server, Arc::new(MemoryTokenStore::new()));
    assert_eq!(client.current_prefix(), PrefixCandidate::None);

    let response = client.form_fills().list().await.unwrap();
    let fills: Vec<FormFill> = decode_list(&response).unwrap();
    assert_eq!(fills[0].id, "5");
    assert_eq!(client.current_prefix(), PrefixCandidate::ApiV1);

    client.form_fills().list().await.unwrap();
    versioned.assert_async().await;
}

#[tokio::test]
async fn unauthorized_clears_token_and_next_call_is_anonymous() {
    let mut server = Server::new_async().await;
    let rejected = server
        .mock("GET", "/auth/me")
        .match_header("authorization", "Bearer expired")
        .with_status(401)
        .with_body(r#"{"detail": "Token expired"}"#)
        .expect(1)
        .create_async()
        .await;
    let anonymous = server
        .mock("GET", "/auth/me")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body(r#"{"id": "guest"}"#)
        .expect(1)
        .create_async()
        .await;

    let tokens = Arc::new(MemoryTokenStore::with_token("expired"));
    let client = client_for(&server, tokens.clone());

    let err = client.auth().me().await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { ref message } if message == "Token expired"));
    assert_eq!(tokens.get().unwrap(), None);

    client.auth().me().await.unwrap();

    rejected.assert_async().await;
    anonymous.assert_async().await;
}

#[tokio::test]
async fn login_token_is_sent_on_later_calls() {
    let mut server = Server::new_async().await;
    let login = server
        .mock("POST", "/auth/login")
        .match_body(Matcher::Json(json!({"email": "ada@example.com", "password": "pw"})))
        .with_status(200)
        .with_body(r#"{"data": {"access_token": "fresh"}}"#)
        .expect(1)
        .create_async()
        .await;
    let profiles = server
        .mock("GET", "/work-profiles")
        .match_header("authorization", "Bearer fresh")
        .with_status(200)
        .with_body("[]")
        .expect(1)
        .create_async()
        .await;

    let tokens = Arc::new(MemoryTokenStore::new());
    let client = client_for(&server, tokens.clone());

    client.auth().login("ada@example.com", "pw").await.unwrap();
    assert_eq!(tokens.get().unwrap().as_deref(), Some("fresh"));
    client.work_profiles().list().await.unwrap();

    login.assert_async().await;
    profiles.assert_async().await;
}

#[tokio::test]
async fn unknown_family_reports_every_route_tried() {
    let mut server = Server::new_async().await;
    let _dashed = server
        .mock("GET", "/ocr-documents")
        .with_status(404)
        .create_async()
        .await;
    let _nested = server
        .mock("GET", "/ocr/documents")
        .with_status(404)
        .create_async()
        .await;
    let _prefixed = server
        .mock("GET", Matcher::Regex("^/api/".to_string()))
        .with_status(404)
        .create_async()
        .await;

    let client = client_for(&server, Arc::new(MemoryTokenStore::new()));
    let err = client.ocr_documents().list().await.unwrap_err();

    match err {
        ApiError::FamilyRouteUnavailable { family, tried } => {
            assert_eq!(family, "ocr documents");
            assert_eq!(
                tried,
                vec![
                    "/ocr-documents",
                    "/ocr/documents",
                    "/api/ocr-documents",
                    "/api/ocr/documents",
                    "/api/v1/ocr-documents",
                    "/api/v1/ocr/documents",
                ]
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn rejected_payload_is_resent_with_camel_case_fields() {
    let mut server = Server::new_async().await;
    let snake = server
        .mock("POST", "/form-fills")
        .match_body(Matcher::PartialJson(json!({"field_values": {"tenant": "Ada"}})))
        .with_status(422)
        .with_body(r#"{"detail": [{"msg": "fieldValues is required"}]}"#)
        .expect(1)
        .create_async()
        .await;
    let camel = server
        .mock("POST", "/form-fills")
        .match_body(Matcher::PartialJson(json!({"fieldValues": {"tenant": "Ada"}})))
        .with_status(201)
        .with_body(r#"{"id": 7, "title": "Lease"}"#)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server, Arc::new(MemoryTokenStore::new()));
    let fields = json!({"title": "Lease", "field_values": {"tenant": "Ada"}});
    let response = client
        .form_fills()
        .create(fields.as_object().unwrap())
        .await
        .unwrap();

    let fill: FormFill = response.json().unwrap();
    assert_eq!(fill.id, "7");
    snake.assert_async().await;
    camel.assert_async().await;
}

#[tokio::test]
async fn server_errors_are_not_retried() {
    let mut server = Server::new_async().await;
    let failing = server
        .mock("GET", "/transcriptions")
        .with_status(500)
        .with_body(r#"{"message": "database unavailable"}"#)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server, Arc::new(MemoryTokenStore::new()));
    let err = client
        .execute(&ApiRequest::get("/transcriptions"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Status { status: 500, .. }));
    failing.assert_async().await;
}
