// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::offline_extractor;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use phishscan::domain::models::feature::{FeatureVector, FEATURE_COUNT};
use phishscan::presentation::routes;
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt;

fn app() -> Router {
    routes::routes(Arc::new(offline_extractor()))
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn get_features_returns_ordered_vector() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/v1/features?url=https%3A%2F%2Fsecure-login.example.com%2F")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let text = body_text(response).await;

    // Keys must appear in column order in the raw JSON
    let mut last = 0;
    for column in FeatureVector::columns() {
        let position = text
            .find(&format!("\"{}\":", column))
            .unwrap_or_else(|| panic!("missing column {}", column));
        assert!(position >= last, "column {} out of order", column);
        last = position;
    }

    let json: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["features"].as_object().unwrap().len(), FEATURE_COUNT);
    assert_eq!(json["registrable_domain"], "example.com");
    assert_eq!(json["schema_version"], "1");
    assert_eq!(json["features"]["Prefix_Suffix"], 0);
    assert_eq!(json["features"]["Abnormal_URL"], 1);
    assert_eq!(json["probes"]["fetch"]["available"], false);
    assert_eq!(json["stages"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn post_features_accepts_json_body() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/features")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"url":"http://192.168.1.1/@admin"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["features"]["having_IP_Address"], 1);
    assert_eq!(json["features"]["having_At_Symbol"], 1);
    assert_eq!(json["probes"]["whois"]["reason"]["kind"], "empty_domain");
    assert!(json["registrable_domain"].is_null());
}

#[tokio::test]
async fn unparsable_url_is_a_bad_request() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/v1/features?url=http%3A%2F%2F")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn schema_lists_columns() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/v1/schema")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    let columns: Vec<&str> = json["columns"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c.as_str().unwrap())
        .collect();
    assert_eq!(columns, FeatureVector::columns());
    assert!(FeatureVector::ensure_columns(&columns).is_ok());
}
