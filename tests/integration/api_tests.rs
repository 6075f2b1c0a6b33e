//! API integration tests
//!
//! Need a running server backed by a database that holds one collection
//! (a record whose `field_model` points at the `Collection` term).

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Helper to pick the first available collection
async fn first_collection_id(client: &Client) -> i64 {
    let response = client
        .get(format!("{}/collections", BASE_URL))
        .send()
        .await
        .expect("Failed to send collections request");

    let body: Value = response.json().await.expect("Failed to parse collections");
    body[0]["id"].as_i64().expect("No collection available")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_get_settings_lists_doi_fields() {
    let client = Client::new();

    let response = client
        .get(format!("{}/settings", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["doi_fields"].as_array().map(Vec::len), Some(13));
    assert!(body["settings"]["content_type"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_update_settings_rejects_duplicate_terms() {
    let client = Client::new();

    let response = client
        .put(format!("{}/settings", BASE_URL))
        .json(&json!({
            "content_type": "islandora_object",
            "field_settings": {"doi": "field_doi"},
            "term_pairs": [
                {"key": "monograph", "value": "Book"},
                {"key": "monograph", "value": "Monograph"}
            ]
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_prefill_blank_doi() {
    let client = Client::new();

    let response = client
        .post(format!("{}/prefill", BASE_URL))
        .json(&json!({"doi": "", "collection_id": 1}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_prefill_unknown_doi_warns() {
    let client = Client::new();
    let collection_id = first_collection_id(&client).await;

    let response = client
        .post(format!("{}/prefill", BASE_URL))
        .json(&json!({"doi": "10.0000/does-not-exist", "collection_id": collection_id}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "no_information");
    assert_eq!(body["warning"], "Crossref returned no information.");
}

#[tokio::test]
#[ignore]
async fn test_prefill_then_duplicate() {
    let client = Client::new();
    let collection_id = first_collection_id(&client).await;
    let request = json!({"doi": "10.1038/nature12373", "collection_id": collection_id});

    let response = client
        .post(format!("{}/prefill", BASE_URL))
        .json(&request)
        .send()
        .await
        .expect("Failed to send request");

    // A previous run may already have imported it
    if response.status() == 201 {
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["status"], "created");
        let id = body["record_id"].as_i64().expect("No record id");
        assert_eq!(body["edit_path"], format!("/records/{}/edit", id));
    }

    let response = client
        .post(format!("{}/prefill", BASE_URL))
        .json(&request)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);
}
