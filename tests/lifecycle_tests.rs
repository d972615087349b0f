//! Request lifecycle integration tests
//!
//! Exercises the shared status machine end to end against a live server:
//! creation, decisions, the Return stage, and the concurrency guarantee
//! that exactly one of several racing decisions wins.

use reqwest::Client;
use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};

const BASE_URL: &str = "http://localhost:8080/api/v1";

async fn get_auth_token(client: &Client) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": "admin@kadro.local",
            "password": "admin123!"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["data"]["token"]
        .as_str()
        .expect("No token in response")
        .to_string()
}

/// Unique suffix so repeated runs don't trip unique-name constraints
fn run_tag() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos()
}

/// Create a category and an approved item in it; returns the item ID
async fn setup_item(client: &Client, token: &str, fixed_asset: bool, stock: i32) -> i64 {
    let response = client
        .post(format!("{}/categories", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": format!("Lifecycle {} {}", if fixed_asset { "FA" } else { "C" }, run_tag()),
            "fixed_asset": fixed_asset
        }))
        .send()
        .await
        .expect("Failed to create category");
    assert!(response.status().is_success(), "category creation failed");

    let body: Value = response.json().await.expect("Failed to parse category");
    let category_id = body["data"]["id"].as_i64().expect("No category ID");

    let response = client
        .post(format!("{}/items", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": format!("Lifecycle item {}", run_tag()),
            "category_id": category_id,
            "stock_quantity": stock,
            "approved": true
        }))
        .send()
        .await
        .expect("Failed to create item");
    assert!(response.status().is_success(), "item creation failed");

    let body: Value = response.json().await.expect("Failed to parse item");
    body["data"]["id"].as_i64().expect("No item ID")
}

/// Submit an equipment request for one item; returns the request ID
async fn create_equipment_request(client: &Client, token: &str, item_id: i64, quantity: i32) -> i64 {
    let response = client
        .post(format!("{}/equipment-requests", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "line_items": [{"item_id": item_id, "quantity": quantity}]
        }))
        .send()
        .await
        .expect("Failed to create request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse request");
    body["data"]["id"].as_i64().expect("No request ID")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_new_request_is_pending_without_approver() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let item_id = setup_item(&client, &token, false, 10).await;

    let response = client
        .post(format!("{}/equipment-requests", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "line_items": [{"item_id": item_id, "quantity": 2}]
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["isSuccess"], true);
    assert_eq!(body["data"]["status"], "pending");
    assert!(body["data"]["approver_id"].is_null());
    assert!(body["data"]["decided_at"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_fixed_asset_quantity_is_pinned_to_one() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let item_id = setup_item(&client, &token, true, 5).await;

    let request_id = create_equipment_request(&client, &token, item_id, 3).await;

    let response = client
        .get(format!("{}/equipment-requests/{}", BASE_URL, request_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to fetch details");

    let body: Value = response.json().await.expect("Failed to parse details");
    assert_eq!(body["data"]["line_items"][0]["quantity"], 1);
}

#[tokio::test]
#[ignore]
async fn test_consumable_quantity_is_preserved() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let item_id = setup_item(&client, &token, false, 50).await;

    let request_id = create_equipment_request(&client, &token, item_id, 7).await;

    let response = client
        .get(format!("{}/equipment-requests/{}", BASE_URL, request_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to fetch details");

    let body: Value = response.json().await.expect("Failed to parse details");
    assert_eq!(body["data"]["line_items"][0]["quantity"], 7);
}

#[tokio::test]
#[ignore]
async fn test_request_without_line_items_is_rejected() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .post(format!("{}/equipment-requests", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "line_items": [] }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["isSuccess"], false);
    assert!(body["errors"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_change_request_requires_details() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .post(format!("{}/change-requests", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let response = client
        .post(format!("{}/change-requests", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "details": "Please move my desk to the second floor" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
}

#[tokio::test]
#[ignore]
async fn test_decided_request_cannot_be_decided_again() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let item_id = setup_item(&client, &token, false, 10).await;
    let request_id = create_equipment_request(&client, &token, item_id, 1).await;

    let response = client
        .put(format!("{}/equipment-requests/{}/approve", BASE_URL, request_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "signature": "A. Admin" }))
        .send()
        .await
        .expect("Failed to approve");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["status"], "approved");
    assert_eq!(body["data"]["decision_note"], "A. Admin");

    // A second decision must fail as a state conflict, not overwrite
    let response = client
        .put(format!("{}/equipment-requests/{}/reject", BASE_URL, request_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "reason": "too late" }))
        .send()
        .await
        .expect("Failed to send reject");
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_approved_equipment_request_can_be_returned() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let item_id = setup_item(&client, &token, true, 2).await;
    let request_id = create_equipment_request(&client, &token, item_id, 1).await;

    let response = client
        .put(format!("{}/equipment-requests/{}/approve", BASE_URL, request_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to approve");
    assert_eq!(response.status(), 200);

    let response = client
        .put(format!("{}/equipment-requests/{}/status", BASE_URL, request_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "status": "returned" }))
        .send()
        .await
        .expect("Failed to update status");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["status"], "returned");
    assert!(body["data"]["returned_at"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_pending_request_cannot_skip_to_returned() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let item_id = setup_item(&client, &token, false, 10).await;
    let request_id = create_equipment_request(&client, &token, item_id, 1).await;

    let response = client
        .put(format!("{}/equipment-requests/{}/status", BASE_URL, request_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "status": "returned" }))
        .send()
        .await
        .expect("Failed to update status");

    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_change_request_has_no_returned_stage() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .post(format!("{}/change-requests", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "details": "Office relocation" }))
        .send()
        .await
        .expect("Failed to create change request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let request_id = body["data"]["id"].as_i64().expect("No request ID");

    let response = client
        .put(format!("{}/change-requests/{}/approve", BASE_URL, request_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to approve");
    assert_eq!(response.status(), 200);

    let response = client
        .put(format!("{}/change-requests/{}/status", BASE_URL, request_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "status": "returned" }))
        .send()
        .await
        .expect("Failed to update status");

    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_exactly_one_racing_decision_wins() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let item_id = setup_item(&client, &token, false, 10).await;
    let request_id = create_equipment_request(&client, &token, item_id, 1).await;

    let mut handles = Vec::new();
    for i in 0..8 {
        let client = client.clone();
        let token = token.clone();
        handles.push(tokio::spawn(async move {
            let path = if i % 2 == 0 { "approve" } else { "reject" };
            let body = if i % 2 == 0 {
                json!({ "signature": format!("racer {}", i) })
            } else {
                json!({ "reason": format!("racer {}", i) })
            };
            client
                .put(format!(
                    "{}/equipment-requests/{}/{}",
                    BASE_URL, request_id, path
                ))
                .header("Authorization", format!("Bearer {}", token))
                .json(&body)
                .send()
                .await
                .expect("Failed to send decision")
                .status()
                .as_u16()
        }));
    }

    let mut won = 0;
    let mut conflicted = 0;
    for handle in handles {
        match handle.await.expect("task panicked") {
            200 => won += 1,
            409 => conflicted += 1,
            other => panic!("unexpected status {}", other),
        }
    }

    assert_eq!(won, 1, "exactly one racing decision must win");
    assert_eq!(conflicted, 7);
}

#[tokio::test]
#[ignore]
async fn test_status_filter_on_admin_listing() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let item_id = setup_item(&client, &token, false, 10).await;
    let request_id = create_equipment_request(&client, &token, item_id, 1).await;

    let response = client
        .get(format!("{}/equipment-requests/all?status=pending", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to list requests");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    let listed = body["data"].as_array().expect("data should be an array");
    assert!(listed.iter().all(|r| r["status"] == "pending"));
    assert!(listed.iter().any(|r| r["id"] == request_id));
}
