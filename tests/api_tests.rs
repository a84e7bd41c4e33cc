//! API integration tests, run against a live server with a fresh database

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

async fn post_json(client: &Client, path: &str, body: Value) -> Value {
    let response = client
        .post(format!("{}{}", BASE_URL, path))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED, "POST {} failed", path);
    response.json().await.expect("Failed to parse response")
}

/// Create a facility open Monday to Friday 09:00-17:00, returns its slug
async fn create_weekday_facility(client: &Client, name: &str) -> String {
    let category = post_json(client, "/categories", json!({ "name": "Dining" })).await;
    let location = post_json(
        client,
        "/locations",
        json!({
            "building": "Johnson Center",
            "friendly_building": "JC",
            "address": "4400 University Dr",
            "campus_region": "fairfax"
        }),
    )
    .await;
    let schedule = post_json(
        client,
        "/schedules",
        json!({
            "name": "Weekdays",
            "open_times": [
                { "start_day": 0, "start_time": "09:00", "end_day": 4, "end_time": "17:00" }
            ]
        }),
    )
    .await;
    let facility = post_json(
        client,
        "/facilities",
        json!({
            "name": name,
            "category_id": category["id"],
            "location_id": location["id"],
            "main_schedule_id": schedule["id"]
        }),
    )
    .await;

    facility["slug"].as_str().expect("No slug in response").to_string()
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
async fn test_facility_status_at_instant() {
    let client = Client::new();
    let slug = create_weekday_facility(&client, "Sub Station").await;

    // Wednesday 2024-01-03 noon, Sunday 2024-01-07 noon
    for (at, expected) in [("2024-01-03T12:00:00-05:00", "open"), ("2024-01-07T12:00:00-05:00", "closed")] {
        let response = client
            .get(format!("{}/facilities/{}/status", BASE_URL, slug))
            .query(&[("at", at)])
            .send()
            .await
            .expect("Failed to send request");

        assert!(response.status().is_success());
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["status"], expected);
        assert_eq!(body["active_schedule"]["kind"], "main");
    }
}

#[tokio::test]
#[ignore]
async fn test_special_schedule_takes_over() {
    let client = Client::new();
    let slug = create_weekday_facility(&client, "Sub Station Finals").await;

    let special = post_json(
        &client,
        "/schedules",
        json!({
            "name": "Finals week",
            "valid_start": "2024-01-06T00:00:00-05:00",
            "valid_end": "2024-01-07T23:59:59-05:00",
            "always_open": true
        }),
    )
    .await;

    let response = client
        .post(format!(
            "{}/facilities/{}/special-schedules/{}",
            BASE_URL, slug, special["id"]
        ))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let body: Value = client
        .get(format!("{}/facilities/{}/status", BASE_URL, slug))
        .query(&[("at", "2024-01-07T12:00:00-05:00")])
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(body["status"], "open");
    assert_eq!(body["active_schedule"]["kind"], "special");
    assert_eq!(body["active_schedule"]["schedule_id"], special["id"]);
}

#[tokio::test]
#[ignore]
async fn test_status_rejects_bad_instant() {
    let client = Client::new();
    let slug = create_weekday_facility(&client, "Bad Instant Cafe").await;

    let response = client
        .get(format!("{}/facilities/{}/status", BASE_URL, slug))
        .query(&[("at", "yesterday")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_same_day_reversed_open_time_rejected() {
    let client = Client::new();

    let response = client
        .post(format!("{}/schedules", BASE_URL))
        .json(&json!({
            "name": "Broken",
            "open_times": [
                { "start_day": 2, "start_time": "18:00", "end_day": 2, "end_time": "09:00" }
            ]
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_alerts_listing() {
    let client = Client::new();

    let past = post_json(
        &client,
        "/alerts",
        json!({
            "urgency_tag": "minor",
            "subject": "Winter break hours",
            "body": "Reduced hours",
            "start_datetime": "2020-12-20T00:00:00Z",
            "end_datetime": "2021-01-05T00:00:00Z"
        }),
    )
    .await;
    let current = post_json(
        &client,
        "/alerts",
        json!({
            "urgency_tag": "emergency",
            "subject": "Campus closed",
            "body": "Weather closure",
            "start_datetime": "2020-01-01T00:00:00Z",
            "end_datetime": "2099-01-01T00:00:00Z"
        }),
    )
    .await;

    let active: Vec<Value> = client
        .get(format!("{}/alerts", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert!(active.iter().any(|a| a["id"] == current["id"] && a["active"] == true));
    assert!(!active.iter().any(|a| a["id"] == past["id"]));

    let all: Vec<Value> = client
        .get(format!("{}/alerts", BASE_URL))
        .query(&[("all", "true")])
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert!(all.iter().any(|a| a["id"] == past["id"] && a["active"] == false));
}
