//! HTTP tests against a running server.
//!
//! Start the server (`cargo run -p shift-planner-web`), then run with
//! `--ignored`. `PLANNER_TEST_BASE_URL` overrides the default address.

#![allow(clippy::unwrap_used)]

use reqwest::{Client, StatusCode, redirect::Policy};
use serde_json::{Value, json};

use shift_planner_integration_tests::base_url;

fn client() -> Client {
    Client::builder().redirect(Policy::none()).build().unwrap()
}

#[tokio::test]
#[ignore = "requires a running server"]
async fn test_health_endpoints() {
    let client = client();

    let live = client
        .get(format!("{}/health", base_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(live.status(), StatusCode::OK);
    assert_eq!(live.text().await.unwrap(), "ok");

    let ready = client
        .get(format!("{}/health/ready", base_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(ready.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires a running server"]
async fn test_schedule_page_renders() {
    let response = client()
        .get(format!("{}/schedule?month=2024-05", base_url()))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("2024-05"));
}

#[tokio::test]
#[ignore = "requires a running server"]
async fn test_invalid_employee_form_redirects_with_error() {
    let response = client()
        .post(format!("{}/employees", base_url()))
        .form(&[("name", "  "), ("email", "not-an-email")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response.headers()["location"].to_str().unwrap();
    assert!(location.starts_with("/employees?error="));
}

#[tokio::test]
#[ignore = "requires a running server"]
async fn test_assignment_api_lifecycle() {
    let client = client();
    let base = base_url();

    let created: Value = client
        .post(format!("{base}/api/assignments"))
        .json(&json!({ "employee_id": 1, "shift_id": 1, "date": "2033-01-10" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(created["status"], "assigned");
    let id = created["id"].as_i64().unwrap();

    let cancelled = client
        .post(format!("{base}/api/assignments/{id}/cancel"))
        .send()
        .await
        .unwrap();
    assert_eq!(cancelled.status(), StatusCode::OK);

    let on_day: Vec<Value> = client
        .get(format!("{base}/api/assignments/on/2033-01-10"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(on_day.iter().all(|a| a["id"].as_i64() != Some(id)));

    let removed: Value = client
        .delete(format!("{base}/api/assignments?start=2033-01-01&end=2033-01-31"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(removed["removed"].as_u64().unwrap() >= 1);

    let missing = client
        .get(format!("{base}/api/assignments/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}
