//! Integration tests for the hospitalinfo API.
//!
//! These tests run the full request/response cycle against a mock static host.

use axum::http::StatusCode;
use axum_test::TestServer;
use httpmock::prelude::*;
use serde_json::{Value, json};

use hospitalinfo::api::{AppState, app};
use hospitalinfo::config::AvailabilityPolicy;
use hospitalinfo::source::DatasetClient;

fn bloodbanks() -> Value {
    json!([
        {"id": "bb1", "name": "St. Mary's Blood Bank", "loc": "Ahmedabad", "add": "Ashram Road"},
        {"id": "bb2", "name": "Red Cross Society", "loc": "Surat", "add": "Ring Road"},
        {"id": "bb3", "name": "Lifeline Blood Centre", "loc": "Ahmedabad", "add": "C.G. Road"}
    ])
}

fn donors() -> Value {
    json!([
        {"id": "d1", "location": "Ahmedabad", "bloodgroup": "O+", "available": true},
        {"id": "d2", "location": "Ahmedabad", "bloodgroup": "O-", "available": true},
        {"id": "d3", "location": "Surat", "bloodgroup": "O+", "available": false},
        {"id": "d4", "location": "Rajkot", "bloodgroup": "AB+", "available": true}
    ])
}

fn camps() -> Value {
    json!([
        {"id": "c1", "location": "Gandhinagar Sector-21"},
        {"id": "c2", "location": "Vadodara"}
    ])
}

async fn mock_host() -> MockServer {
    let host = MockServer::start_async().await;

    host.mock_async(|when, then| {
        when.method(GET)
            .path("/bloodbank.json")
            .header("content-type", "application/json");
        then.status(200).json_body(bloodbanks());
    })
    .await;
    host.mock_async(|when, then| {
        when.method(GET).path("/donorinfo.json");
        then.status(200).json_body(donors());
    })
    .await;
    host.mock_async(|when, then| {
        when.method(GET).path("/camps.json");
        then.status(200).json_body(camps());
    })
    .await;
    host.mock_async(|when, then| {
        when.method(GET).path("/events.json");
        then.status(200).body("<html>not json</html>");
    })
    .await;
    host.mock_async(|when, then| {
        when.method(GET).path("/index.html");
        then.status(200)
            .header("content-type", "text/html")
            .body("<h1>Hospital Info API</h1>");
    })
    .await;

    host
}

fn create_test_server(host: &MockServer, policy: AvailabilityPolicy) -> TestServer {
    let state = AppState {
        client: DatasetClient::with_base_url(&host.base_url()),
        donor_availability: policy,
    };

    TestServer::new(app(state)).unwrap()
}

fn ids(body: &Value) -> Vec<&str> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|record| record["id"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_root_returns_html() {
    let host = mock_host().await;
    let server = create_test_server(&host, AvailabilityPolicy::Always);

    let response = server.get("/").await;

    response.assert_status_ok();
    let content_type = response.header("content-type");
    assert!(content_type.to_str().unwrap().starts_with("text/html"));
    assert_eq!(response.text(), "<h1>Hospital Info API</h1>");
}

#[tokio::test]
async fn test_bloodbank_by_id() {
    let host = mock_host().await;
    let server = create_test_server(&host, AvailabilityPolicy::Always);

    let response = server.get("/bloodbank/bb2").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["name"], "Red Cross Society");
}

#[tokio::test]
async fn test_bloodbank_unknown_id() {
    let host = mock_host().await;
    let server = create_test_server(&host, AvailabilityPolicy::Always);

    let response = server.get("/bloodbank/bb9").await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.text(), "Not Found");
}

#[tokio::test]
async fn test_bloodbank_without_query_is_unfiltered() {
    let host = mock_host().await;
    let server = create_test_server(&host, AvailabilityPolicy::Always);

    let response = server.get("/bloodbank").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(ids(&body), vec!["bb1", "bb2", "bb3"]);
}

#[tokio::test]
async fn test_bloodbank_name_ignores_case_and_punctuation() {
    let host = mock_host().await;
    let server = create_test_server(&host, AvailabilityPolicy::Always);

    let response = server.get("/bloodbank?name=ST%20MARYS").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(ids(&body), vec!["bb1"]);
}

#[tokio::test]
async fn test_bloodbank_parameters_are_anded() {
    let host = mock_host().await;
    let server = create_test_server(&host, AvailabilityPolicy::Always);

    let response = server.get("/bloodbank?loc=ahmedabad&add=cg-road").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(ids(&body), vec!["bb3"]);
}

#[tokio::test]
async fn test_donor_blood_group_ignores_sign() {
    let host = mock_host().await;
    let server = create_test_server(&host, AvailabilityPolicy::Always);

    let response = server.get("/donor?bloodgroup=O+").await;

    response.assert_status_ok();
    let body: Value = response.json();
    // d3 is unavailable
    assert_eq!(ids(&body), vec!["d1", "d2"]);
}

#[tokio::test]
async fn test_donor_blood_group_without_sign() {
    let host = mock_host().await;
    let server = create_test_server(&host, AvailabilityPolicy::Always);

    let o: Value = server.get("/donor?bloodgroup=O").await.json();
    assert_eq!(ids(&o), vec!["d1", "d2"]);

    let ab: Value = server.get("/donor?bloodgroup=AB").await.json();
    assert_eq!(ids(&ab), vec!["d4"]);
}

#[tokio::test]
async fn test_donor_blood_group_encoded() {
    let host = mock_host().await;
    let server = create_test_server(&host, AvailabilityPolicy::Always);

    let response = server.get("/donor?bloodgroup=ab%2B").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(ids(&body), vec!["d4"]);
}

#[tokio::test]
async fn test_donor_listing_hides_unavailable() {
    let host = mock_host().await;
    let server = create_test_server(&host, AvailabilityPolicy::Always);

    let response = server.get("/donor").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(ids(&body), vec!["d1", "d2", "d4"]);
}

#[tokio::test]
async fn test_donor_listing_when_filtered_policy() {
    let host = mock_host().await;
    let server = create_test_server(&host, AvailabilityPolicy::WhenFiltered);

    let all: Value = server.get("/donor").await.json();
    assert_eq!(ids(&all), vec!["d1", "d2", "d3", "d4"]);

    let surat: Value = server.get("/donor?location=surat").await.json();
    assert!(ids(&surat).is_empty());
}

#[tokio::test]
async fn test_donor_by_id_ignores_availability() {
    let host = mock_host().await;
    let server = create_test_server(&host, AvailabilityPolicy::Always);

    let response = server.get("/donor/d3").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["location"], "Surat");
}

#[tokio::test]
async fn test_camps_location_filter() {
    let host = mock_host().await;
    let server = create_test_server(&host, AvailabilityPolicy::Always);

    let response = server.get("/camps?location=sector%2021").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(ids(&body), vec!["c1"]);
}

#[tokio::test]
async fn test_malformed_dataset_is_server_error() {
    let host = mock_host().await;
    let server = create_test_server(&host, AvailabilityPolicy::Always);

    let response = server.get("/events").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_unknown_base_path() {
    let host = mock_host().await;
    let server = create_test_server(&host, AvailabilityPolicy::Always);

    let response = server.get("/hospitals/1").await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.text(), "Not Found");
}

#[tokio::test]
async fn test_repeated_parameter_uses_first_value() {
    let host = mock_host().await;
    let server = create_test_server(&host, AvailabilityPolicy::Always);

    let response = server.get("/bloodbank?name=red&name=lifeline").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(ids(&body), vec!["bb2"]);
}
