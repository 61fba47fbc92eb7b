//! Registry client tests
//!
//! Exercises the HTTP client against a local mock of the Companies House API.

use httpmock::prelude::*;
use purgo::error::PurgoError;
use purgo::registry::{
    CompanyRegistry, RegistryClient, RegistrySettings, SearchOutcome, FAILED_TO_FETCH,
    STATUS_NOT_FOUND,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const API_KEY: &str = "test-key";
const EXPECTED_AUTH: &str = "Basic dGVzdC1rZXk=";

fn settings(base_url: String) -> RegistrySettings {
    RegistrySettings {
        base_url,
        max_requests: 499,
        cooldown: Duration::from_secs(300),
        timeout: Duration::from_secs(5),
    }
}

fn client(server: &MockServer) -> RegistryClient {
    RegistryClient::new(API_KEY, settings(server.base_url()))
        .expect("client")
        .with_sleeper(|_| panic!("unexpected cooldown"))
}

/// The key is base64-encoded on its own, without a trailing colon
#[test]
fn test_authorization_header_value() {
    let client = RegistryClient::new(API_KEY, RegistrySettings::default()).expect("client");
    assert_eq!(client.authorization(), EXPECTED_AUTH);
}

/// Search returns the first item's number and sends the auth header
#[test]
fn test_search_found() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/search/companies")
            .query_param("q", "Acme Ltd")
            .header("authorization", EXPECTED_AUTH);
        then.status(200).json_body(serde_json::json!({
            "items": [
                { "company_number": "01234567", "title": "ACME LTD" },
                { "company_number": "07654321", "title": "ACME HOLDINGS LTD" }
            ]
        }));
    });

    let mut client = client(&server);
    let outcome = client.search_by_name("Acme Ltd").unwrap();

    mock.assert_calls(1);
    assert_eq!(outcome, SearchOutcome::Found("01234567".to_string()));
    assert_eq!(client.request_count(), 1);
}

/// An empty item list is "Not Found"
#[test]
fn test_search_not_found() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/search/companies");
        then.status(200).json_body(serde_json::json!({ "items": [] }));
    });

    let outcome = client(&server).search_by_name("Nobody Ltd").unwrap();
    assert_eq!(outcome, SearchOutcome::NotFound);
    assert_eq!(outcome.into_cell_value(), "Not Found");
}

/// A body without `items` also counts as not found
#[test]
fn test_search_missing_items_field() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/search/companies");
        then.status(200).json_body(serde_json::json!({ "kind": "search#companies" }));
    });

    let outcome = client(&server).search_by_name("Acme").unwrap();
    assert_eq!(outcome, SearchOutcome::NotFound);
}

/// Non-200 becomes an "Error: <reason>" value instead of an Err
#[test]
fn test_search_error_status() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/search/companies");
        then.status(500);
    });

    let outcome = client(&server).search_by_name("Acme").unwrap();
    assert_eq!(outcome, SearchOutcome::Failed("Internal Server Error".to_string()));
    assert_eq!(outcome.into_cell_value(), "Error: Internal Server Error");
}

/// 200 returns company_status
#[test]
fn test_fetch_status_active() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/company/01234567")
            .header("authorization", EXPECTED_AUTH);
        then.status(200)
            .json_body(serde_json::json!({ "company_number": "01234567", "company_status": "active" }));
    });

    let status = client(&server).fetch_status("01234567").unwrap();
    mock.assert_calls(1);
    assert_eq!(status, "active");
}

/// 200 without company_status
#[test]
fn test_fetch_status_field_missing() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/company/01234567");
        then.status(200).json_body(serde_json::json!({ "company_number": "01234567" }));
    });

    let status = client(&server).fetch_status("01234567").unwrap();
    assert_eq!(status, STATUS_NOT_FOUND);
}

/// Non-200 retries exactly once with a leading zero, then gives up
#[test]
fn test_fetch_status_retry_then_failure() {
    let server = MockServer::start();
    let first = server.mock(|when, then| {
        when.method(GET).path("/company/1234567");
        then.status(404);
    });
    let retry = server.mock(|when, then| {
        when.method(GET).path("/company/01234567");
        then.status(404);
    });

    let mut client = client(&server);
    let status = client.fetch_status("1234567").unwrap();

    first.assert_calls(1);
    retry.assert_calls(1);
    assert_eq!(status, FAILED_TO_FETCH);
    assert_eq!(client.request_count(), 2);
}

/// The zero-padded retry can succeed
#[test]
fn test_fetch_status_retry_success() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/company/1234567");
        then.status(404);
    });
    server.mock(|when, then| {
        when.method(GET).path("/company/01234567");
        then.status(200).json_body(serde_json::json!({ "company_status": "dissolved" }));
    });

    let status = client(&server).fetch_status("1234567").unwrap();
    assert_eq!(status, "dissolved");
}

/// Once the budget is spent the next call sleeps the cooldown and the count restarts
#[test]
fn test_cooldown_after_budget() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/search/companies");
        then.status(200).json_body(serde_json::json!({ "items": [] }));
    });

    let pauses = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&pauses);
    let mut client = RegistryClient::new(
        API_KEY,
        RegistrySettings {
            max_requests: 3,
            cooldown: Duration::from_secs(300),
            ..settings(server.base_url())
        },
    )
    .unwrap()
    .with_sleeper(move |d| recorded.lock().unwrap().push(d));

    for _ in 0..3 {
        client.search_by_name("Acme").unwrap();
    }
    assert!(pauses.lock().unwrap().is_empty());
    assert_eq!(client.request_count(), 3);

    client.search_by_name("Acme").unwrap();

    mock.assert_calls(4);
    assert_eq!(*pauses.lock().unwrap(), vec![Duration::from_secs(300)]);
    assert_eq!(client.request_count(), 1);
}

/// Connection failures propagate, and still count against the budget
#[test]
fn test_transport_error_propagates() {
    let mut client = RegistryClient::new(API_KEY, settings("http://127.0.0.1:1".to_string()))
        .unwrap()
        .with_sleeper(|_| {});

    let result = client.search_by_name("Acme");
    assert!(matches!(result, Err(PurgoError::Transport(_))));
    assert_eq!(client.request_count(), 1);
}

/// A base URL with a path prefix keeps the prefix
#[test]
fn test_base_url_with_prefix() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/ch/company/01234567");
        then.status(200).json_body(serde_json::json!({ "company_status": "active" }));
    });

    let mut client = RegistryClient::new(API_KEY, settings(format!("{}/ch/", server.base_url())))
        .unwrap()
        .with_sleeper(|_| {});
    assert_eq!(client.fetch_status("01234567").unwrap(), "active");
    mock.assert_calls(1);
}

#[test]
fn test_invalid_base_url() {
    let result = RegistryClient::new(API_KEY, settings("not a url".to_string()));
    assert!(matches!(result, Err(PurgoError::InvalidUrl(_))));
}
