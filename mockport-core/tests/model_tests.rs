use mockport_core::api::{Api, ApiStatus};
use mockport_core::log::LogRecordInput;
use mockport_core::route::{HttpMethod, Route};
use mockport_core::simulator::InvocationOutcome;
use serde_json::json;
use std::cmp::Ordering;
use uuid::Uuid;

// =============================================================================
// Api Tests
// =============================================================================

#[test]
fn test_api_minimal_deserialization() {
    let json = r#"{"id":"5b1f0c3e-8f6a-4d2b-9c1e-7a3b2c1d0e9f","name":"Orders","version":"1.0"}"#;
    let api: Api = serde_json::from_str(json).unwrap();
    assert_eq!(api.name, "Orders");
    assert_eq!(api.version, "1.0");
    assert!(api.description.is_none());
    assert_eq!(api.status, ApiStatus::Draft);
    assert!(api.created_at.is_none());
    assert!(!api.is_published());
}

#[test]
fn test_api_status_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&ApiStatus::Published).unwrap(), "\"published\"");
    assert_eq!(serde_json::to_string(&ApiStatus::Draft).unwrap(), "\"draft\"");
    assert_eq!(serde_json::to_string(&ApiStatus::Deprecated).unwrap(), "\"deprecated\"");
}

#[test]
fn test_api_listable_requires_published_and_fields() {
    let mut api: Api = serde_json::from_value(json!({
        "id": Uuid::new_v4(),
        "name": "Orders",
        "version": "2.1",
        "status": "published"
    }))
    .unwrap();
    assert!(api.is_listable());

    api.name = "   ".into();
    assert!(!api.is_listable());

    api.name = "Orders".into();
    api.version = String::new();
    assert!(!api.is_listable());

    api.version = "2.1".into();
    api.status = ApiStatus::Deprecated;
    assert!(!api.is_listable());
}

// =============================================================================
// Route Tests
// =============================================================================

#[test]
fn test_route_minimal_deserialization_defaults() {
    let route: Route = serde_json::from_value(json!({
        "id": Uuid::new_v4(),
        "api_id": Uuid::new_v4(),
        "method": "GET",
        "path": "/health"
    }))
    .unwrap();
    assert!(route.enabled);
    assert!(route.status_code.is_none());
    assert!(route.mock_response_json.is_none());
    assert_eq!(route.method, HttpMethod::Get);
}

#[test]
fn test_route_rejects_unknown_method() {
    let result: Result<Route, _> = serde_json::from_value(json!({
        "id": Uuid::new_v4(),
        "api_id": Uuid::new_v4(),
        "method": "FETCH",
        "path": "/x"
    }));
    assert!(result.is_err());
}

#[test]
fn test_route_display_order_by_method_then_path() {
    let make = |method: HttpMethod, path: &str| Route {
        id: Uuid::new_v4(),
        api_id: Uuid::nil(),
        method,
        path: path.into(),
        enabled: true,
        status_code: None,
        mock_response_json: None,
    };
    let mut routes = vec![
        make(HttpMethod::Post, "/orders"),
        make(HttpMethod::Get, "/orders/{id}"),
        make(HttpMethod::Delete, "/orders/{id}"),
        make(HttpMethod::Get, "/orders"),
    ];
    routes.sort_by(Route::display_order);
    let order: Vec<(&str, &str)> = routes
        .iter()
        .map(|r| (r.method.as_str(), r.path.as_str()))
        .collect();
    assert_eq!(
        order,
        vec![
            ("DELETE", "/orders/{id}"),
            ("GET", "/orders"),
            ("GET", "/orders/{id}"),
            ("POST", "/orders"),
        ]
    );
    assert_eq!(Route::display_order(&routes[0], &routes[0]), Ordering::Equal);
}

// =============================================================================
// LogRecord Tests
// =============================================================================

#[test]
fn test_log_input_copies_route_fields_at_invocation_time() {
    let mut route = Route {
        id: Uuid::new_v4(),
        api_id: Uuid::new_v4(),
        method: HttpMethod::Patch,
        path: "/users/{id}".into(),
        enabled: true,
        status_code: None,
        mock_response_json: None,
    };
    let outcome = InvocationOutcome {
        status_code: 200,
        latency_ms: 77,
        body: json!({ "message": "ok" }),
    };
    let input = LogRecordInput::from_outcome(&route, &outcome);

    // Later edits to the route don't affect the captured input.
    route.path = "/people/{id}".into();
    route.status_code = Some(500);

    assert_eq!(input.method, "PATCH");
    assert_eq!(input.path, "/users/{id}");
    assert_eq!(input.status_code, 200);
    assert_eq!(input.latency_ms, 77);

    let record = input.into_record(Uuid::new_v4(), chrono::Utc::now());
    assert!(!record.is_error());
}
