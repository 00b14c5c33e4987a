use conduit::http::response::{Response, StatusCode};

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::OK.as_u16(), 200);
    assert_eq!(StatusCode::CREATED.as_u16(), 201);
    assert_eq!(StatusCode::NO_CONTENT.as_u16(), 204);
    assert_eq!(StatusCode::BAD_REQUEST.as_u16(), 400);
    assert_eq!(StatusCode::NOT_FOUND.as_u16(), 404);
    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR.as_u16(), 500);
    assert_eq!(StatusCode::GATEWAY_TIMEOUT.as_u16(), 504);
}

#[test]
fn test_status_code_range() {
    assert_eq!(StatusCode::from_u16(100).map(|s| s.as_u16()), Some(100));
    assert_eq!(StatusCode::from_u16(599).map(|s| s.as_u16()), Some(599));
    assert_eq!(StatusCode::from_u16(99), None);
    assert_eq!(StatusCode::from_u16(600), None);
    assert!(StatusCode::NO_CONTENT.is_success());
    assert!(!StatusCode::NOT_FOUND.is_success());
}

#[test]
fn test_response_with_headers() {
    let response = Response::new(StatusCode::OK)
        .with_header("Content-Type", "text/plain")
        .with_header("X-Custom", "value");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.header("Content-Type"), Some("text/plain"));
    assert_eq!(response.header("X-Custom"), Some("value"));
    assert_eq!(response.headers().len(), 2);
}

#[test]
fn test_response_set_header_overwrites() {
    let mut response = Response::new(StatusCode::OK);
    assert_eq!(response.set_header("P", "1"), None);
    assert_eq!(response.set_header("P", "2"), Some("1".to_string()));
    assert_eq!(response.header("P"), Some("2"));
}

#[test]
fn test_response_header_names_are_case_insensitive() {
    let mut response = Response::new(StatusCode::OK).with_header("Content-Type", "text/plain");
    assert_eq!(response.header("content-type"), Some("text/plain"));

    assert_eq!(
        response.set_header("CONTENT-TYPE", "application/json"),
        Some("text/plain".to_string())
    );
    assert_eq!(response.headers().len(), 1);
    assert_eq!(response.header("Content-Type"), Some("application/json"));

    response.set_header_if_absent("content-type", "text/html");
    assert_eq!(response.header("Content-Type"), Some("application/json"));

    assert_eq!(response.remove_header("content-TYPE"), Some("application/json".to_string()));
    assert!(response.headers().is_empty());
}

#[test]
fn test_response_set_header_if_absent_preserves_existing() {
    let mut response = Response::new(StatusCode::OK).with_header("Content-Length", "999");
    response.set_header_if_absent("Content-Length", "4");
    response.set_header_if_absent("X-New", "yes");

    assert_eq!(response.header("Content-Length"), Some("999"));
    assert_eq!(response.header("X-New"), Some("yes"));
}

#[test]
fn test_response_remove_header() {
    let mut response = Response::new(StatusCode::OK).with_header("Server", "conduit");
    assert_eq!(response.remove_header("Server"), Some("conduit".to_string()));
    assert_eq!(response.remove_header("Server"), None);
    assert!(response.headers().is_empty());
}

#[test]
fn test_internal_error_response() {
    let response = Response::internal_error();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.header("Content-Type"), Some("text/plain"));
}
