use conduit::http::request::{Method, RequestBuilder};

#[test]
fn test_request_header_retrieval() {
    let req = RequestBuilder::new()
        .uri("http://example.com/")
        .header("Host", "example.com")
        .header("Content-Type", "application/json")
        .build()
        .unwrap();

    assert_eq!(req.header("Host"), Some("example.com"));
    assert_eq!(req.header("Content-Type"), Some("application/json"));
    assert_eq!(req.header("Missing"), None);
    assert_eq!(req.header("content-type"), Some("application/json"));
}

#[test]
fn test_request_uri_components() {
    let req = RequestBuilder::new()
        .method(Method::GET)
        .uri("http://localhost:19092/search/?query=music")
        .build()
        .unwrap();

    assert_eq!(req.uri().scheme(), "http");
    assert_eq!(req.uri().host_str(), Some("localhost"));
    assert_eq!(req.uri().port(), Some(19092));
    assert_eq!(req.path(), "/search/");
    assert_eq!(req.uri().query(), Some("query=music"));
    assert_eq!(req.local_port(), None);
}

#[test]
fn test_request_builder_defaults_to_get() {
    let req = RequestBuilder::new().uri("http://example.com/").build().unwrap();
    assert_eq!(req.method(), Method::GET);
}

#[test]
fn test_request_builder_requires_uri() {
    let err = RequestBuilder::new().method(Method::GET).build().unwrap_err();
    assert!(err.to_string().contains("uri missing"));
}

#[test]
fn test_request_builder_rejects_relative_uri() {
    let err = RequestBuilder::new().uri("/relative").build().unwrap_err();
    assert!(err.to_string().contains("invalid request uri"));
}

#[test]
fn test_method_parse_and_display() {
    for name in ["GET", "POST", "PUT", "DELETE", "HEAD", "OPTIONS", "PATCH"] {
        let method = Method::parse(name).unwrap();
        assert_eq!(method.to_string(), name);
    }
    assert_eq!(Method::parse("get"), None);
    assert_eq!(Method::parse("BREW"), None);
}
