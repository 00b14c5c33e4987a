use std::collections::HashMap;
use std::fmt;

/// Integer HTTP status code.
///
/// Handlers may answer with any code in `100..=599`; the common ones have
/// named constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StatusCode(u16);

impl StatusCode {
    /// 200 OK
    pub const OK: StatusCode = StatusCode(200);
    /// 201 Created
    pub const CREATED: StatusCode = StatusCode(201);
    /// 204 No Content
    pub const NO_CONTENT: StatusCode = StatusCode(204);
    /// 400 Bad Request
    pub const BAD_REQUEST: StatusCode = StatusCode(400);
    /// 404 Not Found
    pub const NOT_FOUND: StatusCode = StatusCode(404);
    /// 500 Internal Server Error
    pub const INTERNAL_SERVER_ERROR: StatusCode = StatusCode(500);
    /// 504 Gateway Timeout
    pub const GATEWAY_TIMEOUT: StatusCode = StatusCode(504);

    /// Returns `None` for codes outside `100..=599`.
    ///
    /// # Example
    ///
    /// ```
    /// # use conduit::http::response::StatusCode;
    /// assert_eq!(StatusCode::from_u16(404), Some(StatusCode::NOT_FOUND));
    /// assert_eq!(StatusCode::from_u16(42), None);
    /// ```
    pub fn from_u16(code: u16) -> Option<Self> {
        (100..=599).contains(&code).then_some(StatusCode(code))
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.0)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Response metadata: status code plus a mutable header map.
///
/// Created by a handler through
/// [`ResponseDispatch`](crate::handler::ResponseDispatch), mutated in place
/// by response filters, then frozen inside a
/// [`Delivery`](crate::host::Delivery). The body is streamed separately
/// through a content channel.
///
/// Header names are case-insensitive: setting `x-port` after `X-Port`
/// replaces the value and the name takes the most recent spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: StatusCode,
    headers: HashMap<String, String>,
}

impl Response {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HashMap::new(),
        }
    }

    /// Adds or replaces a header, builder style.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_header(key, value);
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Adds or replaces a header; returns the previous value.
    pub fn set_header(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let previous = self.remove_header(&key);
        self.headers.insert(key, value.into());
        previous
    }

    /// Sets a header only if it is not present yet.
    pub fn set_header_if_absent(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if self.header(&key).is_none() {
            self.headers.insert(key, value.into());
        }
    }

    pub fn remove_header(&mut self, key: &str) -> Option<String> {
        let name = self.headers.keys().find(|name| name.eq_ignore_ascii_case(key))?.clone();
        self.headers.remove(&name)
    }

    /// 500 response with a plain-text content type, used when the host has
    /// to replace a response it cannot deliver.
    pub fn internal_error() -> Self {
        Response::new(StatusCode::INTERNAL_SERVER_ERROR).with_header("Content-Type", "text/plain")
    }
}
