use std::collections::HashMap;
use std::fmt;

use anyhow::Context;
use url::Url;

/// HTTP request methods.
///
/// The transport layer hands the method over already parsed; handlers match
/// on it to decide what to do with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Create or submit data
    POST,
    /// PUT - Replace a resource
    PUT,
    /// DELETE - Delete a resource
    DELETE,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// OPTIONS - Describe communication options
    OPTIONS,
    /// PATCH - Partial modification of a resource
    PATCH,
}

impl Method {
    /// Parses an HTTP method from its canonical (uppercase) name.
    ///
    /// # Example
    ///
    /// ```
    /// # use conduit::http::request::Method;
    /// assert_eq!(Method::parse("GET"), Some(Method::GET));
    /// assert_eq!(Method::parse("get"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            "POST" => Some(Method::POST),
            "PUT" => Some(Method::PUT),
            "DELETE" => Some(Method::DELETE),
            "HEAD" => Some(Method::HEAD),
            "OPTIONS" => Some(Method::OPTIONS),
            "PATCH" => Some(Method::PATCH),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::HEAD => "HEAD",
            Method::OPTIONS => "OPTIONS",
            Method::PATCH => "PATCH",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An inbound request as supplied by the transport layer.
///
/// Immutable once built: handlers only ever see `&Request`. The body is not
/// part of the request; it arrives through the content channel the handler
/// returns.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    uri: Url,
    headers: HashMap<String, String>,
    local_port: Option<u16>,
}

/// Builder for constructing Request objects.
#[derive(Debug, Default)]
pub struct RequestBuilder {
    method: Option<Method>,
    uri: Option<String>,
    headers: HashMap<String, String>,
    local_port: Option<u16>,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Absolute request URI, e.g. `http://localhost:8080/search?q=x`.
    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Port the connection was actually accepted on, as observed by the
    /// transport. May differ from the port in the URI.
    pub fn local_port(mut self, port: u16) -> Self {
        self.local_port = Some(port);
        self
    }

    pub fn build(self) -> anyhow::Result<Request> {
        let raw = self.uri.context("uri missing")?;
        let uri = Url::parse(&raw).with_context(|| format!("invalid request uri `{raw}`"))?;

        Ok(Request {
            method: self.method.unwrap_or(Method::GET),
            uri,
            headers: self.headers,
            local_port: self.local_port,
        })
    }
}

impl Request {
    pub fn method(&self) -> Method {
        self.method
    }

    pub fn uri(&self) -> &Url {
        &self.uri
    }

    /// Path component of the URI, always starting with `/`.
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Retrieves a header value; names compare case-insensitively.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Observed local port of the connection, if the transport reported one.
    pub fn local_port(&self) -> Option<u16> {
        self.local_port
    }
}
