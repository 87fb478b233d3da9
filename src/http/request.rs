use std::collections::HashMap;
use std::net::SocketAddr;

/// HTTP request methods.
///
/// One registration slot exists per method on every route, so the enum
/// covers the full set of registrable methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Create or submit data
    POST,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// PUT - Replace a resource
    PUT,
    /// DELETE - Delete a resource
    DELETE,
    /// CONNECT - Establish a tunnel
    CONNECT,
    /// OPTIONS - Describe communication options
    OPTIONS,
    /// TRACE - Echo the received request
    TRACE,
    /// PATCH - Partial modification of a resource
    PATCH,
}

impl Method {
    /// Parses an HTTP method from its wire token.
    ///
    /// Matching is case-sensitive: methods are uppercase tokens on the
    /// wire, so `"get"` is not a valid method.
    ///
    /// # Example
    ///
    /// ```
    /// # use comet::http::request::Method;
    /// assert_eq!(Method::parse("GET"), Some(Method::GET));
    /// assert_eq!(Method::parse("get"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            "POST" => Some(Method::POST),
            "HEAD" => Some(Method::HEAD),
            "PUT" => Some(Method::PUT),
            "DELETE" => Some(Method::DELETE),
            "CONNECT" => Some(Method::CONNECT),
            "OPTIONS" => Some(Method::OPTIONS),
            "TRACE" => Some(Method::TRACE),
            "PATCH" => Some(Method::PATCH),
            _ => None,
        }
    }

    /// Returns the wire token for this method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::HEAD => "HEAD",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::CONNECT => "CONNECT",
            Method::OPTIONS => "OPTIONS",
            Method::TRACE => "TRACE",
            Method::PATCH => "PATCH",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a parsed HTTP request from a client.
///
/// Built by the parser from the raw byte stream and handed to the
/// matched handler. One request exists per connection and is discarded
/// after the response is written.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method (GET, POST, etc.)
    pub method: Method,
    /// The normalized request path (trailing slash stripped except on `/`)
    pub path: String,
    /// Query parameters from the request target; empty when absent
    pub query: HashMap<String, String>,
    /// Request headers as received; duplicate names keep the last value
    pub headers: HashMap<String, String>,
    /// Peer address of the connection that carried the request
    pub remote_addr: SocketAddr,
    /// Request body, present only when the message continues past the
    /// head/body separator
    pub body: Option<String>,
}

impl Request {
    /// Retrieves a header value by name.
    ///
    /// Names are stored as received; lookups are exact.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(|v| v.as_str())
    }

    /// Retrieves a query parameter by name.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(|v| v.as_str())
    }
}
