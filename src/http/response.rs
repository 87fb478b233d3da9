use bytes::Bytes;
use std::collections::HashMap;

/// HTTP status codes emitted by the server.
///
/// - `Ok` (200): handler completed normally
/// - `Created` (201) / `NoContent` (204): available to handlers
/// - `BadRequest` (400): malformed request bytes
/// - `NotFound` (404): no route for the path
/// - `MethodNotAllowed` (405): route exists, method slot empty
/// - `InternalServerError` (500): handler fault
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 201 Created
    Created,
    /// 204 No Content
    NoContent,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
    /// 405 Method Not Allowed
    MethodNotAllowed,
    /// 500 Internal Server Error
    InternalServerError,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use comet::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Created => 201,
            StatusCode::NoContent => 204,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
            StatusCode::InternalServerError => 500,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Created => "Created",
            StatusCode::NoContent => "No Content",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }
}

/// A response payload: text is written with the message encoding, raw
/// bytes are passed through untouched.
#[derive(Debug, Clone)]
pub enum Body {
    Text(String),
    Binary(Bytes),
}

impl Body {
    /// Byte length of the payload.
    pub fn len(&self) -> usize {
        match self {
            Body::Text(s) => s.len(),
            Body::Binary(b) => b.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// What a handler returns: a payload, optional headers that override
/// anything the server would compute, and a status code defaulting to
/// 200 OK.
#[derive(Debug, Clone)]
pub struct Response {
    /// Response payload
    pub body: Body,
    /// Handler-supplied headers; these win over computed headers
    pub headers: HashMap<String, String>,
    /// Status for the response line
    pub status: StatusCode,
}

impl Response {
    /// Creates a 200 OK response with a text body.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            body: Body::Text(content.into()),
            headers: HashMap::new(),
            status: StatusCode::Ok,
        }
    }

    /// Creates a 200 OK response with a binary body.
    pub fn binary(content: impl Into<Bytes>) -> Self {
        Self {
            body: Body::Binary(content.into()),
            headers: HashMap::new(),
            status: StatusCode::Ok,
        }
    }

    /// Adds or replaces a response header.
    ///
    /// Handler headers take precedence over computed headers, so this
    /// can override `Content-Type` and `Content-Length`.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Replaces the status code.
    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}
