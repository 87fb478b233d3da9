use std::collections::HashMap;

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::error_pages::ErrorPage;
use crate::http::response::{Body, Response, StatusCode};

const HTTP_VERSION: &str = "HTTP/1.0";

/// Line-terminator allowance included in every computed Content-Length;
/// text bodies are written with a trailing CRLF that this accounts for.
const BODY_PADDING: usize = 2;

/// Renders a handler's response to wire bytes.
///
/// Header precedence, lowest to highest: app/route default headers,
/// then computed headers (`Content-Type` from the matched route's
/// registered type, `Content-Length` from the body length), then
/// handler-supplied headers. Higher precedence overwrites same-named
/// keys.
pub fn render_response(
    response: &Response,
    content_type: &str,
    default_headers: &HashMap<String, String>,
) -> Vec<u8> {
    let mut headers = default_headers.clone();
    headers.insert("Content-Type".to_string(), content_type.to_string());
    headers.insert(
        "Content-Length".to_string(),
        (response.body.len() + BODY_PADDING).to_string(),
    );
    for (key, value) in &response.headers {
        headers.insert(key.clone(), value.clone());
    }

    serialize(response.status, &headers, &response.body)
}

/// Renders a canned error page to wire bytes.
///
/// Same composition as [`render_response`] minus handler headers, which
/// do not exist for error responses.
pub fn render_error(
    status: StatusCode,
    page: &ErrorPage,
    default_headers: &HashMap<String, String>,
) -> Vec<u8> {
    let mut headers = default_headers.clone();
    headers.insert("Content-Type".to_string(), page.content_type.clone());
    headers.insert(
        "Content-Length".to_string(),
        (page.body.len() + BODY_PADDING).to_string(),
    );

    serialize(status, &headers, &Body::Text(page.body.clone()))
}

fn serialize(status: StatusCode, headers: &HashMap<String, String>, body: &Body) -> Vec<u8> {
    let mut buf = Vec::new();

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        status.as_u16(),
        status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    // Headers
    for (key, value) in headers {
        buf.extend_from_slice(key.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(value.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    // Text bodies carry the trailing terminator counted by
    // BODY_PADDING; binary bodies are passed through untouched.
    match body {
        Body::Text(text) => {
            buf.extend_from_slice(text.as_bytes());
            buf.extend_from_slice(b"\r\n");
        }
        Body::Binary(bytes) => buf.extend_from_slice(bytes),
    }

    buf
}

/// Drains a rendered response to a stream, tolerating short writes.
pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(buffer: Vec<u8>) -> Self {
        Self { buffer, written: 0 }
    }

    pub async fn write_to<S>(&mut self, stream: &mut S) -> anyhow::Result<()>
    where
        S: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}
