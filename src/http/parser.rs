use crate::http::request::{Method, Request};
use std::collections::HashMap;
use std::net::SocketAddr;
use thiserror::Error;

/// Ways a raw byte buffer can fail to become a [`Request`].
///
/// Every variant maps to a 400 Bad Request at the connection boundary.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("request is not valid UTF-8")]
    Encoding,
    #[error("missing request line")]
    MissingRequestLine,
    #[error("request line has no method")]
    MissingMethod,
    #[error("request line has no target")]
    MissingTarget,
    #[error("unknown method `{0}`")]
    UnknownMethod(String),
    #[error("malformed header line `{0}`")]
    MalformedHeader(String),
}

/// Strips exactly one trailing `/` unless the path is the root itself.
///
/// Applied both when routes are registered and when requests are
/// parsed, so `/foo/` and `/foo` resolve to the same entry.
pub fn normalize_path(path: &str) -> String {
    if path.len() > 1 && path.ends_with('/') {
        path[..path.len() - 1].to_string()
    } else {
        path.to_string()
    }
}

/// Parses a received byte buffer into a structured [`Request`].
///
/// The buffer is decoded as UTF-8 and split on `\r\n`. Lines before the
/// first blank line form the head; anything after it is the body. There
/// is no Content-Length framing: body presence is purely structural.
pub fn parse_request(raw: &[u8], remote_addr: SocketAddr) -> Result<Request, ParseError> {
    let text = std::str::from_utf8(raw).map_err(|_| ParseError::Encoding)?;
    let lines: Vec<&str> = text.split("\r\n").collect();

    let (head, body) = match lines.iter().position(|l| l.is_empty()) {
        Some(sep) => {
            let tail = lines[sep + 1..].join("\r\n");
            let body = if tail.is_empty() { None } else { Some(tail) };
            (&lines[..sep], body)
        }
        None => (&lines[..], None),
    };

    let request_line = head.first().ok_or(ParseError::MissingRequestLine)?;
    let mut parts = request_line.split_whitespace();
    let method_str = parts.next().ok_or(ParseError::MissingMethod)?;
    let target = parts.next().ok_or(ParseError::MissingTarget)?;

    let method =
        Method::parse(method_str).ok_or_else(|| ParseError::UnknownMethod(method_str.into()))?;

    let (path, query) = match target.split_once('?') {
        Some((path, query)) => (path, parse_query(query)),
        None => (target, HashMap::new()),
    };

    let mut headers = HashMap::new();
    for line in &head[1..] {
        if line.is_empty() {
            continue;
        }
        let (key, value) = line
            .split_once(':')
            .ok_or_else(|| ParseError::MalformedHeader(line.to_string()))?;
        // First colon wins; anything after it stays in the value.
        headers.insert(key.trim().to_string(), value.trim().to_string());
    }

    Ok(Request {
        method,
        path: normalize_path(path),
        query,
        headers,
        remote_addr,
        body,
    })
}

/// Splits a query string on `&` and each pair on its first `=`.
///
/// A pair without `=` discards the whole map: a bad query string reads
/// as "no query parameters", never as an error.
fn parse_query(query: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for pair in query.split('&') {
        match pair.split_once('=') {
            Some((key, value)) => {
                params.insert(key.to_string(), value.to_string());
            }
            None => return HashMap::new(),
        }
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> SocketAddr {
        "127.0.0.1:9999".parse().unwrap()
    }

    #[test]
    fn parse_simple_get() {
        let raw = b"GET / HTTP/1.0\r\nHost: example.com\r\n\r\n";
        let req = parse_request(raw, addr()).unwrap();

        assert_eq!(req.method, Method::GET);
        assert_eq!(req.path, "/");
        assert_eq!(req.headers.get("Host").unwrap(), "example.com");
        assert!(req.body.is_none());
    }

    #[test]
    fn trailing_slash_is_stripped_once() {
        assert_eq!(normalize_path("/foo/"), "/foo");
        assert_eq!(normalize_path("/foo"), "/foo");
        assert_eq!(normalize_path("/"), "/");
    }

    #[test]
    fn query_pairs_split_on_first_equals() {
        let raw = b"GET /s?a=1&b=2=3 HTTP/1.0\r\n\r\n";
        let req = parse_request(raw, addr()).unwrap();

        assert_eq!(req.query.get("a").unwrap(), "1");
        assert_eq!(req.query.get("b").unwrap(), "2=3");
    }
}
