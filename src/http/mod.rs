//! HTTP/1.0 protocol implementation.
//!
//! This module implements the connection-handling pipeline: each
//! accepted connection serves exactly one request/response cycle and
//! closes, matching HTTP/1.0 semantics. There is no keep-alive, no
//! chunked transfer encoding, and no Content-Length framing on
//! requests — a request ends at the first short read.
//!
//! # Pipeline
//!
//! ```text
//! read until short read
//!        │
//!        ▼
//!   parse_request ──── malformed ───→ 400
//!        │
//!        ▼
//!   RouteTable::resolve ─ no path ──→ 404
//!        │              └ no method → 405
//!        ▼
//!   handler ────────── fault/panic ─→ 500
//!        │
//!        ▼
//!   render + write, close
//! ```
//!
//! # Submodules
//!
//! - **`connection`**: drives the cycle above over a plain or TLS stream
//! - **`parser`**: parses a received byte buffer into a request
//! - **`request`**: request representation and method tokens
//! - **`response`**: handler-facing response type and status codes
//! - **`error_pages`**: canned responses for 400/404/405/500
//! - **`writer`**: header composition, wire rendering, stream draining

pub mod connection;
pub mod error_pages;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
