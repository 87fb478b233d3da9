use crate::http::response::StatusCode;
use std::collections::HashMap;

/// A canned response body for an error status.
#[derive(Debug, Clone)]
pub struct ErrorPage {
    pub content_type: String,
    pub body: String,
}

/// Registry of canned error responses.
///
/// Seeded with plain-text defaults for the four statuses the connection
/// pipeline can emit on its own (400, 404, 405, 500). Applications may
/// replace any page during setup; the registry is frozen along with the
/// route table once serving starts.
#[derive(Debug, Clone)]
pub struct ErrorPages {
    pages: HashMap<StatusCode, ErrorPage>,
}

impl ErrorPages {
    /// Creates the registry with the four seeded defaults.
    pub fn new() -> Self {
        let mut pages = HashMap::new();
        for status in [
            StatusCode::BadRequest,
            StatusCode::NotFound,
            StatusCode::MethodNotAllowed,
            StatusCode::InternalServerError,
        ] {
            pages.insert(
                status,
                ErrorPage {
                    content_type: "text/plain".to_string(),
                    body: status.reason_phrase().to_string(),
                },
            );
        }
        Self { pages }
    }

    /// Replaces the canned response for a status code.
    pub fn set(
        &mut self,
        status: StatusCode,
        content_type: impl Into<String>,
        body: impl Into<String>,
    ) {
        self.pages.insert(
            status,
            ErrorPage {
                content_type: content_type.into(),
                body: body.into(),
            },
        );
    }

    /// Returns the page for a status code.
    ///
    /// Statuses outside the registry fall back to a plain-text page
    /// carrying the reason phrase; the serving path only ever asks for
    /// the four seeded statuses.
    pub fn page(&self, status: StatusCode) -> ErrorPage {
        self.pages.get(&status).cloned().unwrap_or_else(|| ErrorPage {
            content_type: "text/plain".to_string(),
            body: status.reason_phrase().to_string(),
        })
    }
}

impl Default for ErrorPages {
    fn default() -> Self {
        Self::new()
    }
}
