// Maps the post-creation response to the single line shown to the user.

use std::fmt;

use crate::wordpress::HttpResult;

/// What happened to the post. Every status code lands in exactly one
/// variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// 201 Created.
    Created,
    /// 401, whatever the body says.
    Unauthorized,
    /// 400, with the response body.
    BadRequest { body: String },
    /// Anything else: 403, 404, 429, 5xx, even other 2xx codes.
    Failed { status: u16, body: String },
}

impl Outcome {
    pub fn from_result(result: &HttpResult) -> Self {
        match result.status {
            201 => Outcome::Created,
            401 => Outcome::Unauthorized,
            400 => Outcome::BadRequest {
                body: body_text(result),
            },
            status => Outcome::Failed {
                status,
                body: body_text(result),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Created)
    }
}

/// Compact JSON when the body parsed, the raw text otherwise.
fn body_text(result: &HttpResult) -> String {
    match &result.body {
        Some(value) => value.to_string(),
        None => result.raw.clone(),
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Created => write!(f, "Blog post created successfully!"),
            Outcome::Unauthorized => write!(f, "Unauthorized: Invalid API Key"),
            Outcome::BadRequest { body } => write!(f, "Bad Request: {}", body),
            Outcome::Failed { status, body } => {
                write!(f, "Failed to create post: {} {}", status, body)
            }
        }
    }
}
