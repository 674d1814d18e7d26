//! Errors surfaced by the role-gated community flows.
//!
//! A [`DomainError`] pairs a stable [`ErrorCode`] with a message the
//! dashboards can show as-is, plus optional structured details. Errors only
//! travel outward, so the payload serializes but is never parsed back.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

use crate::domain::access_request::UnknownLabelError;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Form input failed validation or a status change is not allowed.
    InvalidRequest,
    /// Nobody is logged in, or the credentials matched no account.
    Unauthorized,
    /// The logged-in account lacks the role or approval the action needs.
    Forbidden,
    /// The referenced account, request, notice or charge does not exist.
    NotFound,
}

impl ErrorCode {
    /// Wire label of the code.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
        }
    }

    const fn fallback_message(self) -> &'static str {
        match self {
            Self::InvalidRequest => "the request is invalid",
            Self::Unauthorized => "login required",
            Self::Forbidden => "access denied",
            Self::NotFound => "not found",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorCode {
    type Err = UnknownLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "invalid_request" => Ok(Self::InvalidRequest),
            "unauthorized" => Ok(Self::Unauthorized),
            "forbidden" => Ok(Self::Forbidden),
            "not_found" => Ok(Self::NotFound),
            other => Err(UnknownLabelError::new("error code", other)),
        }
    }
}

/// Failure returned by [`Community`](crate::domain::Community) and
/// [`Session`](crate::domain::Session) operations.
///
/// ## Invariants
/// - `message` is never blank. A blank message is replaced by a generic
///   description of the code.
///
/// # Examples
/// ```
/// use secudeliv::domain::{DomainError, ErrorCode};
///
/// let err = DomainError::unknown("charge", "c-1");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.to_string(), "charge c-1 not found");
/// ```
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("{message}")]
#[serde(rename_all = "camelCase")]
pub struct DomainError {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl DomainError {
    /// Build an error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            code.fallback_message().to_owned()
        } else {
            message
        };
        Self {
            code,
            message,
            details: None,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Message for the dashboards.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Structured details, such as the offending field or status pair.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details to the error.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Shorthand for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Shorthand for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Shorthand for [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Shorthand for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// A lookup of `kind` by `id` found nothing.
    pub fn unknown(kind: &str, id: impl fmt::Display) -> Self {
        let id = id.to_string();
        Self::not_found(format!("{kind} {id} not found"))
            .with_details(json!({ "kind": kind, "id": id }))
    }
}

#[cfg(test)]
mod tests;
