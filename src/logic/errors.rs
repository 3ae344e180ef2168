use anyhow::Error;
use serde_json::Value;

/// Value of the `message` field the API uses to signal an expired bearer token
pub const EXPIRED_SENTINEL: &str = "token_expired";

/// The API reported that the session token is no longer valid.
///
/// Raised by the HTTP client for any response whose JSON body carries the
/// expiry sentinel, regardless of status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("session token expired")]
pub struct SessionExpired;

/// A watchlist selection was requested while another one is still pending
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("a watchlist selection is already pending")]
pub struct SelectorBusy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorType {
    SessionExpired,
    ConnectionRefused,
    Timeout,
    Unauthorized, // HTTP 401
    NotFound,     // HTTP 404
    ServerError,  // HTTP 500+
    NetworkError, // DNS, routing, etc.
    Other,
}

/// Check a response body for the session-expiry sentinel
pub fn is_session_expired(body: &Value) -> bool {
    body.get("message").and_then(Value::as_str) == Some(EXPIRED_SENTINEL)
}

/// True if the error (or anything in its chain) is a [`SessionExpired`]
pub fn is_expiry(error: &Error) -> bool {
    error.chain().any(|cause| cause.is::<SessionExpired>())
}

/// Classify an error based on its type and error chain
pub fn classify_error(error: &Error) -> ErrorType {
    if is_expiry(error) {
        return ErrorType::SessionExpired;
    }

    let error_msg = error.to_string().to_lowercase();

    if error_msg.contains("connection refused") {
        return ErrorType::ConnectionRefused;
    }
    if error_msg.contains("timeout") || error_msg.contains("timed out") {
        return ErrorType::Timeout;
    }

    if let Some(reqwest_err) = error.downcast_ref::<reqwest::Error>() {
        if let Some(status) = reqwest_err.status() {
            return match status.as_u16() {
                401 => ErrorType::Unauthorized,
                404 => ErrorType::NotFound,
                500..=599 => ErrorType::ServerError,
                _ => ErrorType::Other,
            };
        }
    }

    if error_msg.contains("dns") || error_msg.contains("network") {
        return ErrorType::NetworkError;
    }

    ErrorType::Other
}

/// Format error message for a toast - the root cause, not the context chain
pub fn format_error_message(error: &Error) -> String {
    let mut current: Option<&dyn std::error::Error> = Some(error.as_ref());

    while let Some(err) = current {
        if let Some(reqwest_err) = err.downcast_ref::<reqwest::Error>() {
            return reqwest_err.to_string();
        }
        current = err.source();
    }

    error.root_cause().to_string()
}
