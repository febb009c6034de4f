//! Response normalization and failure policies.
//!
//! Successful bodies are reshaped by a [`Normalization`] rule. Failures are
//! then settled by the endpoint's [`FailurePolicy`], which decides whether an
//! error reaches the tool boundary or is folded into a JSON envelope.

use serde_json::{Map, Value, json};
use tracing::{error, warn};

use super::error::{RdError, RdResult};

/// How a successful response body is reshaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalization {
    /// Return the body unchanged.
    PassThrough,

    /// Wrap a bare array as `{<key>: [...], "total": len}`; objects pass through.
    WrapList(&'static str),

    /// Return the body's `items` field when present, the whole body otherwise.
    ItemsOrWhole,
}

impl Normalization {
    pub fn apply(self, body: Value) -> Value {
        match self {
            Self::PassThrough => body,
            Self::WrapList(key) => match body {
                Value::Array(items) => {
                    let total = items.len();
                    let mut wrapped = Map::new();
                    wrapped.insert(key.to_string(), Value::Array(items));
                    wrapped.insert("total".to_string(), Value::from(total));
                    Value::Object(wrapped)
                }
                other => other,
            },
            Self::ItemsOrWhole => match body {
                Value::Object(mut map) => match map.remove("items") {
                    Some(items) => items,
                    None => Value::Object(map),
                },
                other => other,
            },
        }
    }
}

/// What happens when a request fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Every error reaches the tool boundary.
    Strict,

    /// Status errors become `{success: false, status_code, error}`.
    Soft,

    /// Status errors become `{error: "HTTP <code>", details}`, others `{error}`.
    Detailed,

    /// Any error is logged and the result is `null`.
    Nullable,
}

impl FailurePolicy {
    /// Fold a failed outcome into an envelope where the policy allows it.
    pub fn settle(self, tool: &str, outcome: RdResult<Value>) -> RdResult<Value> {
        let err = match outcome {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        match (self, err) {
            (Self::Soft, RdError::Status { status, body }) => {
                warn!(tool, status, "RD returned an error status");
                Ok(soft_failure(status, body))
            }
            (Self::Detailed, RdError::Status { status, body }) => {
                error!("HTTP error occurred in {}: {} - {}", tool, status, body);
                Ok(json!({ "error": format!("HTTP {}", status), "details": body }))
            }
            (Self::Detailed, err) => {
                error!("An unexpected error occurred in {}: {}", tool, err);
                Ok(error_envelope(&err))
            }
            (Self::Nullable, RdError::Status { status, body }) => {
                error!("HTTP error occurred in {}: {} - {}", tool, status, body);
                Ok(Value::Null)
            }
            (Self::Nullable, err) => {
                error!("An unexpected error occurred in {}: {}", tool, err);
                Ok(Value::Null)
            }
            (_, err) => Err(err),
        }
    }
}

/// `{success: false, status_code, error}` for a rejected request.
pub fn soft_failure(status: u16, body: String) -> Value {
    json!({
        "success": false,
        "status_code": status,
        "error": body,
    })
}

/// `{error: <message>}` for a failure caught at the tool boundary.
pub fn error_envelope(err: &dyn std::fmt::Display) -> Value {
    json!({ "error": err.to_string() })
}

/// Body used for a successful response with nothing in it (e.g. 204).
pub fn empty_success(status: u16) -> Value {
    json!({ "success": true, "status_code": status })
}
