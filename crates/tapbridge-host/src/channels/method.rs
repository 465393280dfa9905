//! Method channel request/response types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One request from the application shell. None of the supported methods
/// take arguments; any `arguments` key sent by the shell is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
}

impl MethodCall {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
        }
    }
}

/// Reply to a [`MethodCall`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "body", rename_all = "snake_case")]
pub enum MethodResult {
    Success(Value),
    Error {
        code: String,
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<Value>,
    },
    /// The channel has no handler for this method
    NotImplemented,
}

impl MethodResult {
    /// Success with a `null` body
    pub fn ok() -> Self {
        Self::Success(Value::Null)
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Error {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Handler bound to one method channel
pub trait MethodHandler: Send + Sync {
    fn on_method_call(&self, call: &MethodCall) -> MethodResult;
}
