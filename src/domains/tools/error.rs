//! Tool-specific error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::catalog::ValueType;

/// Domain failures signalled by an operation handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    /// Divisor was exactly zero.
    #[error("Division by zero")]
    DivisionByZero,

    /// Any other domain-level failure.
    #[error("{0}")]
    Domain(String),
}

impl HandlerError {
    /// Create a new domain failure.
    pub fn domain(msg: impl Into<String>) -> Self {
        Self::Domain(msg.into())
    }

    /// Stable machine-readable kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DivisionByZero => "division_by_zero",
            Self::Domain(_) => "operation_error",
        }
    }
}

/// Errors that can occur while building the catalog or dispatching a call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToolError {
    /// An operation with this name is already registered.
    #[error("Duplicate operation: {0}")]
    DuplicateOperation(String),

    /// An operation declares the same parameter twice.
    #[error("Duplicate parameter '{parameter}' in operation '{operation}'")]
    DuplicateParameter { operation: String, parameter: String },

    /// The requested operation was not found.
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// The argument payload has the wrong shape.
    #[error("Invalid arguments for '{operation}': {reason}")]
    InvalidArguments { operation: String, reason: String },

    /// A required parameter was not supplied.
    #[error("Missing required argument '{parameter}' for '{operation}'")]
    MissingRequiredArgument { operation: String, parameter: String },

    /// A supplied value could not be read as the declared type.
    #[error("Argument '{parameter}' for '{operation}' must be a {expected}")]
    TypeMismatch {
        operation: String,
        parameter: String,
        expected: ValueType,
    },

    /// The handler ran and reported a domain failure.
    #[error("Operation '{operation}' failed: {source}")]
    Operation {
        operation: String,
        #[source]
        source: HandlerError,
    },
}

impl ToolError {
    /// Create a new "duplicate operation" error.
    pub fn duplicate_operation(name: impl Into<String>) -> Self {
        Self::DuplicateOperation(name.into())
    }

    /// Create a new "duplicate parameter" error.
    pub fn duplicate_parameter(operation: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self::DuplicateParameter {
            operation: operation.into(),
            parameter: parameter.into(),
        }
    }

    /// Create a new "unknown operation" error.
    pub fn unknown_operation(name: impl Into<String>) -> Self {
        Self::UnknownOperation(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArguments {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Create a new "missing required argument" error.
    pub fn missing_argument(operation: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self::MissingRequiredArgument {
            operation: operation.into(),
            parameter: parameter.into(),
        }
    }

    /// Create a new "type mismatch" error.
    pub fn type_mismatch(
        operation: impl Into<String>,
        parameter: impl Into<String>,
        expected: ValueType,
    ) -> Self {
        Self::TypeMismatch {
            operation: operation.into(),
            parameter: parameter.into(),
            expected,
        }
    }

    /// Wrap a handler failure.
    pub fn operation(operation: impl Into<String>, source: HandlerError) -> Self {
        Self::Operation {
            operation: operation.into(),
            source,
        }
    }

    /// Stable machine-readable kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DuplicateOperation(_) => "duplicate_operation",
            Self::DuplicateParameter { .. } => "duplicate_parameter",
            Self::UnknownOperation(_) => "unknown_operation",
            Self::InvalidArguments { .. } => "invalid_arguments",
            Self::MissingRequiredArgument { .. } => "missing_required_argument",
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::Operation { source, .. } => source.kind(),
        }
    }

    /// True when the failure came from the handler rather than validation.
    pub fn is_handler_failure(&self) -> bool {
        matches!(self, Self::Operation { .. })
    }

    /// Name of the operation involved, if any.
    pub fn operation_name(&self) -> &str {
        match self {
            Self::DuplicateOperation(name) | Self::UnknownOperation(name) => name.as_str(),
            Self::DuplicateParameter { operation, .. }
            | Self::InvalidArguments { operation, .. }
            | Self::MissingRequiredArgument { operation, .. }
            | Self::TypeMismatch { operation, .. }
            | Self::Operation { operation, .. } => operation.as_str(),
        }
    }

    /// Name of the offending parameter, if any.
    pub fn parameter_name(&self) -> Option<&str> {
        match self {
            Self::DuplicateParameter { parameter, .. }
            | Self::MissingRequiredArgument { parameter, .. }
            | Self::TypeMismatch { parameter, .. } => Some(parameter.as_str()),
            _ => None,
        }
    }

    /// Structured form handed to transports.
    pub fn to_failure(&self) -> InvocationFailure {
        let message = match self {
            Self::Operation { source, .. } => source.to_string(),
            other => other.to_string(),
        };

        InvocationFailure {
            kind: self.kind().to_string(),
            message,
            operation: Some(self.operation_name().to_string()),
            parameter: self.parameter_name().map(str::to_string),
        }
    }
}

/// Serializable failure for the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationFailure {
    /// Machine-readable failure kind (e.g. `missing_required_argument`).
    pub kind: String,

    /// Human readable message.
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
}

impl From<&ToolError> for InvocationFailure {
    fn from(err: &ToolError) -> Self {
        err.to_failure()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_argument_failure() {
        let failure = ToolError::missing_argument("add", "b").to_failure();
        assert_eq!(failure.kind, "missing_required_argument");
        assert_eq!(failure.operation.as_deref(), Some("add"));
        assert_eq!(failure.parameter.as_deref(), Some("b"));
        assert!(failure.message.contains("'b'"));
    }

    #[test]
    fn test_handler_failure_keeps_handler_message() {
        let err = ToolError::operation("divide", HandlerError::DivisionByZero);
        assert!(err.is_handler_failure());
        assert_eq!(err.kind(), "division_by_zero");

        let failure = err.to_failure();
        assert_eq!(failure.message, "Division by zero");
        assert_eq!(failure.parameter, None);
    }

    #[test]
    fn test_type_mismatch_message() {
        let err = ToolError::type_mismatch("add", "a", ValueType::Number);
        assert_eq!(err.to_string(), "Argument 'a' for 'add' must be a number");
        assert_eq!(err.parameter_name(), Some("a"));
    }

    #[test]
    fn test_failure_serialization_skips_empty_fields() {
        let failure = InvocationFailure {
            kind: "unknown_operation".into(),
            message: "Unknown operation: noop".into(),
            operation: None,
            parameter: None,
        };
        let json = serde_json::to_value(&failure).unwrap();
        assert!(json.get("operation").is_none());
        assert!(json.get("parameter").is_none());
    }
}
