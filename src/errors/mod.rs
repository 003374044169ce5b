/// Structured error types for coinfolio
///
/// Gateway failures are scoped to the single requested operation and are
/// always surfaced to the caller. Portfolio errors live in their own module.
use thiserror::Error;

pub mod portfolio;
pub use portfolio::*;

// =============================================================================
// GATEWAY ERRORS
// =============================================================================

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("Invalid argument for {operation}: {reason}")]
    InvalidArgument {
        operation: &'static str,
        reason: String,
    },

    #[error("{operation} failed{}: {reason}", status_suffix(.status))]
    FetchFailed {
        operation: &'static str,
        status: Option<u16>,
        reason: String,
    },

    #[error("{operation}: '{id}' not found")]
    NotFound { operation: &'static str, id: String },
}

fn status_suffix(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (HTTP {})", code),
        None => String::new(),
    }
}

impl GatewayError {
    pub fn invalid(operation: &'static str, reason: impl Into<String>) -> Self {
        GatewayError::InvalidArgument {
            operation,
            reason: reason.into(),
        }
    }

    pub fn fetch_failed(
        operation: &'static str,
        status: Option<u16>,
        reason: impl Into<String>,
    ) -> Self {
        GatewayError::FetchFailed {
            operation,
            status,
            reason: reason.into(),
        }
    }

    pub fn not_found(operation: &'static str, id: impl Into<String>) -> Self {
        GatewayError::NotFound {
            operation,
            id: id.into(),
        }
    }

    /// Name of the gateway operation that produced this error
    pub fn operation(&self) -> &'static str {
        match self {
            GatewayError::InvalidArgument { operation, .. }
            | GatewayError::FetchFailed { operation, .. }
            | GatewayError::NotFound { operation, .. } => operation,
        }
    }

    /// Provider status code, when the failure came with one
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::FetchFailed { status, .. } => *status,
            _ => None,
        }
    }

    /// Whether retrying the same call could succeed
    pub fn is_recoverable(&self) -> bool {
        matches!(self, GatewayError::FetchFailed { .. })
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

// =============================================================================
// TRANSPORT ERRORS
// =============================================================================

/// Failure below the HTTP status layer (no response was received)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    #[error("request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Other(String),
}

impl TransportError {
    pub fn into_gateway(self, operation: &'static str) -> GatewayError {
        GatewayError::fetch_failed(operation, None, self.to_string())
    }
}
