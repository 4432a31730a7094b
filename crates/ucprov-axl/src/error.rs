//! AXL transport error types.

use thiserror::Error;

use ucprov_core::{OpsError, OpsFailureKind};

/// Error raised by the AXL transport layer.
///
/// The three failure classes callers distinguish are kept distinct: transport
/// failures ([`AxlError::Network`], [`AxlError::Timeout`], [`AxlError::Http`]),
/// malformed responses, and remote-reported operation faults. Callers that
/// need the distinction can use [`AxlError::is_transport`] /
/// [`AxlError::is_fault`].
#[derive(Debug, Error)]
pub enum AxlError {
    /// Could not reach the AXL endpoint.
    #[error("network error: {0}")]
    Network(String),

    /// The request hit the fixed transport timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The endpoint answered with a non-success HTTP status.
    #[error("HTTP {status} from AXL endpoint: {detail}")]
    Http { status: u16, detail: String },

    /// A response arrived but could not be parsed as an AXL document.
    #[error("malformed AXL response: {0}")]
    MalformedResponse(String),

    /// A well-formed response carrying a `<faultstring>` rejection.
    #[error("AXL fault: {0}")]
    Fault(String),

    /// The client could not be constructed from its configuration.
    #[error("invalid AXL configuration: {0}")]
    InvalidConfig(String),
}

impl AxlError {
    /// Whether the failure happened before a response could be interpreted.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            AxlError::Network(_) | AxlError::Timeout(_) | AxlError::Http { .. }
        )
    }

    /// Whether the remote system rejected the specific operation.
    #[must_use]
    pub fn is_fault(&self) -> bool {
        matches!(self, AxlError::Fault(_))
    }

    /// Fold into the core's per-operation error, tagged with the operation
    /// name that originated the call.
    #[must_use]
    pub fn into_ops_error(self, operation: &'static str) -> OpsError {
        let kind = match &self {
            AxlError::Fault(_) => OpsFailureKind::RemoteFault,
            AxlError::MalformedResponse(_) => OpsFailureKind::MalformedResponse,
            _ => OpsFailureKind::Transport,
        };
        OpsError::new(operation, kind, self.to_string())
    }
}

impl From<reqwest::Error> for AxlError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AxlError::Timeout(e.to_string())
        } else {
            AxlError::Network(e.to_string())
        }
    }
}

/// Result alias for AXL operations.
pub type AxlResult<T> = Result<T, AxlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert!(AxlError::Network("refused".into()).is_transport());
        assert!(AxlError::Timeout("10s".into()).is_transport());
        assert!(AxlError::Http {
            status: 503,
            detail: "unavailable".into()
        }
        .is_transport());
        assert!(!AxlError::Fault("no such table".into()).is_transport());
        assert!(AxlError::Fault("no such table".into()).is_fault());
        assert!(!AxlError::MalformedResponse("truncated".into()).is_fault());
    }

    #[test]
    fn ops_error_carries_operation_and_kind() {
        let err = AxlError::Fault("duplicate value".into()).into_ops_error("add_group_membership");
        assert_eq!(err.operation, "add_group_membership");
        assert_eq!(err.kind, OpsFailureKind::RemoteFault);

        let err = AxlError::Network("refused".into()).into_ops_error("find_user");
        assert_eq!(err.kind, OpsFailureKind::Transport);
    }
}
