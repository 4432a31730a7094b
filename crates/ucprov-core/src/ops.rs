//! Remote directory operation seam.
//!
//! The orchestrator talks to the directory system exclusively through
//! [`DirectoryOps`], one narrow async method per remote operation. Transport
//! implementations live in their own crates; tests substitute an in-memory
//! recording implementation.

use std::collections::BTreeSet;

use async_trait::async_trait;
use thiserror::Error;

/// A user record read from the remote directory.
///
/// Immutable once read; scoped to a single provisioning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Display name, assembled from the directory's name columns.
    pub full_name: String,
    /// Primary directory number for the user's line.
    pub phone_number: String,
    /// Opaque key (pkid) identifying the user row.
    pub user_key: String,
}

/// Failure class of a single remote operation.
///
/// The orchestrator treats all three identically (the operation failed), but
/// implementations must not conflate "could not reach the server" with "the
/// server rejected this query".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpsFailureKind {
    /// Network or timeout failure before a response was interpreted.
    Transport,
    /// A response arrived but could not be parsed.
    MalformedResponse,
    /// A well-formed response carrying a remote-reported fault.
    RemoteFault,
}

/// Error reported by a [`DirectoryOps`] implementation for one operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{operation} failed ({kind:?}): {message}")]
pub struct OpsError {
    /// Name of the remote operation that failed.
    pub operation: &'static str,
    pub kind: OpsFailureKind,
    pub message: String,
}

impl OpsError {
    #[must_use]
    pub fn new(operation: &'static str, kind: OpsFailureKind, message: impl Into<String>) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
        }
    }
}

/// Result alias for directory operations.
pub type OpsResult<T> = Result<T, OpsError>;

/// The six remote operations the orchestrator sequences.
///
/// None of these retry internally, and none of them mutate shared state on
/// the implementation side: an implementation is a read-only handle plus an
/// authenticated session reused across calls.
#[async_trait]
pub trait DirectoryOps: Send + Sync {
    /// Look up a user record by identifier. `None` if no row matched.
    async fn find_user(&self, user_id: &str) -> OpsResult<Option<UserRecord>>;

    /// Look up an existing CSF device by its deterministic name
    /// (`CSF<user_id>`). Presence means creation must be skipped.
    async fn find_device(&self, user_id: &str) -> OpsResult<Option<String>>;

    /// Create a CSF device for the user with one line bound to their phone
    /// number. Returns the newly assigned device key, or `None` when the
    /// response carried no key.
    async fn create_device(
        &self,
        user_id: &str,
        full_name: &str,
        phone_number: &str,
    ) -> OpsResult<Option<String>>;

    /// Directory groups the user currently belongs to.
    async fn list_group_memberships(&self, user_key: &str) -> OpsResult<BTreeSet<String>>;

    /// Insert one group membership row. `true` iff the remote system
    /// reported exactly one row affected.
    async fn add_group_membership(&self, user_key: &str, group_key: &str) -> OpsResult<bool>;

    /// Insert one user-device association row. `true` iff exactly one row
    /// was affected. Failure may simply mean the association already exists.
    async fn add_device_association(&self, user_key: &str, device_key: &str) -> OpsResult<bool>;
}
