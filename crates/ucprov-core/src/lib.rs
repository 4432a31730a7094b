//! Provisioning orchestration for CSF (software telephony) devices.
//!
//! This crate contains the directory-system-agnostic core: identifier
//! sanitization, the per-user provisioning state machine, additive group
//! reconciliation, and the sequential batch driver. The remote directory is
//! reached through the [`ops::DirectoryOps`] trait so the orchestrator can be
//! exercised without a network.

pub mod batch;
pub mod config;
pub mod ops;
pub mod outcome;
pub mod provisioner;
pub mod sanitize;

pub use batch::run_batch;
pub use config::ProvisioningConfig;
pub use ops::{DirectoryOps, OpsError, OpsFailureKind, UserRecord};
pub use outcome::{BatchSummary, ProvisioningOutcome};
pub use provisioner::Provisioner;
pub use sanitize::{sanitize_user_id, InvalidIdentifier, UserId};
