//! Per-user outcomes and batch accounting.

use std::collections::BTreeSet;
use std::fmt;

/// Result of provisioning one user.
///
/// Failures are informational and reportable, never process-fatal: one
/// user's outcome must not abort sibling units in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisioningOutcome {
    /// Device present, all required groups assigned, association attempted.
    Success,
    /// The user does not exist in the directory; nothing was provisioned.
    UserNotFound,
    /// No existing device was found and the creation request failed.
    DeviceCreationFailed,
    /// The device was provisioned but these group inserts failed.
    PartialGroupFailures(BTreeSet<String>),
    /// The device association was rejected for a reason other than an
    /// existing association. The remote system does not let us distinguish
    /// the two, so the orchestrator currently reports rejections as
    /// advisory and never yields this variant.
    AssociationFailed,
}

impl ProvisioningOutcome {
    /// `true` only when every step fully succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, ProvisioningOutcome::Success)
    }

    /// Whether the user ended the run with a usable device.
    ///
    /// Partial group failures still leave a created, associated device
    /// behind; batch accounting follows the device outcome and group-level
    /// detail is reported per unit.
    #[must_use]
    pub fn is_provisioned(&self) -> bool {
        matches!(
            self,
            ProvisioningOutcome::Success | ProvisioningOutcome::PartialGroupFailures(_)
        )
    }
}

impl fmt::Display for ProvisioningOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProvisioningOutcome::Success => f.write_str("success"),
            ProvisioningOutcome::UserNotFound => f.write_str("user not found"),
            ProvisioningOutcome::DeviceCreationFailed => f.write_str("device creation failed"),
            ProvisioningOutcome::PartialGroupFailures(groups) => {
                write!(f, "provisioned, {} group assignment(s) failed", groups.len())
            }
            ProvisioningOutcome::AssociationFailed => f.write_str("device association failed"),
        }
    }
}

/// Tally of a batch run, accumulated from per-user outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    /// Fold one orchestrator outcome into the tally.
    pub fn record(&mut self, outcome: &ProvisioningOutcome) {
        self.total += 1;
        if outcome.is_provisioned() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }

    /// Count a unit whose identifier was rejected before any remote call.
    pub fn record_rejected(&mut self) {
        self.total += 1;
        self.failed += 1;
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} processed: {} succeeded, {} failed",
            self.total, self.succeeded, self.failed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_accounts_outcomes() {
        let mut summary = BatchSummary::default();
        summary.record(&ProvisioningOutcome::Success);
        summary.record(&ProvisioningOutcome::UserNotFound);
        summary.record_rejected();
        summary.record(&ProvisioningOutcome::PartialGroupFailures(
            ["g1".to_string()].into_iter().collect(),
        ));

        assert_eq!(summary.total, 4);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 2);
    }

    #[test]
    fn partial_failures_are_provisioned_but_not_success() {
        let outcome =
            ProvisioningOutcome::PartialGroupFailures(["g1".to_string()].into_iter().collect());
        assert!(outcome.is_provisioned());
        assert!(!outcome.is_success());
    }

    #[test]
    fn display_formats() {
        assert_eq!(ProvisioningOutcome::Success.to_string(), "success");
        assert_eq!(
            ProvisioningOutcome::UserNotFound.to_string(),
            "user not found"
        );
        let summary = BatchSummary {
            total: 3,
            succeeded: 2,
            failed: 1,
        };
        assert_eq!(summary.to_string(), "3 processed: 2 succeeded, 1 failed");
    }
}
