//! Provisioning configuration.
//!
//! Passed explicitly into [`crate::Provisioner::new`] rather than read from
//! ambient process state, so the core stays testable without file-system or
//! network access.

use std::time::Duration;

use serde::Deserialize;

fn default_settle_delay_secs() -> u64 {
    2
}

/// Configuration for one provisioning run.
#[derive(Debug, Clone, Deserialize)]
pub struct ProvisioningConfig {
    /// Directory group keys (pkids) every provisioned user must belong to.
    /// Reconciliation is additive-only: groups outside this list are never
    /// touched.
    #[serde(default)]
    pub required_groups: Vec<String>,

    /// Pause after a device creation before dependent reads. The remote
    /// system is eventually consistent after writes; this is a correctness
    /// accommodation, not a performance knob.
    #[serde(default = "default_settle_delay_secs")]
    pub settle_delay_secs: u64,
}

impl ProvisioningConfig {
    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_secs(self.settle_delay_secs)
    }
}

impl Default for ProvisioningConfig {
    fn default() -> Self {
        Self {
            required_groups: Vec::new(),
            settle_delay_secs: default_settle_delay_secs(),
        }
    }
}
