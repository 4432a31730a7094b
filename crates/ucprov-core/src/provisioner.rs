//! Per-user provisioning state machine.
//!
//! Sequences the remote operations for one user: resolve the user record,
//! ensure a CSF device exists (idempotent), reconcile required group
//! memberships additively, then attempt the user-device association once.
//! Partial work is never rolled back; failures are reported, not undone.

use std::collections::BTreeSet;

use tracing::{debug, error, info, warn};

use crate::config::ProvisioningConfig;
use crate::ops::DirectoryOps;
use crate::outcome::ProvisioningOutcome;
use crate::sanitize::UserId;

/// Orchestrates provisioning for one sanitized user identifier at a time.
///
/// Holds no per-user state: every entity created while processing one
/// identifier is discarded before the next.
pub struct Provisioner<D> {
    ops: D,
    config: ProvisioningConfig,
}

impl<D: DirectoryOps> Provisioner<D> {
    #[must_use]
    pub fn new(ops: D, config: ProvisioningConfig) -> Self {
        Self { ops, config }
    }

    /// The underlying directory operations handle.
    pub fn ops(&self) -> &D {
        &self.ops
    }

    /// Run the full state machine for one user and return the outcome.
    ///
    /// An unknown user fails fast: no device, group, or association calls
    /// are made. A transport or remote fault inside a step degrades to that
    /// step's failure semantics and is logged against the originating call.
    pub async fn provision_user(&self, user_id: &UserId) -> ProvisioningOutcome {
        let user = match self.ops.find_user(user_id.as_str()).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                info!(user_id = %user_id, "user not found in directory");
                return ProvisioningOutcome::UserNotFound;
            }
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "user lookup failed");
                return ProvisioningOutcome::UserNotFound;
            }
        };

        info!(
            user_id = %user_id,
            full_name = %user.full_name,
            phone_number = %user.phone_number,
            user_key = %user.user_key,
            "processing user"
        );

        // Idempotency check: an existing CSF device short-circuits creation.
        let existing = match self.ops.find_device(user_id.as_str()).await {
            Ok(found) => found,
            Err(e) => {
                warn!(
                    user_id = %user_id,
                    error = %e,
                    "device existence check failed, assuming absent"
                );
                None
            }
        };

        let device_key = match existing {
            Some(key) => {
                info!(user_id = %user_id, device_key = %key, "CSF device already exists, skipping creation");
                key
            }
            None => {
                let created = match self
                    .ops
                    .create_device(user_id.as_str(), &user.full_name, &user.phone_number)
                    .await
                {
                    Ok(Some(key)) => key,
                    Ok(None) => {
                        error!(user_id = %user_id, "device creation returned no key");
                        return ProvisioningOutcome::DeviceCreationFailed;
                    }
                    Err(e) => {
                        error!(user_id = %user_id, error = %e, "device creation failed");
                        return ProvisioningOutcome::DeviceCreationFailed;
                    }
                };
                info!(user_id = %user_id, device_key = %created, "CSF device created");

                // The directory is eventually consistent after a write; give
                // it time to settle before dependent reads.
                debug!(
                    user_id = %user_id,
                    delay_secs = self.config.settle_delay_secs,
                    "waiting for directory to settle after device creation"
                );
                tokio::time::sleep(self.config.settle_delay()).await;
                created
            }
        };

        let failed_groups = self.reconcile_groups(user_id, &user.user_key).await;

        // Attempted exactly once, unconditionally, with no pre-check: a
        // rejection usually means the association already exists from a
        // prior partial run, which the remote system does not distinguish
        // from other causes.
        match self
            .ops
            .add_device_association(&user.user_key, &device_key)
            .await
        {
            Ok(true) => {
                info!(user_id = %user_id, device_key = %device_key, "device associated with user");
            }
            Ok(false) => {
                warn!(
                    user_id = %user_id,
                    device_key = %device_key,
                    "could not associate device; it may already be associated"
                );
            }
            Err(e) => {
                warn!(
                    user_id = %user_id,
                    device_key = %device_key,
                    error = %e,
                    "device association rejected; it may already be associated"
                );
            }
        }

        if failed_groups.is_empty() {
            ProvisioningOutcome::Success
        } else {
            ProvisioningOutcome::PartialGroupFailures(failed_groups)
        }
    }

    /// Additive group reconciliation: insert required memberships absent
    /// from the current set, skip the rest, never remove anything. Failed
    /// inserts are accumulated and do not stop the remaining groups.
    async fn reconcile_groups(&self, user_id: &UserId, user_key: &str) -> BTreeSet<String> {
        let current = match self.ops.list_group_memberships(user_key).await {
            Ok(groups) => groups,
            Err(e) => {
                warn!(
                    user_id = %user_id,
                    error = %e,
                    "group membership lookup failed, treating as empty"
                );
                BTreeSet::new()
            }
        };

        debug!(
            user_id = %user_id,
            current_groups = current.len(),
            required_groups = self.config.required_groups.len(),
            "reconciling directory groups"
        );

        let mut failed = BTreeSet::new();
        for group_key in &self.config.required_groups {
            if current.contains(group_key) {
                debug!(user_id = %user_id, group_key = %group_key, "already a member, skipping");
                continue;
            }
            match self.ops.add_group_membership(user_key, group_key).await {
                Ok(true) => {
                    info!(user_id = %user_id, group_key = %group_key, "added group membership");
                }
                Ok(false) => {
                    warn!(user_id = %user_id, group_key = %group_key, "group insert affected no rows");
                    failed.insert(group_key.clone());
                }
                Err(e) => {
                    warn!(
                        user_id = %user_id,
                        group_key = %group_key,
                        error = %e,
                        "group insert failed"
                    );
                    failed.insert(group_key.clone());
                }
            }
        }
        failed
    }
}
