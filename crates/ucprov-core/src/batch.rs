//! Sequential batch driver.
//!
//! Iterates raw identifiers in input order, sanitizes each, invokes the
//! orchestrator, and folds outcomes into a [`BatchSummary`]. One unit's
//! failure never halts the remaining units. Processing is strictly
//! sequential; the remote system's consistency assumptions rule out
//! parallel fan-out.

use tracing::{info, warn};

use crate::ops::DirectoryOps;
use crate::outcome::BatchSummary;
use crate::provisioner::Provisioner;
use crate::sanitize::sanitize_user_id;

/// Provision every identifier in `raw_ids`, continuing past failures.
///
/// Identifiers rejected by the sanitizer are counted as failed without any
/// remote call being attempted.
pub async fn run_batch<D, I, S>(provisioner: &Provisioner<D>, raw_ids: I) -> BatchSummary
where
    D: DirectoryOps,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut summary = BatchSummary::default();

    for raw in raw_ids {
        let user_id = match sanitize_user_id(raw.as_ref()) {
            Ok(id) => id,
            Err(e) => {
                warn!(error = %e, "skipping unit with invalid identifier");
                summary.record_rejected();
                continue;
            }
        };

        let outcome = provisioner.provision_user(&user_id).await;
        info!(user_id = %user_id, outcome = %outcome, "unit finished");
        summary.record(&outcome);
    }

    info!(
        total = summary.total,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "batch run complete"
    );
    summary
}
