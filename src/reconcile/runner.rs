use anyhow::{Context, Result};
use log::{debug, error, info};

use crate::db::{ConflictPolicy, Database};
use crate::device::DeviceSession;
use crate::reconcile::{classify, ReconcileConfig};

/// Outcome of one reconciliation pass. Zero stored records is a normal
/// result for a terminal with an empty log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Raw scans downloaded from the terminal.
    pub fetched: usize,
    /// Classified records written through the gateway.
    pub stored: usize,
    /// Classified records that failed to store and were skipped.
    pub skipped: usize,
}

/// One-shot reconciliation: download the terminal's full attendance log,
/// classify it into check-in/check-out pairs and upsert the result.
///
/// Connection and download failures surface to the caller; a one-shot batch
/// has no retry loop of its own. Storage failures are skipped per record
/// and counted — upserts are idempotent, so a rerun heals whatever was
/// skipped.
pub async fn run_reconcile<S: DeviceSession>(
    session: &mut S,
    db: &Database,
    config: &ReconcileConfig,
) -> Result<ReconcileReport> {
    session
        .connect()
        .await
        .context("failed to connect to terminal")?;
    info!("connected to terminal {}", session.device_id());

    let result = reconcile_connected(session, db, config).await;

    if let Err(err) = session.disconnect().await {
        debug!("disconnect after reconciliation failed: {err}");
    }

    result
}

async fn reconcile_connected<S: DeviceSession>(
    session: &mut S,
    db: &Database,
    config: &ReconcileConfig,
) -> Result<ReconcileReport> {
    let scans = session
        .fetch_all_scans()
        .await
        .context("failed to download attendance log")?;
    let fetched = scans.len();

    let records = classify(scans, config);

    let mut stored = 0usize;
    let mut skipped = 0usize;
    for record in &records {
        // Reconciliation is authoritative: it may revise the kind a live
        // check-in was stored with.
        match db
            .upsert_attendance(record, ConflictPolicy::OverwriteKind)
            .await
        {
            Ok(()) => stored += 1,
            Err(err) => {
                error!(
                    "failed to store {} for person {}: {err:#}",
                    record.kind.as_str(),
                    record.person_id
                );
                skipped += 1;
            }
        }
    }

    info!("reconciliation complete: {fetched} scans fetched, {stored} records stored, {skipped} skipped");

    Ok(ReconcileReport {
        fetched,
        stored,
        skipped,
    })
}
