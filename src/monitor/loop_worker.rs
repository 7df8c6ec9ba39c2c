use anyhow::{bail, Context, Result};
use log::{debug, error, info, warn};
use tokio::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::db::{ConflictPolicy, Database};
use crate::device::DeviceSession;
use crate::models::{AttendanceRecord, ScanEvent};

use super::MonitorConfig;

/// Keeps one session to the terminal alive and persists every pushed scan
/// as a check-in. Connection loss is recovered with a fixed-interval retry;
/// the loop only exits on cancellation.
pub async fn monitor_loop<S: DeviceSession>(
    mut session: S,
    db: Database,
    config: MonitorConfig,
    cancel_token: CancellationToken,
) {
    let reconnect_after = Duration::from_millis(config.reconnect_interval_ms);

    while !cancel_token.is_cancelled() {
        match run_streaming(&mut session, &db, &cancel_token).await {
            Ok(()) => break,
            Err(err) => {
                error!("terminal {} session error: {err:#}", session.device_id());
            }
        }

        // Tear down before retrying; terminals often refuse a second socket
        // while a dead one lingers.
        if let Err(err) = session.disconnect().await {
            debug!("disconnect after session loss failed: {err}");
        }

        info!(
            "retrying connection to {} in {} ms",
            session.device_id(),
            config.reconnect_interval_ms
        );
        tokio::select! {
            _ = cancel_token.cancelled() => break,
            _ = tokio::time::sleep(reconnect_after) => {}
        }
    }

    if let Err(err) = session.disconnect().await {
        debug!("disconnect during shutdown failed: {err}");
    }
    info!("monitor loop shutting down");
}

/// One connected stretch: connect, register the stream, then consume events
/// until cancellation or transport loss.
async fn run_streaming<S: DeviceSession>(
    session: &mut S,
    db: &Database,
    cancel_token: &CancellationToken,
) -> Result<()> {
    session
        .connect()
        .await
        .context("failed to connect to terminal")?;
    info!("connected to terminal {}", session.device_id());

    let mut scans = session
        .stream_scans()
        .await
        .context("failed to register realtime scan stream")?;
    info!("registered for realtime scan events");

    // Some firmware revisions only push events after an explicit enable;
    // others auto-activate and may reject the command.
    if let Err(err) = session.activate().await {
        warn!("could not activate terminal (may be auto-activated): {err}");
    }

    loop {
        tokio::select! {
            _ = cancel_token.cancelled() => return Ok(()),
            maybe_event = scans.recv() => match maybe_event {
                Some(event) => handle_scan(db, event).await,
                None => bail!("realtime stream closed by transport"),
            }
        }
    }
}

/// A streamed scan has no lookahead to settle a check-out, so every event
/// lands as a check-in; the batch reconciliation pass revises kinds later.
/// Failures here are isolated per event and never stop the stream.
async fn handle_scan(db: &Database, event: ScanEvent) {
    if !event.has_person_ref() {
        warn!(
            "discarding scan from {} without person identifier",
            event.device_id
        );
        return;
    }

    let record = AttendanceRecord::check_in(&event);
    match db.upsert_attendance(&record, ConflictPolicy::Ignore).await {
        Ok(()) => info!(
            "stored check-in for person {} at {}",
            record.person_id, record.timestamp
        ),
        Err(err) => error!(
            "failed to store scan for person {}: {err:#}",
            record.person_id
        ),
    }
}
