use anyhow::{bail, Context, Result};
use log::info;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::db::Database;
use crate::device::DeviceSession;

use super::loop_worker::monitor_loop;
use super::MonitorConfig;

/// Owns the spawned ingestion task. One controller drives one terminal.
pub struct MonitorController {
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
}

impl MonitorController {
    pub fn new() -> Self {
        Self {
            handle: None,
            cancel_token: None,
        }
    }

    pub fn start<S>(&mut self, session: S, db: Database, config: MonitorConfig) -> Result<()>
    where
        S: DeviceSession + 'static,
    {
        if self.handle.is_some() {
            bail!("monitor already active");
        }

        info!("starting attendance monitor for {}", session.device_id());

        let cancel_token = CancellationToken::new();
        let token_clone = cancel_token.clone();

        let handle = tokio::spawn(monitor_loop(session, db, config, token_clone));

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        Ok(())
    }

    pub async fn stop(&mut self) -> Result<()> {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        if let Some(handle) = self.handle.take() {
            handle
                .await
                .context("monitor loop task failed to join")
                .map(|_| ())
        } else {
            Ok(())
        }
    }
}
