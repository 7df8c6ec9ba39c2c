//! Terminal session capability.
//!
//! The wire protocol spoken by the access-control terminal lives behind the
//! [`DeviceSession`] trait; the engines in this crate only consume the
//! capability and never see the transport. Implementations adapt a concrete
//! terminal library (socket setup, realtime log registration, bulk log
//! download) to this surface.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::models::ScanEvent;

#[cfg(test)]
pub mod mock;

#[derive(Debug, Error)]
pub enum DeviceError {
    /// The terminal could not be reached or the session dropped.
    #[error("terminal connection failed: {0}")]
    Connection(String),
    /// A command was issued without an open session.
    #[error("no active terminal session")]
    NotConnected,
    /// The activation command was rejected or is unsupported.
    #[error("terminal activation failed: {0}")]
    Activation(String),
}

/// One session to one terminal. Callers own the connection lifecycle:
/// every method other than `connect` expects an open session.
#[async_trait]
pub trait DeviceSession: Send {
    /// Identifier of the terminal this session talks to, for logging and
    /// for stamping records.
    fn device_id(&self) -> &str;

    async fn connect(&mut self) -> Result<(), DeviceError>;

    /// Best-effort teardown. Callers ignore the error.
    async fn disconnect(&mut self) -> Result<(), DeviceError>;

    /// Register for the terminal's realtime push stream. The returned
    /// channel closes when the transport loses the session.
    async fn stream_scans(&mut self) -> Result<mpsc::Receiver<ScanEvent>, DeviceError>;

    /// Some firmware revisions only start pushing events after an explicit
    /// enable command. Terminals that auto-activate keep the default no-op.
    async fn activate(&mut self) -> Result<(), DeviceError> {
        Ok(())
    }

    /// One-shot download of the terminal's full attendance log. An empty
    /// vec is a normal result, not an error.
    async fn fetch_all_scans(&mut self) -> Result<Vec<ScanEvent>, DeviceError>;
}
