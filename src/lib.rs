//! Attendance ingestion and reconciliation for biometric access terminals.
//!
//! Two engines share one terminal-session capability and one persistence
//! gateway:
//!
//! - [`monitor`] keeps a session to the terminal open, consumes its realtime
//!   scan stream and stores every scan as a check-in, reconnecting on a
//!   fixed interval for as long as it runs.
//! - [`reconcile`] downloads the terminal's full attendance log once,
//!   derives daily check-in/check-out pairs with a time-gap rule and
//!   upserts them.
//!
//! The terminal wire protocol and process wiring belong to the embedding
//! application; implement [`device::DeviceSession`] to plug a terminal in.

pub mod config;
pub mod db;
pub mod device;
pub mod models;
pub mod monitor;
pub mod reconcile;

pub use config::{Config, DeviceConfig};
pub use db::{ConflictPolicy, Database};
pub use device::{DeviceError, DeviceSession};
pub use models::{AttendanceRecord, RecordKind, ScanEvent};
pub use monitor::{MonitorConfig, MonitorController};
pub use reconcile::{classify, run_reconcile, ReconcileConfig, ReconcileReport};
