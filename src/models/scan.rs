//! Raw scan event data model.
//!
//! Represents a single observation pushed or fetched from an access-control
//! terminal. Scan events are never persisted directly; they are transformed
//! into attendance records first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single observation of an enrolled person by a terminal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanEvent {
    /// Terminal-assigned identifier for the enrolled person. The terminal
    /// may deliver this field empty, in which case the event is invalid.
    pub person_ref: String,
    /// Scan time as reported by the terminal, second precision.
    pub occurred_at: DateTime<Utc>,
    /// Address or identifier of the terminal that produced the event.
    pub device_id: String,
}

impl ScanEvent {
    /// An event without a person identifier cannot become an attendance
    /// record and is discarded by both engines.
    pub fn has_person_ref(&self) -> bool {
        !self.person_ref.is_empty()
    }
}
