//! Attendance record data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ScanEvent;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordKind {
    CheckIn,
    CheckOut,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::CheckIn => "CHECK_IN",
            RecordKind::CheckOut => "CHECK_OUT",
        }
    }
}

/// The persisted attendance fact. `(person_id, timestamp)` is the uniqueness
/// key; re-ingesting the same physical scan must not create a duplicate row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub person_id: String,
    pub timestamp: DateTime<Utc>,
    pub kind: RecordKind,
    pub device_id: String,
}

impl AttendanceRecord {
    pub fn check_in(event: &ScanEvent) -> Self {
        Self::from_event(event, RecordKind::CheckIn)
    }

    pub fn check_out(event: &ScanEvent) -> Self {
        Self::from_event(event, RecordKind::CheckOut)
    }

    fn from_event(event: &ScanEvent, kind: RecordKind) -> Self {
        Self {
            person_id: event.person_ref.clone(),
            timestamp: event.occurred_at,
            kind,
            device_id: event.device_id.clone(),
        }
    }
}
