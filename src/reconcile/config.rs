use serde::{Deserialize, Serialize};

/// Tunables for the reconciliation classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReconcileConfig {
    /// Minimum whole minutes between a person's first and last scan of a
    /// day for the last scan to count as a check-out. At or below the
    /// threshold the activity is a momentary presence, not a work session.
    pub checkout_gap_minutes: i64,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            checkout_gap_minutes: 5,
        }
    }
}
