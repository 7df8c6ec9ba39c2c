use serde::{Deserialize, Serialize};

/// Tunables for the live ingestion loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MonitorConfig {
    /// Delay before a reconnection attempt after the session drops. The
    /// terminal is a single always-expected peer on a local network, so the
    /// interval is fixed rather than backed off, and the loop retries
    /// forever.
    pub reconnect_interval_ms: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            reconnect_interval_ms: 5000,
        }
    }
}
