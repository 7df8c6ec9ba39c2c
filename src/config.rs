use std::{fs, path::Path};

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::monitor::MonitorConfig;
use crate::reconcile::ReconcileConfig;

/// Network coordinates of the terminal, handed to whichever transport
/// implements the device session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceConfig {
    /// Terminal address on the local network.
    pub addr: String,
    pub port: u16,
    /// Transport-level connect/read timeout.
    pub timeout_ms: u64,
    /// Local reply port some terminal firmwares require.
    pub inport: u16,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            addr: "10.0.4.105".to_string(),
            port: 4370,
            timeout_ms: 10_000,
            inport: 4000,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub device: DeviceConfig,
    pub monitor: MonitorConfig,
    pub reconcile: ReconcileConfig,
}

impl Config {
    /// Load configuration from a JSON file. A missing file means defaults;
    /// a malformed one is reported and replaced with defaults so a bad edit
    /// cannot keep the service down.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;

        Ok(serde_json::from_str(&contents).unwrap_or_else(|err| {
            warn!("ignoring malformed config {}: {err}", path.display());
            Self::default()
        }))
    }
}
