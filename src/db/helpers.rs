use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};

use crate::models::RecordKind;

pub fn parse_datetime(value: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| anyhow!("invalid {field} '{value}': {err}"))
}

pub fn parse_kind(value: &str) -> Result<RecordKind> {
    match value {
        "CHECK_IN" => Ok(RecordKind::CheckIn),
        "CHECK_OUT" => Ok(RecordKind::CheckOut),
        other => Err(anyhow!("unknown record kind '{other}'")),
    }
}
