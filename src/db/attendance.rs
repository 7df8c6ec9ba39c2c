use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::params;

use super::helpers::{parse_datetime, parse_kind};
use super::Database;
use crate::models::AttendanceRecord;

/// What an upsert does when `(person_id, timestamp)` already exists.
///
/// Live ingestion leaves the existing row untouched; reconciliation is
/// authoritative and overwrites the stored kind. The policy is a parameter
/// of the call so the gateway itself carries a single idempotent-key
/// contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Keep the existing row as-is.
    Ignore,
    /// Replace `kind` (and refresh `updated_at`) with the supplied value.
    OverwriteKind,
}

impl Database {
    pub async fn upsert_attendance(
        &self,
        record: &AttendanceRecord,
        policy: ConflictPolicy,
    ) -> Result<()> {
        let record = record.clone();
        self.execute(move |conn| {
            let sql = match policy {
                ConflictPolicy::Ignore => {
                    "INSERT INTO attendance_logs
                        (person_id, timestamp, kind, device_id, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?5)
                     ON CONFLICT (person_id, timestamp) DO NOTHING"
                }
                ConflictPolicy::OverwriteKind => {
                    "INSERT INTO attendance_logs
                        (person_id, timestamp, kind, device_id, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?5)
                     ON CONFLICT (person_id, timestamp) DO UPDATE SET
                        kind = excluded.kind,
                        updated_at = excluded.updated_at"
                }
            };

            conn.execute(
                sql,
                params![
                    record.person_id,
                    record.timestamp.to_rfc3339(),
                    record.kind.as_str(),
                    record.device_id,
                    Utc::now().to_rfc3339(),
                ],
            )
            .with_context(|| "failed to upsert attendance record")?;
            Ok(())
        })
        .await
    }

    pub async fn get_attendance_for_person(
        &self,
        person_id: &str,
    ) -> Result<Vec<AttendanceRecord>> {
        let person_id = person_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT person_id, timestamp, kind, device_id
                 FROM attendance_logs
                 WHERE person_id = ?1
                 ORDER BY timestamp ASC",
            )?;

            let mut rows = stmt.query(params![person_id])?;
            let mut records = Vec::new();
            while let Some(row) = rows.next()? {
                records.push(AttendanceRecord {
                    person_id: row.get::<_, String>(0)?,
                    timestamp: parse_datetime(&row.get::<_, String>(1)?, "timestamp")?,
                    kind: parse_kind(&row.get::<_, String>(2)?)?,
                    device_id: row.get::<_, String>(3)?,
                });
            }

            Ok(records)
        })
        .await
    }

    pub async fn count_attendance(&self) -> Result<u64> {
        self.execute(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM attendance_logs", [], |row| {
                row.get(0)
            })?;
            Ok(count as u64)
        })
        .await
    }
}
