use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::warn;

use crate::models::{AttendanceRecord, ScanEvent};
use crate::reconcile::config::ReconcileConfig;

/// Derive daily check-in/check-out records from a raw scan log.
///
/// Scans are grouped by `(person, calendar date)`; the earliest scan of a
/// group always yields a check-in, and the latest additionally yields a
/// check-out when it is more than `checkout_gap_minutes` whole minutes
/// later. Scans between the first and last of a day carry no information
/// for this classifier and are dropped.
pub fn classify(scans: Vec<ScanEvent>, config: &ReconcileConfig) -> Vec<AttendanceRecord> {
    let mut groups: BTreeMap<(String, NaiveDate), Vec<ScanEvent>> = BTreeMap::new();

    for scan in scans {
        if !scan.has_person_ref() {
            warn!(
                "discarding scan from {} without person identifier",
                scan.device_id
            );
            continue;
        }
        let key = (scan.person_ref.clone(), scan.occurred_at.date_naive());
        groups.entry(key).or_default().push(scan);
    }

    let mut records = Vec::new();
    for mut group in groups.into_values() {
        // Stable sort keeps equal timestamps in input order, so reruns over
        // the same data classify identically.
        group.sort_by_key(|scan| scan.occurred_at);

        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            continue;
        };

        records.push(AttendanceRecord::check_in(first));

        if group.len() > 1 {
            let gap_minutes = (last.occurred_at - first.occurred_at).num_minutes();
            if gap_minutes > config.checkout_gap_minutes {
                records.push(AttendanceRecord::check_out(last));
            }
        }
    }

    records
}
