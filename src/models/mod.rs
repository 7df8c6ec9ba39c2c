mod attendance;
mod scan;

pub use attendance::{AttendanceRecord, RecordKind};
pub use scan::ScanEvent;
