//! Wire entities consumed from the clinic REST API, plus the externally-owned
//! task snapshot injected by the shell.
//!
//! Timestamps cross the wire as ISO 8601 strings and are parsed with chrono
//! at the derivation site, never stored pre-parsed.

pub mod appointment;
pub mod enums;
pub mod note;
pub mod patient;
pub mod task;

pub use appointment::Appointment;
pub use enums::{InvalidEnum, NoteType, RiskLevel, TaskPriority, TaskStatus};
pub use note::{Note, NoteSummary};
pub use patient::Patient;
pub use task::Task;

use chrono::NaiveDateTime;

/// Parse a wire timestamp. Accepts RFC 3339 (with or without offset) and the
/// bare `YYYY-MM-DDTHH:MM:SS` shape the backend emits, with optional
/// fractional seconds. `None` for anything else.
pub fn parse_wire_timestamp(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }
    None
}
