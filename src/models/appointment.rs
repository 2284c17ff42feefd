use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    /// ISO 8601 start timestamp, parsed at the bucketing site.
    pub start_time: String,
}
