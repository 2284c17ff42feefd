use serde::{Deserialize, Serialize};

use super::enums::{NoteType, RiskLevel};

/// Full note entity, returned on creation. Never mutated from this layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub patient_id: i64,
    pub title: String,
    pub content: String,
    pub note_type: NoteType,
    pub created_at: String,
}

/// Read-optimized projection of a note used for library and search listing.
///
/// `risk_level` stays a raw string on the wire: the backend's AI enrichment
/// may emit values outside the known set, and those must survive
/// deserialization rather than fail the whole list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteSummary {
    pub id: i64,
    pub title: String,
    pub note_type: String,
    #[serde(default)]
    pub summary: Option<String>,
    pub patient_name: String,
    pub author_name: String,
    pub created_at: String,
    #[serde(default)]
    pub risk_level: Option<String>,
}

impl NoteSummary {
    /// Lenient parse of `risk_level`; `None` for absent or unrecognized values.
    pub fn risk(&self) -> Option<RiskLevel> {
        self.risk_level.as_deref().and_then(|s| s.parse().ok())
    }
}
