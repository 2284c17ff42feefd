//! Clinical notes studio — three-tab view state, note submission, and
//! client-side listing/search.
//!
//! Compose stages a draft against the template schema; library and search
//! re-read the note list fetched on entry (sorted newest-first once, at fetch
//! time) without further network calls. Submission is the only state change
//! that round-trips to the API.

use std::sync::Arc;
use std::time::Instant;

use chrono::{Local, NaiveDate, NaiveDateTime};

use crate::api::{ApiError, ClinicApi, CreateNoteRequest};
use crate::draft::NoteDraft;
use crate::models::{parse_wire_timestamp, NoteSummary, NoteType, Patient};
use crate::status::{StatusKind, StatusMessage, StatusSlot, SUCCESS_TTL};
use crate::templates::{self, Template, ALL_CATEGORIES};

/// Display note types offered in the compose form. These prefix the note
/// title only — the wire `note_type` is always the doctor-authored value.
pub const NOTE_TYPE_OPTIONS: &[&str] = &[
    "Progress Note",
    "Initial Assessment",
    "Follow-up",
    "Procedure Note",
];

const AI_STUB_MESSAGE: &str =
    "AI generation is not yet implemented. Use \"Save Note\" to save your content.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudioTab {
    Compose,
    Library,
    Search,
}

/// Why a submission did not reach, or was rejected by, the backend.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("Please select a patient")]
    MissingPatient,
    #[error("Please enter some content for the note")]
    EmptyContent,
    #[error(transparent)]
    Backend(#[from] ApiError),
}

/// Notes studio view state.
pub struct NotesStudio {
    api: Arc<dyn ClinicApi>,
    pub tab: StudioTab,
    pub patients: Vec<Patient>,
    /// Fetched summaries, sorted newest-first once at fetch time.
    pub notes: Vec<NoteSummary>,
    pub selected_patient: Option<i64>,
    pub selected_category: String,
    pub visit_date: NaiveDate,
    pub note_type: String,
    pub draft: NoteDraft,
    pub search_term: String,
    pub loading: bool,
    pub saving: bool,
    status: StatusSlot,
}

impl NotesStudio {
    pub fn new(api: Arc<dyn ClinicApi>) -> Self {
        Self {
            api,
            tab: StudioTab::Compose,
            patients: Vec::new(),
            notes: Vec::new(),
            selected_patient: None,
            selected_category: ALL_CATEGORIES.to_string(),
            visit_date: Local::now().date_naive(),
            note_type: NOTE_TYPE_OPTIONS[0].to_string(),
            draft: NoteDraft::new(),
            search_term: String::new(),
            loading: false,
            saving: false,
            status: StatusSlot::new(),
        }
    }

    /// Initial load: patients and notes fetched concurrently but handled
    /// independently — one may fail without affecting the other's state.
    pub async fn load(&mut self) {
        self.loading = true;
        let api = Arc::clone(&self.api);
        let (patients, notes) = tokio::join!(api.get_patients(), api.get_notes());
        self.apply_patients(patients);
        self.apply_notes(notes, Instant::now());
        self.loading = false;
    }

    /// Refetch the note list (library/search entry, post-save refresh).
    pub async fn fetch_notes(&mut self) {
        self.loading = true;
        let result = self.api.get_notes().await;
        self.apply_notes(result, Instant::now());
        self.loading = false;
    }

    fn apply_patients(&mut self, result: Result<Vec<Patient>, ApiError>) {
        match result {
            Ok(patients) => {
                if self.selected_patient.is_none() {
                    self.selected_patient = patients.first().map(|p| p.id);
                }
                self.patients = patients;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch patients");
            }
        }
    }

    fn apply_notes(&mut self, result: Result<Vec<NoteSummary>, ApiError>, now: Instant) {
        match result {
            Ok(mut notes) => {
                sort_newest_first(&mut notes);
                self.notes = notes;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch notes");
                self.status.error(e.to_string(), now);
            }
        }
    }

    /// Switch sub-tab; entering library or search refetches the note list.
    pub async fn set_tab(&mut self, tab: StudioTab) {
        self.tab = tab;
        if matches!(tab, StudioTab::Library | StudioTab::Search) {
            self.fetch_notes().await;
        }
    }

    pub fn select_patient(&mut self, patient_id: i64) {
        self.selected_patient = Some(patient_id);
    }

    pub fn select_template(&mut self, name: &str) {
        self.draft.select_template(name);
    }

    pub fn set_field(&mut self, label: &str, text: &str) -> bool {
        self.draft.set_field(label, text)
    }

    pub fn set_category(&mut self, category: &str) {
        self.selected_category = category.to_string();
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.to_string();
    }

    /// Templates offered by the selector under the current category filter.
    pub fn available_templates(&self) -> Vec<&'static Template> {
        templates::templates_in_category(&self.selected_category)
    }

    /// Search-tab listing: the fetched notes narrowed by the current term.
    pub fn filtered_notes(&self) -> Vec<&NoteSummary> {
        filter_notes(&self.notes, &self.search_term)
    }

    /// The live transient status message, if any.
    pub fn status(&self, now: Instant) -> Option<&StatusMessage> {
        self.status.current(now)
    }

    /// Validate, compose, and submit the drafted note.
    ///
    /// Validation failures surface a transient error without any network
    /// call. On success the draft is cleared and the note list refetched; on
    /// backend rejection the draft is left intact for retry.
    pub async fn submit_note(&mut self) -> Result<(), SubmitError> {
        let now = Instant::now();

        let Some(patient_id) = self.selected_patient else {
            self.status.error(SubmitError::MissingPatient.to_string(), now);
            return Err(SubmitError::MissingPatient);
        };

        // Checked before composition: an all-whitespace draft is rejected
        // even though composition would substitute the fallback string.
        if !self.draft.has_content() {
            self.status.error(SubmitError::EmptyContent.to_string(), now);
            return Err(SubmitError::EmptyContent);
        }

        self.saving = true;
        let request = CreateNoteRequest {
            patient_id,
            title: format!("{} - {}", self.note_type, self.visit_date),
            content: self.draft.compose(),
            note_type: NoteType::DoctorNote,
        };

        let result = self.api.create_note(&request).await;
        self.saving = false;

        match result {
            Ok(note) => {
                tracing::debug!(note_id = note.id, "Note saved");
                self.status.success("Note saved successfully!", Instant::now());
                self.draft.reset();
                self.fetch_notes().await;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to save note");
                self.status.error(e.to_string(), Instant::now());
                Err(SubmitError::Backend(e))
            }
        }
    }

    /// AI-assisted generation stub: always a transient error-styled message,
    /// never touches note state.
    pub fn generate_with_ai(&mut self) {
        self.status
            .set(StatusKind::Error, AI_STUB_MESSAGE, SUCCESS_TTL, Instant::now());
    }
}

/// Stable newest-first sort by created_at. Unparseable timestamps sink to
/// the end.
pub fn sort_newest_first(notes: &mut [NoteSummary]) {
    notes.sort_by_key(|n| {
        std::cmp::Reverse(parse_wire_timestamp(&n.created_at).unwrap_or(NaiveDateTime::MIN))
    });
}

/// Case-insensitive substring match across title, summary, note type,
/// patient name, and author name — OR semantics, single term, no
/// tokenization. An empty term yields the full list unfiltered.
pub fn filter_notes<'a>(notes: &'a [NoteSummary], term: &str) -> Vec<&'a NoteSummary> {
    if term.is_empty() {
        return notes.iter().collect();
    }
    let needle = term.to_lowercase();
    notes
        .iter()
        .filter(|note| {
            note.title.to_lowercase().contains(&needle)
                || note
                    .summary
                    .as_deref()
                    .is_some_and(|s| s.to_lowercase().contains(&needle))
                || note.note_type.to_lowercase().contains(&needle)
                || note.patient_name.to_lowercase().contains(&needle)
                || note.author_name.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Visual class for a risk badge. `None` means no badge: absent levels and
/// values outside the known set stay unstyled rather than defaulting to a
/// bucket.
pub fn risk_badge_class(note: &NoteSummary) -> Option<&'static str> {
    match note.risk() {
        Some(level) => Some(match level.as_str() {
            "high" => "risk-high",
            "medium" => "risk-medium",
            _ => "risk-low",
        }),
        None => {
            if let Some(raw) = &note.risk_level {
                tracing::warn!(risk_level = %raw, note = note.id, "Unknown risk level, leaving unstyled");
            }
            None
        }
    }
}
