//! Note draft state: the per-template field-value map and the deterministic
//! assembly of those values into one content string.
//!
//! The field-value map is rebuilt wholesale on every template selection —
//! labels from a previous template never survive a switch. Composition is
//! pure: given the same chief complaint, template name, and values it always
//! produces the same string.

use crate::templates::{self, NONE_TEMPLATE};

/// Substituted when a note body is empty after trimming.
pub const EMPTY_CONTENT_FALLBACK: &str = "No content provided";

/// One labeled free-text value, held in schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValue {
    pub label: String,
    pub value: String,
}

/// Field values for the currently selected template, in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValues(Vec<FieldValue>);

impl FieldValues {
    /// Build a fresh map for a template: one empty entry per schema field.
    ///
    /// Unknown template names resolve to the empty map. That is an explicit
    /// policy, not a silent fallback — the miss is logged.
    pub fn for_template(name: &str) -> Self {
        let fields = match templates::fields_for(name) {
            Some(fields) => fields,
            None => {
                tracing::warn!(template = name, "Unknown template, using empty schema");
                &[]
            }
        };
        Self(
            fields
                .iter()
                .map(|f| FieldValue {
                    label: f.label.to_string(),
                    value: String::new(),
                })
                .collect(),
        )
    }

    /// Update exactly one entry. Unknown labels are a no-op.
    pub fn set(&mut self, label: &str, text: &str) -> bool {
        match self.0.iter_mut().find(|f| f.label == label) {
            Some(field) => {
                field.value = text.to_string();
                true
            }
            None => {
                tracing::debug!(label, "Ignoring value for label outside current template");
                false
            }
        }
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|f| f.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when every value is blank after trimming.
    pub fn all_blank(&self) -> bool {
        self.0.iter().all(|f| f.value.trim().is_empty())
    }
}

/// Assemble chief complaint plus populated template fields into the note body.
///
/// Emits a chief-complaint block first when non-blank, then one block per
/// schema field with a non-blank value, in schema order. Blank fields are
/// skipped entirely. Falls back to [`EMPTY_CONTENT_FALLBACK`] when nothing
/// survives trimming.
pub fn compose_content(chief_complaint: &str, template: &str, values: &FieldValues) -> String {
    let mut content = String::new();

    if !chief_complaint.trim().is_empty() {
        content.push_str(&format!("**Chief Complaint:** {chief_complaint}\n\n"));
    }

    let fields = templates::fields_for(template).unwrap_or(&[]);
    for field in fields {
        if let Some(value) = values.get(field.label) {
            if !value.trim().is_empty() {
                content.push_str(&format!("**{}:**\n{}\n\n", field.label, value));
            }
        }
    }

    let trimmed = content.trim();
    if trimmed.is_empty() {
        EMPTY_CONTENT_FALLBACK.to_string()
    } else {
        trimmed.to_string()
    }
}

/// The staged compose-form state: chief complaint, selected template, and the
/// field-value map for that template.
#[derive(Debug, Clone)]
pub struct NoteDraft {
    pub chief_complaint: String,
    pub template: String,
    pub fields: FieldValues,
}

impl NoteDraft {
    pub fn new() -> Self {
        Self {
            chief_complaint: String::new(),
            template: NONE_TEMPLATE.to_string(),
            fields: FieldValues::default(),
        }
    }

    /// Select a template, fully replacing the field-value map.
    pub fn select_template(&mut self, name: &str) {
        self.template = name.to_string();
        self.fields = FieldValues::for_template(name);
    }

    pub fn set_field(&mut self, label: &str, text: &str) -> bool {
        self.fields.set(label, text)
    }

    /// Whether the draft carries any usable content. Checked before
    /// composition so an all-whitespace draft is rejected even though
    /// composition would substitute the fallback string.
    pub fn has_content(&self) -> bool {
        !self.chief_complaint.trim().is_empty() || !self.fields.all_blank()
    }

    pub fn compose(&self) -> String {
        compose_content(&self.chief_complaint, &self.template, &self.fields)
    }

    /// Clear the draft after a successful save: chief complaint emptied,
    /// template back to "None", field map discarded.
    pub fn reset(&mut self) {
        self.chief_complaint.clear();
        self.select_template(NONE_TEMPLATE);
    }
}

impl Default for NoteDraft {
    fn default() -> Self {
        Self::new()
    }
}
