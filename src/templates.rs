//! Static template-field schema for the note composer.
//!
//! Templates are an immutable, process-wide lookup: a named, ordered list of
//! labeled free-text fields, each carrying a category for the template
//! library's filter. Unknown template names resolve to the empty schema —
//! callers that care log the miss (see `draft::FieldValues::for_template`).

/// One structured field of a note template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateField {
    pub label: &'static str,
    pub placeholder: &'static str,
    /// Suggested textarea row count for the rendering shell.
    pub rows: u8,
}

/// A named template in the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub name: &'static str,
    pub category: &'static str,
    pub fields: &'static [TemplateField],
}

/// The empty template: a plain note with no structured fields.
pub const NONE_TEMPLATE: &str = "None";

/// Category filter value that matches every template.
pub const ALL_CATEGORIES: &str = "All";

const PROGRESS_NOTE_FIELDS: &[TemplateField] = &[
    TemplateField {
        label: "Subjective",
        placeholder: "Patient-reported symptoms and history...",
        rows: 4,
    },
    TemplateField {
        label: "Objective",
        placeholder: "Physical examination findings, vital signs...",
        rows: 4,
    },
    TemplateField {
        label: "Assessment",
        placeholder: "Clinical impression and diagnosis...",
        rows: 3,
    },
    TemplateField {
        label: "Plan",
        placeholder: "Treatment plan and follow-up...",
        rows: 3,
    },
];

const ADMISSION_NOTE_FIELDS: &[TemplateField] = &[
    TemplateField {
        label: "Reason for Admission",
        placeholder: "Chief complaint and admission reason...",
        rows: 3,
    },
    TemplateField {
        label: "History of Present Illness",
        placeholder: "Detailed history of current condition...",
        rows: 5,
    },
    TemplateField {
        label: "Past Medical History",
        placeholder: "Relevant medical history...",
        rows: 3,
    },
    TemplateField {
        label: "Physical Examination",
        placeholder: "Complete physical exam findings...",
        rows: 4,
    },
    TemplateField {
        label: "Initial Assessment & Plan",
        placeholder: "Initial diagnostic impression and treatment plan...",
        rows: 4,
    },
];

const DISCHARGE_SUMMARY_FIELDS: &[TemplateField] = &[
    TemplateField {
        label: "Admission Date & Reason",
        placeholder: "Date admitted and chief complaint...",
        rows: 2,
    },
    TemplateField {
        label: "Hospital Course",
        placeholder: "Summary of treatment and hospital stay...",
        rows: 5,
    },
    TemplateField {
        label: "Discharge Diagnosis",
        placeholder: "Final diagnosis at discharge...",
        rows: 2,
    },
    TemplateField {
        label: "Discharge Medications",
        placeholder: "List of medications prescribed...",
        rows: 3,
    },
    TemplateField {
        label: "Follow-up Instructions",
        placeholder: "Follow-up care and appointments...",
        rows: 3,
    },
];

const CONSULTATION_FIELDS: &[TemplateField] = &[
    TemplateField {
        label: "Reason for Consultation",
        placeholder: "Why consultation was requested...",
        rows: 3,
    },
    TemplateField {
        label: "Review of Systems",
        placeholder: "Relevant systems review...",
        rows: 4,
    },
    TemplateField {
        label: "Findings",
        placeholder: "Consultation findings and observations...",
        rows: 4,
    },
    TemplateField {
        label: "Recommendations",
        placeholder: "Specialist recommendations...",
        rows: 4,
    },
];

/// The full template library, in selector order.
pub const TEMPLATES: &[Template] = &[
    Template {
        name: NONE_TEMPLATE,
        category: "General",
        fields: &[],
    },
    Template {
        name: "Progress Note",
        category: "Follow-up",
        fields: PROGRESS_NOTE_FIELDS,
    },
    Template {
        name: "Admission Note",
        category: "Inpatient",
        fields: ADMISSION_NOTE_FIELDS,
    },
    Template {
        name: "Discharge Summary",
        category: "Discharge",
        fields: DISCHARGE_SUMMARY_FIELDS,
    },
    Template {
        name: "Consultation",
        category: "Consultation",
        fields: CONSULTATION_FIELDS,
    },
];

/// Look up a template's fields by name. `None` for unknown names.
pub fn fields_for(name: &str) -> Option<&'static [TemplateField]> {
    TEMPLATES.iter().find(|t| t.name == name).map(|t| t.fields)
}

/// Templates matching a category filter; `"All"` yields the full library.
pub fn templates_in_category(category: &str) -> Vec<&'static Template> {
    TEMPLATES
        .iter()
        .filter(|t| category == ALL_CATEGORIES || t.category == category)
        .collect()
}

/// Distinct categories in library order, with the "All" filter first.
pub fn categories() -> Vec<&'static str> {
    let mut out = vec![ALL_CATEGORIES];
    for template in TEMPLATES {
        if !out.contains(&template.category) {
            out.push(template.category);
        }
    }
    out
}
