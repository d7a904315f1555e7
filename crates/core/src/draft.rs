//! Raw entry form values.

use patientor_model::EntryKind;

/// Free-form values collected by the entry form, before validation.
///
/// Every field is raw text exactly as the user supplied it. `None` and blank strings both mean
/// "not supplied". Fields that do not belong to the selected kind are ignored by the builder.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntryDraft {
    /// Kind selector; must be one of the entry discriminants.
    pub kind: String,
    pub description: String,
    /// Entry date as `YYYY-MM-DD`.
    pub date: Option<String>,
    pub specialist: String,
    /// Selected diagnosis codes, in selection order.
    pub diagnosis_codes: Vec<String>,

    pub health_check_rating: Option<String>,

    pub employer_name: Option<String>,
    pub sick_leave_start: Option<String>,
    pub sick_leave_end: Option<String>,

    pub discharge_date: Option<String>,
    pub discharge_criteria: Option<String>,
}

impl EntryDraft {
    /// Starts an empty draft for `kind`.
    pub fn new(kind: EntryKind) -> Self {
        Self {
            kind: kind.as_str().to_owned(),
            ..Self::default()
        }
    }

    /// The selected kind, if the selector names a known discriminant.
    pub fn selected_kind(&self) -> Option<EntryKind> {
        EntryKind::from_discriminant(self.kind.trim()).ok()
    }

    /// Changes the selected kind. All entered values are cleared.
    pub fn switch_kind(&mut self, kind: EntryKind) {
        *self = Self::new(kind);
    }

    /// Clears every entered value but keeps the selected kind.
    pub fn clear(&mut self) {
        let kind = std::mem::take(&mut self.kind);
        *self = Self {
            kind,
            ..Self::default()
        };
    }
}
