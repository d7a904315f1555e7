use std::fmt;

/// Entry form fields that validation can report against.
///
/// `as_str` returns the field's wire name, so messages line up with the JSON payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryField {
    Type,
    Description,
    Date,
    Specialist,
    DiagnosisCodes,
    HealthCheckRating,
    EmployerName,
    SickLeave,
    SickLeaveStartDate,
    SickLeaveEndDate,
    DischargeDate,
    DischargeCriteria,
}

impl EntryField {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryField::Type => "type",
            EntryField::Description => "description",
            EntryField::Date => "date",
            EntryField::Specialist => "specialist",
            EntryField::DiagnosisCodes => "diagnosisCodes",
            EntryField::HealthCheckRating => "healthCheckRating",
            EntryField::EmployerName => "employerName",
            EntryField::SickLeave => "sickLeave",
            EntryField::SickLeaveStartDate => "sickLeave.startDate",
            EntryField::SickLeaveEndDate => "sickLeave.endDate",
            EntryField::DischargeDate => "discharge.date",
            EntryField::DischargeCriteria => "discharge.criteria",
        }
    }
}

impl fmt::Display for EntryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field-level validation failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: EntryField,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: EntryField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Every validation failure found in one entry draft, in field order.
///
/// Never empty: a draft either builds completely or produces at least one error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub(crate) fn new(errors: Vec<ValidationError>) -> Self {
        debug_assert!(!errors.is_empty());
        Self(errors)
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn fields(&self) -> Vec<EntryField> {
        self.0.iter().map(|e| e.field).collect()
    }

    pub fn contains(&self, field: EntryField) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// First message reported for `field`, if any.
    pub fn message_for(&self, field: EntryField) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid entry: ")?;
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Errors reported by a [`crate::PatientStore`] implementation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The store refused the request. The message is the store's raw text.
    #[error("{0}")]
    Rejected(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Failure to have an entry accepted by the store.
///
/// Local draft values are never touched when this is returned; the caller may edit and retry.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    /// The store rejected the entry. The message is ready to display verbatim.
    #[error("{0}")]
    Rejected(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("submission failed: {0}")]
    Submission(#[from] SubmissionError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
