//! Patient and clinical entry model.
//!
//! This crate owns the shape of patient records and their clinical entries:
//! - Domain-level types (`Patient`, `Entry`, `EntryCreation`, `Diagnosis`)
//! - A strict JSON wire model for the payloads exchanged with the patient store
//! - Translation between the wire model and the domain types
//!
//! An entry is a closed tagged union over [`EntryKind`]. The discriminant travels in a JSON
//! field named `type`; any value outside the known set is rejected at this boundary with
//! [`ModelError::UnknownVariant`] and never becomes an [`Entry`].
//!
//! Validation of free-form user input and per-kind dispatch live in `patientor-core`.

pub mod diagnosis;
pub mod entry;
pub mod ids;
pub mod patient;
pub mod wire;

pub use diagnosis::Diagnosis;
pub use entry::{
    Discharge, Entry, EntryBase, EntryCreation, EntryDetails, EntryKind, HealthCheckDetails,
    HealthCheckRating, HospitalDetails, OccupationalHealthcareDetails, SickLeave,
};
pub use ids::{EntryId, PatientId};
pub use patient::{Gender, Patient, PatientSummary};
pub use wire::{
    parse_diagnoses, parse_entry, parse_entry_creation, parse_patient, parse_patients,
    render_diagnoses, render_entry, render_entry_creation, render_patient, render_patients,
};

pub use patientor_types::{IsoDate, NonEmptyText};

/// Errors returned by the `patientor-model` crate.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error(
        "unknown entry type '{0}' (expected one of HealthCheck, OccupationalHealthcare, Hospital)"
    )]
    UnknownVariant(String),

    #[error("translation error: {0}")]
    Translation(String),
}

/// Type alias for Results that can fail with a [`ModelError`].
pub type ModelResult<T> = Result<T, ModelError>;
