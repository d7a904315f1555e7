//! # Patientor Core
//!
//! Core logic for recording clinical entries against a patient:
//! - Validating raw form values into an entry-creation payload (`builder`)
//! - Per-kind handling of entries through an exhaustive dispatcher (`dispatch`)
//! - Immutable record updates once the store accepts an entry (`record`)
//! - The patient store boundary and the submission flow (`store`, `submission`)
//!
//! Everything here is synchronous and returns new values. The store is the only effectful seam.
//!
//! **No transport concerns**: JSON wire shapes live in `patientor-model`; the command-line
//! surface lives in the `patientor` binary.

pub mod builder;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod dispatch;
pub mod draft;
pub mod error;
pub mod record;
pub mod store;
pub mod submission;

pub use builder::{build_entry, EntryBuilder};
pub use catalog::{DiagnosisCatalog, Diagnoses};
pub use config::{partial_pair_policy_from_env_value, CoreConfig, PartialPairPolicy};
pub use dispatch::{dispatch, EntryHandler, EntryRenderer, EntrySummary};
pub use draft::EntryDraft;
pub use error::{
    CoreError, CoreResult, EntryField, StoreError, SubmissionError, ValidationError,
    ValidationErrors,
};
pub use record::{append_entry, find_patient, replace_patient};
pub use store::{InMemoryPatientStore, PatientStore};
pub use submission::{create_entry_from_draft, strip_error_prefix, submit_new_entry, SubmittedEntry};
