//! Entry submission.
//!
//! Submits one entry-creation payload to the store and, once it is accepted, folds the
//! canonical entry back into the caller's patient and patient collection. The caller keeps its
//! draft; nothing here touches it.

use crate::builder::EntryBuilder;
use crate::catalog::DiagnosisCatalog;
use crate::config::CoreConfig;
use crate::draft::EntryDraft;
use crate::error::{StoreError, SubmissionError};
use crate::record::{append_entry, replace_patient};
use crate::store::PatientStore;
use crate::CoreResult;
use patientor_model::{Entry, EntryCreation, Patient};

/// Result of an accepted submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmittedEntry {
    /// The entry as returned by the store, with its assigned id.
    pub entry: Entry,
    /// The current patient with the entry appended.
    pub patient: Patient,
    /// The patient collection with the current patient replaced.
    pub patients: Vec<Patient>,
}

/// Submits `creation` for `patient` and returns the updated records.
///
/// # Errors
///
/// Returns [`SubmissionError::Rejected`] with the store's message (boilerplate prefix removed)
/// or [`SubmissionError::Unavailable`] if the store could not be reached. `patient` and
/// `patients` are left as they were.
pub fn submit_new_entry<S: PatientStore + ?Sized>(
    store: &mut S,
    config: &CoreConfig,
    patient: &Patient,
    patients: &[Patient],
    creation: EntryCreation,
) -> Result<SubmittedEntry, SubmissionError> {
    let kind = creation.kind();
    let entry = store
        .create_entry(&patient.id, creation)
        .map_err(|err| match err {
            StoreError::Rejected(message) => {
                let message = strip_error_prefix(&message, config.submission_error_prefix());
                tracing::warn!("{kind} entry for patient {} rejected: {message}", patient.id);
                SubmissionError::Rejected(message.to_owned())
            }
            StoreError::Unavailable(message) => {
                tracing::warn!("patient store unavailable: {message}");
                SubmissionError::Unavailable(message)
            }
        })?;

    tracing::info!(
        "{} entry {} added for patient {}",
        entry.kind(),
        entry.id,
        patient.id
    );

    let updated = append_entry(patient, entry.clone());
    let patients = replace_patient(patients, updated.clone());
    Ok(SubmittedEntry {
        entry,
        patient: updated,
        patients,
    })
}

/// Validates `draft`, submits it and returns the updated records.
///
/// Validation failures are returned before the store is contacted.
pub fn create_entry_from_draft<S, C>(
    store: &mut S,
    catalog: &C,
    config: &CoreConfig,
    patient: &Patient,
    patients: &[Patient],
    draft: &EntryDraft,
) -> CoreResult<SubmittedEntry>
where
    S: PatientStore + ?Sized,
    C: DiagnosisCatalog + ?Sized,
{
    let creation = EntryBuilder::new(catalog, config).build(draft)?;
    Ok(submit_new_entry(store, config, patient, patients, creation)?)
}

/// Removes the store's boilerplate `prefix` from `message`. An empty prefix is a no-op.
pub fn strip_error_prefix<'a>(message: &'a str, prefix: &str) -> &'a str {
    if prefix.is_empty() {
        return message;
    }
    message.strip_prefix(prefix).unwrap_or(message)
}
