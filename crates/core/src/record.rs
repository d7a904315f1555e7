//! Immutable updates to patient records.
//!
//! Both operations return new values and leave their inputs untouched. Entries are only ever
//! appended; nothing here removes or reorders them.

use patientor_model::{Entry, Patient, PatientId};

/// Returns a copy of `patient` with `entry` appended after every existing entry.
pub fn append_entry(patient: &Patient, entry: Entry) -> Patient {
    let mut updated = patient.clone();
    updated.entries.push(entry);
    updated
}

/// Returns `patients` with the record whose id matches `updated` swapped for it.
///
/// Order is preserved. When no record matches, the collection comes back unchanged.
pub fn replace_patient(patients: &[Patient], updated: Patient) -> Vec<Patient> {
    let Some(position) = patients.iter().position(|p| p.id == updated.id) else {
        tracing::warn!("no patient with id {} to replace", updated.id);
        return patients.to_vec();
    };

    let mut result = patients.to_vec();
    result[position] = updated;
    result
}

/// Looks up a patient by id.
pub fn find_patient<'a>(patients: &'a [Patient], id: &PatientId) -> Option<&'a Patient> {
    patients.iter().find(|p| &p.id == id)
}
