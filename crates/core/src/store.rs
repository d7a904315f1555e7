//! Patient store boundary.
//!
//! The store owns persistence and assigns entry ids. The core only talks to it through
//! [`PatientStore`]; [`InMemoryPatientStore`] backs the CLI and the tests.

use crate::catalog::{DiagnosisCatalog, Diagnoses};
use crate::constants::SUBMISSION_ERROR_PREFIX;
use crate::error::StoreError;
use crate::record::{append_entry, find_patient, replace_patient};
use patientor_model::{Diagnosis, Entry, EntryCreation, EntryId, Patient, PatientId, PatientSummary};
use uuid::Uuid;

/// Operations the core needs from the patient store.
pub trait PatientStore {
    fn list_patients(&self) -> Result<Vec<PatientSummary>, StoreError>;

    fn patient(&self, id: &PatientId) -> Result<Patient, StoreError>;

    fn diagnoses(&self) -> Result<Vec<Diagnosis>, StoreError>;

    /// Submits one entry for `patient_id`. On success the store returns the canonical entry
    /// carrying its assigned id.
    fn create_entry(
        &mut self,
        patient_id: &PatientId,
        creation: EntryCreation,
    ) -> Result<Entry, StoreError>;
}

/// In-process patient store.
///
/// Rejections carry the same boilerplate prefix as the remote service so callers exercise the
/// same message handling.
#[derive(Clone, Debug)]
pub struct InMemoryPatientStore {
    patients: Vec<Patient>,
    diagnoses: Diagnoses,
    available: bool,
}

impl InMemoryPatientStore {
    pub fn new(patients: Vec<Patient>, diagnoses: Diagnoses) -> Self {
        Self {
            patients,
            diagnoses,
            available: true,
        }
    }

    /// Simulates the store going offline (`false`) or coming back (`true`).
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Every stored patient, with entries.
    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    fn ensure_available(&self) -> Result<(), StoreError> {
        if self.available {
            Ok(())
        } else {
            Err(StoreError::Unavailable(
                "patient store is not reachable".into(),
            ))
        }
    }

    fn rejected(message: impl std::fmt::Display) -> StoreError {
        StoreError::Rejected(format!("{SUBMISSION_ERROR_PREFIX}{message}"))
    }
}

impl PatientStore for InMemoryPatientStore {
    fn list_patients(&self) -> Result<Vec<PatientSummary>, StoreError> {
        self.ensure_available()?;
        Ok(self.patients.iter().map(Patient::summary).collect())
    }

    fn patient(&self, id: &PatientId) -> Result<Patient, StoreError> {
        self.ensure_available()?;
        find_patient(&self.patients, id)
            .cloned()
            .ok_or_else(|| Self::rejected(format_args!("patient {id} not found")))
    }

    fn diagnoses(&self) -> Result<Vec<Diagnosis>, StoreError> {
        self.ensure_available()?;
        Ok(self.diagnoses.as_slice().to_vec())
    }

    fn create_entry(
        &mut self,
        patient_id: &PatientId,
        creation: EntryCreation,
    ) -> Result<Entry, StoreError> {
        self.ensure_available()?;

        let patient = find_patient(&self.patients, patient_id)
            .ok_or_else(|| Self::rejected(format_args!("patient {patient_id} not found")))?;

        if let Some(code) = creation
            .base
            .diagnosis_codes
            .iter()
            .find(|code| !self.diagnoses.contains(code))
        {
            return Err(Self::rejected(format_args!(
                "unknown diagnosis code '{code}'"
            )));
        }

        let entry = creation.into_entry(EntryId::new(Uuid::new_v4().simple().to_string()));
        let updated = append_entry(patient, entry.clone());
        self.patients = replace_patient(&self.patients, updated);

        tracing::debug!("stored {} entry {} for patient {patient_id}", entry.kind(), entry.id);
        Ok(entry)
    }
}
