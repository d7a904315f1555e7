//! Patient domain model.

use crate::{Entry, PatientId};
use patientor_types::IsoDate;
use serde::{Deserialize, Serialize};

/// Administrative gender as exchanged with the patient store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

/// A patient record with its entries.
///
/// `entries` is in append order, which is not necessarily sorted by entry date. The core only
/// ever appends to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Patient {
    pub id: PatientId,
    pub name: String,
    pub date_of_birth: IsoDate,
    pub ssn: String,
    pub gender: Gender,
    pub occupation: String,
    pub entries: Vec<Entry>,
}

/// Patient fields shown in the patient list. Omits the SSN and the entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatientSummary {
    pub id: PatientId,
    pub name: String,
    pub date_of_birth: IsoDate,
    pub gender: Gender,
    pub occupation: String,
}

impl Patient {
    pub fn summary(&self) -> PatientSummary {
        PatientSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            date_of_birth: self.date_of_birth,
            gender: self.gender,
            occupation: self.occupation.clone(),
        }
    }
}
