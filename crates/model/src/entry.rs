//! Clinical entry domain model.
//!
//! An entry is split into the fields every kind shares ([`EntryBase`]) and the kind-specific
//! part ([`EntryDetails`]). `EntryDetails` is the tagged union: its variant is the entry's
//! discriminant, and each variant carries only the fields meaningful for that kind.
//!
//! - [`EntryCreation`] is what the core builds from user input and submits to the store.
//! - [`Entry`] is the store's canonical value, which adds the store-assigned [`EntryId`].
//!
//! Consumers narrow an entry only by matching on [`EntryDetails`]; never by checking which
//! optional fields happen to be present.

use crate::{EntryId, ModelError, ModelResult};
use patientor_types::{IsoDate, NonEmptyText};
use std::fmt;
use std::str::FromStr;

/// Discriminant of an entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryKind {
    HealthCheck,
    OccupationalHealthcare,
    Hospital,
}

impl EntryKind {
    /// Every known discriminant, in the order the entry form offers them.
    pub const ALL: [EntryKind; 3] = [
        EntryKind::HealthCheck,
        EntryKind::OccupationalHealthcare,
        EntryKind::Hospital,
    ];

    /// Wire value of the discriminant (the JSON `type` field).
    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::HealthCheck => "HealthCheck",
            EntryKind::OccupationalHealthcare => "OccupationalHealthcare",
            EntryKind::Hospital => "Hospital",
        }
    }

    /// Parses a wire discriminant. Matching is exact (case-sensitive).
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownVariant`] for any value outside [`EntryKind::ALL`].
    pub fn from_discriminant(value: &str) -> ModelResult<Self> {
        match value {
            "HealthCheck" => Ok(EntryKind::HealthCheck),
            "OccupationalHealthcare" => Ok(EntryKind::OccupationalHealthcare),
            "Hospital" => Ok(EntryKind::Hospital),
            other => Err(ModelError::UnknownVariant(other.to_owned())),
        }
    }

    /// Heading shown above the entry form for this kind.
    pub fn heading(self) -> String {
        format!("New {} Entry", self.as_str())
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntryKind::from_discriminant(s)
    }
}

/// Outcome of a health check, exchanged as an integer 0–3.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HealthCheckRating {
    Healthy = 0,
    LowRisk = 1,
    HighRisk = 2,
    CriticalRisk = 3,
}

impl HealthCheckRating {
    /// Maps a wire integer to a rating; anything outside 0–3 is `None`.
    pub fn from_value(value: i64) -> Option<Self> {
        match value {
            0 => Some(HealthCheckRating::Healthy),
            1 => Some(HealthCheckRating::LowRisk),
            2 => Some(HealthCheckRating::HighRisk),
            3 => Some(HealthCheckRating::CriticalRisk),
            _ => None,
        }
    }

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            HealthCheckRating::Healthy => "Healthy",
            HealthCheckRating::LowRisk => "LowRisk",
            HealthCheckRating::HighRisk => "HighRisk",
            HealthCheckRating::CriticalRisk => "CriticalRisk",
        }
    }
}

/// Fields shared by every entry kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryBase {
    pub description: NonEmptyText,
    pub date: IsoDate,
    pub specialist: NonEmptyText,

    /// Diagnosis codes in the order they were selected. Empty means "not supplied".
    ///
    /// An absent `diagnosisCodes` and an empty array both read as empty, and empty is rendered
    /// by leaving the key out.
    pub diagnosis_codes: Vec<String>,
}

/// A sick-leave period. `start_date <= end_date` always holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SickLeave {
    start_date: IsoDate,
    end_date: IsoDate,
}

impl SickLeave {
    /// Creates a sick-leave period.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidInput`] if `start_date` is after `end_date`. The dates are
    /// never swapped.
    pub fn new(start_date: IsoDate, end_date: IsoDate) -> ModelResult<Self> {
        if start_date > end_date {
            return Err(ModelError::InvalidInput(format!(
                "sick leave start date {start_date} is after end date {end_date}"
            )));
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    pub fn start_date(&self) -> IsoDate {
        self.start_date
    }

    pub fn end_date(&self) -> IsoDate {
        self.end_date
    }
}

/// Hospital discharge information.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Discharge {
    pub date: IsoDate,
    pub criteria: NonEmptyText,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HealthCheckDetails {
    pub health_check_rating: HealthCheckRating,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupationalHealthcareDetails {
    pub employer_name: NonEmptyText,
    pub sick_leave: Option<SickLeave>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HospitalDetails {
    pub discharge: Option<Discharge>,
}

/// Kind-specific part of an entry. The variant is the entry's discriminant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryDetails {
    HealthCheck(HealthCheckDetails),
    OccupationalHealthcare(OccupationalHealthcareDetails),
    Hospital(HospitalDetails),
}

impl EntryDetails {
    pub fn kind(&self) -> EntryKind {
        match self {
            EntryDetails::HealthCheck(_) => EntryKind::HealthCheck,
            EntryDetails::OccupationalHealthcare(_) => EntryKind::OccupationalHealthcare,
            EntryDetails::Hospital(_) => EntryKind::Hospital,
        }
    }
}

/// An entry that has not yet been accepted by the store (no id).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryCreation {
    pub base: EntryBase,
    pub details: EntryDetails,
}

impl EntryCreation {
    pub fn kind(&self) -> EntryKind {
        self.details.kind()
    }

    /// Turns this creation into the canonical entry once the store has assigned `id`.
    pub fn into_entry(self, id: EntryId) -> Entry {
        Entry {
            id,
            base: self.base,
            details: self.details,
        }
    }
}

/// A clinical entry accepted by the store. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub id: EntryId,
    pub base: EntryBase,
    pub details: EntryDetails,
}

impl Entry {
    pub fn kind(&self) -> EntryKind {
        self.details.kind()
    }
}
