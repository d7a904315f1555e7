//! Entry validation and construction.
//!
//! [`EntryBuilder`] turns an [`EntryDraft`] into an [`EntryCreation`], or reports every
//! problem it found as [`ValidationErrors`]. Building is all-or-nothing and has no side
//! effects: the catalog is only asked whether codes exist.
//!
//! Rules:
//! - `type`, `description`, `date` and `specialist` are required for every kind.
//! - `healthCheckRating` is required for health checks and must be 0, 1, 2 or 3.
//! - `employerName` is required for occupational healthcare.
//! - Sick leave and discharge are optional pairs. Both halves present means the sub-object is
//!   built (a reversed sick-leave range fails, it is never swapped). Neither present means it
//!   is omitted. One half present is governed by [`PartialPairPolicy`].
//! - Every diagnosis code must be known to the catalog.

use crate::catalog::DiagnosisCatalog;
use crate::config::{CoreConfig, PartialPairPolicy};
use crate::draft::EntryDraft;
use crate::error::{EntryField, ValidationError, ValidationErrors};
use patientor_model::{
    Discharge, EntryBase, EntryCreation, EntryDetails, EntryKind, HealthCheckDetails,
    HealthCheckRating, HospitalDetails, OccupationalHealthcareDetails, SickLeave,
};
use patientor_types::{IsoDate, NonEmptyText};

type FieldResult<T> = Result<T, Vec<ValidationError>>;

/// Builds entry-creation payloads from raw drafts.
pub struct EntryBuilder<'a, C: ?Sized> {
    catalog: &'a C,
    policy: PartialPairPolicy,
}

impl<'a, C: DiagnosisCatalog + ?Sized> EntryBuilder<'a, C> {
    pub fn new(catalog: &'a C, config: &CoreConfig) -> Self {
        Self {
            catalog,
            policy: config.partial_pair_policy(),
        }
    }

    /// Validates `draft` and builds the payload for its selected kind.
    ///
    /// Only the fields of the selected kind are read; values left over from another kind are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] naming every offending field. Nothing is built in that case.
    pub fn build(&self, draft: &EntryDraft) -> Result<EntryCreation, ValidationErrors> {
        let mut errors = Vec::new();

        let kind = collect(&mut errors, kind_from_selector(&draft.kind));
        let description = collect(
            &mut errors,
            required_text(EntryField::Description, &draft.description),
        );
        let date = collect(
            &mut errors,
            required_date(EntryField::Date, draft.date.as_deref()),
        );
        let specialist = collect(
            &mut errors,
            required_text(EntryField::Specialist, &draft.specialist),
        );
        let diagnosis_codes = collect(&mut errors, self.diagnosis_codes(&draft.diagnosis_codes));
        let details = kind.and_then(|kind| collect(&mut errors, self.details(kind, draft)));

        match (description, date, specialist, diagnosis_codes, details) {
            (Some(description), Some(date), Some(specialist), Some(diagnosis_codes), Some(details))
                if errors.is_empty() =>
            {
                tracing::debug!("entry draft accepted as {}", details.kind());
                Ok(EntryCreation {
                    base: EntryBase {
                        description,
                        date,
                        specialist,
                        diagnosis_codes,
                    },
                    details,
                })
            }
            _ => {
                tracing::debug!("entry draft rejected with {} error(s)", errors.len());
                Err(ValidationErrors::new(errors))
            }
        }
    }

    fn details(&self, kind: EntryKind, draft: &EntryDraft) -> FieldResult<EntryDetails> {
        match kind {
            EntryKind::HealthCheck => health_check(draft),
            EntryKind::OccupationalHealthcare => self.occupational_healthcare(draft),
            EntryKind::Hospital => self.hospital(draft),
        }
    }

    fn diagnosis_codes(&self, codes: &[String]) -> FieldResult<Vec<String>> {
        let mut accepted = Vec::with_capacity(codes.len());
        let mut errors = Vec::new();

        for code in codes.iter().map(|c| c.trim()).filter(|c| !c.is_empty()) {
            if self.catalog.contains(code) {
                accepted.push(code.to_owned());
            } else {
                errors.push(ValidationError::new(
                    EntryField::DiagnosisCodes,
                    format!("unknown diagnosis code '{code}'"),
                ));
            }
        }

        if errors.is_empty() {
            Ok(accepted)
        } else {
            Err(errors)
        }
    }

    fn occupational_healthcare(&self, draft: &EntryDraft) -> FieldResult<EntryDetails> {
        let mut errors = Vec::new();
        let employer_name = collect(
            &mut errors,
            required_text(
                EntryField::EmployerName,
                draft.employer_name.as_deref().unwrap_or_default(),
            ),
        );
        let sick_leave = collect(&mut errors, self.sick_leave(draft));

        match (employer_name, sick_leave) {
            (Some(employer_name), Some(sick_leave)) => Ok(EntryDetails::OccupationalHealthcare(
                OccupationalHealthcareDetails {
                    employer_name,
                    sick_leave,
                },
            )),
            _ => Err(errors),
        }
    }

    fn sick_leave(&self, draft: &EntryDraft) -> FieldResult<Option<SickLeave>> {
        let start = present(draft.sick_leave_start.as_deref());
        let end = present(draft.sick_leave_end.as_deref());

        match (start, end) {
            (None, None) => Ok(None),
            (Some(_), None) => self.partial_pair(EntryField::SickLeaveEndDate, "sick leave"),
            (None, Some(_)) => self.partial_pair(EntryField::SickLeaveStartDate, "sick leave"),
            (Some(start), Some(end)) => {
                let mut errors = Vec::new();
                let start = collect(
                    &mut errors,
                    parse_date(EntryField::SickLeaveStartDate, start),
                );
                let end = collect(&mut errors, parse_date(EntryField::SickLeaveEndDate, end));

                match (start, end) {
                    (Some(start), Some(end)) => SickLeave::new(start, end).map(Some).map_err(|_| {
                        vec![ValidationError::new(
                            EntryField::SickLeave,
                            format!("start date {start} is after end date {end}"),
                        )]
                    }),
                    _ => Err(errors),
                }
            }
        }
    }

    fn hospital(&self, draft: &EntryDraft) -> FieldResult<EntryDetails> {
        let date = present(draft.discharge_date.as_deref());
        let criteria = present(draft.discharge_criteria.as_deref());

        let discharge = match (date, criteria) {
            (None, None) => None,
            (Some(_), None) => self.partial_pair(EntryField::DischargeCriteria, "discharge")?,
            (None, Some(_)) => self.partial_pair(EntryField::DischargeDate, "discharge")?,
            (Some(date), Some(criteria)) => {
                let mut errors = Vec::new();
                let date = collect(&mut errors, parse_date(EntryField::DischargeDate, date));
                let criteria = collect(
                    &mut errors,
                    required_text(EntryField::DischargeCriteria, criteria),
                );
                match (date, criteria) {
                    (Some(date), Some(criteria)) => Some(Discharge { date, criteria }),
                    _ => return Err(errors),
                }
            }
        };

        Ok(EntryDetails::Hospital(HospitalDetails { discharge }))
    }

    /// Outcome when only one half of an optional pair was supplied.
    fn partial_pair<T>(&self, missing: EntryField, pair: &str) -> FieldResult<Option<T>> {
        match self.policy {
            PartialPairPolicy::Reject => Err(vec![ValidationError::new(
                missing,
                format!("is required when part of the {pair} is supplied"),
            )]),
            PartialPairPolicy::Omit => {
                tracing::debug!("incomplete {pair} omitted from entry (missing {missing})");
                Ok(None)
            }
        }
    }
}

/// Validates `draft` against `catalog` using `config`. See [`EntryBuilder::build`].
pub fn build_entry<C: DiagnosisCatalog + ?Sized>(
    draft: &EntryDraft,
    catalog: &C,
    config: &CoreConfig,
) -> Result<EntryCreation, ValidationErrors> {
    EntryBuilder::new(catalog, config).build(draft)
}

fn collect<T>(errors: &mut Vec<ValidationError>, result: FieldResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(mut found) => {
            errors.append(&mut found);
            None
        }
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn kind_from_selector(selector: &str) -> FieldResult<EntryKind> {
    let selector = selector.trim();
    if selector.is_empty() {
        return Err(vec![ValidationError::new(EntryField::Type, "is required")]);
    }

    EntryKind::from_discriminant(selector).map_err(|_| {
        let expected = EntryKind::ALL
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        vec![ValidationError::new(
            EntryField::Type,
            format!("unknown entry type '{selector}', expected one of {expected}"),
        )]
    })
}

fn required_text(field: EntryField, value: &str) -> FieldResult<NonEmptyText> {
    NonEmptyText::new(value)
        .map_err(|_| vec![ValidationError::new(field, "is required")])
}

fn required_date(field: EntryField, value: Option<&str>) -> FieldResult<IsoDate> {
    match present(value) {
        Some(value) => parse_date(field, value),
        None => Err(vec![ValidationError::new(field, "is required")]),
    }
}

fn parse_date(field: EntryField, value: &str) -> FieldResult<IsoDate> {
    IsoDate::parse(value).map_err(|_| {
        vec![ValidationError::new(
            field,
            format!("must be a calendar date in YYYY-MM-DD format, got '{value}'"),
        )]
    })
}

fn health_check(draft: &EntryDraft) -> FieldResult<EntryDetails> {
    let field = EntryField::HealthCheckRating;
    let raw = present(draft.health_check_rating.as_deref())
        .ok_or_else(|| vec![ValidationError::new(field, "is required")])?;
    let value: i64 = raw.parse().map_err(|_| {
        vec![ValidationError::new(
            field,
            format!("must be a number, got '{raw}'"),
        )]
    })?;
    let health_check_rating = HealthCheckRating::from_value(value).ok_or_else(|| {
        vec![ValidationError::new(
            field,
            format!("must be one of 0, 1, 2, 3, got {value}"),
        )]
    })?;

    Ok(EntryDetails::HealthCheck(HealthCheckDetails {
        health_check_rating,
    }))
}
