//! Per-kind entry handling.
//!
//! Consumers that need different behaviour per entry kind implement [`EntryHandler`] and call
//! [`dispatch`]. The trait has one required method per kind and no default bodies, so adding a
//! kind to [`EntryDetails`] fails to compile until every handler covers it.

use crate::catalog::DiagnosisCatalog;
use patientor_model::{
    Entry, EntryDetails, HealthCheckDetails, HospitalDetails, OccupationalHealthcareDetails,
};

/// One handler per entry kind.
pub trait EntryHandler {
    type Output;

    fn health_check(&self, entry: &Entry, details: &HealthCheckDetails) -> Self::Output;

    fn occupational_healthcare(
        &self,
        entry: &Entry,
        details: &OccupationalHealthcareDetails,
    ) -> Self::Output;

    fn hospital(&self, entry: &Entry, details: &HospitalDetails) -> Self::Output;
}

/// Runs exactly one handler of `handler`, chosen by the entry's kind.
pub fn dispatch<H: EntryHandler + ?Sized>(entry: &Entry, handler: &H) -> H::Output {
    match &entry.details {
        EntryDetails::HealthCheck(details) => handler.health_check(entry, details),
        EntryDetails::OccupationalHealthcare(details) => {
            handler.occupational_healthcare(entry, details)
        }
        EntryDetails::Hospital(details) => handler.hospital(entry, details),
    }
}

/// Renders an entry as a plain-text card.
///
/// The first line is the date and kind (plus employer for occupational entries), followed by
/// the description, the kind-specific details, the specialist and one line per diagnosis code.
/// Codes are resolved to names when a catalog is attached.
#[derive(Clone, Copy, Default)]
pub struct EntryRenderer<'a> {
    catalog: Option<&'a dyn DiagnosisCatalog>,
}

impl<'a> EntryRenderer<'a> {
    pub fn new() -> Self {
        Self { catalog: None }
    }

    pub fn with_catalog(catalog: &'a dyn DiagnosisCatalog) -> Self {
        Self {
            catalog: Some(catalog),
        }
    }

    fn card(&self, entry: &Entry, heading_suffix: Option<&str>, details: &[String]) -> String {
        let mut out = format!("{} [{}]", entry.base.date, entry.kind());
        if let Some(suffix) = heading_suffix {
            out.push(' ');
            out.push_str(suffix);
        }
        out.push('\n');
        out.push_str(entry.base.description.as_str());
        out.push('\n');
        for line in details {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(&format!("diagnosed by {}\n", entry.base.specialist));
        for code in &entry.base.diagnosis_codes {
            let line = match self.catalog.and_then(|c| c.lookup(code)) {
                Some(diagnosis) => format!("  {code} {}\n", diagnosis.name),
                None => format!("  {code}\n"),
            };
            out.push_str(&line);
        }
        out
    }
}

impl EntryHandler for EntryRenderer<'_> {
    type Output = String;

    fn health_check(&self, entry: &Entry, details: &HealthCheckDetails) -> String {
        let rating = details.health_check_rating;
        self.card(
            entry,
            None,
            &[format!(
                "health check rating: {} ({})",
                rating.value(),
                rating.label()
            )],
        )
    }

    fn occupational_healthcare(
        &self,
        entry: &Entry,
        details: &OccupationalHealthcareDetails,
    ) -> String {
        let lines: Vec<String> = details
            .sick_leave
            .iter()
            .map(|leave| {
                format!(
                    "sick leave: {} to {}",
                    leave.start_date(),
                    leave.end_date()
                )
            })
            .collect();
        self.card(entry, Some(details.employer_name.as_str()), &lines)
    }

    fn hospital(&self, entry: &Entry, details: &HospitalDetails) -> String {
        let lines: Vec<String> = details
            .discharge
            .iter()
            .map(|discharge| format!("discharged {}: {}", discharge.date, discharge.criteria))
            .collect();
        self.card(entry, None, &lines)
    }
}

/// One-line summary of an entry, e.g. `2024-01-10 HealthCheck: Annual check (Dr. House)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct EntrySummary;

impl EntrySummary {
    fn line(entry: &Entry, extra: Option<String>) -> String {
        let mut line = format!(
            "{} {}: {} ({})",
            entry.base.date,
            entry.kind(),
            entry.base.description,
            entry.base.specialist
        );
        if let Some(extra) = extra {
            line.push_str(" - ");
            line.push_str(&extra);
        }
        line
    }
}

impl EntryHandler for EntrySummary {
    type Output = String;

    fn health_check(&self, entry: &Entry, details: &HealthCheckDetails) -> String {
        Self::line(entry, Some(details.health_check_rating.label().to_owned()))
    }

    fn occupational_healthcare(
        &self,
        entry: &Entry,
        details: &OccupationalHealthcareDetails,
    ) -> String {
        Self::line(entry, Some(details.employer_name.to_string()))
    }

    fn hospital(&self, entry: &Entry, details: &HospitalDetails) -> String {
        Self::line(
            entry,
            details
                .discharge
                .as_ref()
                .map(|d| format!("discharged {}", d.date)),
        )
    }
}
