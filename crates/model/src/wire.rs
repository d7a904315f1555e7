//! JSON wire models and translation helpers.
//!
//! Responsibilities:
//! - Define a strict wire model for the JSON payloads exchanged with the patient store
//! - Translate between the wire model and the domain types in this crate
//! - Reject unknown discriminants loudly instead of degrading them to a default kind
//!
//! Notes:
//! - Wire structs use `#[serde(deny_unknown_fields)]`, so a field belonging to another entry
//!   kind (for example `employerName` on a `HealthCheck`) is a schema mismatch.
//! - Schema mismatches report the failing path via `serde_path_to_error`.

use crate::{
    Diagnosis, Discharge, Entry, EntryBase, EntryCreation, EntryDetails, EntryId, EntryKind,
    Gender, HealthCheckDetails, HealthCheckRating, HospitalDetails, ModelError, ModelResult,
    OccupationalHealthcareDetails, Patient, PatientId, SickLeave,
};
use patientor_types::{IsoDate, NonEmptyText};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Public parse/render operations
// ============================================================================

/// Parse a canonical entry (with store-assigned `id`) from JSON text.
///
/// # Errors
///
/// Returns [`ModelError`] if:
/// - the text is not JSON,
/// - `type` is missing or not one of the known discriminants ([`ModelError::UnknownVariant`]),
/// - any field is missing, has an unexpected type, or belongs to another kind,
/// - the `id` is missing.
pub fn parse_entry(json: &str) -> ModelResult<Entry> {
    let value: Value = serde_json::from_str(json)?;
    entry_from_value(value)
}

/// Parse an entry-creation payload (no `id`) from JSON text.
///
/// # Errors
///
/// As [`parse_entry`], except that the payload must *not* carry an `id`.
pub fn parse_entry_creation(json: &str) -> ModelResult<EntryCreation> {
    let value: Value = serde_json::from_str(json)?;
    let (id, creation) = wire_to_parts(entry_wire_from_value(value)?)?;
    if id.is_some() {
        return Err(ModelError::InvalidInput(
            "entry creation must not carry an id; ids are assigned by the store".into(),
        ));
    }
    Ok(creation)
}

/// Parse a full patient (including entries) from JSON text.
pub fn parse_patient(json: &str) -> ModelResult<Patient> {
    let value: Value = serde_json::from_str(json)?;
    patient_from_value(value)
}

/// Parse a JSON array of full patients.
pub fn parse_patients(json: &str) -> ModelResult<Vec<Patient>> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Array(items) = value else {
        return Err(ModelError::Translation(
            "patients must be a JSON array".into(),
        ));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| patient_from_value(item).map_err(|e| at(&format!("[{index}]"), e)))
        .collect()
}

/// Parse the diagnosis reference list from JSON text.
pub fn parse_diagnoses(json: &str) -> ModelResult<Vec<Diagnosis>> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    serde_path_to_error::deserialize::<_, Vec<Diagnosis>>(&mut deserializer)
        .map_err(|err| schema_mismatch("Diagnosis list", err))
}

/// Render a canonical entry as JSON text.
pub fn render_entry(entry: &Entry) -> ModelResult<String> {
    let wire = domain_to_wire(Some(&entry.id), &entry.base, &entry.details);
    Ok(serde_json::to_string_pretty(&wire)?)
}

/// Render an entry-creation payload as JSON text. The kind is written under `type`.
pub fn render_entry_creation(creation: &EntryCreation) -> ModelResult<String> {
    let wire = domain_to_wire(None, &creation.base, &creation.details);
    Ok(serde_json::to_string_pretty(&wire)?)
}

/// Render a full patient as JSON text.
pub fn render_patient(patient: &Patient) -> ModelResult<String> {
    Ok(serde_json::to_string_pretty(&patient_to_wire(patient)?)?)
}

/// Render a list of full patients as a JSON array.
pub fn render_patients(patients: &[Patient]) -> ModelResult<String> {
    let wires = patients
        .iter()
        .map(patient_to_wire)
        .collect::<ModelResult<Vec<_>>>()?;
    Ok(serde_json::to_string_pretty(&wires)?)
}

/// Render the diagnosis reference list as JSON text.
pub fn render_diagnoses(diagnoses: &[Diagnosis]) -> ModelResult<String> {
    Ok(serde_json::to_string_pretty(diagnoses)?)
}

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(tag = "type")]
enum EntryWire {
    HealthCheck(HealthCheckWire),
    OccupationalHealthcare(OccupationalHealthcareWire),
    Hospital(HospitalWire),
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct HealthCheckWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    description: String,
    date: String,
    specialist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    diagnosis_codes: Option<Vec<String>>,
    health_check_rating: i64,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct OccupationalHealthcareWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    description: String,
    date: String,
    specialist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    diagnosis_codes: Option<Vec<String>>,
    employer_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sick_leave: Option<SickLeaveWire>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct HospitalWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    description: String,
    date: String,
    specialist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    diagnosis_codes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    discharge: Option<DischargeWire>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct SickLeaveWire {
    start_date: String,
    end_date: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
struct DischargeWire {
    date: String,
    criteria: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct PatientWire {
    id: String,
    name: String,
    date_of_birth: String,
    ssn: String,
    gender: Gender,
    occupation: String,
    #[serde(default)]
    entries: Vec<Value>,
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

fn schema_mismatch(what: &str, err: serde_path_to_error::Error<serde_json::Error>) -> ModelError {
    let path = err.path().to_string();
    let source = err.into_inner();
    let path = if path.is_empty() || path == "." {
        "<root>"
    } else {
        path.as_str()
    };
    ModelError::Translation(format!("{what} schema mismatch at {path}: {source}"))
}

/// Prefix a location onto recoverable errors. Unknown discriminants pass through untouched.
fn at(location: &str, err: ModelError) -> ModelError {
    match err {
        ModelError::Translation(msg) => ModelError::Translation(format!("{location}: {msg}")),
        ModelError::InvalidInput(msg) => ModelError::InvalidInput(format!("{location}: {msg}")),
        other => other,
    }
}

fn check_discriminant(value: &Value) -> ModelResult<EntryKind> {
    match value.get("type") {
        Some(Value::String(kind)) => EntryKind::from_discriminant(kind),
        Some(other) => Err(ModelError::Translation(format!(
            "entry type must be a string, got {other}"
        ))),
        None => Err(ModelError::Translation(
            "entry is missing its 'type' discriminant".into(),
        )),
    }
}

fn entry_wire_from_value(value: Value) -> ModelResult<EntryWire> {
    check_discriminant(&value)?;
    serde_path_to_error::deserialize::<_, EntryWire>(value)
        .map_err(|err| schema_mismatch("Entry", err))
}

fn entry_from_value(value: Value) -> ModelResult<Entry> {
    let (id, creation) = wire_to_parts(entry_wire_from_value(value)?)?;
    let id = id.ok_or_else(|| {
        ModelError::Translation("entry is missing its store-assigned id".into())
    })?;
    Ok(creation.into_entry(EntryId::new(id)))
}

fn non_empty(field: &str, value: &str) -> ModelResult<NonEmptyText> {
    NonEmptyText::new(value)
        .map_err(|_| ModelError::Translation(format!("{field} cannot be empty")))
}

fn iso_date(field: &str, value: &str) -> ModelResult<IsoDate> {
    IsoDate::parse(value).map_err(|e| ModelError::Translation(format!("{field}: {e}")))
}

fn base_from_wire(
    description: &str,
    date: &str,
    specialist: &str,
    diagnosis_codes: Option<Vec<String>>,
) -> ModelResult<EntryBase> {
    Ok(EntryBase {
        description: non_empty("description", description)?,
        date: iso_date("date", date)?,
        specialist: non_empty("specialist", specialist)?,
        diagnosis_codes: diagnosis_codes.unwrap_or_default(),
    })
}

/// Convert a wire entry into its optional id and the id-less domain value.
fn wire_to_parts(wire: EntryWire) -> ModelResult<(Option<String>, EntryCreation)> {
    match wire {
        EntryWire::HealthCheck(w) => {
            let base = base_from_wire(&w.description, &w.date, &w.specialist, w.diagnosis_codes)?;
            let health_check_rating = HealthCheckRating::from_value(w.health_check_rating)
                .ok_or_else(|| {
                    ModelError::Translation(format!(
                        "healthCheckRating must be 0, 1, 2 or 3, got {}",
                        w.health_check_rating
                    ))
                })?;
            Ok((
                w.id,
                EntryCreation {
                    base,
                    details: EntryDetails::HealthCheck(HealthCheckDetails {
                        health_check_rating,
                    }),
                },
            ))
        }
        EntryWire::OccupationalHealthcare(w) => {
            let base = base_from_wire(&w.description, &w.date, &w.specialist, w.diagnosis_codes)?;
            let employer_name = non_empty("employerName", &w.employer_name)?;
            let sick_leave = w
                .sick_leave
                .map(|s| {
                    let start = iso_date("sickLeave.startDate", &s.start_date)?;
                    let end = iso_date("sickLeave.endDate", &s.end_date)?;
                    SickLeave::new(start, end).map_err(|e| at("sickLeave", e))
                })
                .transpose()?;
            Ok((
                w.id,
                EntryCreation {
                    base,
                    details: EntryDetails::OccupationalHealthcare(OccupationalHealthcareDetails {
                        employer_name,
                        sick_leave,
                    }),
                },
            ))
        }
        EntryWire::Hospital(w) => {
            let base = base_from_wire(&w.description, &w.date, &w.specialist, w.diagnosis_codes)?;
            let discharge = w
                .discharge
                .map(|d| {
                    Ok::<_, ModelError>(Discharge {
                        date: iso_date("discharge.date", &d.date)?,
                        criteria: non_empty("discharge.criteria", &d.criteria)?,
                    })
                })
                .transpose()?;
            Ok((
                w.id,
                EntryCreation {
                    base,
                    details: EntryDetails::Hospital(HospitalDetails { discharge }),
                },
            ))
        }
    }
}

fn domain_to_wire(id: Option<&EntryId>, base: &EntryBase, details: &EntryDetails) -> EntryWire {
    let id = id.map(|id| id.as_str().to_owned());
    let description = base.description.as_str().to_owned();
    let date = base.date.to_string();
    let specialist = base.specialist.as_str().to_owned();
    let diagnosis_codes = if base.diagnosis_codes.is_empty() {
        None
    } else {
        Some(base.diagnosis_codes.clone())
    };

    match details {
        EntryDetails::HealthCheck(d) => EntryWire::HealthCheck(HealthCheckWire {
            id,
            description,
            date,
            specialist,
            diagnosis_codes,
            health_check_rating: i64::from(d.health_check_rating.value()),
        }),
        EntryDetails::OccupationalHealthcare(d) => {
            EntryWire::OccupationalHealthcare(OccupationalHealthcareWire {
                id,
                description,
                date,
                specialist,
                diagnosis_codes,
                employer_name: d.employer_name.as_str().to_owned(),
                sick_leave: d.sick_leave.map(|s| SickLeaveWire {
                    start_date: s.start_date().to_string(),
                    end_date: s.end_date().to_string(),
                }),
            })
        }
        EntryDetails::Hospital(d) => EntryWire::Hospital(HospitalWire {
            id,
            description,
            date,
            specialist,
            diagnosis_codes,
            discharge: d.discharge.as_ref().map(|d| DischargeWire {
                date: d.date.to_string(),
                criteria: d.criteria.as_str().to_owned(),
            }),
        }),
    }
}

fn patient_from_value(value: Value) -> ModelResult<Patient> {
    let wire = serde_path_to_error::deserialize::<_, PatientWire>(value)
        .map_err(|err| schema_mismatch("Patient", err))?;

    let date_of_birth = iso_date("dateOfBirth", &wire.date_of_birth)?;
    let entries = wire
        .entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            entry_from_value(entry).map_err(|e| at(&format!("entries[{index}]"), e))
        })
        .collect::<ModelResult<Vec<_>>>()
        .map_err(|e| at(&format!("patient {}", wire.id), e))?;

    Ok(Patient {
        id: PatientId::new(wire.id),
        name: wire.name,
        date_of_birth,
        ssn: wire.ssn,
        gender: wire.gender,
        occupation: wire.occupation,
        entries,
    })
}

fn patient_to_wire(patient: &Patient) -> ModelResult<PatientWire> {
    let entries = patient
        .entries
        .iter()
        .map(|entry| {
            serde_json::to_value(domain_to_wire(Some(&entry.id), &entry.base, &entry.details))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PatientWire {
        id: patient.id.as_str().to_owned(),
        name: patient.name.clone(),
        date_of_birth: patient.date_of_birth.to_string(),
        ssn: patient.ssn.clone(),
        gender: patient.gender,
        occupation: patient.occupation.clone(),
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOSPITAL_ENTRY: &str = r#"{
        "id": "d811e46d-70b3-4d90-b090-4535c7cf8fb1",
        "date": "2015-01-02",
        "type": "Hospital",
        "specialist": "MD House",
        "diagnosisCodes": ["S62.5"],
        "description": "Healing time appr. 2 weeks. patient doesn't remember how he got the injury.",
        "discharge": {
            "date": "2015-01-16",
            "criteria": "Thumb has healed."
        }
    }"#;

    const PATIENT: &str = r#"{
        "id": "d2773336-f723-11e9-8f0b-362b9e155667",
        "name": "John McClane",
        "dateOfBirth": "1986-07-09",
        "ssn": "090786-122X",
        "gender": "male",
        "occupation": "New york city cop",
        "entries": [
            {
                "id": "fcd59fa6-c4b4-4fec-ac4d-df4fe1f85f62",
                "date": "2019-08-05",
                "type": "OccupationalHealthcare",
                "specialist": "MD House",
                "employerName": "HyPD",
                "diagnosisCodes": ["Z57.1", "Z74.3", "M51.2"],
                "description": "Patient mistakenly found himself in a nuclear plant waste site without protection gear.",
                "sickLeave": { "startDate": "2019-08-05", "endDate": "2019-08-28" }
            },
            {
                "id": "b4f4eca1-2aa7-4b13-9a18-4a5535c3c8da",
                "date": "2019-10-20",
                "specialist": "MD House",
                "type": "HealthCheck",
                "description": "Yearly control visit. Cholesterol levels back to normal.",
                "healthCheckRating": 0
            }
        ]
    }"#;

    #[test]
    fn parses_hospital_entry_with_discharge() {
        let entry = parse_entry(HOSPITAL_ENTRY).expect("parse entry");
        assert_eq!(entry.kind(), EntryKind::Hospital);
        assert_eq!(entry.base.diagnosis_codes, vec!["S62.5"]);
        match &entry.details {
            EntryDetails::Hospital(HospitalDetails {
                discharge: Some(discharge),
            }) => {
                assert_eq!(discharge.date.to_string(), "2015-01-16");
                assert_eq!(discharge.criteria.as_str(), "Thumb has healed.");
            }
            other => panic!("expected hospital entry with discharge, got {other:?}"),
        }
    }

    #[test]
    fn parses_patient_with_entries_in_order() {
        let patient = parse_patient(PATIENT).expect("parse patient");
        assert_eq!(patient.gender, Gender::Male);
        let kinds: Vec<EntryKind> = patient.entries.iter().map(Entry::kind).collect();
        assert_eq!(
            kinds,
            [EntryKind::OccupationalHealthcare, EntryKind::HealthCheck]
        );
    }

    #[test]
    fn rejects_fourth_discriminant_as_unknown_variant() {
        let input = r#"{
            "id": "x",
            "type": "Dental",
            "date": "2024-01-10",
            "specialist": "Dr. Teeth",
            "description": "Cleaning"
        }"#;

        let err = parse_entry(input).expect_err("should reject unknown kind");
        assert!(matches!(err, ModelError::UnknownVariant(kind) if kind == "Dental"));
    }

    #[test]
    fn unknown_variant_inside_patient_is_not_downgraded() {
        let input = PATIENT.replace("\"HealthCheck\"", "\"Dental\"");
        let err = parse_patient(&input).expect_err("should reject unknown kind");
        assert!(matches!(err, ModelError::UnknownVariant(kind) if kind == "Dental"));
    }

    #[test]
    fn rejects_field_from_another_kind() {
        let input = r#"{
            "id": "x",
            "type": "HealthCheck",
            "date": "2024-01-10",
            "specialist": "Dr. House",
            "description": "Annual check",
            "healthCheckRating": 1,
            "employerName": "ACME"
        }"#;

        let err = parse_entry(input).expect_err("should reject stray field");
        match err {
            ModelError::Translation(msg) => assert!(msg.contains("employerName")),
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_out_of_range_rating() {
        let input = r#"{
            "id": "x",
            "type": "HealthCheck",
            "date": "2024-01-10",
            "specialist": "Dr. House",
            "description": "Annual check",
            "healthCheckRating": 4
        }"#;

        let err = parse_entry(input).expect_err("should reject rating 4");
        assert!(matches!(err, ModelError::Translation(msg) if msg.contains("healthCheckRating")));
    }

    #[test]
    fn rejects_reversed_sick_leave() {
        let input = r#"{
            "id": "x",
            "type": "OccupationalHealthcare",
            "date": "2024-01-10",
            "specialist": "Dr. House",
            "description": "Back pain",
            "employerName": "ACME",
            "sickLeave": { "startDate": "2024-01-20", "endDate": "2024-01-10" }
        }"#;

        let err = parse_entry(input).expect_err("should reject reversed range");
        assert!(matches!(err, ModelError::InvalidInput(msg) if msg.starts_with("sickLeave")));
    }

    #[test]
    fn rejects_half_filled_sick_leave() {
        let input = r#"{
            "id": "x",
            "type": "OccupationalHealthcare",
            "date": "2024-01-10",
            "specialist": "Dr. House",
            "description": "Back pain",
            "employerName": "ACME",
            "sickLeave": { "startDate": "2024-01-20" }
        }"#;

        let err = parse_entry(input).expect_err("should reject partial sick leave");
        assert!(matches!(err, ModelError::Translation(msg) if msg.contains("endDate")));
    }

    #[test]
    fn entry_creation_must_not_carry_id() {
        let err = parse_entry_creation(HOSPITAL_ENTRY).expect_err("should reject id");
        assert!(matches!(err, ModelError::InvalidInput(msg) if msg.contains("id")));
    }

    #[test]
    fn renders_creation_with_type_field_and_only_kind_fields() {
        let creation = EntryCreation {
            base: EntryBase {
                description: NonEmptyText::new("Annual check").expect("text"),
                date: IsoDate::parse("2024-01-10").expect("date"),
                specialist: NonEmptyText::new("Dr. House").expect("text"),
                diagnosis_codes: vec![],
            },
            details: EntryDetails::HealthCheck(HealthCheckDetails {
                health_check_rating: HealthCheckRating::LowRisk,
            }),
        };

        let json = render_entry_creation(&creation).expect("render");
        let value: Value = serde_json::from_str(&json).expect("valid json");
        let mut keys: Vec<&str> = value
            .as_object()
            .expect("object")
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            ["date", "description", "healthCheckRating", "specialist", "type"]
        );
        assert_eq!(value["type"], "HealthCheck");
        assert_eq!(value["healthCheckRating"], 1);
    }

    #[test]
    fn patient_render_then_parse_preserves_entries() {
        let patient = parse_patient(PATIENT).expect("parse patient");
        let json = render_patient(&patient).expect("render patient");
        assert_eq!(parse_patient(&json).expect("reparse"), patient);
    }

    #[test]
    fn parse_patients_reports_index_of_bad_record() {
        let input = format!("[{PATIENT}, {{\"id\": \"p2\"}}]");
        let err = parse_patients(&input).expect_err("second patient is incomplete");
        assert!(matches!(err, ModelError::Translation(msg) if msg.starts_with("[1]")));
    }

    #[test]
    fn parses_diagnoses_with_optional_latin() {
        let input = r#"[
            { "code": "M24.2", "name": "Disorder of ligament", "latin": "Morbositas ligamenti" },
            { "code": "Z57.1", "name": "Occupational exposure to radiation" }
        ]"#;
        let diagnoses = parse_diagnoses(input).expect("parse diagnoses");
        assert_eq!(diagnoses.len(), 2);
        assert_eq!(diagnoses[0].latin.as_deref(), Some("Morbositas ligamenti"));
        assert_eq!(diagnoses[1].latin, None);
    }

    #[test]
    fn empty_diagnosis_codes_read_as_absent_and_render_without_key() {
        let with_empty = HOSPITAL_ENTRY.replace(r#"["S62.5"]"#, "[]");
        let entry = parse_entry(&with_empty).expect("parse entry");
        assert!(entry.base.diagnosis_codes.is_empty());

        let json = render_entry(&entry).expect("render entry");
        assert!(!json.contains("diagnosisCodes"));

        let without_key = parse_entry(&json).expect("reparse");
        assert_eq!(without_key, entry);
    }

    #[test]
    fn render_diagnoses_keeps_latin_only_when_present() {
        let diagnoses = vec![
            Diagnosis::new("S62.5", "Fracture of thumb"),
            Diagnosis::new("L20", "Atopic dermatitis").with_latin("Atopic dermatitis"),
        ];
        let json = render_diagnoses(&diagnoses).expect("render diagnoses");
        assert_eq!(parse_diagnoses(&json).expect("reparse"), diagnoses);
        assert_eq!(json.matches("latin").count(), 1);
    }
}
