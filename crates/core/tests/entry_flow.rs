use patientor_core::{
    create_entry_from_draft, dispatch, CoreConfig, CoreError, Diagnoses, EntryDraft, EntryField,
    EntryRenderer, InMemoryPatientStore, PartialPairPolicy, PatientStore,
};
use patientor_model::{
    parse_patients, render_entry, EntryDetails, EntryKind, HealthCheckRating, PatientId,
};

const PATIENTS: &str = r#"[
  {
    "id": "d2773336-f723-11e9-8f0b-362b9e155667",
    "name": "John McClane",
    "dateOfBirth": "1986-07-09",
    "ssn": "090786-122X",
    "gender": "male",
    "occupation": "New york city cop",
    "entries": [
      {
        "id": "b4f4eca1-2aa7-4b13-9a18-4a5535c3c8da",
        "date": "2019-10-20",
        "specialist": "MD House",
        "type": "HealthCheck",
        "description": "Yearly control visit. Cholesterol levels back to normal.",
        "healthCheckRating": 0
      }
    ]
  },
  {
    "id": "d2773598-f723-11e9-8f0b-362b9e155667",
    "name": "Martin Riggs",
    "dateOfBirth": "1979-01-30",
    "ssn": "300179-777A",
    "gender": "male",
    "occupation": "Cop",
    "entries": []
  }
]"#;

fn annual_check() -> EntryDraft {
    EntryDraft {
        description: "Annual check".into(),
        date: Some("2024-01-10".into()),
        specialist: "Dr. House".into(),
        health_check_rating: Some("1".into()),
        diagnosis_codes: vec!["J10.1".into()],
        ..EntryDraft::new(EntryKind::HealthCheck)
    }
}

#[test]
fn health_check_entry_is_appended_last_with_assigned_id() {
    let patients = parse_patients(PATIENTS).expect("seed patients parse");
    let catalog = Diagnoses::standard();
    let config = CoreConfig::default();
    let mut store = InMemoryPatientStore::new(patients.clone(), Diagnoses::standard());
    let current = patients[0].clone();

    let submitted = create_entry_from_draft(
        &mut store,
        &catalog,
        &config,
        &current,
        &patients,
        &annual_check(),
    )
    .expect("entry accepted");

    let entries = &submitted.patient.entries;
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0], current.entries[0]);

    let added = &entries[1];
    assert!(!added.id.as_str().is_empty());
    assert_ne!(added.id, current.entries[0].id);
    assert_eq!(added.kind(), EntryKind::HealthCheck);
    assert_eq!(added.base.description.as_str(), "Annual check");
    assert_eq!(added.base.date.to_string(), "2024-01-10");
    assert_eq!(added.base.specialist.as_str(), "Dr. House");
    assert_eq!(added.base.diagnosis_codes, vec!["J10.1"]);
    assert!(matches!(
        added.details,
        EntryDetails::HealthCheck(ref d) if d.health_check_rating == HealthCheckRating::LowRisk
    ));

    assert_eq!(submitted.patients[0], submitted.patient);
    assert_eq!(submitted.patients[1], patients[1]);

    let stored = store
        .patient(&PatientId::new("d2773336-f723-11e9-8f0b-362b9e155667"))
        .expect("stored patient");
    assert_eq!(stored, submitted.patient);

    let json = render_entry(added).expect("render");
    assert!(json.contains("\"type\": \"HealthCheck\""));
    assert!(json.contains("\"healthCheckRating\": 1"));

    let card = dispatch(added, &EntryRenderer::with_catalog(&catalog));
    assert!(card.contains("diagnosed by Dr. House"));
}

#[test]
fn partial_sick_leave_depends_on_policy() {
    let patients = parse_patients(PATIENTS).expect("seed patients parse");
    let catalog = Diagnoses::standard();
    let draft = EntryDraft {
        description: "Back strain".into(),
        date: Some("2024-02-01".into()),
        specialist: "Dr. Byte".into(),
        employer_name: Some("HyPD".into()),
        sick_leave_start: Some("2024-02-01".into()),
        ..EntryDraft::new(EntryKind::OccupationalHealthcare)
    };

    let mut store = InMemoryPatientStore::new(patients.clone(), Diagnoses::standard());
    let err = create_entry_from_draft(
        &mut store,
        &catalog,
        &CoreConfig::default(),
        &patients[1],
        &patients,
        &draft,
    )
    .expect_err("reject policy");
    assert!(matches!(err, CoreError::Validation(ref e) if e.contains(EntryField::SickLeaveEndDate)));
    assert!(store.patients()[1].entries.is_empty());

    let omit = CoreConfig::new(PartialPairPolicy::Omit, "Something went wrong. Error: ");
    let submitted =
        create_entry_from_draft(&mut store, &catalog, &omit, &patients[1], &patients, &draft)
            .expect("omit policy");
    assert!(matches!(
        submitted.entry.details,
        EntryDetails::OccupationalHealthcare(ref d) if d.sick_leave.is_none()
    ));
}

#[test]
fn unknown_discriminant_in_fetched_patient_is_rejected() {
    let json = PATIENTS.replace("\"type\": \"HealthCheck\"", "\"type\": \"Dental\"");
    let err = parse_patients(&json).expect_err("unknown kind");
    assert!(err.to_string().contains("Dental"));
}

#[test]
fn bundled_patients_file_loads() {
    let patients =
        parse_patients(include_str!("../../../data/patients.json")).expect("bundled data parses");
    let kinds: Vec<EntryKind> = patients
        .iter()
        .flat_map(|p| p.entries.iter().map(|e| e.kind()))
        .collect();
    for kind in EntryKind::ALL {
        assert!(kinds.contains(&kind), "bundled data has no {kind} entry");
    }
}
