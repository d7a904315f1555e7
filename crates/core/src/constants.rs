//! Constants used throughout the patientor core crate.

/// Boilerplate the patient store prepends to rejection messages.
pub const SUBMISSION_ERROR_PREFIX: &str = "Something went wrong. Error: ";

/// Environment variable selecting the partial-pair policy (`reject` or `omit`).
pub const PARTIAL_PAIR_POLICY_ENV: &str = "PATIENTOR_PARTIAL_PAIR_POLICY";

/// Environment variable naming the JSON file of patients loaded by the CLI.
pub const PATIENTS_FILE_ENV: &str = "PATIENTOR_PATIENTS_FILE";

/// Environment variable naming an optional JSON file of diagnoses loaded by the CLI.
pub const DIAGNOSES_FILE_ENV: &str = "PATIENTOR_DIAGNOSES_FILE";

/// Diagnosis codes offered by the entry form, as `(code, name, latin)`.
pub const STANDARD_DIAGNOSES: &[(&str, &str, Option<&str>)] = &[
    ("M24.2", "Disorder of ligament", Some("Morbositas ligamenti")),
    (
        "M51.2",
        "Other specified intervertebral disc displacement",
        Some("Alia dislocatio disci intervertebralis specificata"),
    ),
    (
        "S03.5",
        "Sprain and strain of joints and ligaments of other and unspecified parts of head",
        Some("Distorsio et distensio articulationum et ligamentorum partium aliarum sive non specificatarum capitis"),
    ),
    (
        "J10.1",
        "Influenza with other respiratory manifestations, other influenza virus codeidentified",
        Some("Influenza cum aliis manifestationibus respiratoriis ab agente virali identificato"),
    ),
    (
        "J06.9",
        "Acute upper respiratory infection, unspecified",
        Some("Infectio acuta respiratoria superior non specificata"),
    ),
    ("Z57.1", "Occupational exposure to radiation", None),
    ("N30.0", "Acute cystitis", Some("Cystitis acuta")),
    ("H54.7", "Unspecified visual loss", Some("Amblyopia NAS")),
    (
        "J03.0",
        "Streptococcal tonsillitis",
        Some("Tonsillitis (palatina) streptococcica"),
    ),
    ("L60.1", "Onycholysis", Some("Onycholysis")),
    ("Z74.3", "Need for continuous supervision", None),
    ("L20", "Atopic dermatitis", Some("Atopic dermatitis")),
    ("F43.2", "Adjustment disorders", Some("Perturbationes adaptationis")),
    ("S62.5", "Fracture of thumb", Some("Fractura [ossis/ossium] pollicis")),
    (
        "H35.29",
        "Other proliferative retinopathy",
        Some("Alia retinopathia proliferativa"),
    ),
];
