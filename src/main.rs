use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use patientor_core::constants::{
    DIAGNOSES_FILE_ENV, PARTIAL_PAIR_POLICY_ENV, PATIENTS_FILE_ENV, SUBMISSION_ERROR_PREFIX,
};
use patientor_core::{
    create_entry_from_draft, dispatch, partial_pair_policy_from_env_value, CoreConfig, Diagnoses,
    EntryDraft, EntryRenderer, InMemoryPatientStore, PatientStore,
};
use patientor_model::{
    parse_diagnoses, parse_patients, render_diagnoses, render_patient, render_patients, Patient,
    PatientId,
};

#[derive(Parser)]
#[command(name = "patientor")]
#[command(about = "Patient records with typed clinical entries")]
struct Cli {
    /// JSON file of patients to load
    #[arg(long, global = true, env = PATIENTS_FILE_ENV, default_value = "data/patients.json")]
    patients: PathBuf,
    /// JSON file of diagnoses (the standard catalog is used when omitted)
    #[arg(long, global = true, env = DIAGNOSES_FILE_ENV)]
    diagnoses: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all patients
    List,
    /// Show a patient and their entries
    Show {
        /// Patient id
        id: String,
        /// Print the patient as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the diagnosis catalog
    Diagnoses {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add an entry to a patient
    AddEntry(AddEntryArgs),
}

#[derive(Args)]
struct AddEntryArgs {
    /// Patient id
    patient_id: String,
    /// Entry type: HealthCheck, OccupationalHealthcare or Hospital
    #[arg(long = "type")]
    kind: String,
    #[arg(long, default_value = "")]
    description: String,
    /// Entry date (YYYY-MM-DD)
    #[arg(long)]
    date: Option<String>,
    #[arg(long, default_value = "")]
    specialist: String,
    /// Health check rating, 0 (healthy) to 3 (critical risk)
    #[arg(long)]
    rating: Option<String>,
    #[arg(long)]
    employer: Option<String>,
    #[arg(long)]
    sick_leave_start: Option<String>,
    #[arg(long)]
    sick_leave_end: Option<String>,
    #[arg(long)]
    discharge_date: Option<String>,
    #[arg(long)]
    discharge_criteria: Option<String>,
    /// Diagnosis code (repeatable)
    #[arg(long = "code")]
    codes: Vec<String>,
    /// Print the updated patient as JSON
    #[arg(long)]
    json: bool,
    /// Write the updated patients back to the patients file
    #[arg(long)]
    save: bool,
}

impl AddEntryArgs {
    fn draft(&self) -> EntryDraft {
        EntryDraft {
            kind: self.kind.clone(),
            description: self.description.clone(),
            date: self.date.clone(),
            specialist: self.specialist.clone(),
            diagnosis_codes: self.codes.clone(),
            health_check_rating: self.rating.clone(),
            employer_name: self.employer.clone(),
            sick_leave_start: self.sick_leave_start.clone(),
            sick_leave_end: self.sick_leave_end.clone(),
            discharge_date: self.discharge_date.clone(),
            discharge_criteria: self.discharge_criteria.clone(),
        }
    }
}

/// Main entry point for the patientor CLI
///
/// Loads the patient and diagnosis data into an in-memory store and runs one command against it.
///
/// # Environment Variables
/// - `PATIENTOR_PATIENTS_FILE`: patients JSON file (default: "data/patients.json")
/// - `PATIENTOR_DIAGNOSES_FILE`: diagnoses JSON file (default: the standard catalog)
/// - `PATIENTOR_PARTIAL_PAIR_POLICY`: `reject` or `omit` (default: "reject")
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("patientor=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let policy = partial_pair_policy_from_env_value(std::env::var(PARTIAL_PAIR_POLICY_ENV).ok())?;
    let config = CoreConfig::new(policy, SUBMISSION_ERROR_PREFIX);

    let catalog = load_catalog(cli.diagnoses.as_deref())?;
    let mut store = InMemoryPatientStore::new(load_patients(&cli.patients)?, catalog.clone());

    match cli.command {
        Commands::List => {
            let patients = store.list_patients()?;
            if patients.is_empty() {
                println!("No patients found.");
            }
            for patient in patients {
                println!(
                    "{}  {} ({}, born {}) - {}",
                    patient.id,
                    patient.name,
                    patient.gender.as_str(),
                    patient.date_of_birth,
                    patient.occupation
                );
            }
        }
        Commands::Show { id, json } => {
            let patient = store.patient(&PatientId::new(id))?;
            if json {
                println!("{}", render_patient(&patient)?);
            } else {
                print_patient(&patient, &catalog);
            }
        }
        Commands::Diagnoses { json } => {
            if json {
                println!("{}", render_diagnoses(catalog.as_slice())?);
                return Ok(());
            }
            if catalog.is_empty() {
                println!("No diagnoses found.");
            }
            for diagnosis in catalog.iter() {
                match &diagnosis.latin {
                    Some(latin) => println!("{}  {} ({latin})", diagnosis.code, diagnosis.name),
                    None => println!("{}  {}", diagnosis.code, diagnosis.name),
                }
            }
        }
        Commands::AddEntry(args) => {
            let patients = store.patients().to_vec();
            let patient = store.patient(&PatientId::new(args.patient_id.as_str()))?;
            let draft = args.draft();

            let submitted =
                create_entry_from_draft(&mut store, &catalog, &config, &patient, &patients, &draft)?;

            if args.save {
                std::fs::write(&cli.patients, render_patients(&submitted.patients)?)
                    .with_context(|| format!("failed to write {}", cli.patients.display()))?;
                tracing::info!("saved {} patients to {}", submitted.patients.len(), cli.patients.display());
            }

            if args.json {
                println!("{}", render_patient(&submitted.patient)?);
            } else {
                print_patient(&submitted.patient, &catalog);
            }
        }
    }

    Ok(())
}

fn load_patients(path: &Path) -> anyhow::Result<Vec<Patient>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read patients file {}", path.display()))?;
    let patients = parse_patients(&json)
        .with_context(|| format!("invalid patients file {}", path.display()))?;
    tracing::debug!("loaded {} patients from {}", patients.len(), path.display());
    Ok(patients)
}

fn load_catalog(path: Option<&Path>) -> anyhow::Result<Diagnoses> {
    let Some(path) = path else {
        return Ok(Diagnoses::standard());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read diagnoses file {}", path.display()))?;
    let diagnoses = parse_diagnoses(&json)
        .with_context(|| format!("invalid diagnoses file {}", path.display()))?;
    let catalog = Diagnoses::new(diagnoses);
    tracing::debug!("loaded {} diagnoses from {}", catalog.len(), path.display());
    Ok(catalog)
}

fn print_patient(patient: &Patient, catalog: &Diagnoses) {
    println!("{} ({})", patient.name, patient.gender.as_str());
    println!("ssn: {}", patient.ssn);
    println!("occupation: {}", patient.occupation);
    println!("born: {}", patient.date_of_birth);
    println!();

    if patient.entries.is_empty() {
        println!("No entries.");
        return;
    }

    println!("entries");
    let renderer = EntryRenderer::with_catalog(catalog);
    for entry in &patient.entries {
        println!();
        print!("{}", dispatch(entry, &renderer));
    }
}
