//! Diagnosis catalog lookup.
//!
//! The core only asks the catalog whether a code exists (and, for rendering, what it is
//! called). Where the list comes from is the caller's business.

use crate::constants::STANDARD_DIAGNOSES;
use patientor_model::Diagnosis;
use std::collections::HashMap;

/// Read-only lookup of diagnosis codes.
pub trait DiagnosisCatalog {
    fn lookup(&self, code: &str) -> Option<&Diagnosis>;

    fn contains(&self, code: &str) -> bool {
        self.lookup(code).is_some()
    }
}

/// In-memory catalog built from a fetched diagnosis list.
#[derive(Clone, Debug, Default)]
pub struct Diagnoses {
    diagnoses: Vec<Diagnosis>,
    index: HashMap<String, usize>,
}

impl Diagnoses {
    /// Builds a catalog, keeping list order. When a code appears twice the first entry wins.
    pub fn new(diagnoses: Vec<Diagnosis>) -> Self {
        let mut index = HashMap::with_capacity(diagnoses.len());
        for (position, diagnosis) in diagnoses.iter().enumerate() {
            if index.contains_key(&diagnosis.code) {
                tracing::warn!("duplicate diagnosis code in catalog: {}", diagnosis.code);
                continue;
            }
            index.insert(diagnosis.code.clone(), position);
        }
        Self { diagnoses, index }
    }

    /// The reference list offered by the entry form.
    pub fn standard() -> Self {
        Self::new(
            STANDARD_DIAGNOSES
                .iter()
                .map(|(code, name, latin)| {
                    let diagnosis = Diagnosis::new(*code, *name);
                    match latin {
                        Some(latin) => diagnosis.with_latin(*latin),
                        None => diagnosis,
                    }
                })
                .collect(),
        )
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnosis> {
        self.diagnoses.iter()
    }

    pub fn as_slice(&self) -> &[Diagnosis] {
        &self.diagnoses
    }

    pub fn len(&self) -> usize {
        self.diagnoses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnoses.is_empty()
    }
}

impl DiagnosisCatalog for Diagnoses {
    fn lookup(&self, code: &str) -> Option<&Diagnosis> {
        self.index.get(code).map(|&position| &self.diagnoses[position])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_has_every_form_code() {
        let catalog = Diagnoses::standard();
        assert_eq!(catalog.len(), 15);
        for code in ["M24.2", "Z57.1", "J10.1", "L20", "H35.29"] {
            assert!(catalog.contains(code), "missing {code}");
        }
        assert!(!catalog.contains("XX.99"));
    }

    #[test]
    fn lookup_is_exact() {
        let catalog = Diagnoses::standard();
        assert_eq!(
            catalog.lookup("S62.5").map(|d| d.name.as_str()),
            Some("Fracture of thumb")
        );
        assert!(catalog.lookup("s62.5").is_none());
        assert!(catalog.lookup(" S62.5").is_none());
    }

    #[test]
    fn first_duplicate_wins() {
        let catalog = Diagnoses::new(vec![
            Diagnosis::new("A00", "first"),
            Diagnosis::new("A00", "second"),
        ]);
        assert_eq!(catalog.lookup("A00").map(|d| d.name.as_str()), Some("first"));
    }
}
