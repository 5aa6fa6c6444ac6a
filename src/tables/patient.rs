use std::collections::BTreeMap;

use log::warn;
use serde::{Deserialize, Serialize};

use super::SampleIndex;

/// Read-only lookup from patient/sample tag to [`SampleIndex`]
///
/// This is the only artifact handed to the outcome linker. It serializes as a
/// JSON object keyed by patient tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientSampleMapping {
    map: BTreeMap<i64, SampleIndex>,
}

impl PatientSampleMapping {
    /// Build from `(patient, sample)` pairs
    ///
    /// A patient seen with several samples keeps the last one.
    pub fn from_pairs<I: IntoIterator<Item = (i64, SampleIndex)>>(pairs: I) -> Self {
        let mut map = BTreeMap::new();
        for (patient, sample) in pairs {
            if let Some(previous) = map.insert(patient, sample) {
                if previous != sample {
                    warn!(
                        "Patient {} maps to samples {} and {}; keeping {}",
                        patient, previous, sample, sample
                    );
                }
            }
        }
        Self { map }
    }

    /// Sample index of `patient`
    pub fn get(&self, patient: i64) -> Option<SampleIndex> {
        self.map.get(&patient).copied()
    }

    /// True if `patient` is mapped
    pub fn contains(&self, patient: i64) -> bool {
        self.map.contains_key(&patient)
    }

    /// Number of mapped patients
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// True if nothing is mapped
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// `(patient, sample)` pairs ordered by patient
    pub fn iter(&self) -> impl Iterator<Item = (i64, SampleIndex)> + '_ {
        self.map.iter().map(|(&p, &s)| (p, s))
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
