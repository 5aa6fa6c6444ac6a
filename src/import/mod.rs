//! # Feature Import
//!
//! Runs the whole pipeline on one Skyline export:
//!
//! ```text
//! export → normalize → split → derive features → pivot → feature matrix
//! ```
//!
//! Each stage takes its predecessor's output by value and returns a new value;
//! any failure aborts the import and no partial result is kept.
//!
//! ```rust,no_run
//! use mzfeatures::config::ImportConfig;
//! use mzfeatures::import::FeatureImport;
//!
//! let import = FeatureImport::from_path("skyline_export.csv", &ImportConfig::default())?;
//! println!("{}", import.summary());
//! for name in import.feature_names() {
//!     println!("{name}");
//! }
//! # Ok::<(), mzfeatures::import::ImportError>(())
//! ```

mod error;
mod summary;


use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use log::{info, warn};

use crate::config::ImportConfig;
use crate::export::SkylineExport;
use crate::features::{derive_precursor_features, derive_transition_features};
use crate::matrix::FeatureMatrix;
use crate::pivot::{incomplete_keys, pivot, LongTable};
use crate::tables::{
    split, PatientSampleMapping, PrecursorIndexMap, SampleIndexMap, SplitTables, TableKind,
};

pub use error::{ErrorKind, ImportError};
pub use summary::ImportSummary;

/// Result of a completed feature import
#[derive(Debug, Clone)]
pub struct FeatureImport {
    samples: SampleIndexMap,
    precursors: PrecursorIndexMap,
    patient_samples: PatientSampleMapping,
    features: FeatureMatrix,
    summary: ImportSummary,
}

impl FeatureImport {
    /// Import a Skyline export file
    pub fn from_path<P: AsRef<Path>>(path: P, config: &ImportConfig) -> Result<Self, ImportError> {
        let path = path.as_ref();
        info!("Importing Skyline export {}", path.display());
        Self::from_export(SkylineExport::from_csv_file(path)?, config)
    }

    /// Import a Skyline export from a reader
    pub fn from_reader<R: Read>(reader: R, config: &ImportConfig) -> Result<Self, ImportError> {
        Self::from_export(SkylineExport::from_reader(reader)?, config)
    }

    /// Run the pipeline on an already normalized export
    pub fn from_export(export: SkylineExport, config: &ImportConfig) -> Result<Self, ImportError> {
        let stats = export.stats();

        let SplitTables {
            samples,
            precursors,
            patient_samples,
            sample_table,
            precursor_table,
            transition_table,
        } = split(export.into_records())?;
        let n_samples = samples.len();

        let precursor_table = derive_precursor_features(precursor_table)?;
        let transition_table = derive_transition_features(transition_table)?;

        let precursor_wide = pivot(
            LongTable {
                table: TableKind::Precursor,
                sample_index: &precursor_table.sample_index,
                keys: &precursor_table.precursor_index,
                attributes: &precursor_table.attributes,
            },
            &HashSet::new(),
            n_samples,
        )?;

        let transition_ids = transition_table.composite_ids();
        let exclusions = TransitionExclusions::resolve(
            config,
            &transition_table.sample_index,
            &transition_ids,
            n_samples,
        );
        let transition_wide = pivot(
            LongTable {
                table: TableKind::Transition,
                sample_index: &transition_table.sample_index,
                keys: &transition_ids,
                attributes: &transition_table.attributes,
            },
            &exclusions.set,
            n_samples,
        )?;

        let (features, resolved_non_finite) =
            FeatureMatrix::assemble(sample_table, precursor_wide, transition_wide)?;

        let summary = ImportSummary {
            records_read: stats.records_read,
            records_dropped: stats.records_dropped,
            cells_filled: stats.cells_filled,
            samples: n_samples,
            precursors: precursors.len(),
            transitions: transition_table.len(),
            excluded_transitions: exclusions.ordered,
            derived_exclusions: exclusions.derived,
            resolved_non_finite,
            features: features.n_features(),
        };
        info!(
            "Built feature matrix with {} samples and {} features",
            features.n_samples(),
            features.n_features()
        );

        Ok(Self {
            samples,
            precursors,
            patient_samples,
            features,
            summary,
        })
    }

    /// The feature matrix
    pub fn features(&self) -> &FeatureMatrix {
        &self.features
    }

    /// Consume the import, keeping only the feature matrix
    pub fn into_features(self) -> FeatureMatrix {
        self.features
    }

    /// Feature matrix column names in order
    pub fn feature_names(&self) -> Vec<&str> {
        self.features.feature_names()
    }

    /// Patient tag → sample index, for linking outcome data
    pub fn patient_sample_mapping(&self) -> &PatientSampleMapping {
        &self.patient_samples
    }

    /// File name ↔ sample index
    pub fn sample_index(&self) -> &SampleIndexMap {
        &self.samples
    }

    /// (sequence, charge) ↔ precursor index
    pub fn precursor_index(&self) -> &PrecursorIndexMap {
        &self.precursors
    }

    /// Import counters
    pub fn summary(&self) -> &ImportSummary {
        &self.summary
    }
}

/// Transition identifiers left out of the pivot
struct TransitionExclusions {
    set: HashSet<String>,
    /// Configured identifiers first, then derived ones
    ordered: Vec<String>,
    derived: usize,
}

impl TransitionExclusions {
    fn resolve(
        config: &ImportConfig,
        sample_index: &[usize],
        ids: &[String],
        n_samples: usize,
    ) -> Self {
        let mut set = HashSet::new();
        let mut ordered = Vec::new();
        for id in &config.excluded_transitions {
            if set.insert(id.clone()) {
                ordered.push(id.clone());
            }
        }

        let mut derived = 0;
        if config.derive_incomplete_transitions {
            for id in incomplete_keys(sample_index, ids, n_samples) {
                if set.insert(id.clone()) {
                    warn!("Excluding transition {} (not measured in every sample)", id);
                    ordered.push(id);
                    derived += 1;
                }
            }
        }

        Self {
            set,
            ordered,
            derived,
        }
    }
}
