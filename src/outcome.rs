//! # Outcome Linker
//!
//! Reads a `;`-separated PCR result table and attaches each row to a
//! [`SampleIndex`] through the [`PatientSampleMapping`] produced by a
//! feature import.
//!
//! | Column | Content |
//! |--------|---------|
//! | `patient` | patient tag, as in the export's `Patient_Sample` column |
//! | `ct1`, `ct2`, `ct3` | cycle thresholds, any of them may be absent |
//! | `outcome` | outcome label, may be absent |
//!
//! Patients without a sample keep `None` as their sample index; they are
//! reported but do not fail the link. Neither does an absent outcome label.

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use log::{info, warn};
use serde::Serialize;

use crate::export::{is_absent, parse_decimal, parse_integer};
use crate::tables::{PatientSampleMapping, SampleIndex};

/// Field separator of outcome tables
pub const OUTCOME_DELIMITER: u8 = b';';

/// Patient tag column
pub const PATIENT: &str = "patient";
/// Cycle threshold columns
pub const CT_COLUMNS: [&str; 3] = ["ct1", "ct2", "ct3"];
/// Outcome label column
pub const OUTCOME: &str = "outcome";

/// Errors raised while reading an outcome table
#[derive(Debug, thiserror::Error)]
pub enum OutcomeError {
    /// I/O error reading the file
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV framing error
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// Missing required column in the header
    #[error("Missing required outcome column: {0}")]
    MissingColumn(String),

    /// Absent value in a column that must be present
    #[error("Missing value in column '{column}' (line {line})")]
    MissingValue {
        /// Column name
        column: String,
        /// 1-based line in the file
        line: u64,
    },

    /// Value that cannot be parsed
    #[error("Invalid value '{value}' in column '{column}' (line {line})")]
    InvalidValue {
        /// Column name
        column: String,
        /// Offending cell content
        value: String,
        /// 1-based line in the file
        line: u64,
    },
}

/// One row of the outcome table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeRecord {
    /// Patient tag
    pub patient: i64,
    /// `ct1`..`ct3`
    pub ct: [Option<f64>; 3],
    /// Mean of the present cycle thresholds
    pub ct_mean: Option<f64>,
    /// Outcome label, `None` if the cell was absent
    pub outcome: Option<String>,
    /// Sample of this patient, if it was measured
    pub sample_index: Option<SampleIndex>,
}

/// Mean of the present values, `None` if all are absent
pub fn mean_present(values: &[Option<f64>]) -> Option<f64> {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        None
    } else {
        Some(present.iter().sum::<f64>() / present.len() as f64)
    }
}

/// Outcome table linked to sample indices
#[derive(Debug, Clone, Default)]
pub struct OutcomeImport {
    records: Vec<OutcomeRecord>,
}

impl OutcomeImport {
    /// Read an outcome file
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        mapping: &PatientSampleMapping,
    ) -> Result<Self, OutcomeError> {
        let path = path.as_ref();
        info!("Linking outcome table {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), mapping)
    }

    /// Read an outcome table from a reader
    pub fn from_reader<R: Read>(
        reader: R,
        mapping: &PatientSampleMapping,
    ) -> Result<Self, OutcomeError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(OUTCOME_DELIMITER)
            .has_headers(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| OutcomeError::MissingColumn(name.to_string()))
        };
        let patient_col = position(PATIENT)?;
        let ct_cols = [
            position(CT_COLUMNS[0])?,
            position(CT_COLUMNS[1])?,
            position(CT_COLUMNS[2])?,
        ];
        let outcome_col = position(OUTCOME)?;

        let mut records = Vec::new();
        for row in csv_reader.records() {
            let row = row?;
            let line = row.position().map(|p| p.line()).unwrap_or_default();
            let cell = |col: usize| row.get(col).unwrap_or_default();

            let patient_cell = cell(patient_col);
            if is_absent(patient_cell) {
                return Err(OutcomeError::MissingValue {
                    column: PATIENT.to_string(),
                    line,
                });
            }
            let patient =
                parse_integer(patient_cell).ok_or_else(|| OutcomeError::InvalidValue {
                    column: PATIENT.to_string(),
                    value: patient_cell.to_string(),
                    line,
                })?;

            let mut ct = [None; 3];
            for (slot, (&col, name)) in ct.iter_mut().zip(ct_cols.iter().zip(CT_COLUMNS)) {
                let value = cell(col);
                if is_absent(value) {
                    continue;
                }
                *slot = Some(parse_decimal(value).ok_or_else(|| OutcomeError::InvalidValue {
                    column: name.to_string(),
                    value: value.to_string(),
                    line,
                })?);
            }

            let outcome_cell = cell(outcome_col).trim();
            let outcome = if is_absent(outcome_cell) {
                warn!("Patient {} has no outcome (line {})", patient, line);
                None
            } else {
                Some(outcome_cell.to_string())
            };

            let sample_index = mapping.get(patient);
            if sample_index.is_none() {
                warn!("Patient {} has no measured sample", patient);
            }

            records.push(OutcomeRecord {
                patient,
                ct_mean: mean_present(&ct),
                ct,
                outcome,
                sample_index,
            });
        }

        let linked = records.iter().filter(|r| r.sample_index.is_some()).count();
        info!("Linked {} of {} outcome rows", linked, records.len());
        Ok(Self { records })
    }

    /// All rows in file order
    pub fn records(&self) -> &[OutcomeRecord] {
        &self.records
    }

    /// Mean cycle threshold keyed by sample index
    pub fn mean_ct(&self) -> Vec<(Option<SampleIndex>, Option<f64>)> {
        self.records
            .iter()
            .map(|r| (r.sample_index, r.ct_mean))
            .collect()
    }

    /// Outcome label keyed by sample index
    pub fn outcome(&self) -> Vec<(Option<SampleIndex>, Option<&str>)> {
        self.records
            .iter()
            .map(|r| (r.sample_index, r.outcome.as_deref()))
            .collect()
    }

    /// Rows whose patient has a sample
    pub fn linked(&self) -> impl Iterator<Item = &OutcomeRecord> {
        self.records.iter().filter(|r| r.sample_index.is_some())
    }

    /// Patients without a sample, in file order
    pub fn unlinked_patients(&self) -> Vec<i64> {
        self.records
            .iter()
            .filter(|r| r.sample_index.is_none())
            .map(|r| r.patient)
            .collect()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if the table had no rows
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Write the linked rows as `;`-separated text, ordered by sample index
    pub fn write_linked_csv<W: Write>(&self, writer: W) -> Result<usize, OutcomeError> {
        let mut linked: Vec<&OutcomeRecord> = self.linked().collect();
        linked.sort_by_key(|r| r.sample_index);

        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(OUTCOME_DELIMITER)
            .from_writer(writer);
        csv_writer.write_record([
            crate::columns::SAMPLE_INDEX,
            PATIENT,
            CT_COLUMNS[0],
            CT_COLUMNS[1],
            CT_COLUMNS[2],
            "ct_mean",
            OUTCOME,
        ])?;

        let optional = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
        for record in &linked {
            csv_writer.write_record([
                record.sample_index.map(|s| s.to_string()).unwrap_or_default(),
                record.patient.to_string(),
                optional(record.ct[0]),
                optional(record.ct[1]),
                optional(record.ct[2]),
                optional(record.ct_mean),
                record.outcome.clone().unwrap_or_default(),
            ])?;
        }
        csv_writer.flush()?;
        Ok(linked.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "patient;ct1;ct2;ct3;outcome\n\
                         101;20,5;21,5;;positive\n\
                         999;30.0;31.0;32.0;positive\n\
                         100;;;;negative\n";

    fn mapping() -> PatientSampleMapping {
        PatientSampleMapping::from_pairs([(100, 0), (101, 1)])
    }

    #[test]
    fn test_mean_skips_absent() {
        assert_eq!(mean_present(&[Some(20.0), None, Some(22.0)]), Some(21.0));
        assert_eq!(mean_present(&[None, None, None]), None);
    }

    #[test]
    fn test_link_rows() {
        let outcome = OutcomeImport::from_reader(TABLE.as_bytes(), &mapping()).unwrap();
        assert_eq!(outcome.len(), 3);

        let first = &outcome.records()[0];
        assert_eq!(first.patient, 101);
        assert_eq!(first.ct, [Some(20.5), Some(21.5), None]);
        assert_eq!(first.ct_mean, Some(21.0));
        assert_eq!(first.sample_index, Some(1));

        assert_eq!(outcome.records()[2].ct_mean, None);
        assert_eq!(outcome.unlinked_patients(), vec![999]);
        assert_eq!(outcome.linked().count(), 2);
        assert_eq!(
            outcome.outcome(),
            vec![
                (Some(1), Some("positive")),
                (None, Some("positive")),
                (Some(0), Some("negative"))
            ]
        );
        assert_eq!(outcome.mean_ct()[1], (None, Some(31.0)));
    }

    #[test]
    fn test_absent_outcome_keeps_row() {
        let table = "patient;ct1;ct2;ct3;outcome\n100;24,0;;;\n101;;;;#N/A\n";
        let outcome = OutcomeImport::from_reader(table.as_bytes(), &mapping()).unwrap();

        assert_eq!(outcome.len(), 2);
        assert_eq!(outcome.outcome(), vec![(Some(0), None), (Some(1), None)]);
        assert_eq!(outcome.records()[0].ct_mean, Some(24.0));

        let mut buffer = Vec::new();
        assert_eq!(outcome.write_linked_csv(&mut buffer).unwrap(), 2);
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.lines().nth(1), Some("0;100;24;;;24;"));
    }

    #[test]
    fn test_missing_patient_fails() {
        let table = "patient;ct1;ct2;ct3;outcome\n;;;;positive\n";
        let err = OutcomeImport::from_reader(table.as_bytes(), &mapping()).unwrap_err();
        assert!(matches!(err, OutcomeError::MissingValue { column, line: 2 } if column == "patient"));
    }

    #[test]
    fn test_missing_column() {
        let err = OutcomeImport::from_reader("patient;ct1;ct2;outcome\n".as_bytes(), &mapping())
            .unwrap_err();
        assert!(matches!(err, OutcomeError::MissingColumn(c) if c == "ct3"));
    }

    #[test]
    fn test_invalid_ct() {
        let table = "patient;ct1;ct2;ct3;outcome\n100;abc;;;negative\n";
        let err = OutcomeImport::from_reader(table.as_bytes(), &mapping()).unwrap_err();
        assert!(matches!(err, OutcomeError::InvalidValue { column, line: 2, .. } if column == "ct1"));
    }

    #[test]
    fn test_write_linked_sorted() {
        let outcome = OutcomeImport::from_reader(TABLE.as_bytes(), &mapping()).unwrap();
        let mut buffer = Vec::new();
        let written = outcome.write_linked_csv(&mut buffer).unwrap();
        assert_eq!(written, 2);

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Sample Index;patient;ct1;ct2;ct3;ct_mean;outcome");
        assert_eq!(lines[1], "0;100;;;;;negative");
        assert_eq!(lines[2], "1;101;20.5;21.5;;21;positive");
    }
}
