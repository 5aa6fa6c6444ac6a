use indexmap::IndexSet;
use log::{debug, info};

use crate::columns;
use crate::export::SkylineRecord;
use crate::frame::Frame;

use super::{
    KeyIndex, PatientSampleMapping, PrecursorIndex, PrecursorIndexMap, PrecursorKey,
    SampleIndex, SampleIndexMap, SplitError, TableKind,
};

/// Sample-level attributes, one row per sample
#[derive(Debug, Clone, PartialEq)]
pub struct SampleTable {
    /// Sample of each row
    pub sample_index: Vec<SampleIndex>,
    /// `Swab ID`
    pub attributes: Frame,
}

/// Precursor-level attributes, one row per (sample, precursor)
#[derive(Debug, Clone, PartialEq)]
pub struct PrecursorTable {
    /// Sample of each row
    pub sample_index: Vec<SampleIndex>,
    /// Precursor of each row
    pub precursor_index: Vec<PrecursorIndex>,
    /// Precursor measurements (and derived features once processed)
    pub attributes: Frame,
}

/// Transition-level measurements, one row per export record
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionTable {
    /// Sample of each row
    pub sample_index: Vec<SampleIndex>,
    /// Precursor of each row
    pub precursor_index: Vec<PrecursorIndex>,
    /// Fragment ion label of each row
    pub fragment_ion: Vec<String>,
    /// Transition measurements (and derived features once processed)
    pub attributes: Frame,
}

impl SampleTable {
    /// Number of rows
    pub fn len(&self) -> usize {
        self.sample_index.len()
    }

    /// True if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.sample_index.is_empty()
    }
}

impl PrecursorTable {
    /// Number of rows
    pub fn len(&self) -> usize {
        self.sample_index.len()
    }

    /// True if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.sample_index.is_empty()
    }
}

impl TransitionTable {
    /// Number of rows
    pub fn len(&self) -> usize {
        self.sample_index.len()
    }

    /// True if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.sample_index.is_empty()
    }

    /// Composite `"<PrecursorIndex>_<FragmentIonLabel>"` identifier of every row
    pub fn composite_ids(&self) -> Vec<String> {
        self.precursor_index
            .iter()
            .zip(&self.fragment_ion)
            .map(|(&precursor, fragment)| transition_id(precursor, fragment))
            .collect()
    }
}

/// Composite identifier used to group transition rows for pivoting
pub fn transition_id(precursor: PrecursorIndex, fragment_ion: &str) -> String {
    format!("{precursor}_{fragment_ion}")
}

/// Result of splitting an export into normalized tables
#[derive(Debug, Clone)]
pub struct SplitTables {
    /// File name ↔ sample index
    pub samples: SampleIndexMap,
    /// (sequence, charge) ↔ precursor index
    pub precursors: PrecursorIndexMap,
    /// Patient tag → sample index
    pub patient_samples: PatientSampleMapping,
    /// One row per sample
    pub sample_table: SampleTable,
    /// One row per (sample, precursor)
    pub precursor_table: PrecursorTable,
    /// One row per record
    pub transition_table: TransitionTable,
}

/// Split normalized records into sample, precursor and transition tables
///
/// Sample and precursor indices are assigned in order of first appearance. Each
/// table is de-duplicated on whole rows, then checked against its expected
/// cardinality:
///
/// - samples: one row per distinct file name
/// - precursors: one row per sample × distinct (sequence, charge)
/// - transitions: one row per record
///
/// A sample that lacks a precursor, or carries conflicting values for a
/// precursor or a sample attribute, fails here with
/// [`SplitError::Cardinality`].
pub fn split(records: Vec<SkylineRecord>) -> Result<SplitTables, SplitError> {
    let samples: SampleIndexMap = KeyIndex::from_keys(records.iter().map(|r| r.file_name.clone()));
    let precursors: PrecursorIndexMap = KeyIndex::from_keys(
        records
            .iter()
            .map(|r| PrecursorKey::new(r.peptide_modified_sequence.clone(), r.precursor_charge)),
    );
    debug!(
        "Indexed {} samples and {} precursors",
        samples.len(),
        precursors.len()
    );

    let mut sample_rows: IndexSet<(SampleIndex, u8)> = IndexSet::new();
    let mut precursor_rows: IndexSet<(SampleIndex, PrecursorIndex, [u64; 5])> = IndexSet::new();
    let mut transition_rows: IndexSet<(SampleIndex, PrecursorIndex, String, [u64; 9])> =
        IndexSet::new();
    let mut patient_pairs: IndexSet<(i64, SampleIndex)> = IndexSet::new();

    for record in &records {
        let sample = samples
            .index_of(record.file_name.as_str())
            .ok_or(SplitError::UnmatchedKey {
                index: columns::SAMPLE_INDEX,
                line: record.line,
            })?;
        let precursor = precursors
            .index_of(&PrecursorKey::new(
                record.peptide_modified_sequence.clone(),
                record.precursor_charge,
            ))
            .ok_or(SplitError::UnmatchedKey {
                index: columns::PRECURSOR_INDEX,
                line: record.line,
            })?;

        sample_rows.insert((sample, record.swab_id));
        precursor_rows.insert((sample, precursor, bits(precursor_values(record))));
        transition_rows.insert((
            sample,
            precursor,
            record.fragment_ion.clone(),
            bits(transition_values(record)),
        ));
        patient_pairs.insert((record.patient_sample, sample));
    }

    let sample_table = sample_table(sample_rows)?;
    let precursor_table = precursor_table(precursor_rows)?;
    let transition_table = transition_table(transition_rows)?;

    check_cardinality(TableKind::Sample, samples.len(), sample_table.len())?;
    check_cardinality(
        TableKind::Precursor,
        samples.len() * precursors.len(),
        precursor_table.len(),
    )?;
    check_cardinality(TableKind::Transition, records.len(), transition_table.len())?;

    info!(
        "Split export into {} samples, {} precursor rows and {} transition rows",
        sample_table.len(),
        precursor_table.len(),
        transition_table.len()
    );

    Ok(SplitTables {
        samples,
        precursors,
        patient_samples: PatientSampleMapping::from_pairs(patient_pairs),
        sample_table,
        precursor_table,
        transition_table,
    })
}

fn check_cardinality(table: TableKind, expected: usize, actual: usize) -> Result<(), SplitError> {
    if expected != actual {
        return Err(SplitError::Cardinality {
            table,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Values in [`columns::PRECURSOR_ATTRIBUTES`] order
fn precursor_values(record: &SkylineRecord) -> [f64; 5] {
    [
        record.best_retention_time,
        record.total_area_fragment,
        record.library_dot_product,
        record.total_background,
        record.max_fwhm,
    ]
}

/// Values in [`columns::TRANSITION_ATTRIBUTES`] order
fn transition_values(record: &SkylineRecord) -> [f64; 9] {
    [
        record.retention_time,
        record.retention_time_deviation,
        record.fwhm,
        record.area,
        record.background,
        record.height,
        record.library_rank,
        record.library_intensity,
        record.area_normalized,
    ]
}

fn bits<const N: usize>(values: [f64; N]) -> [u64; N] {
    values.map(f64::to_bits)
}

fn from_bits<const N: usize>(bits: [u64; N]) -> [f64; N] {
    bits.map(f64::from_bits)
}

/// Build a frame from per-row value arrays, naming columns after `names`
fn frame_from_rows<const N: usize>(
    names: [&str; N],
    rows: impl ExactSizeIterator<Item = [f64; N]>,
) -> Result<Frame, SplitError> {
    let mut values: [Vec<f64>; N] = std::array::from_fn(|_| Vec::with_capacity(rows.len()));
    let mut len = 0;
    for row in rows {
        for (column, value) in values.iter_mut().zip(row) {
            column.push(value);
        }
        len += 1;
    }

    let mut frame = Frame::new(len);
    for (name, column) in names.into_iter().zip(values) {
        frame.push_column(name, column)?;
    }
    Ok(frame)
}

fn sample_table(rows: IndexSet<(SampleIndex, u8)>) -> Result<SampleTable, SplitError> {
    let attributes = frame_from_rows(
        columns::SAMPLE_ATTRIBUTES,
        rows.iter().map(|&(_, swab_id)| [f64::from(swab_id)]),
    )?;
    Ok(SampleTable {
        sample_index: rows.into_iter().map(|(sample, _)| sample).collect(),
        attributes,
    })
}

fn precursor_table(
    rows: IndexSet<(SampleIndex, PrecursorIndex, [u64; 5])>,
) -> Result<PrecursorTable, SplitError> {
    let attributes = frame_from_rows(
        columns::PRECURSOR_ATTRIBUTES,
        rows.iter().map(|&(_, _, values)| from_bits(values)),
    )?;
    let (sample_index, precursor_index) = rows.into_iter().map(|(s, p, _)| (s, p)).unzip();
    Ok(PrecursorTable {
        sample_index,
        precursor_index,
        attributes,
    })
}

fn transition_table(
    rows: IndexSet<(SampleIndex, PrecursorIndex, String, [u64; 9])>,
) -> Result<TransitionTable, SplitError> {
    let attributes = frame_from_rows(
        columns::TRANSITION_ATTRIBUTES,
        rows.iter().map(|(_, _, _, values)| from_bits(*values)),
    )?;

    let mut sample_index = Vec::with_capacity(rows.len());
    let mut precursor_index = Vec::with_capacity(rows.len());
    let mut fragment_ion = Vec::with_capacity(rows.len());
    for (sample, precursor, fragment, _) in rows {
        sample_index.push(sample);
        precursor_index.push(precursor);
        fragment_ion.push(fragment);
    }

    Ok(TransitionTable {
        sample_index,
        precursor_index,
        fragment_ion,
        attributes,
    })
}
