//! # Pivot Engine
//!
//! Reshapes a long table (one row per key × sample) into a wide one (one row per
//! sample, one column block per key). Every attribute column `c` of key `k`
//! becomes a column named `"c k"`; rows are aligned on [`SampleIndex`], so the
//! output has exactly one row per sample, in index order.
//!
//! The same primitive pivots precursors (keyed by precursor index) and
//! transitions (keyed by the composite `"<precursor>_<fragment>"` identifier).

use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

use indexmap::IndexMap;
use log::debug;

use crate::columns::pivot_name;
use crate::frame::{Frame, FrameError};
use crate::tables::{SampleIndex, TableKind};

/// Errors raised while pivoting a long table
#[derive(Debug, thiserror::Error)]
pub enum PivotError {
    /// A sample has no measurement for an included key
    #[error("Missing value in reshaped {table} column '{column}' for sample {sample}")]
    MissingValue {
        /// Pivoted table
        table: TableKind,
        /// First pivoted column of the incomplete key
        column: String,
        /// Sample without a row for that key
        sample: SampleIndex,
    },

    /// A sample has two rows for the same key
    #[error("Duplicate {table} rows for key '{key}' in sample {sample}")]
    DuplicateEntry {
        /// Pivoted table
        table: TableKind,
        /// Group key
        key: String,
        /// Sample with more than one row
        sample: SampleIndex,
    },

    /// Row refers to a sample index outside `0..samples`
    #[error("Sample index {sample} out of range for {samples} samples")]
    SampleOutOfRange {
        /// Offending index
        sample: SampleIndex,
        /// Number of samples
        samples: usize,
    },

    /// Index and key columns disagree on the row count
    #[error("Long {table} table has {samples} sample indices and {keys} keys for {rows} rows")]
    LengthMismatch {
        /// Pivoted table
        table: TableKind,
        /// Length of the sample index column
        samples: usize,
        /// Length of the key column
        keys: usize,
        /// Rows in the attribute frame
        rows: usize,
    },

    /// Column bookkeeping error (e.g. two keys rendering to the same name)
    #[error(transparent)]
    Frame(#[from] FrameError),
}

/// Borrowed long-form table: row `i` is `(sample_index[i], keys[i], attributes.row(i))`
#[derive(Debug)]
pub struct LongTable<'a, K> {
    /// Table the rows come from
    pub table: TableKind,
    /// Sample of each row
    pub sample_index: &'a [SampleIndex],
    /// Group key of each row
    pub keys: &'a [K],
    /// Attribute columns
    pub attributes: &'a Frame,
}

impl<'a, K: Display + Eq + Hash> LongTable<'a, K> {
    fn validate(&self) -> Result<(), PivotError> {
        let rows = self.attributes.rows();
        if self.sample_index.len() != rows || self.keys.len() != rows {
            return Err(PivotError::LengthMismatch {
                table: self.table,
                samples: self.sample_index.len(),
                keys: self.keys.len(),
                rows,
            });
        }
        Ok(())
    }

    /// Row numbers of each key, keys in order of first appearance
    fn groups(&self) -> IndexMap<&'a K, Vec<usize>> {
        let mut groups: IndexMap<&K, Vec<usize>> = IndexMap::new();
        for (row, key) in self.keys.iter().enumerate() {
            groups.entry(key).or_default().push(row);
        }
        groups
    }
}

/// Pivot `long` into one row per sample
///
/// Keys whose rendered form is in `exclusions` are skipped entirely. Every
/// remaining key must have exactly one row for each of the `samples` samples;
/// a hole is a [`PivotError::MissingValue`], a repeat a
/// [`PivotError::DuplicateEntry`].
pub fn pivot<K: Display + Eq + Hash>(
    long: LongTable<'_, K>,
    exclusions: &HashSet<String>,
    samples: usize,
) -> Result<Frame, PivotError> {
    long.validate()?;

    let mut wide = Frame::new(samples);
    let mut skipped = 0;

    for (key, rows) in long.groups() {
        let key = key.to_string();
        if exclusions.contains(&key) {
            skipped += 1;
            continue;
        }

        let mut slots: Vec<Option<usize>> = vec![None; samples];
        for row in rows {
            let sample = long.sample_index[row];
            let slot = slots.get_mut(sample).ok_or(PivotError::SampleOutOfRange {
                sample,
                samples,
            })?;
            if slot.replace(row).is_some() {
                return Err(PivotError::DuplicateEntry {
                    table: long.table,
                    key,
                    sample,
                });
            }
        }

        let rows = slots
            .iter()
            .copied()
            .enumerate()
            .map(|(sample, slot)| {
                slot.ok_or_else(|| PivotError::MissingValue {
                    table: long.table,
                    column: long
                        .attributes
                        .names()
                        .next()
                        .map(|name| pivot_name(name, &key))
                        .unwrap_or_else(|| key.clone()),
                    sample,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        for column in long.attributes.select_rows(&rows).columns() {
            wide.push_column(pivot_name(&column.name, &key), column.values.clone())?;
        }
    }

    debug!(
        "Reshaped {} table into {} columns ({} keys excluded)",
        long.table,
        wide.width(),
        skipped
    );
    Ok(wide)
}

/// Keys not measured in every one of `samples` samples, in order of first appearance
pub fn incomplete_keys<K: Display + Eq + Hash>(
    sample_index: &[SampleIndex],
    keys: &[K],
    samples: usize,
) -> Vec<String> {
    let mut seen: IndexMap<&K, HashSet<SampleIndex>> = IndexMap::new();
    for (key, &sample) in keys.iter().zip(sample_index) {
        seen.entry(key).or_default().insert(sample);
    }

    seen.into_iter()
        .filter(|(_, present)| (0..samples).any(|s| !present.contains(&s)))
        .map(|(key, _)| key.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_frame(values: &[f64]) -> Frame {
        let mut frame = Frame::new(values.len());
        frame.push_column("Area", values.to_vec()).unwrap();
        frame
            .push_column("Height", values.iter().map(|v| v * 10.0).collect())
            .unwrap();
        frame
    }

    #[test]
    fn test_pivot_renames_and_aligns() {
        // rows deliberately out of sample order
        let attributes = long_frame(&[1.0, 2.0, 3.0, 4.0]);
        let long = LongTable {
            table: TableKind::Precursor,
            sample_index: &[1, 0, 0, 1],
            keys: &[0usize, 0, 1, 1],
            attributes: &attributes,
        };

        let wide = pivot(long, &HashSet::new(), 2).unwrap();
        assert_eq!(
            wide.names().collect::<Vec<_>>(),
            vec!["Area 0", "Height 0", "Area 1", "Height 1"]
        );
        assert_eq!(wide.row(0), Some(vec![2.0, 20.0, 3.0, 30.0]));
        assert_eq!(wide.row(1), Some(vec![1.0, 10.0, 4.0, 40.0]));
    }

    #[test]
    fn test_pivot_skips_excluded_keys() {
        let attributes = long_frame(&[1.0, 2.0, 3.0]);
        let keys = ["0_y1".to_string(), "0_y1".to_string(), "0_y2".to_string()];
        let long = LongTable {
            table: TableKind::Transition,
            sample_index: &[0, 1, 0],
            keys: &keys,
            attributes: &attributes,
        };

        let exclusions: HashSet<String> = ["0_y2".to_string()].into_iter().collect();
        let wide = pivot(long, &exclusions, 2).unwrap();
        assert_eq!(wide.names().collect::<Vec<_>>(), vec!["Area 0_y1", "Height 0_y1"]);
    }

    #[test]
    fn test_pivot_missing_sample_is_error() {
        let attributes = long_frame(&[1.0, 2.0, 3.0]);
        let keys = ["0_y1".to_string(), "0_y1".to_string(), "0_y2".to_string()];
        let long = LongTable {
            table: TableKind::Transition,
            sample_index: &[0, 1, 0],
            keys: &keys,
            attributes: &attributes,
        };

        match pivot(long, &HashSet::new(), 2).unwrap_err() {
            PivotError::MissingValue { column, sample, .. } => {
                assert_eq!(column, "Area 0_y2");
                assert_eq!(sample, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_pivot_duplicate_is_error() {
        let attributes = long_frame(&[1.0, 2.0]);
        let long = LongTable {
            table: TableKind::Precursor,
            sample_index: &[0, 0],
            keys: &[3usize, 3],
            attributes: &attributes,
        };
        let err = pivot(long, &HashSet::new(), 1).unwrap_err();
        assert!(matches!(err, PivotError::DuplicateEntry { ref key, sample: 0, .. } if key == "3"));
    }

    #[test]
    fn test_pivot_length_mismatch() {
        let attributes = long_frame(&[1.0, 2.0]);
        let long = LongTable {
            table: TableKind::Precursor,
            sample_index: &[0],
            keys: &[0usize, 0],
            attributes: &attributes,
        };
        let err = pivot(long, &HashSet::new(), 1).unwrap_err();
        assert!(matches!(err, PivotError::LengthMismatch { .. }));
    }

    #[test]
    fn test_incomplete_keys() {
        let keys = ["7_y10", "7_y10", "11_y3", "0_y1", "0_y1"];
        let incomplete = incomplete_keys(&[0, 1, 1, 1, 0], &keys, 2);
        assert_eq!(incomplete, vec!["11_y3"]);
        assert!(incomplete_keys(&[0, 1, 1, 1, 0], &keys, 3).len() == 3);
    }
}
