//! # Feature Matrix
//!
//! Final wide table: one row per [`SampleIndex`] (ascending), columns made of the
//! sample attributes, the precursor pivot and the transition pivot, in that
//! order.
//!
//! Assembly is the single place where non-finite ratio values are resolved:
//! in the three ratio blocks, `+inf` (and `NaN` from `0 / 0`) becomes `0`.
//! Any other non-finite value, in any column, is rejected.

use log::debug;

use crate::columns::{
    AREA_NORMALIZED_OVER_BACKGROUND_LOG, AREA_OVER_BACKGROUND_LOG,
    TOTAL_AREA_OVER_BACKGROUND_LOG,
};
use crate::frame::{Frame, FrameError};
use crate::pivot::PivotError;
use crate::tables::{SampleIndex, SampleTable, TableKind};

/// Errors raised while assembling the feature matrix
#[derive(Debug, thiserror::Error)]
pub enum MatrixError {
    /// Non-finite value left after cleanup
    #[error("Non-finite value {value} in feature column '{column}' for sample {sample}")]
    NonFinite {
        /// Feature column
        column: String,
        /// Sample row
        sample: SampleIndex,
        /// Offending value
        value: f64,
    },

    /// Sample table rows do not cover every sample exactly once
    #[error(transparent)]
    Alignment(#[from] PivotError),

    /// Column bookkeeping error
    #[error(transparent)]
    Frame(#[from] FrameError),
}

/// Wide feature table, one row per sample
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    frame: Frame,
}

impl FeatureMatrix {
    /// Concatenate sample attributes and both pivots, then resolve non-finite values
    ///
    /// Returns the matrix and the number of values that were zeroed.
    pub fn assemble(
        samples: SampleTable,
        precursors: Frame,
        transitions: Frame,
    ) -> Result<(Self, usize), MatrixError> {
        let rows = precursors.rows();
        let sample_attributes = align_samples(&samples, rows)?;

        let mut frame = Frame::hconcat([sample_attributes, precursors, transitions], rows)?;
        let resolved = resolve_non_finite(&mut frame);
        if resolved > 0 {
            debug!("Replaced {} non-finite ratio values with 0", resolved);
        }

        let matrix = Self { frame };
        matrix.check_finite()?;
        Ok((matrix, resolved))
    }

    /// Number of samples (rows)
    pub fn n_samples(&self) -> usize {
        self.frame.rows()
    }

    /// Number of features (columns)
    pub fn n_features(&self) -> usize {
        self.frame.width()
    }

    /// Feature names in column order
    pub fn feature_names(&self) -> Vec<&str> {
        self.frame.names().collect()
    }

    /// Values of one feature, indexed by sample
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.frame.column(name)
    }

    /// All features of one sample, in column order
    pub fn row(&self, sample: SampleIndex) -> Option<Vec<f64>> {
        self.frame.row(sample)
    }

    /// A single value
    pub fn value(&self, sample: SampleIndex, feature: &str) -> Option<f64> {
        self.frame.column(feature)?.get(sample).copied()
    }

    /// Underlying columns
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    fn check_finite(&self) -> Result<(), MatrixError> {
        for column in self.frame.columns() {
            if let Some((sample, &value)) =
                column.values.iter().enumerate().find(|(_, v)| !v.is_finite())
            {
                return Err(MatrixError::NonFinite {
                    column: column.name.clone(),
                    sample,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Reorder the sample table so that row `i` holds sample `i`
fn align_samples(samples: &SampleTable, rows: usize) -> Result<Frame, PivotError> {
    let mut order: Vec<Option<usize>> = vec![None; rows];
    for (row, &sample) in samples.sample_index.iter().enumerate() {
        let slot = order.get_mut(sample).ok_or(PivotError::SampleOutOfRange {
            sample,
            samples: rows,
        })?;
        if slot.replace(row).is_some() {
            return Err(PivotError::DuplicateEntry {
                table: TableKind::Sample,
                key: sample.to_string(),
                sample,
            });
        }
    }

    let order = order
        .into_iter()
        .enumerate()
        .map(|(sample, row)| {
            row.ok_or_else(|| PivotError::MissingValue {
                table: TableKind::Sample,
                column: samples
                    .attributes
                    .names()
                    .next()
                    .unwrap_or_default()
                    .to_string(),
                sample,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(samples.attributes.select_rows(&order))
}

/// Ratio attributes whose pivot columns may hold a zero-denominator result
const RATIO_ATTRIBUTES: [&str; 3] = [
    TOTAL_AREA_OVER_BACKGROUND_LOG,
    AREA_OVER_BACKGROUND_LOG,
    AREA_NORMALIZED_OVER_BACKGROUND_LOG,
];

/// Whether a pivot column `"<attribute> <key>"` belongs to a ratio block
fn is_ratio_column(name: &str) -> bool {
    RATIO_ATTRIBUTES.iter().any(|attribute| {
        name.strip_prefix(attribute)
            .is_some_and(|rest| rest.starts_with(' '))
    })
}

/// Replace `+inf` and `NaN` by `0` in the ratio blocks, returning how many values changed
fn resolve_non_finite(frame: &mut Frame) -> usize {
    let mut resolved = 0;
    for (_, values) in frame.values_mut().filter(|(name, _)| is_ratio_column(name)) {
        for value in values.iter_mut() {
            if *value == f64::INFINITY || value.is_nan() {
                *value = 0.0;
                resolved += 1;
            }
        }
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table(order: &[usize]) -> SampleTable {
        let mut attributes = Frame::new(order.len());
        attributes
            .push_column("Swab ID", order.iter().map(|&s| s as f64).collect())
            .unwrap();
        SampleTable {
            sample_index: order.to_vec(),
            attributes,
        }
    }

    fn single(name: &str, values: Vec<f64>) -> Frame {
        let mut frame = Frame::new(values.len());
        frame.push_column(name, values).unwrap();
        frame
    }

    #[test]
    fn test_assemble_orders_columns_and_rows() {
        let (matrix, resolved) = FeatureMatrix::assemble(
            sample_table(&[1, 0]),
            single("Best Retention Time 0", vec![10.0, 11.0]),
            single("Area (log) 0_y1", vec![2.0, 3.0]),
        )
        .unwrap();

        assert_eq!(resolved, 0);
        assert_eq!(
            matrix.feature_names(),
            vec!["Swab ID", "Best Retention Time 0", "Area (log) 0_y1"]
        );
        assert_eq!(matrix.row(0), Some(vec![0.0, 10.0, 2.0]));
        assert_eq!(matrix.row(1), Some(vec![1.0, 11.0, 3.0]));
        assert_eq!(matrix.value(1, "Area (log) 0_y1"), Some(3.0));
    }

    #[test]
    fn test_infinite_ratio_becomes_zero() {
        let (matrix, resolved) = FeatureMatrix::assemble(
            sample_table(&[0, 1]),
            single("Total Area / Background (log) 0", vec![f64::INFINITY, 2.0]),
            single("Area (log) / Background (log) 0_y1", vec![f64::NAN, 1.5]),
        )
        .unwrap();

        assert_eq!(resolved, 2);
        assert_eq!(matrix.value(0, "Total Area / Background (log) 0"), Some(0.0));
        assert_eq!(matrix.value(0, "Area (log) / Background (log) 0_y1"), Some(0.0));
        assert_eq!(matrix.value(1, "Area (log) / Background (log) 0_y1"), Some(1.5));
    }

    #[test]
    fn test_negative_infinity_is_rejected() {
        let err = FeatureMatrix::assemble(
            sample_table(&[0]),
            single("Area (log) 0", vec![f64::NEG_INFINITY]),
            Frame::new(1),
        )
        .unwrap_err();
        assert!(matches!(err, MatrixError::NonFinite { sample: 0, .. }));
    }

    #[test]
    fn test_nan_outside_ratio_blocks_is_rejected() {
        let err = FeatureMatrix::assemble(
            sample_table(&[0, 1]),
            single("Total Area / Background (log) 0", vec![f64::INFINITY, 1.0]),
            single("Area (log) 0_y1", vec![1.0, f64::NAN]),
        )
        .unwrap_err();
        match err {
            MatrixError::NonFinite {
                column,
                sample,
                value,
            } => {
                assert_eq!(column, "Area (log) 0_y1");
                assert_eq!(sample, 1);
                assert!(value.is_nan());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_ratio_columns_are_matched_by_attribute() {
        assert!(is_ratio_column("Total Area / Background (log) 0"));
        assert!(is_ratio_column("Area (log) / Background (log) 0_y1"));
        assert!(is_ratio_column("Area Normalized (log) / Background (log) 1_b3"));
        assert!(!is_ratio_column("Area (log) 0_y1"));
        assert!(!is_ratio_column("Total Background (log) 0"));
        assert!(!is_ratio_column("Area (log) / Background (log)"));
    }

    #[test]
    fn test_sample_table_must_cover_all_samples() {
        let err = FeatureMatrix::assemble(
            sample_table(&[0]),
            single("Area (log) 0", vec![1.0, 2.0]),
            Frame::new(2),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            MatrixError::Alignment(PivotError::MissingValue { sample: 1, .. })
        ));
    }
}
