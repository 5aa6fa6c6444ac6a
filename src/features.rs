//! # Feature Deriver
//!
//! Replaces linear-scale intensity columns by `log10(x + 1)` and adds ratio
//! features between log-scale columns.
//!
//! Ratios are plain divisions. A zero log-scale background yields `+inf` (or
//! `NaN` when the numerator is zero too); those values are carried forward and
//! only resolved when the feature matrix is assembled.

use log::debug;

use crate::columns::{self, log_name};
use crate::frame::{Frame, FrameError};
use crate::tables::{PrecursorTable, TransitionTable};

/// `log10(x + 1)`, so that zero intensities map to `0`
pub fn log10_plus_one(value: f64) -> f64 {
    (value + 1.0).log10()
}

/// Replace each of `targets` by its log-scale counterpart
///
/// The `"<name> (log)"` columns are appended after the remaining columns, in
/// `targets` order, and the linear-scale columns are removed.
pub fn log_transform(mut frame: Frame, targets: &[&str]) -> Result<Frame, FrameError> {
    for &column in targets {
        let values = frame.take_column(column)?;
        let logged = values.into_iter().map(log10_plus_one).collect();
        frame.push_column(log_name(column), logged)?;
    }
    Ok(frame)
}

/// Append `name = numerator / denominator`
pub fn with_ratio(
    mut frame: Frame,
    name: &str,
    numerator: &str,
    denominator: &str,
) -> Result<Frame, FrameError> {
    let num = frame
        .column(numerator)
        .ok_or_else(|| FrameError::MissingColumn(numerator.to_string()))?;
    let den = frame
        .column(denominator)
        .ok_or_else(|| FrameError::MissingColumn(denominator.to_string()))?;
    let ratio = num.iter().zip(den).map(|(n, d)| n / d).collect();
    frame.push_column(name, ratio)?;
    Ok(frame)
}

/// Log-transform precursor intensities and add the area/background ratio
pub fn derive_precursor_features(table: PrecursorTable) -> Result<PrecursorTable, FrameError> {
    let PrecursorTable {
        sample_index,
        precursor_index,
        attributes,
    } = table;

    let attributes = log_transform(attributes, &columns::PRECURSOR_LOG_COLUMNS)?;
    let attributes = with_ratio(
        attributes,
        columns::TOTAL_AREA_OVER_BACKGROUND_LOG,
        &log_name(columns::TOTAL_AREA_FRAGMENT),
        &log_name(columns::TOTAL_BACKGROUND),
    )?;
    debug!("Derived {} precursor features", attributes.width());

    Ok(PrecursorTable {
        sample_index,
        precursor_index,
        attributes,
    })
}

/// Log-transform transition intensities and add the two background ratios
pub fn derive_transition_features(table: TransitionTable) -> Result<TransitionTable, FrameError> {
    let TransitionTable {
        sample_index,
        precursor_index,
        fragment_ion,
        attributes,
    } = table;

    let background = log_name(columns::BACKGROUND);
    let attributes = log_transform(attributes, &columns::TRANSITION_LOG_COLUMNS)?;
    let attributes = with_ratio(
        attributes,
        columns::AREA_OVER_BACKGROUND_LOG,
        &log_name(columns::AREA),
        &background,
    )?;
    let attributes = with_ratio(
        attributes,
        columns::AREA_NORMALIZED_OVER_BACKGROUND_LOG,
        &log_name(columns::AREA_NORMALIZED),
        &background,
    )?;
    debug!("Derived {} transition features", attributes.width());

    Ok(TransitionTable {
        sample_index,
        precursor_index,
        fragment_ion,
        attributes,
    })
}
