//! Column names of the Skyline export and of the derived tables.
//!
//! The export header must use these names verbatim. Derived names are reused as
//! the prefixes of feature matrix columns.

/// Sample (raw file) name
pub const FILE_NAME: &str = "File Name";
/// Swab type label (`UTM`, `eSwab`)
pub const SWAB: &str = "Swab";
/// Peptide sequence including modifications
pub const PEPTIDE_MODIFIED_SEQUENCE: &str = "Peptide Modified Sequence";
/// Precursor charge state
pub const PRECURSOR_CHARGE: &str = "Precursor Charge";
/// Fragment ion label, e.g. `y7`
pub const FRAGMENT_ION: &str = "Fragment Ion";
/// Fragment ion type label (`y`, `b`)
pub const FRAGMENT_ION_TYPE: &str = "Fragment Ion Type";
/// Patient/sample tag shared with the outcome file
pub const PATIENT_SAMPLE: &str = "Patient_Sample";
/// Observed retention time of the transition
pub const RETENTION_TIME: &str = "Retention Time";
/// Start of the integration window
pub const START_TIME: &str = "Start Time";
/// End of the integration window
pub const END_TIME: &str = "End Time";
/// Retention time of the precursor peak
pub const BEST_RETENTION_TIME: &str = "Best Retention Time";
/// Summed fragment area of the precursor
pub const TOTAL_AREA_FRAGMENT: &str = "Total Area Fragment";
/// Summed background of the precursor
pub const TOTAL_BACKGROUND: &str = "Total Background";
/// Similarity to the spectral library
pub const LIBRARY_DOT_PRODUCT: &str = "Library Dot Product";
/// Widest peak among the precursor's transitions
pub const MAX_FWHM: &str = "Max Fwhm";
/// Peak width at half maximum
pub const FWHM: &str = "Fwhm";
/// Integrated transition area
pub const AREA: &str = "Area";
/// Transition background
pub const BACKGROUND: &str = "Background";
/// Peak height
pub const HEIGHT: &str = "Height";
/// Rank of the fragment in the spectral library
pub const LIBRARY_RANK: &str = "Library Rank";
/// Fragment intensity in the spectral library
pub const LIBRARY_INTENSITY: &str = "Library Intensity";
/// Percentage string, e.g. `12,3%`
pub const AREA_NORMALIZED: &str = "Area Normalized";

// Derived columns
/// Swab type code
pub const SWAB_ID: &str = "Swab ID";
/// Fragment number parsed from the ion label
pub const FRAGMENT_NUMBER: &str = "Fragment Number";
/// Distance of the retention time from the window midpoint
pub const RETENTION_TIME_DEVIATION: &str = "Retention Time Deviation";
/// Dense sample index in first-seen order
pub const SAMPLE_INDEX: &str = "Sample Index";
/// Dense precursor index in first-seen order
pub const PRECURSOR_INDEX: &str = "Precursor Index";

// Ratio features
/// Precursor total area over total background, both log-scaled
pub const TOTAL_AREA_OVER_BACKGROUND_LOG: &str = "Total Area / Background (log)";
/// Transition area over background, both log-scaled
pub const AREA_OVER_BACKGROUND_LOG: &str = "Area (log) / Background (log)";
/// Normalized transition area over background, both log-scaled
pub const AREA_NORMALIZED_OVER_BACKGROUND_LOG: &str = "Area Normalized (log) / Background (log)";

/// Columns every export must carry, in Skyline's report order.
pub const REQUIRED: [&str; 22] = [
    FILE_NAME,
    SWAB,
    PEPTIDE_MODIFIED_SEQUENCE,
    PRECURSOR_CHARGE,
    FRAGMENT_ION,
    FRAGMENT_ION_TYPE,
    PATIENT_SAMPLE,
    RETENTION_TIME,
    START_TIME,
    END_TIME,
    BEST_RETENTION_TIME,
    TOTAL_AREA_FRAGMENT,
    TOTAL_BACKGROUND,
    LIBRARY_DOT_PRODUCT,
    MAX_FWHM,
    FWHM,
    AREA,
    BACKGROUND,
    HEIGHT,
    LIBRARY_RANK,
    LIBRARY_INTENSITY,
    AREA_NORMALIZED,
];

/// The only columns allowed to be empty; absent values become `0.0`.
pub const ZERO_FILLED: [&str; 5] = [
    MAX_FWHM,
    LIBRARY_DOT_PRODUCT,
    BEST_RETENTION_TIME,
    LIBRARY_RANK,
    LIBRARY_INTENSITY,
];

/// Sample-level attributes, in feature matrix order.
pub const SAMPLE_ATTRIBUTES: [&str; 1] = [SWAB_ID];

/// Precursor-level attributes as projected by the splitter.
pub const PRECURSOR_ATTRIBUTES: [&str; 5] = [
    BEST_RETENTION_TIME,
    TOTAL_AREA_FRAGMENT,
    LIBRARY_DOT_PRODUCT,
    TOTAL_BACKGROUND,
    MAX_FWHM,
];

/// Transition-level attributes as projected by the splitter.
pub const TRANSITION_ATTRIBUTES: [&str; 9] = [
    RETENTION_TIME,
    RETENTION_TIME_DEVIATION,
    FWHM,
    AREA,
    BACKGROUND,
    HEIGHT,
    LIBRARY_RANK,
    LIBRARY_INTENSITY,
    AREA_NORMALIZED,
];

/// Precursor columns replaced by their `log10(x + 1)` counterparts.
pub const PRECURSOR_LOG_COLUMNS: [&str; 3] = [TOTAL_BACKGROUND, TOTAL_AREA_FRAGMENT, MAX_FWHM];

/// Transition columns replaced by their `log10(x + 1)` counterparts.
pub const TRANSITION_LOG_COLUMNS: [&str; 6] = [
    BACKGROUND,
    AREA,
    AREA_NORMALIZED,
    HEIGHT,
    LIBRARY_INTENSITY,
    FWHM,
];

/// Name of the log-scale counterpart of `column`.
pub fn log_name(column: &str) -> String {
    format!("{column} (log)")
}

/// Name of a pivoted column: attribute name followed by the group key.
pub fn pivot_name(column: &str, key: &str) -> String {
    format!("{column} {key}")
}
