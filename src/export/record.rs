use serde::Serialize;

/// One normalized row of a Skyline export: a single transition measured in one sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkylineRecord {
    /// 1-based line in the export, for diagnostics
    pub line: u64,

    /// Sample file name
    pub file_name: String,
    /// Swab type label as written in the export
    pub swab: String,
    /// Swab type code (see [`super::SWAB_TYPES`])
    pub swab_id: u8,
    /// Patient/sample tag
    pub patient_sample: i64,

    /// Peptide sequence including modifications
    pub peptide_modified_sequence: String,
    /// Precursor charge state
    pub precursor_charge: i32,

    /// Fragment ion label, e.g. `y7`
    pub fragment_ion: String,
    /// Fragment number parsed from the label
    pub fragment_number: u32,
    /// Fragment ion type code (see [`super::ION_TYPES`])
    pub fragment_ion_type: u8,

    // Precursor-level measurements (repeated on every transition row)
    /// Retention time of the precursor peak
    pub best_retention_time: f64,
    /// Summed fragment area of the precursor
    pub total_area_fragment: f64,
    /// Similarity to the spectral library
    pub library_dot_product: f64,
    /// Summed background of the precursor
    pub total_background: f64,
    /// Widest peak among the precursor's transitions
    pub max_fwhm: f64,

    // Transition-level measurements
    /// Observed retention time
    pub retention_time: f64,
    /// Start of the integration window
    pub start_time: f64,
    /// End of the integration window
    pub end_time: f64,
    /// Peak width at half maximum
    pub fwhm: f64,
    /// Integrated area
    pub area: f64,
    /// Background under the peak
    pub background: f64,
    /// Peak height
    pub height: f64,
    /// Rank of the fragment in the spectral library
    pub library_rank: f64,
    /// Fragment intensity in the spectral library
    pub library_intensity: f64,
    /// Area as percentage of the precursor's total area
    pub area_normalized: f64,

    /// `|RT - midpoint(start, end)|`
    pub retention_time_deviation: f64,
}

/// Distance of the observed retention time from the middle of the integration window
pub fn retention_time_deviation(retention_time: f64, start_time: f64, end_time: f64) -> f64 {
    (retention_time - (start_time + (end_time - start_time) / 2.0)).abs()
}
