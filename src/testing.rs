//! Synthetic Skyline exports for unit tests.

use crate::columns::REQUIRED;

/// One export row, every field kept as the text written to the file
#[derive(Debug, Clone)]
pub(crate) struct ExportRow {
    pub file_name: String,
    pub swab: String,
    pub peptide: String,
    pub charge: String,
    pub fragment_ion: String,
    pub fragment_ion_type: String,
    pub patient: String,
    pub retention_time: String,
    pub start_time: String,
    pub end_time: String,
    pub best_retention_time: String,
    pub total_area_fragment: String,
    pub total_background: String,
    pub library_dot_product: String,
    pub max_fwhm: String,
    pub fwhm: String,
    pub area: String,
    pub background: String,
    pub height: String,
    pub library_rank: String,
    pub library_intensity: String,
    pub area_normalized: String,
}

impl ExportRow {
    pub fn new(file_name: &str, peptide: &str, fragment_ion: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            swab: "UTM".to_string(),
            peptide: peptide.to_string(),
            charge: "2".to_string(),
            fragment_ion: fragment_ion.to_string(),
            fragment_ion_type: fragment_ion[..1].to_string(),
            patient: "1".to_string(),
            retention_time: "12,5".to_string(),
            start_time: "12,0".to_string(),
            end_time: "13,4".to_string(),
            best_retention_time: "12,6".to_string(),
            total_area_fragment: "99999".to_string(),
            total_background: "999".to_string(),
            library_dot_product: "0,95".to_string(),
            max_fwhm: "0,2".to_string(),
            fwhm: "0,15".to_string(),
            area: "9999".to_string(),
            background: "99".to_string(),
            height: "999".to_string(),
            library_rank: "1".to_string(),
            library_intensity: "100".to_string(),
            area_normalized: "25,5%".to_string(),
        }
    }

    pub fn patient(mut self, patient: &str) -> Self {
        self.patient = patient.to_string();
        self
    }

    pub fn swab(mut self, swab: &str) -> Self {
        self.swab = swab.to_string();
        self
    }

    pub fn charge(mut self, charge: &str) -> Self {
        self.charge = charge.to_string();
        self
    }

    fn fields(&self) -> [&str; 22] {
        [
            self.file_name.as_str(),
            self.swab.as_str(),
            self.peptide.as_str(),
            self.charge.as_str(),
            self.fragment_ion.as_str(),
            self.fragment_ion_type.as_str(),
            self.patient.as_str(),
            self.retention_time.as_str(),
            self.start_time.as_str(),
            self.end_time.as_str(),
            self.best_retention_time.as_str(),
            self.total_area_fragment.as_str(),
            self.total_background.as_str(),
            self.library_dot_product.as_str(),
            self.max_fwhm.as_str(),
            self.fwhm.as_str(),
            self.area.as_str(),
            self.background.as_str(),
            self.height.as_str(),
            self.library_rank.as_str(),
            self.library_intensity.as_str(),
            self.area_normalized.as_str(),
        ]
    }

    pub fn to_line(&self) -> String {
        self.fields().join(";")
    }
}

/// Header line in [`REQUIRED`] order
pub(crate) fn header() -> String {
    REQUIRED.join(";")
}

/// Complete export text for `rows`
pub(crate) fn export_text(rows: &[ExportRow]) -> String {
    let mut text = header();
    for row in rows {
        text.push('\n');
        text.push_str(&row.to_line());
    }
    text.push('\n');
    text
}

/// Dense export: every sample measures every fragment of every precursor.
/// Sample `i` is `sample_{i}.raw` with patient tag `100 + i`.
pub(crate) fn dense_rows(samples: usize, precursors: &[(&str, &[&str])]) -> Vec<ExportRow> {
    let mut rows = Vec::new();
    for s in 0..samples {
        let file = format!("sample_{s}.raw");
        let patient = (100 + s).to_string();
        for (peptide, fragments) in precursors {
            for fragment in fragments.iter() {
                rows.push(ExportRow::new(&file, peptide, fragment).patient(&patient));
            }
        }
    }
    rows
}
