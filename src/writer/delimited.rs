use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::columns::SAMPLE_INDEX;
use crate::matrix::FeatureMatrix;

use super::WriterError;

/// Field separator used for CSV output, matching the export convention
pub const CSV_DELIMITER: u8 = b';';

/// Write `matrix` as delimited text
///
/// The header is `Sample Index` followed by the feature names; row `i` holds
/// sample `i`.
pub fn write_csv<W: Write>(
    matrix: &FeatureMatrix,
    writer: W,
    delimiter: u8,
) -> Result<(), WriterError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    let mut header = Vec::with_capacity(matrix.n_features() + 1);
    header.push(SAMPLE_INDEX);
    header.extend(matrix.feature_names());
    csv_writer.write_record(&header)?;

    let columns = matrix.frame().columns();
    let mut row: Vec<String> = Vec::with_capacity(header.len());
    for sample in 0..matrix.n_samples() {
        row.clear();
        row.push(sample.to_string());
        row.extend(columns.iter().map(|c| c.values[sample].to_string()));
        csv_writer.write_record(&row)?;
    }
    csv_writer.flush()?;

    debug!(
        "Wrote {} rows × {} columns of delimited text",
        matrix.n_samples(),
        header.len()
    );
    Ok(())
}

/// Write `matrix` as delimited text to a new file
pub fn write_csv_file<P: AsRef<Path>>(
    path: P,
    matrix: &FeatureMatrix,
    delimiter: u8,
) -> Result<(), WriterError> {
    let file = File::create(path)?;
    write_csv(matrix, BufWriter::new(file), delimiter)
}
