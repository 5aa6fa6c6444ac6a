use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use log::debug;
use parquet::arrow::ArrowWriter;

use crate::columns::SAMPLE_INDEX;
use crate::matrix::FeatureMatrix;

use super::{FeatureMatrixWriterConfig, FeatureMatrixWriterStats, WriterError};

/// Footer key holding the crate version
pub const VERSION_KEY: &str = "mzfeatures:version";
/// Footer key holding the number of feature columns
pub const FEATURES_KEY: &str = "mzfeatures:features";
/// Footer key naming the row index column
pub const INDEX_COLUMN_KEY: &str = "mzfeatures:index_column";

/// Arrow schema of a feature matrix: `Sample Index` (UInt64) then one Float64 per feature
pub fn feature_matrix_schema(feature_names: &[&str]) -> Schema {
    let mut fields = Vec::with_capacity(feature_names.len() + 1);
    fields.push(Field::new(SAMPLE_INDEX, DataType::UInt64, false));
    fields.extend(
        feature_names
            .iter()
            .map(|name| Field::new(*name, DataType::Float64, false)),
    );
    Schema::new(fields)
}

/// Parquet writer for feature matrices
///
/// The schema is fixed by the feature names given at construction; every
/// matrix written must have exactly these columns.
pub struct FeatureMatrixWriter<W: Write + Send> {
    writer: ArrowWriter<W>,
    schema: SchemaRef,
    samples_written: usize,
}

impl FeatureMatrixWriter<File> {
    /// Create a new writer to a file path
    pub fn new_file<P: AsRef<Path>>(
        path: P,
        feature_names: &[&str],
        config: FeatureMatrixWriterConfig,
    ) -> Result<Self, WriterError> {
        let file = File::create(path)?;
        Self::new(file, feature_names, config)
    }
}

impl<W: Write + Send> FeatureMatrixWriter<W> {
    /// Create a new writer to any Write implementation
    pub fn new(
        writer: W,
        feature_names: &[&str],
        config: FeatureMatrixWriterConfig,
    ) -> Result<Self, WriterError> {
        let schema = Arc::new(feature_matrix_schema(feature_names));

        let mut metadata = BTreeMap::new();
        metadata.insert(
            VERSION_KEY.to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
        );
        metadata.insert(FEATURES_KEY.to_string(), feature_names.len().to_string());
        metadata.insert(INDEX_COLUMN_KEY.to_string(), SAMPLE_INDEX.to_string());
        let props = config.to_writer_properties(feature_names, &metadata);

        let writer = ArrowWriter::try_new(writer, schema.clone(), Some(props))?;

        Ok(Self {
            writer,
            schema,
            samples_written: 0,
        })
    }

    /// Write all rows of `matrix`
    ///
    /// Sample indices continue from the rows already written.
    pub fn write_matrix(&mut self, matrix: &FeatureMatrix) -> Result<(), WriterError> {
        let expected = self.schema.fields().len() - 1;
        if matrix.n_features() != expected
            || self
                .schema
                .fields()
                .iter()
                .skip(1)
                .zip(matrix.feature_names())
                .any(|(field, name)| field.name() != name)
        {
            return Err(WriterError::InvalidData(format!(
                "Feature matrix with {} columns does not match the writer schema ({} features)",
                matrix.n_features(),
                expected
            )));
        }
        if matrix.n_samples() == 0 {
            return Ok(());
        }

        let offset = self.samples_written as u64;
        let mut arrays: Vec<ArrayRef> = Vec::with_capacity(expected + 1);
        arrays.push(Arc::new(UInt64Array::from_iter_values(
            (0..matrix.n_samples() as u64).map(|i| offset + i),
        )));
        for column in matrix.frame().columns() {
            arrays.push(Arc::new(Float64Array::from(column.values.clone())));
        }

        let batch = RecordBatch::try_new(self.schema.clone(), arrays)?;
        self.writer.write(&batch)?;
        self.samples_written += matrix.n_samples();

        debug!("Wrote batch of {} samples", matrix.n_samples());
        Ok(())
    }

    /// Flush any buffered data and finalize the file
    pub fn finish(self) -> Result<FeatureMatrixWriterStats, WriterError> {
        let features = self.schema.fields().len() - 1;
        let file_metadata = self.writer.close()?;

        Ok(FeatureMatrixWriterStats {
            samples_written: self.samples_written,
            features,
            row_groups_written: file_metadata.row_groups.len(),
            file_size_bytes: file_metadata
                .row_groups
                .iter()
                .map(|rg| rg.total_byte_size as u64)
                .sum(),
        })
    }

    /// Finalize and return the inner writer
    pub fn finish_into_inner(self) -> Result<W, WriterError> {
        Ok(self.writer.into_inner()?)
    }
}

/// Write `matrix` to a new Parquet file
pub fn write_parquet_file<P: AsRef<Path>>(
    path: P,
    matrix: &FeatureMatrix,
    config: FeatureMatrixWriterConfig,
) -> Result<FeatureMatrixWriterStats, WriterError> {
    let mut writer = FeatureMatrixWriter::new_file(path, &matrix.feature_names(), config)?;
    writer.write_matrix(matrix)?;
    writer.finish()
}
