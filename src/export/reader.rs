use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::StringRecord;
use log::{debug, info, warn};
use serde::Serialize;

use crate::columns::{self, REQUIRED, ZERO_FILLED};

use super::mapping::{fragment_number, ION_TYPES, SWAB_TYPES};
use super::parse::{is_absent, parse_decimal, parse_integer, parse_percentage};
use super::record::{retention_time_deviation, SkylineRecord};
use super::ExportError;

/// Field separator of Skyline exports
pub const EXPORT_DELIMITER: u8 = b';';

/// Counters collected while normalizing an export
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeStats {
    /// Data rows in the file
    pub records_read: usize,
    /// Rows dropped because the file name was absent
    pub records_dropped: usize,
    /// Absent cells replaced by `0.0`
    pub cells_filled: usize,
}

/// A fully normalized Skyline export
#[derive(Debug, Clone)]
pub struct SkylineExport {
    records: Vec<SkylineRecord>,
    stats: NormalizeStats,
}

impl SkylineExport {
    /// Read and normalize an export file
    pub fn from_csv_file<P: AsRef<Path>>(path: P) -> Result<Self, ExportError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Read and normalize an export from a reader
    ///
    /// Rows without a file name are dropped. Absent values are filled with `0.0`
    /// in the [`ZERO_FILLED`] columns; an absent value anywhere else fails the
    /// whole import, as does a categorical label outside its mapping.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ExportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(EXPORT_DELIMITER)
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);

        let layout = ColumnLayout::from_headers(csv_reader.headers()?)?;
        let mut stats = NormalizeStats::default();
        let mut rows = Vec::new();

        for record in csv_reader.records() {
            let record = record?;
            stats.records_read += 1;
            let row = RowView::new(&record, &layout);
            if is_absent(row.cell(columns::FILE_NAME)) {
                stats.records_dropped += 1;
                continue;
            }
            rows.push(record);
        }

        // Integrity scan over the whole table before any value is interpreted
        for record in &rows {
            let line = record_line(record);
            for (i, cell) in record.iter().enumerate() {
                if !is_absent(cell) {
                    continue;
                }
                if layout.zero_filled[i] {
                    stats.cells_filled += 1;
                } else {
                    return Err(ExportError::MissingValue {
                        column: layout.headers[i].clone(),
                        line,
                    });
                }
            }
        }

        let records = rows
            .iter()
            .map(|record| RowView::new(record, &layout).normalize())
            .collect::<Result<Vec<_>, _>>()?;

        if stats.records_dropped > 0 {
            warn!(
                "Dropped {} of {} export rows without a file name",
                stats.records_dropped, stats.records_read
            );
        }
        debug!("Filled {} absent values with 0.0", stats.cells_filled);

        if records.is_empty() {
            return Err(ExportError::NoRecords);
        }
        info!("Normalized {} transition records", records.len());

        Ok(Self { records, stats })
    }

    /// Normalized records in file order
    pub fn records(&self) -> &[SkylineRecord] {
        &self.records
    }

    /// Consume the export, returning its records
    pub fn into_records(self) -> Vec<SkylineRecord> {
        self.records
    }

    /// Normalization counters
    pub fn stats(&self) -> NormalizeStats {
        self.stats
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if there are no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

struct ColumnLayout {
    headers: Vec<String>,
    positions: HashMap<&'static str, usize>,
    zero_filled: Vec<bool>,
}

impl ColumnLayout {
    fn from_headers(headers: &StringRecord) -> Result<Self, ExportError> {
        let headers: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();

        let mut positions = HashMap::with_capacity(REQUIRED.len());
        for column in REQUIRED {
            let i = headers
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| ExportError::MissingColumn(column.to_string()))?;
            positions.insert(column, i);
        }

        let zero_filled = headers
            .iter()
            .map(|h| ZERO_FILLED.contains(&h.as_str()))
            .collect();

        Ok(Self {
            headers,
            positions,
            zero_filled,
        })
    }
}

struct RowView<'a> {
    record: &'a StringRecord,
    layout: &'a ColumnLayout,
    line: u64,
}

impl<'a> RowView<'a> {
    fn new(record: &'a StringRecord, layout: &'a ColumnLayout) -> Self {
        Self {
            record,
            layout,
            line: record_line(record),
        }
    }

    fn cell(&self, column: &'static str) -> &'a str {
        self.layout
            .positions
            .get(column)
            .and_then(|&i| self.record.get(i))
            .unwrap_or("")
    }

    fn text(&self, column: &'static str) -> String {
        self.cell(column).trim().to_string()
    }

    fn float(&self, column: &'static str) -> Result<f64, ExportError> {
        let cell = self.cell(column);
        if is_absent(cell) && ZERO_FILLED.contains(&column) {
            return Ok(0.0);
        }
        parse_decimal(cell).ok_or_else(|| ExportError::invalid(column, cell, self.line))
    }

    fn integer(&self, column: &'static str) -> Result<i64, ExportError> {
        let cell = self.cell(column);
        parse_integer(cell).ok_or_else(|| ExportError::invalid(column, cell, self.line))
    }

    fn normalize(&self) -> Result<SkylineRecord, ExportError> {
        let line = self.line;

        let swab = self.text(columns::SWAB);
        let swab_id = SWAB_TYPES.lookup(&swab, line)?;

        let fragment_ion = self.text(columns::FRAGMENT_ION);
        let fragment_number = fragment_number(&fragment_ion)
            .ok_or_else(|| ExportError::invalid(columns::FRAGMENT_ION, &fragment_ion, line))?;
        let fragment_ion_type = ION_TYPES.lookup(self.cell(columns::FRAGMENT_ION_TYPE).trim(), line)?;

        let charge = self.integer(columns::PRECURSOR_CHARGE)?;
        let precursor_charge = i32::try_from(charge).map_err(|_| {
            ExportError::invalid(columns::PRECURSOR_CHARGE, &charge.to_string(), line)
        })?;

        let area_normalized_cell = self.cell(columns::AREA_NORMALIZED);
        let area_normalized = parse_percentage(area_normalized_cell).ok_or_else(|| {
            ExportError::invalid(columns::AREA_NORMALIZED, area_normalized_cell, line)
        })?;

        let retention_time = self.float(columns::RETENTION_TIME)?;
        let start_time = self.float(columns::START_TIME)?;
        let end_time = self.float(columns::END_TIME)?;

        Ok(SkylineRecord {
            line,
            file_name: self.text(columns::FILE_NAME),
            swab,
            swab_id,
            patient_sample: self.integer(columns::PATIENT_SAMPLE)?,
            peptide_modified_sequence: self.text(columns::PEPTIDE_MODIFIED_SEQUENCE),
            precursor_charge,
            fragment_ion,
            fragment_number,
            fragment_ion_type,
            best_retention_time: self.float(columns::BEST_RETENTION_TIME)?,
            total_area_fragment: self.float(columns::TOTAL_AREA_FRAGMENT)?,
            library_dot_product: self.float(columns::LIBRARY_DOT_PRODUCT)?,
            total_background: self.float(columns::TOTAL_BACKGROUND)?,
            max_fwhm: self.float(columns::MAX_FWHM)?,
            retention_time,
            start_time,
            end_time,
            fwhm: self.float(columns::FWHM)?,
            area: self.float(columns::AREA)?,
            background: self.float(columns::BACKGROUND)?,
            height: self.float(columns::HEIGHT)?,
            library_rank: self.float(columns::LIBRARY_RANK)?,
            library_intensity: self.float(columns::LIBRARY_INTENSITY)?,
            area_normalized,
            retention_time_deviation: retention_time_deviation(retention_time, start_time, end_time),
        })
    }
}

fn record_line(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or_default()
}
