//! Cell-level parsing for `,`-decimal exports.

/// Markers Skyline and spreadsheet tools write for absent values.
const ABSENT_MARKERS: [&str; 8] = ["", "#N/A", "N/A", "NA", "NaN", "nan", "null", "NULL"];

/// True if the cell holds no value
pub fn is_absent(cell: &str) -> bool {
    ABSENT_MARKERS.contains(&cell.trim())
}

/// Parse a float written with either `,` or `.` as decimal separator
pub fn parse_decimal(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.contains(',') {
        cell.replace(',', ".").parse().ok()
    } else {
        cell.parse().ok()
    }
}

/// Parse an integer; integral decimals such as `12,0` are accepted
pub fn parse_integer(cell: &str) -> Option<i64> {
    let cell = cell.trim();
    if let Ok(value) = cell.parse::<i64>() {
        return Some(value);
    }
    let value = parse_decimal(cell)?;
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

/// Parse a percentage string such as `12,3%` into `12.3`
pub fn parse_percentage(cell: &str) -> Option<f64> {
    parse_decimal(&cell.replace('%', ""))
}
