//! Columnar table of named `f64` columns.
//!
//! [`Frame`] is the structure-of-arrays container shared by the feature deriver,
//! the pivot engine and the feature matrix. Every column has exactly
//! [`Frame::rows`] values and column names are unique.

/// Errors raised by column bookkeeping
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// Column length differs from the frame's row count
    #[error("Column '{name}' has {actual} values, frame has {expected} rows")]
    LengthMismatch {
        /// Column name
        name: String,
        /// Row count of the frame
        expected: usize,
        /// Length of the offending column
        actual: usize,
    },

    /// A column with this name already exists
    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    /// No column with this name
    #[error("No such column: {0}")]
    MissingColumn(String),
}

/// A named column of values
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name
    pub name: String,
    /// Values, one per row
    pub values: Vec<f64>,
}

/// Ordered set of equally long named columns
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    columns: Vec<Column>,
    rows: usize,
}

impl Frame {
    /// Create an empty frame with a fixed row count
    pub fn new(rows: usize) -> Self {
        Self {
            columns: Vec::new(),
            rows,
        }
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// True if the frame has no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Append a column at the end
    pub fn push_column(
        &mut self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<(), FrameError> {
        let name = name.into();
        if values.len() != self.rows {
            return Err(FrameError::LengthMismatch {
                name,
                expected: self.rows,
                actual: values.len(),
            });
        }
        if self.position(&name).is_some() {
            return Err(FrameError::DuplicateColumn(name));
        }
        self.columns.push(Column { name, values });
        Ok(())
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.position(name).map(|i| self.columns[i].values.as_slice())
    }

    /// Remove a column and return its values
    pub fn take_column(&mut self, name: &str) -> Result<Vec<f64>, FrameError> {
        let i = self
            .position(name)
            .ok_or_else(|| FrameError::MissingColumn(name.to_string()))?;
        Ok(self.columns.remove(i).values)
    }

    /// Column names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// All columns in order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Values of one row, in column order
    pub fn row(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.rows {
            return None;
        }
        Some(self.columns.iter().map(|c| c.values[index]).collect())
    }

    /// New frame holding the given rows, in the given order
    pub fn select_rows(&self, rows: &[usize]) -> Frame {
        Frame {
            columns: self
                .columns
                .iter()
                .map(|c| Column {
                    name: c.name.clone(),
                    values: rows.iter().map(|&r| c.values[r]).collect(),
                })
                .collect(),
            rows: rows.len(),
        }
    }

    /// Column names with mutable access to their values
    pub fn values_mut(&mut self) -> impl Iterator<Item = (&str, &mut [f64])> {
        self.columns
            .iter_mut()
            .map(|c| (c.name.as_str(), c.values.as_mut_slice()))
    }

    /// Column-wise concatenation of frames with equal row counts
    pub fn hconcat(frames: impl IntoIterator<Item = Frame>, rows: usize) -> Result<Frame, FrameError> {
        let mut out = Frame::new(rows);
        for frame in frames {
            for column in frame.columns {
                out.push_column(column.name, column.values)?;
            }
        }
        Ok(out)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }
}
