use crate::columns;

use super::ExportError;

/// Fixed lookup table from a categorical label to a small integer code
#[derive(Debug, Clone, Copy)]
pub struct CategoryMap {
    column: &'static str,
    entries: &'static [(&'static str, u8)],
}

/// Swab type: `UTM` → 0, `eSwab` → 1
pub const SWAB_TYPES: CategoryMap =
    CategoryMap::new(columns::SWAB, &[("UTM", 0), ("eSwab", 1)]);

/// Fragment ion type: `b` → 0, `y` → 1
pub const ION_TYPES: CategoryMap =
    CategoryMap::new(columns::FRAGMENT_ION_TYPE, &[("b", 0), ("y", 1)]);

impl CategoryMap {
    /// Create a mapping for `column`
    pub const fn new(column: &'static str, entries: &'static [(&'static str, u8)]) -> Self {
        Self { column, entries }
    }

    /// Column this mapping applies to
    pub fn column(&self) -> &'static str {
        self.column
    }

    /// Code for `label`, or `None` if unmapped
    pub fn code(&self, label: &str) -> Option<u8> {
        self.entries
            .iter()
            .find(|(known, _)| *known == label)
            .map(|&(_, code)| code)
    }

    /// Accepted labels in mapping order
    pub fn labels(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().map(|&(label, _)| label)
    }

    /// Code for `label`; unmapped labels are an [`ExportError::UnknownCategory`]
    pub fn lookup(&self, label: &str, line: u64) -> Result<u8, ExportError> {
        self.code(label).ok_or_else(|| ExportError::UnknownCategory {
            column: self.column.to_string(),
            value: label.to_string(),
            expected: self.labels().collect::<Vec<_>>().join(", "),
            line,
        })
    }
}

/// Fragment number of an ion label such as `y10`: the leading ion-type letter
/// is stripped and the remainder parsed.
pub fn fragment_number(label: &str) -> Option<u32> {
    let label = label.trim();
    let rest = ION_TYPES
        .labels()
        .find_map(|letter| label.strip_prefix(letter))?;
    rest.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swab_codes() {
        assert_eq!(SWAB_TYPES.code("UTM"), Some(0));
        assert_eq!(SWAB_TYPES.code("eSwab"), Some(1));
        assert_eq!(SWAB_TYPES.code("eswab"), None);
    }

    #[test]
    fn test_unknown_category_error() {
        let err = ION_TYPES.lookup("precursor", 7).unwrap_err();
        match err {
            ExportError::UnknownCategory {
                column,
                value,
                expected,
                line,
            } => {
                assert_eq!(column, columns::FRAGMENT_ION_TYPE);
                assert_eq!(value, "precursor");
                assert_eq!(expected, "b, y");
                assert_eq!(line, 7);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_fragment_number() {
        assert_eq!(fragment_number("y7"), Some(7));
        assert_eq!(fragment_number("b12"), Some(12));
        assert_eq!(fragment_number("precursor"), None);
        assert_eq!(fragment_number("y"), None);
        assert_eq!(fragment_number("7"), None);
    }
}
