//! Import configuration.
//!
//! Only the handling of incomplete transitions is configurable; column names,
//! categorical mappings and the feature set are fixed.
//!
//! ```toml
//! [import]
//! derive_incomplete_transitions = true
//! excluded_transitions = ["7_y10", "11_y3"]
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Settings of a feature import
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Exclude every transition identifier that is not measured in all samples
    pub derive_incomplete_transitions: bool,

    /// Composite `"<PrecursorIndex>_<FragmentIon>"` identifiers that are always excluded
    pub excluded_transitions: Vec<String>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            derive_incomplete_transitions: true,
            excluded_transitions: Vec::new(),
        }
    }
}

impl ImportConfig {
    /// Default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Always exclude `id` from the transition pivot
    pub fn exclude_transition(mut self, id: impl Into<String>) -> Self {
        self.excluded_transitions.push(id.into());
        self
    }

    /// Only exclude the configured identifiers; incomplete ones fail the import
    pub fn without_derived_exclusions(mut self) -> Self {
        self.derive_incomplete_transitions = false;
        self
    }

    /// Configured identifiers as a set
    pub fn excluded_set(&self) -> HashSet<String> {
        self.excluded_transitions.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = ImportConfig::new()
            .exclude_transition("7_y10")
            .exclude_transition("11_y3")
            .without_derived_exclusions();

        assert!(!config.derive_incomplete_transitions);
        assert_eq!(config.excluded_set().len(), 2);
        assert!(config.excluded_set().contains("11_y3"));
    }

    #[test]
    fn test_partial_deserialize_keeps_defaults() {
        let config: ImportConfig = serde_json::from_str(r#"{"excluded_transitions": ["0_y1"]}"#).unwrap();
        assert!(config.derive_incomplete_transitions);
        assert_eq!(config.excluded_transitions, vec!["0_y1"]);
    }
}
