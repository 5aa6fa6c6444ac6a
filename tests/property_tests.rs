//! Property-based tests over randomly shaped dense exports.

use std::collections::HashSet;

use mzfeatures::columns::REQUIRED;
use mzfeatures::prelude::*;
use proptest::prelude::*;

const PEPTIDES: [&str; 4] = ["PEPTIDEK", "SECONDR", "THIRDK", "FOURTHR"];
const FRAGMENTS: [&str; 5] = ["y1", "y2", "y3", "b2", "b4"];

/// Export text where every sample measures every fragment of every precursor
fn dense_export(samples: usize, fragments_per_precursor: &[usize], areas: &[u32]) -> String {
    let mut text = REQUIRED.join(";");
    let mut cell = 0;
    for s in 0..samples {
        for (p, &n_fragments) in fragments_per_precursor.iter().enumerate() {
            for fragment in &FRAGMENTS[..n_fragments] {
                let area = areas[cell % areas.len()];
                cell += 1;
                text.push_str(&format!(
                    "\nrun_{s}.raw;eSwab;{};3;{};{};{};20,1;19,8;20,6;20,2;5000;50;0,9;0,3;0,2;{};{};1000;2;50;10,0%",
                    PEPTIDES[p],
                    fragment,
                    &fragment[..1],
                    500 + s,
                    area,
                    area % 7,
                ));
            }
        }
    }
    text.push('\n');
    text
}

fn shape() -> impl Strategy<Value = (usize, Vec<usize>, Vec<u32>)> {
    (
        1usize..6,
        prop::collection::vec(1usize..=FRAGMENTS.len(), 1..=PEPTIDES.len()),
        prop::collection::vec(0u32..100_000, 1..16),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Table cardinalities and matrix shape follow from the export's shape
    #[test]
    fn test_dense_export_shape((samples, fragments, areas) in shape()) {
        let text = dense_export(samples, &fragments, &areas);
        let import = FeatureImport::from_reader(text.as_bytes(), &ImportConfig::default()).unwrap();
        let summary = import.summary();
        let transitions_per_sample: usize = fragments.iter().sum();

        prop_assert_eq!(summary.samples, samples);
        prop_assert_eq!(summary.precursors, fragments.len());
        prop_assert_eq!(summary.transitions, samples * transitions_per_sample);
        prop_assert_eq!(summary.derived_exclusions, 0);

        let matrix = import.features();
        prop_assert_eq!(matrix.n_samples(), samples);
        prop_assert_eq!(
            matrix.n_features(),
            1 + 6 * fragments.len() + 11 * transitions_per_sample
        );
        for column in matrix.frame().columns() {
            prop_assert!(column.values.iter().all(|v| v.is_finite()));
        }
    }

    /// Identical input yields identical indices and matrix
    #[test]
    fn test_import_is_deterministic((samples, fragments, areas) in shape()) {
        let text = dense_export(samples, &fragments, &areas);
        let first = FeatureImport::from_reader(text.as_bytes(), &ImportConfig::default()).unwrap();
        let second = FeatureImport::from_reader(text.as_bytes(), &ImportConfig::default()).unwrap();

        prop_assert_eq!(first.sample_index(), second.sample_index());
        prop_assert_eq!(first.precursor_index(), second.precursor_index());
        prop_assert_eq!(first.features(), second.features());
        prop_assert_eq!(first.patient_sample_mapping(), second.patient_sample_mapping());
    }

    /// Excluded transition identifiers never show up as column suffixes
    #[test]
    fn test_exclusions_never_appear(
        (samples, fragments, areas) in shape(),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 0..4),
    ) {
        let ids: Vec<String> = fragments
            .iter()
            .enumerate()
            .flat_map(|(p, &n)| FRAGMENTS[..n].iter().map(move |f| format!("{p}_{f}")))
            .collect();
        let excluded: HashSet<String> = picks.iter().map(|i| ids[i.index(ids.len())].clone()).collect();

        let mut config = ImportConfig::default();
        for id in &excluded {
            config = config.exclude_transition(id.clone());
        }

        let text = dense_export(samples, &fragments, &areas);
        let import = FeatureImport::from_reader(text.as_bytes(), &config).unwrap();

        for name in import.feature_names() {
            let suffix = name.rsplit(' ').next().unwrap_or_default();
            prop_assert!(!excluded.contains(suffix), "column {} is excluded", name);
        }
        prop_assert_eq!(
            import.features().n_features(),
            1 + 6 * fragments.len() + 11 * (ids.len() - excluded.len())
        );
    }
}
