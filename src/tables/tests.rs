use super::*;
use crate::columns;
use crate::export::SkylineExport;
use crate::testing::{dense_rows, export_text, ExportRow};

fn split_rows(rows: &[ExportRow]) -> Result<SplitTables, SplitError> {
    let export = SkylineExport::from_reader(export_text(rows).as_bytes()).unwrap();
    split(export.into_records())
}

#[test]
fn test_indices_follow_first_appearance() {
    let rows = vec![
        ExportRow::new("b.raw", "SECONDK", "y1"),
        ExportRow::new("b.raw", "FIRSTK", "y1"),
        ExportRow::new("a.raw", "SECONDK", "y1"),
        ExportRow::new("a.raw", "FIRSTK", "y1"),
    ];
    let tables = split_rows(&rows).unwrap();

    assert_eq!(tables.samples.index_of("b.raw"), Some(0));
    assert_eq!(tables.samples.index_of("a.raw"), Some(1));
    assert_eq!(tables.precursors.index_of(&PrecursorKey::new("SECONDK", 2)), Some(0));
    assert_eq!(tables.precursors.index_of(&PrecursorKey::new("FIRSTK", 2)), Some(1));
    assert_eq!(tables.samples.key(1).map(String::as_str), Some("a.raw"));
}

#[test]
fn test_charge_states_are_distinct_precursors() {
    let rows = vec![
        ExportRow::new("a.raw", "PEPTIDEK", "y1").charge("2"),
        ExportRow::new("a.raw", "PEPTIDEK", "y1").charge("3"),
    ];
    let tables = split_rows(&rows).unwrap();
    assert_eq!(tables.precursors.len(), 2);
    assert_eq!(tables.transition_table.composite_ids(), vec!["0_y1", "1_y1"]);
}

#[test]
fn test_dense_cardinalities() {
    let rows = dense_rows(3, &[("PEPTIDEK", &["y1", "y2"]), ("ANOTHERK", &["y3", "b4", "y5"])]);
    let tables = split_rows(&rows).unwrap();

    assert_eq!(tables.samples.len(), 3);
    assert_eq!(tables.precursors.len(), 2);
    assert_eq!(tables.sample_table.len(), 3);
    assert_eq!(tables.precursor_table.len(), 6);
    assert_eq!(tables.transition_table.len(), rows.len());
    assert_eq!(
        tables.precursor_table.attributes.names().collect::<Vec<_>>(),
        columns::PRECURSOR_ATTRIBUTES.to_vec()
    );
    assert_eq!(
        tables.transition_table.attributes.names().collect::<Vec<_>>(),
        columns::TRANSITION_ATTRIBUTES.to_vec()
    );
}

#[test]
fn test_missing_precursor_fails_cardinality() {
    let mut rows = dense_rows(2, &[("PEPTIDEK", &["y1"]), ("ANOTHERK", &["y2"])]);
    // sample_0 loses ANOTHERK entirely
    rows.remove(1);

    match split_rows(&rows).unwrap_err() {
        SplitError::Cardinality {
            table,
            expected,
            actual,
        } => {
            assert_eq!(table, TableKind::Precursor);
            assert_eq!(expected, 4);
            assert_eq!(actual, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_conflicting_precursor_values_fail_cardinality() {
    let mut rows = dense_rows(1, &[("PEPTIDEK", &["y1", "y2"])]);
    rows[1].total_area_fragment = "5".to_string();

    let err = split_rows(&rows).unwrap_err();
    assert!(matches!(
        err,
        SplitError::Cardinality { table: TableKind::Precursor, expected: 1, actual: 2 }
    ));
}

#[test]
fn test_conflicting_swab_fails_cardinality() {
    let rows = vec![
        ExportRow::new("a.raw", "PEPTIDEK", "y1"),
        ExportRow::new("a.raw", "PEPTIDEK", "y2").swab("eSwab"),
    ];
    let err = split_rows(&rows).unwrap_err();
    assert!(matches!(
        err,
        SplitError::Cardinality { table: TableKind::Sample, expected: 1, actual: 2 }
    ));
}

#[test]
fn test_duplicated_record_fails_cardinality() {
    let mut rows = dense_rows(1, &[("PEPTIDEK", &["y1", "y2"])]);
    rows.push(rows[0].clone());

    let err = split_rows(&rows).unwrap_err();
    assert!(matches!(
        err,
        SplitError::Cardinality { table: TableKind::Transition, expected: 3, actual: 2 }
    ));
}

#[test]
fn test_patient_sample_mapping() {
    let rows = dense_rows(3, &[("PEPTIDEK", &["y1", "y2"])]);
    let tables = split_rows(&rows).unwrap();

    assert_eq!(tables.patient_samples.len(), 3);
    assert_eq!(tables.patient_samples.get(100), Some(0));
    assert_eq!(tables.patient_samples.get(102), Some(2));
    assert_eq!(tables.patient_samples.get(7), None);
}

#[test]
fn test_patient_mapping_keeps_last_sample() {
    let mapping = PatientSampleMapping::from_pairs([(5, 0), (6, 1), (5, 2)]);
    assert_eq!(mapping.get(5), Some(2));
    assert_eq!(mapping.iter().collect::<Vec<_>>(), vec![(5, 2), (6, 1)]);
}

#[test]
fn test_patient_mapping_json_roundtrip() {
    let mapping = PatientSampleMapping::from_pairs([(101, 0), (205, 1)]);
    let json = mapping.to_json().unwrap();
    assert!(json.contains("\"101\": 0"));

    let restored = PatientSampleMapping::from_json(&json).unwrap();
    assert_eq!(restored, mapping);
}

#[test]
fn test_composite_ids() {
    let rows = dense_rows(1, &[("PEPTIDEK", &["y1", "b2"]), ("ANOTHERK", &["y10"])]);
    let tables = split_rows(&rows).unwrap();
    assert_eq!(
        tables.transition_table.composite_ids(),
        vec!["0_y1", "0_b2", "1_y10"]
    );
    assert_eq!(transition_id(7, "y10"), "7_y10");
}
