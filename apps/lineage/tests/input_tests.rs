//! Tests for record input, configuration and the convert command.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use lineage::cli::{cmd_convert, load_tree, status_report};
use lineage::config::{ColumnNames, Config};
use lineage::input::{row_from_record, rows_from_json};
use lineage_core::{LineageError, SourceDate, Submitter};
use serde_json::json;
use std::path::PathBuf;

// =============================================================================
// FIXTURES
// =============================================================================

fn family_json() -> serde_json::Value {
    json!([
        {
            "ID": "Kovács_Ödön", "father's ID": "", "mother's ID": "",
            "last name": "Kovács", "title": "", "first name": "Ödön", "midname": "",
            "nickname": "", "gender": 0, "email": "", "webpage": "",
            "date of birth": "08/04/1931", "place of birth": "[HU] [Budapest]",
            "date of death": "", "place of death": "", "is living?": 0
        },
        {
            "ID": "Nagy_Eva", "father's ID": "", "mother's ID": "",
            "last name": "Nagy", "title": "", "first name": "Éva", "midname": "",
            "nickname": "Evi", "gender": 1, "email": "", "webpage": "",
            "date of birth": 1935, "place of birth": "",
            "date of death": "", "place of death": "", "is living?": 1
        },
        {
            "ID": "child1", "father's ID": "Kovács_Ödön", "mother's ID": "Nagy_Eva",
            "last name": "Kovács", "title": "dr.", "first name": "Péter", "midname": "János",
            "nickname": "", "gender": 0, "email": "peter@example.com", "webpage": "",
            "date of birth": "", "place of birth": "",
            "date of death": "", "place of death": "", "is living?": 1
        }
    ])
}

fn write_input(dir: &std::path::Path, value: &serde_json::Value) -> PathBuf {
    let path = dir.join("family.json");
    std::fs::write(&path, serde_json::to_vec(value).unwrap()).unwrap();
    path
}

// =============================================================================
// RECORD INPUT
// =============================================================================

#[test]
fn records_become_rows() {
    let bytes = serde_json::to_vec(&family_json()).unwrap();
    let rows = rows_from_json(&bytes, &ColumnNames::default()).unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].id.as_str(), "Kovács_Ödön");
    assert_eq!(rows[0].sex_code, Some(0));
    assert_eq!(rows[0].living, Some(0));
    assert!(rows[0].title.is_none());
    assert_eq!(
        rows[0].birth_date,
        Some(SourceDate::Text("08/04/1931".to_string()))
    );
    assert_eq!(rows[1].birth_date, Some(SourceDate::Year(1935)));
    assert_eq!(rows[1].nickname.as_deref(), Some("Evi"));
    assert_eq!(
        rows[2].father_id.as_ref().map(|s| s.as_str()),
        Some("Kovács_Ödön")
    );
    assert_eq!(rows[2].middle_name.as_deref(), Some("János"));
}

#[test]
fn numeric_ids_are_text() {
    let record = json!({"ID": 17, "first name": "A", "last name": "B", "father's ID": 3});
    let row = row_from_record(record.as_object().unwrap(), &ColumnNames::default(), 1).unwrap();

    assert_eq!(row.id.as_str(), "17");
    assert_eq!(row.father_id.as_ref().map(|s| s.as_str()), Some("3"));
    assert!(row.mother_id.is_none());
}

#[test]
fn missing_id_rejected() {
    let record = json!({"ID": "", "first name": "A", "last name": "B"});
    let result = row_from_record(record.as_object().unwrap(), &ColumnNames::default(), 4);
    match result {
        Err(LineageError::MissingField { row, field }) => {
            assert_eq!(row, 4);
            assert_eq!(field, "ID");
        }
        other => panic!("expected missing field, got {:?}", other),
    }
}

#[test]
fn missing_name_column_rejected() {
    let record = json!({"ID": "x", "first name": "A"});
    assert!(matches!(
        row_from_record(record.as_object().unwrap(), &ColumnNames::default(), 1),
        Err(LineageError::MissingField { .. })
    ));
}

#[test]
fn non_array_input_rejected() {
    assert!(matches!(
        rows_from_json(b"{\"ID\": 1}", &ColumnNames::default()),
        Err(LineageError::InvalidInput(_))
    ));
    assert!(matches!(
        rows_from_json(b"[1, 2]", &ColumnNames::default()),
        Err(LineageError::InvalidInput(_))
    ));
}

// =============================================================================
// CONFIGURATION
// =============================================================================

#[test]
fn config_overrides_selected_columns() {
    let config = Config::parse(
        r#"
        pictures = "photos"

        [submitter]
        first_name = "Péter"
        last_name = "Kiss"

        [columns]
        id = "Azonosító"
        sex = "nem"
        "#,
    )
    .unwrap();

    assert_eq!(config.columns.id, "Azonosító");
    assert_eq!(config.columns.sex, "nem");
    assert_eq!(config.columns.first_name, "first name");
    assert_eq!(config.pictures, Some(PathBuf::from("photos")));
    assert_eq!(config.submitter, Some(Submitter::new("Péter", "Kiss")));
}

#[test]
fn config_rejects_unknown_keys() {
    assert!(matches!(
        Config::parse("[columns]\nshoe_size = \"x\"\n"),
        Err(LineageError::ConfigError(_))
    ));
}

#[test]
fn submitter_resolution() {
    let empty = Config::default();
    assert!(empty.resolve_submitter(None, None).is_err());
    assert!(
        empty
            .resolve_submitter(Some("A".to_string()), None)
            .is_err()
    );
    assert_eq!(
        empty
            .resolve_submitter(Some("A".to_string()), Some("B".to_string()))
            .unwrap(),
        Submitter::new("A", "B")
    );

    let configured = Config::parse("[submitter]\nfirst_name = \"X\"\nlast_name = \"Y\"\n").unwrap();
    assert_eq!(
        configured.resolve_submitter(None, None).unwrap(),
        Submitter::new("X", "Y")
    );
}

#[test]
fn pictures_prefer_command_line() {
    let config = Config::parse("pictures = \"from_file\"\n").unwrap();
    assert_eq!(
        config.resolve_pictures(Some(PathBuf::from("from_cli"))),
        Some(PathBuf::from("from_cli"))
    );
    assert_eq!(
        config.resolve_pictures(None),
        Some(PathBuf::from("from_file"))
    );
}

// =============================================================================
// CONVERT COMMAND
// =============================================================================

#[test]
fn convert_writes_document_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), &family_json());
    let pictures = dir.path().join("pics");
    std::fs::create_dir(&pictures).unwrap();
    std::fs::write(pictures.join("kovacs_odon.jpg"), b"jpg").unwrap();
    let output = dir.path().join("family.ged");

    cmd_convert(
        &Config::default(),
        &input,
        Some(&pictures),
        &Submitter::new("Péter", "Kiss"),
        Some(&output),
    )
    .unwrap();

    let doc = std::fs::read_to_string(&output).unwrap();
    assert!(doc.starts_with("0 HEAD\n1 SOUR XLSTOGEDCOM\n"));
    assert!(doc.contains("1 NAME Péter /Kiss/\n"));
    assert!(doc.contains(
        "1 BIRT\n2 DATE 08 APR 1931\n2 PLAC Budapest\n2 ADDR\n3 CITY Budapest\n3 CTRY HU\n"
    ));
    assert!(doc.contains("1 DEAT Y\n1 FAMS @F1@\n1 OBJE @O0@\n"));
    assert!(doc.contains("1 BIRT\n2 DATE 1935\n"));
    assert!(doc.contains("1 NAME János Péter /dr. Kovács/\n"));
    assert!(doc.contains("0 @F1@ FAM\n1 HUSB @I1@\n1 WIFE @I2@\n1 CHIL @I3@\n"));
    assert!(doc.contains(&format!(
        "0 @O0@ OBJE\n1 FILE {}\n2 FORM jpg\n",
        pictures.join("kovacs_odon.jpg").display()
    )));
    assert!(doc.ends_with("0 TRLR\n"));
}

#[test]
fn status_reports_counts() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), &family_json());
    let pictures = dir.path().join("pics");
    std::fs::create_dir(&pictures).unwrap();
    std::fs::write(pictures.join("kovacs_odon.jpg"), b"jpg").unwrap();

    let text = status_report(&Config::default(), &input, Some(&pictures), false).unwrap();
    assert!(text.starts_with("Lineage Tree Status\n"));
    assert!(text.contains("Individuals:        3\n"));
    assert!(text.contains("Families:           1\n"));
    assert!(text.contains("Without parents:    2\n"));
    assert!(text.ends_with("With picture:       1"));

    let json: serde_json::Value = serde_json::from_str(
        &status_report(&Config::default(), &input, Some(&pictures), true).unwrap(),
    )
    .unwrap();
    assert_eq!(json["metrics"]["individuals"], 3);
    assert_eq!(json["metrics"]["families"], 1);
    assert_eq!(json["metrics"]["linked_children"], 1);
    assert_eq!(json["metrics"]["spouses"], 2);
    assert_eq!(json["metrics"]["with_picture"], 1);
    assert!(json["pictures"].is_string());
}

#[test]
fn status_without_pictures() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), &family_json());

    let json: serde_json::Value =
        serde_json::from_str(&status_report(&Config::default(), &input, None, true).unwrap())
            .unwrap();
    assert!(json["pictures"].is_null());
    assert_eq!(json["metrics"]["with_picture"], 0);
}

#[test]
fn line_break_in_cell_fails_convert() {
    let dir = tempfile::tempdir().unwrap();
    let mut records = family_json();
    records[1]["nickname"] = json!("Evi\r\n0 @X@ INDI");
    let input = write_input(dir.path(), &records);
    let output = dir.path().join("family.ged");

    let result = cmd_convert(
        &Config::default(),
        &input,
        None,
        &Submitter::new("A", "B"),
        Some(&output),
    );

    assert!(matches!(
        result,
        Err(LineageError::LineBreak { row: 2, .. })
    ));
    assert!(!output.exists());
}

#[test]
fn convert_failure_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut records = family_json();
    records[2]["mother's ID"] = json!("nobody");
    let input = write_input(dir.path(), &records);
    let output = dir.path().join("family.ged");

    let result = cmd_convert(
        &Config::default(),
        &input,
        None,
        &Submitter::new("A", "B"),
        Some(&output),
    );

    assert!(matches!(
        result,
        Err(LineageError::UnknownIdentifier { row: 3, .. })
    ));
    assert!(!output.exists());
}

#[test]
fn load_tree_honours_column_names() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        dir.path(),
        &json!([
            {"azon": "a", "kereszt": "Anna", "vezetek": "Nagy"},
            {"azon": "b", "kereszt": "Bela", "vezetek": "Nagy", "anya": "a"}
        ]),
    );
    let config = Config::parse(
        "[columns]\nid = \"azon\"\nfirst_name = \"kereszt\"\nlast_name = \"vezetek\"\nmother_id = \"anya\"\n",
    )
    .unwrap();

    let tree = load_tree(&config, &input).unwrap();
    assert_eq!(tree.registry().len(), 1);
    assert_eq!(tree.spouse_families(&tree.rows()[0]).len(), 1);
}
