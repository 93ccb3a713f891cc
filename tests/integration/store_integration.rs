//! Store integration tests against a real data file.

use roster::error::StoreError;
use roster::store::{FileRecordStore, RecordStore, DEFAULT_NEXT_ID};
use roster::store::codec::{decode, encode};
use roster::types::{RecordPatch, StudentRecord};
use std::fs;
use tempfile::TempDir;

fn student(id: &str, name: &str, gpa: f64) -> StudentRecord {
    StudentRecord::new(id, name, 20, "CS", gpa)
}

#[test]
fn test_add_then_load_returns_record() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("students.txt");
    let store = FileRecordStore::open(&path).unwrap();

    store.add(student("S1", "Ann", 8.2)).unwrap();

    let reopened = FileRecordStore::open(&path).unwrap();
    let records = reopened.load_all().unwrap();
    assert_eq!(records, vec![student("S1", "Ann", 8.2)]);
}

#[test]
fn test_file_layout_is_counter_then_blocks() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("students.txt");
    let store = FileRecordStore::open(&path).unwrap();

    store.add(StudentRecord::new("S1", "Ann", 20, "CS", 8.2)).unwrap();
    store.add(StudentRecord::new("S2", "Ben", 22, "Math", 9.0)).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(
        contents,
        format!("{}\nS1\nAnn\n20\nCS\n8.2\nS2\nBen\n22\nMath\n9\n", DEFAULT_NEXT_ID)
    );
    assert!(!temp_dir.path().join("students.txt.tmp").exists());
}

#[test]
fn test_duplicate_add_leaves_file_unchanged() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("students.txt");
    let store = FileRecordStore::open(&path).unwrap();
    store.add(student("S1", "Ann", 8.2)).unwrap();
    let before = fs::read_to_string(&path).unwrap();

    let err = store.add(student("S1", "Other", 3.0)).unwrap_err();
    assert!(matches!(err, StoreError::DuplicateId(ref id) if id == "S1"));
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
    assert_eq!(store.load_all().unwrap().len(), 1);
}

#[test]
fn test_update_and_delete_of_absent_id() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileRecordStore::open(temp_dir.path().join("students.txt")).unwrap();
    store.add(student("S1", "Ann", 8.2)).unwrap();

    let err = store.update("S9", &RecordPatch::with_gpa(5.0)).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
    let err = store.delete("S9").unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
    assert_eq!(store.load_all().unwrap(), vec![student("S1", "Ann", 8.2)]);
}

#[test]
fn test_delete_preserves_relative_order() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileRecordStore::open(temp_dir.path().join("students.txt")).unwrap();
    for (id, name) in [("A1", "Ann"), ("B2", "Ben"), ("C3", "Cat"), ("D4", "Dan")] {
        store.add(student(id, name, 7.0)).unwrap();
    }

    let removed = store.delete("B2").unwrap();
    assert_eq!(removed.name, "Ben");

    let ids: Vec<String> = store
        .load_all()
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec!["A1", "C3", "D4"]);
}

#[test]
fn test_load_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileRecordStore::open(temp_dir.path().join("students.txt")).unwrap();
    store.add(student("A1", "Ann", 7.0)).unwrap();
    store.add(student("B2", "Ben", 4.5)).unwrap();

    let first = store.load_all().unwrap();
    let second = store.load_all().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_missing_file_loads_empty_and_is_not_created() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("students.txt");
    let store = FileRecordStore::open(&path).unwrap();
    assert!(store.load_all().unwrap().is_empty());
    assert!(!path.exists());

    store.add(student("A1", "Ann", 7.0)).unwrap();
    assert!(path.exists());
}

#[test]
fn test_truncated_tail_is_decode_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("students.txt");
    fs::write(&path, "1001\nS1\nAnn\n20\nCS\n8.2\nS2\nBen\n").unwrap();

    let err = FileRecordStore::open(&path).err().unwrap();
    assert!(matches!(err, StoreError::Decode { line: 7, .. }), "{err}");
}

#[test]
fn test_line_break_in_field_is_rejected_and_file_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("students.txt");
    let store = FileRecordStore::open(&path).unwrap();
    store.add(student("S1", "Ann", 8.2)).unwrap();
    let before = fs::read_to_string(&path).unwrap();

    let err = store.add(student("S2", "Bad\nName", 6.0)).unwrap_err();
    assert!(matches!(err, StoreError::Unencodable { field: "name", .. }), "{err}");
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
    assert_eq!(store.find_by_id("S2").unwrap(), None);
}

#[test]
fn test_counter_line_is_preserved() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("students.txt");
    fs::write(&path, "2042\nS1\nAnn\n20\nCS\n8.2\n").unwrap();

    let store = FileRecordStore::open(&path).unwrap();
    store.add(student("S2", "Ben", 6.0)).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("2042\n"));
}

#[test]
fn test_round_trip_of_encoder_output() {
    let input = "1001\nS1\nAnn\n20\nCS\n8.2\nS2\nBen\n22\nMath\n9\nS3\nCy\n19\nArt\n4.75\n";
    let decoded = decode(input).unwrap();
    assert_eq!(encode(&decoded).unwrap(), input);
}

#[test]
fn test_external_edit_is_seen_by_next_mutation() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("students.txt");
    let store = FileRecordStore::open(&path).unwrap();
    store.add(student("S1", "Ann", 8.2)).unwrap();

    // Another process appends a record behind the store's back.
    let other = FileRecordStore::open(&path).unwrap();
    other.add(student("S2", "Ben", 6.0)).unwrap();

    store.add(student("S3", "Cat", 7.0)).unwrap();
    let ids: Vec<String> = store.load_all().unwrap().into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["S1", "S2", "S3"]);
}

#[test]
fn test_lifecycle_scenario() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileRecordStore::open(temp_dir.path().join("students.txt")).unwrap();

    store
        .add(StudentRecord::new("S1", "Ann", 20, "CS", 8.2))
        .unwrap();
    let err = store
        .add(StudentRecord::new("S1", "Ann", 20, "CS", 8.2))
        .unwrap_err();
    assert!(matches!(err, StoreError::DuplicateId(_)));

    let updated = store.update("S1", &RecordPatch::with_gpa(9.0)).unwrap();
    assert_eq!(updated.gpa, 9.0);
    let found = store.find_by_id("S1").unwrap().unwrap();
    assert_eq!(found.gpa, 9.0);
    assert_eq!(found.name, "Ann");
    assert_eq!(found.age, 20);
    assert_eq!(found.course, "CS");

    store.delete("S1").unwrap();
    assert_eq!(store.find_by_id("S1").unwrap(), None);
}

#[test]
fn test_find_by_id_sees_external_writes() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("students.txt");
    let store = FileRecordStore::open(&path).unwrap();
    assert_eq!(store.find_by_id("S1").unwrap(), None);

    let other = FileRecordStore::open(&path).unwrap();
    other.add(student("S1", "Ann", 8.2)).unwrap();

    assert_eq!(store.find_by_id("S1").unwrap(), Some(student("S1", "Ann", 8.2)));
    assert_eq!(store.load_all().unwrap().len(), 1);
}

#[test]
fn test_crlf_data_file_loads_and_stays_writable() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("students.txt");
    fs::write(&path, "1001\r\nS1\r\nAnn\r\n20\r\nCS\r\n8.2\r\n").unwrap();

    let store = FileRecordStore::open(&path).unwrap();
    let records = store.load_all().unwrap();
    assert_eq!(records, vec![StudentRecord::new("S1", "Ann", 20, "CS", 8.2)]);
    assert!(store.find_by_id("S1").unwrap().is_some());

    store.add(student("S2", "Ben", 6.0)).unwrap();
    store.delete("S1").unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents, "1001\nS2\nBen\n20\nCS\n6\n");
}
