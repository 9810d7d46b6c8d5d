//! Integration tests for loading configuration documents from disk.

use std::fs;

use seamm_config::{ConfigError, Document};
use tempfile::TempDir;


#[test]
fn from_path_reads_and_resolves_a_file() {
    let temporary_directory = TempDir::new().unwrap();
    let file_path = temporary_directory.path().join("seamm.ini");

    fs::write(
        &file_path,
        "[DEFAULT]\n\
         root = /home/seamm\n\
         \n\
         [SEAMM]\n\
         datastore = ${root}/Jobs\n\
         project = dev\n",
    )
    .unwrap();

    let document = Document::from_path(&file_path).unwrap();

    assert!(document.file_path().is_some());
    assert_eq!(document.resolve("SEAMM", "datastore").unwrap(), "/home/seamm/Jobs");
    assert_eq!(document.resolve("SEAMM", "project").unwrap(), "dev");
}

#[test]
fn from_path_on_a_missing_file_is_an_io_error() {
    let temporary_directory = TempDir::new().unwrap();
    let file_path = temporary_directory.path().join("does-not-exist.ini");

    assert!(matches!(
        Document::from_path(&file_path).unwrap_err(),
        ConfigError::Io { .. }
    ));
}

#[test]
fn load_or_init_writes_the_template_on_first_run() {
    let temporary_directory = TempDir::new().unwrap();
    let file_path = temporary_directory
        .path()
        .join("SEAMM")
        .join("seamm.ini");

    let document = Document::load_or_init(&file_path).unwrap();

    // The template starts with a prolog and the [DEFAULT] and [SEAMM]
    // sections, so both must be present in the parsed document.
    assert!(file_path.exists());
    assert!(document.section("DEFAULT").is_some());
    assert!(document.section("SEAMM").is_some());
    assert!(document.get("SEAMM", "root").is_ok());
    assert!(document.resolve("SEAMM", "datastore").is_ok());
}

#[test]
fn load_or_init_leaves_an_existing_file_alone() {
    let temporary_directory = TempDir::new().unwrap();
    let file_path = temporary_directory.path().join("seamm.ini");

    fs::write(&file_path, "[SEAMM]\nproject = custom\n").unwrap();

    let document = Document::load_or_init(&file_path).unwrap();

    assert_eq!(document.resolve("SEAMM", "project").unwrap(), "custom");
    assert!(document.get("SEAMM", "datastore").is_err());
}

#[test]
fn reload_replaces_the_document_with_fresh_contents() {
    let temporary_directory = TempDir::new().unwrap();
    let file_path = temporary_directory.path().join("seamm.ini");

    fs::write(&file_path, "[SEAMM]\nproject = before\n").unwrap();
    let document = Document::from_path(&file_path).unwrap();
    assert_eq!(document.resolve("SEAMM", "project").unwrap(), "before");

    fs::write(&file_path, "[SEAMM]\nproject = after\n").unwrap();
    let reloaded = document.reload().unwrap();

    // The original document is untouched; the reloaded one sees the edit.
    assert_eq!(document.resolve("SEAMM", "project").unwrap(), "before");
    assert_eq!(reloaded.resolve("SEAMM", "project").unwrap(), "after");
}

#[test]
fn parse_errors_abort_the_load() {
    let temporary_directory = TempDir::new().unwrap();
    let file_path = temporary_directory.path().join("seamm.ini");

    fs::write(&file_path, "[SEAMM]\nbroken line without equals\n").unwrap();

    assert!(matches!(
        Document::from_path(&file_path).unwrap_err(),
        ConfigError::Parse { line_number: 2, .. }
    ));
}
