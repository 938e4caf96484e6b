use std::fs::{self, create_dir_all};
use std::path::Path;

use tempfile::tempdir;

use client_file_manager::config::{ConfigStore, Configuration, OutputFolders};

#[test]
fn test_configuration_file_layout() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("configuration.json");
    let store = ConfigStore::new(&path);
    let config = Configuration::with_locations(Path::new("/jobs/out"), Path::new("/jobs/logs"));

    store.save(&config).unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["outputLocation"], "/jobs/out");
    assert_eq!(value["loggingLocation"], "/jobs/logs");
    assert_eq!(value["loggingStatus"], "True");
    assert_eq!(value.as_object().unwrap().len(), 3);
}

#[test]
fn test_boolean_logging_status_is_accepted() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("configuration.json");
    fs::write(
        &path,
        r#"{"outputLocation": "/o", "loggingLocation": "/l", "loggingStatus": false}"#,
    )
    .unwrap();

    assert!(!ConfigStore::new(&path).load().unwrap().logging_enabled);
}

#[test]
fn test_broken_configuration_reports_the_file() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("configuration.json");
    fs::write(&path, "{ not json").unwrap();

    let error = ConfigStore::new(&path).load().unwrap_err();

    assert!(format!("{error}").contains("configuration.json"));
}

#[test]
fn test_output_folders_from_configured_location() {
    let temp_dir = tempdir().unwrap();
    let out = temp_dir.path().join("out");
    create_dir_all(out.join("seq01/seq01_010")).unwrap();
    create_dir_all(out.join("seq01/seq01_020/Plate")).unwrap();
    let store = ConfigStore::with_defaults(
        &temp_dir.path().join("configuration.json"),
        Configuration::with_locations(&out, &temp_dir.path().join("logs")),
    );

    let config = store.load().unwrap();
    let folders = OutputFolders::discover(&config.output_location).unwrap();

    assert_eq!(folders.sequences(), ["seq01"]);
    assert_eq!(folders.shots_for("seq01"), ["seq01_010", "seq01_020"]);
}
