//! Error case tests
//!
//! Error messages shown to the user and conversions into `PurgoError`.

use purgo::error::PurgoError;
use purgo::import;
use std::path::Path;
use tempfile::tempdir;

/// Reading a workbook that does not exist
#[test]
fn test_read_nonexistent_workbook() {
    let result = import::read_first_sheet(Path::new("/nonexistent/path/12345/master.xlsx"));

    let err = result.unwrap_err();
    assert!(matches!(err, PurgoError::FileNotFound(_)));
}

/// A file that is not a workbook
#[test]
fn test_read_invalid_workbook() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("broken.xlsx");
    std::fs::write(&path, "this is not a zip archive").unwrap();

    let err = import::read_first_sheet(&path).unwrap_err();
    assert!(matches!(err, PurgoError::WorkbookRead { .. }));
    assert!(err.to_string().contains("broken.xlsx"));
}

/// An extension calamine does not know
#[test]
fn test_read_unknown_extension() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("companies.txt");
    std::fs::write(&path, "Name\nAcme").unwrap();

    let err = import::read_first_sheet(&path).unwrap_err();
    assert!(matches!(err, PurgoError::WorkbookRead { .. }));
}

/// Every variant renders a message
#[test]
fn test_error_display() {
    let errors = vec![
        PurgoError::Config("bad config".to_string()),
        PurgoError::MissingApiKey,
        PurgoError::MissingPassword,
        PurgoError::MissingUsername,
        PurgoError::InvalidCredentials,
        PurgoError::FileNotFound("master.xlsx".to_string()),
        PurgoError::WorkbookRead {
            path: "check.xlsx".to_string(),
            message: "corrupt".to_string(),
        },
        PurgoError::ExcelGeneration("sheet name error".to_string()),
        PurgoError::InvalidUrl("nope".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "empty message: {:?}", err);
    }
}

/// Gate messages match what the login form showed
#[test]
fn test_gate_messages() {
    assert_eq!(PurgoError::MissingPassword.to_string(), "Please enter password.");
    assert_eq!(PurgoError::InvalidCredentials.to_string(), "Invalid Username/Password");
}

/// MissingApiKey tells the user how to fix it
#[test]
fn test_missing_api_key_message() {
    let display = PurgoError::MissingApiKey.to_string();

    assert!(display.contains("purgo config --set-api-key"));
    assert!(display.contains("COMPANIES_HOUSE_API_KEY"));
}

/// Conversion from IO errors
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: PurgoError = io_err.into();

    assert!(matches!(err, PurgoError::Io(_)));
    assert!(err.to_string().contains("IO"));
}

/// Conversion from JSON errors
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: PurgoError = json_err.into();

    assert!(matches!(err, PurgoError::JsonParse(_)));
}

/// Core errors pass through with their own message
#[test]
fn test_common_error_transparent() {
    let common_err = purgo_common::Error::MissingColumns {
        file: "check.xlsx".to_string(),
        columns: vec!["Name".to_string(), "Company Registration Number".to_string()],
    };
    let err: PurgoError = common_err.into();

    assert!(matches!(err, PurgoError::Common(_)));
    assert_eq!(
        err.to_string(),
        "'check.xlsx' is missing the following required columns: Name, Company Registration Number"
    );
}
