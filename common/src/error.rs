//! Error types

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("'{file}' is missing the following required columns: {}", .columns.join(", "))]
    MissingColumns { file: String, columns: Vec<String> },

    /// Several input files failed validation; one line per file.
    #[error("{}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n"))]
    Invalid(Vec<Error>),
}

/// Result alias
pub type Result<T> = std::result::Result<T, Error>;
