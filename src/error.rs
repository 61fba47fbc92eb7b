use thiserror::Error;

#[derive(Error, Debug)]
pub enum PurgoError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Companies House API key is not set. Run `purgo config --set-api-key YOUR_KEY` or export COMPANIES_HOUSE_API_KEY")]
    MissingApiKey,

    #[error("Please enter password.")]
    MissingPassword,

    #[error("Please enter username.")]
    MissingUsername,

    #[error("Invalid Username/Password")]
    InvalidCredentials,

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to read workbook {path}: {message}")]
    WorkbookRead { path: String, message: String },

    #[error("Excel generation error: {0}")]
    ExcelGeneration(String),

    #[error("Invalid registry URL: {0}")]
    InvalidUrl(String),

    #[error("Registry request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error(transparent)]
    Common(#[from] purgo_common::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PurgoError>;
