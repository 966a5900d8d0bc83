use thiserror::Error;

use shared_models::error::AppError;

/// Errors from the spreadsheet-backed record store. Reads and writes share
/// the same taxonomy; call sites decide whether a failed read degrades to an
/// empty result or surfaces to the user.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Spreadsheet ID is required")]
    MissingSpreadsheetId,

    #[error("{0} not found")]
    NotFound(String),

    #[error("Sheets API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::MissingSpreadsheetId => AppError::BadRequest(err.to_string()),
            StoreError::NotFound(_) => AppError::NotFound(err.to_string()),
            StoreError::Api { .. } | StoreError::Transport(_) | StoreError::Malformed(_) => {
                AppError::ExternalService(err.to_string())
            }
        }
    }
}
