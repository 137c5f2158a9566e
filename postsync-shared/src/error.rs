/// Error types shared by the store, the remote client and the reconciler
///
/// Every fallible operation in this crate returns [`SyncResult`]. The
/// variants follow the failure taxonomy of the import workflow:
///
/// - `Remote`: the remote catalog was unreachable or answered non-2xx
/// - `NotFound`: the remote catalog does not know the requested id
/// - `Parse`: a remote record is missing a required field
/// - `ConstraintViolation`: a duplicate email was inserted
/// - `Store`: any other local persistence fault
/// - `Export`: the spreadsheet could not be encoded
///
/// None of them are retried. A caller that sees `ConstraintViolation`
/// from an import should treat the user as already imported.

use thiserror::Error;

/// Result type alias for sync operations
pub type SyncResult<T> = Result<T, SyncError>;

/// Failure of a store, remote or export operation
#[derive(Error, Debug)]
pub enum SyncError {
    /// Remote source unreachable or returned a non-success status
    #[error("Remote source error: {0}")]
    Remote(String),

    /// Remote id unknown
    #[error("Not found: {0}")]
    NotFound(String),

    /// Remote record could not be decoded into the expected shape
    #[error("Malformed remote record: {0}")]
    Parse(String),

    /// Unique constraint rejected the insert (duplicate email)
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Local persistence fault
    #[error("Store error: {0}")]
    Store(String),

    /// Spreadsheet encoding fault
    #[error("Export error: {0}")]
    Export(String),
}

impl SyncError {
    /// True when the error means "this record is already imported"
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, SyncError::ConstraintViolation(_))
    }
}

impl From<sqlx::Error> for SyncError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err)
                if db_err.is_unique_violation()
                    || db_err.message().contains("UNIQUE constraint failed") =>
            {
                SyncError::ConstraintViolation(db_err.message().to_string())
            }
            other => SyncError::Store(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SyncError::Parse(err.to_string())
        } else {
            SyncError::Remote(err.to_string())
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for SyncError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        SyncError::Export(err.to_string())
    }
}
