use std::path::PathBuf;

use thiserror::Error;

use crate::data::schema::DatasetKind;

/// Input table lacks columns the dataset kind requires.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required {kind} columns: {missing:?}; columns present: {present:?}")]
pub struct SchemaError {
    pub kind: DatasetKind,
    pub missing: Vec<String>,
    pub present: Vec<String>,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("failed to read data store {}: {reason}", .path.display())]
    StoreRead { path: PathBuf, reason: String },

    #[error("failed to write data store {}: {source}", .path.display())]
    StoreWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid or missing sync token")]
    Auth,

    #[error("request body is empty")]
    EmptyPayload,

    #[error("{0}")]
    Validation(String),

    #[error("failed to render export: {0}")]
    Export(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    pub(crate) fn store_read(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::StoreRead {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// True for errors caused by the caller's input rather than server state.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Auth | Self::EmptyPayload | Self::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
