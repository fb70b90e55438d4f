use std::error::Error;
use std::fmt;

use crate::error::SaveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreErrorCode {
    Io,
    Format,
    Lookup,
    LayoutDetectionAmbiguous,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreError {
    pub code: CoreErrorCode,
    pub message: String,
}

impl CoreError {
    pub fn new(code: CoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<SaveError> for CoreError {
    fn from(err: SaveError) -> Self {
        let code = match err {
            SaveError::UnknownDecoration { .. } | SaveError::Catalog(_) => CoreErrorCode::Lookup,
            _ => CoreErrorCode::Format,
        };
        Self::new(code, err.to_string())
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl Error for CoreError {}
