//! Export error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    /// Nothing matched the current filter; surfaced as a warning
    #[error("No data to export.")]
    NoData,

    #[error("Spreadsheet build failed: {0}")]
    Build(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExportError {
    /// Whether this is a user-facing warning rather than a failure
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::NoData)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_data_display() {
        assert_eq!(ExportError::NoData.to_string(), "No data to export.");
        assert!(ExportError::NoData.is_warning());
    }

    #[test]
    fn build_is_not_a_warning() {
        let err = ExportError::Build("disk full".to_string());
        assert_eq!(err.to_string(), "Spreadsheet build failed: disk full");
        assert!(!err.is_warning());
    }
}
