use std::path::PathBuf;

use thiserror::Error;
use zip::result::ZipError;

use crate::calibration::CalibrationError;

/// Failure of a whole archive conversion. Reported per file; the remaining
/// files are still attempted.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("cannot open input: {0}")]
    InputUnreadable(#[source] std::io::Error),

    #[error("not a readable zip archive: {}", zip_reason(.0))]
    ArchiveUnreadable(#[from] ZipError),

    #[error("no page resources found")]
    EmptyArchive,

    #[error("failed to read page {page}: {source}")]
    PageUnreadable {
        page: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write '{}': {source}", path.display())]
    OutputUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    InvalidParameter(#[from] CalibrationError),

    #[error("invalid option: {0}")]
    InvalidOption(String),
}

/// `ZipError::Io` displays without its cause.
fn zip_reason(err: &ZipError) -> String {
    match err {
        ZipError::Io(source) => source.to_string(),
        other => other.to_string(),
    }
}

/// Collects non-fatal parse diagnostics for a single record.
#[derive(Debug, Clone, Default)]
pub struct ErrorAccumulator(Option<String>);

impl ErrorAccumulator {
    pub fn push(&mut self, msg: &str) {
        match &mut self.0 {
            Some(existing) => {
                existing.push_str("; ");
                existing.push_str(msg);
            }
            None => {
                self.0 = Some(msg.to_string());
            }
        }
    }

    pub fn take(&mut self) -> Option<String> {
        self.0.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zip_io_error_keeps_cause() {
        let err = ConvertError::from(ZipError::Io(std::io::Error::other("disk on fire")));
        assert_eq!(err.to_string(), "not a readable zip archive: disk on fire");
    }

    #[test]
    fn test_push_single_message() {
        let mut accumulator = ErrorAccumulator::default();
        accumulator.push("missing win-rate");

        assert_eq!(accumulator.take().as_deref(), Some("missing win-rate"));
    }

    #[test]
    fn test_push_multiple_messages_uses_separator() {
        let mut accumulator = ErrorAccumulator::default();
        accumulator.push("no move token");
        accumulator.push("delta 'x' is not numeric");

        assert_eq!(
            accumulator.take().as_deref(),
            Some("no move token; delta 'x' is not numeric")
        );
    }

    #[test]
    fn test_take_consumes_accumulator() {
        let mut accumulator = ErrorAccumulator::default();
        accumulator.push("error");

        assert_eq!(accumulator.take().as_deref(), Some("error"));
        assert!(accumulator.take().is_none());
    }
}
