//! Records that exist on disk but could not be loaded

use crate::error::{RecordError, RecordErrorKind};
use std::fmt;
use std::path::{Path, PathBuf};

/// A `CVE-*.json` file that failed to load, with the reason
///
/// Produced only by the `malformed()` enumerations; point lookups return the
/// underlying [`RecordError`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedCve {
    path: PathBuf,
    error: RecordError,
}

impl MalformedCve {
    pub fn new(path: impl Into<PathBuf>, error: RecordError) -> Self {
        Self {
            path: path.into(),
            error,
        }
    }

    /// Path to the JSON file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The error encountered when loading the file
    pub fn error(&self) -> &RecordError {
        &self.error
    }

    pub fn kind(&self) -> RecordErrorKind {
        self.error.kind()
    }

    pub fn into_error(self) -> RecordError {
        self.error
    }
}

impl From<RecordError> for MalformedCve {
    fn from(error: RecordError) -> Self {
        Self::new(error.path().to_path_buf(), error)
    }
}

impl fmt::Display for MalformedCve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}: {}",
            self.path.display(),
            self.error.kind(),
            self.error.message()
        )
    }
}
