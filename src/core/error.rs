use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CveListError {
    #[error("year {year:?} not found within {root:?}")]
    YearNotFound { year: String, root: PathBuf },

    #[error("{range:?} not found within {year_dir:?}")]
    RangeNotFound { range: String, year_dir: PathBuf },

    #[error("failed to clone {url:?} into {path:?}")]
    CloneFailed { url: String, path: PathBuf },

    #[error("failed to pull from remote {remote:?} branch {branch:?}")]
    PullFailed { remote: String, branch: String },

    #[error("git could not be executed: {0}")]
    GitUnavailable(#[source] std::io::Error),

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid CVE ID: {0} (expected CVE-YYYY-NNNN)")]
    InvalidId(String),
}

pub type Result<T> = std::result::Result<T, CveListError>;

/// Why a record file could not be turned into a [`Cve`](crate::Cve).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordErrorKind {
    /// The file could not be read.
    Read,
    /// The file is not syntactically valid JSON.
    InvalidJson,
    /// The JSON is well formed but does not describe a CVE.
    Schema,
}

impl RecordErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordErrorKind::Read => "ReadError",
            RecordErrorKind::InvalidJson => "InvalidJSON",
            RecordErrorKind::Schema => "SchemaError",
        }
    }
}

impl fmt::Display for RecordErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record file that exists but failed to load.
///
/// Carries the offending path so a failed point lookup, or a report built from
/// [`MalformedCve`](crate::MalformedCve)s, can locate the bad file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}: {kind}: {message}", .path.display())]
pub struct RecordError {
    path: PathBuf,
    kind: RecordErrorKind,
    message: String,
}

impl RecordError {
    pub fn new(path: impl Into<PathBuf>, kind: RecordErrorKind, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn read(path: &Path, err: std::io::Error) -> Self {
        Self::new(path, RecordErrorKind::Read, err.to_string())
    }

    /// Classify a `serde_json` failure: syntax and truncation are invalid JSON,
    /// everything else means the document did not fit the CVE schema.
    pub(crate) fn json(path: &Path, err: serde_json::Error) -> Self {
        let kind = match err.classify() {
            serde_json::error::Category::Syntax | serde_json::error::Category::Eof => {
                RecordErrorKind::InvalidJson
            }
            serde_json::error::Category::Io => RecordErrorKind::Read,
            serde_json::error::Category::Data => RecordErrorKind::Schema,
        };
        Self::new(path, kind, err.to_string())
    }

    /// A document that parsed as JSON but did not decode as a CVE
    pub(crate) fn schema(path: &Path, err: serde_json::Error) -> Self {
        Self::new(path, RecordErrorKind::Schema, err.to_string())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> RecordErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
