//! CVE records
//!
//! Decodes the CVE JSON 4.0 documents stored in the cvelist repository. Only the
//! parts of the schema needed to identify and describe a record are typed; every
//! other top-level section is kept verbatim in [`Cve::extra`].

use crate::error::{RecordError, Result};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Value of the top-level `data_type` key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    #[serde(rename = "CVE")]
    Cve,
}

/// Value of the top-level `data_format` key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataFormat {
    #[serde(rename = "MITRE")]
    Mitre,
}

/// Publication state of a CVE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum State {
    Public,
    Reserved,
    ReplacedBy,
    SplitFrom,
    MergedTo,
    Reject,
    Disputed,
}

/// The `CVE_data_meta` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataMeta {
    #[serde(rename = "ID")]
    pub id: String,

    #[serde(rename = "ASSIGNER")]
    pub assigner: String,

    #[serde(rename = "STATE", default, skip_serializing_if = "Option::is_none")]
    pub state: Option<State>,

    #[serde(rename = "TITLE", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Publication date (ISO 8601), as written in the record
    #[serde(rename = "DATE_PUBLIC", default, skip_serializing_if = "Option::is_none")]
    pub date_public: Option<String>,
}

/// A language-tagged piece of text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LangString {
    pub lang: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    #[serde(default)]
    pub description_data: Vec<LangString>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refsource: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct References {
    #[serde(default)]
    pub reference_data: Vec<Reference>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemTypeData {
    #[serde(default)]
    pub description: Vec<LangString>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemType {
    #[serde(default)]
    pub problemtype_data: Vec<ProblemTypeData>,
}

/// A CVE loaded from a `CVE-*.json` file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cve {
    /// Path of the JSON file the CVE was loaded from
    #[serde(skip)]
    path: PathBuf,

    pub data_type: DataType,

    pub data_format: DataFormat,

    pub data_version: String,

    #[serde(rename = "CVE_data_meta")]
    pub data_meta: DataMeta,

    #[serde(rename = "problemtype", default)]
    pub problem_type: ProblemType,

    #[serde(default)]
    pub references: References,

    #[serde(default)]
    pub description: Description,

    /// Remaining top-level sections (`affects`, `impact`, `source`, ...)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Cve {
    /// Load a CVE from a JSON file
    ///
    /// # Errors
    ///
    /// Returns a [`RecordError`] if the file cannot be read, is not valid JSON,
    /// or is JSON that does not describe a CVE.
    pub fn load(path: impl AsRef<Path>) -> std::result::Result<Self, RecordError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| RecordError::read(path, e))?;
        Self::from_slice(path, &bytes)
    }

    /// Decode a CVE from raw JSON, recording `path` as its origin
    pub fn from_slice(
        path: impl Into<PathBuf>,
        json: &[u8],
    ) -> std::result::Result<Self, RecordError> {
        let path = path.into();
        // Syntax first, so broken JSON is never reported as a schema mismatch
        let value: serde_json::Value =
            serde_json::from_slice(json).map_err(|e| RecordError::json(&path, e))?;
        let mut cve: Cve =
            serde_json::from_value(value).map_err(|e| RecordError::schema(&path, e))?;
        cve.path = path;
        Ok(cve)
    }

    /// Path of the JSON file the CVE was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The CVE ID (`CVE_data_meta.ID`)
    pub fn id(&self) -> &str {
        &self.data_meta.id
    }

    pub fn assigner(&self) -> &str {
        &self.data_meta.assigner
    }

    pub fn state(&self) -> Option<State> {
        self.data_meta.state
    }

    /// Description texts, English first
    pub fn descriptions(&self) -> Vec<&str> {
        let data = &self.description.description_data;
        data.iter()
            .filter(|d| d.lang.starts_with("en"))
            .chain(data.iter().filter(|d| !d.lang.starts_with("en")))
            .map(|d| d.value.as_str())
            .collect()
    }

    pub fn reference_urls(&self) -> impl Iterator<Item = &str> {
        self.references
            .reference_data
            .iter()
            .map(|r| r.url.as_str())
    }

    /// Problem types (usually CWE IDs)
    pub fn problem_types(&self) -> impl Iterator<Item = &str> {
        self.problem_type
            .problemtype_data
            .iter()
            .flat_map(|p| p.description.iter())
            .map(|d| d.value.as_str())
    }

    /// Publication date, if the record has one in RFC 3339 form
    pub fn date_public(&self) -> Option<DateTime<FixedOffset>> {
        self.data_meta
            .date_public
            .as_deref()
            .and_then(|date| DateTime::parse_from_rfc3339(date).ok())
    }

    /// Serialize back to pretty JSON (the `path` is not part of the document)
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| RecordError::json(&self.path, e).into())
    }
}
