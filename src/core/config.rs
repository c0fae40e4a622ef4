//! Settings for acquiring and refreshing a cvelist repository
//!
//! Both option sets can be built in code or loaded from TOML:
//!
//! ```toml
//! [clone]
//! url = "https://github.com/CVEProject/cvelist.git"
//! depth = 1
//!
//! [pull]
//! remote = "origin"
//! branch = "master"
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// The default git URL for the cvelist repository
pub const DEFAULT_URL: &str = "https://github.com/CVEProject/cvelist.git";

/// The default clone depth
pub const DEFAULT_DEPTH: u32 = 1;

/// The default git remote
pub const DEFAULT_REMOTE: &str = "origin";

/// The default git branch
pub const DEFAULT_BRANCH: &str = "master";

/// Options for cloning a new repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloneOptions {
    pub url: String,
    pub depth: u32,
}

impl Default for CloneOptions {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            depth: DEFAULT_DEPTH,
        }
    }
}

impl CloneOptions {
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }
}

/// Options for pulling new commits into an existing repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullOptions {
    pub remote: String,
    pub branch: String,
}

impl Default for PullOptions {
    fn default() -> Self {
        Self {
            remote: DEFAULT_REMOTE.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
        }
    }
}

impl PullOptions {
    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }
}

/// Clone and pull settings together, as stored in a config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub clone: CloneOptions,
    pub pull: PullOptions,
}

impl SyncConfig {
    /// Parse settings from TOML; missing tables and keys keep their defaults
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Read settings from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}
