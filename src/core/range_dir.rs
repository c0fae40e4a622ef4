//! Range directories (`2021/2xxx`), the directories that hold CVE JSON files

use crate::cve::Cve;
use crate::directory::{Directory, EntryKind};
use crate::error::Result;
use crate::id;
use crate::malformed::MalformedCve;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Glob for CVE `.json` files
pub const GLOB: &str = "CVE-[0-9][0-9][0-9][0-9]-*.json";

/// A directory of CVE JSON files sharing a number prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeDir {
    dir: Directory,
    range: String,
}

impl RangeDir {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let dir = Directory::new(path);
        let range = dir.name().to_string();
        Self { dir, range }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// The `xxx` range label (the directory name)
    pub fn range(&self) -> &str {
        &self.range
    }

    pub fn has_cve(&self, cve_id: &str) -> bool {
        self.dir.is_file(id::file_name_of(cve_id))
    }

    /// Load a CVE from the range directory
    ///
    /// Returns `Ok(None)` if there is no file for the ID.
    ///
    /// # Errors
    ///
    /// Returns the [`RecordError`] if the file exists but cannot be loaded.
    pub fn get(&self, cve_id: &str) -> Result<Option<Cve>> {
        let Some(path) = self.dir.child(id::file_name_of(cve_id)) else {
            return Ok(None);
        };
        if !path.is_file() {
            return Ok(None);
        }

        debug!("Loading {} from {}", cve_id, self.dir);
        Ok(Some(Cve::load(&path)?))
    }

    /// The CVE JSON files in the range directory, sorted
    pub fn files(&self) -> Result<Vec<PathBuf>> {
        let mut files = self.dir.glob_kind(GLOB, EntryKind::File)?;
        files.sort();
        Ok(files)
    }

    /// Every CVE in the range directory that loads, in file order
    ///
    /// Files that fail to load are skipped; see [`malformed`](Self::malformed).
    pub fn cves(&self) -> Result<Cves> {
        Ok(Cves::new(self.files()?))
    }

    /// Every CVE file in the range directory that fails to load, in file order
    pub fn malformed(&self) -> Result<MalformedCves> {
        Ok(MalformedCves::new(self.files()?))
    }
}

/// Lazily loads CVEs from a list of files, skipping the ones that fail
///
/// Each file is read only when the iterator reaches it.
#[derive(Debug)]
pub struct Cves {
    files: std::vec::IntoIter<PathBuf>,
}

impl Cves {
    pub fn new(files: Vec<PathBuf>) -> Self {
        Self {
            files: files.into_iter(),
        }
    }
}

impl Iterator for Cves {
    type Item = Cve;

    fn next(&mut self) -> Option<Cve> {
        for path in self.files.by_ref() {
            match Cve::load(&path) {
                Ok(cve) => return Some(cve),
                Err(e) => debug!("Skipping malformed CVE {}", e),
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.files.len()))
    }
}

/// Lazily loads CVEs from a list of files, yielding only the ones that fail
#[derive(Debug)]
pub struct MalformedCves {
    files: std::vec::IntoIter<PathBuf>,
}

impl MalformedCves {
    pub fn new(files: Vec<PathBuf>) -> Self {
        Self {
            files: files.into_iter(),
        }
    }
}

impl Iterator for MalformedCves {
    type Item = MalformedCve;

    fn next(&mut self) -> Option<MalformedCve> {
        for path in self.files.by_ref() {
            if let Err(error) = Cve::load(&path) {
                return Some(MalformedCve::new(path, error));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.files.len()))
    }
}
