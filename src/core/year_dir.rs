//! Year directories (`2021/`), grouping range directories

use crate::cve::Cve;
use crate::directory::{Directory, EntryKind};
use crate::error::{CveListError, Result};
use crate::id;
use crate::malformed::MalformedCve;
use crate::range_dir::RangeDir;
use crate::walk;
use std::path::{Path, PathBuf};

/// Glob for `xxx` range directories
pub const GLOB: &str = "*xxx";

/// A directory of range directories for one year
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearDir {
    dir: Directory,
    year: u32,
}

impl YearDir {
    /// Create a handle for a year directory
    ///
    /// The year is parsed from the directory name; a name that is not a number
    /// gives year `0`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let dir = Directory::new(path);
        let year = dir.name().parse().unwrap_or(0);
        Self { dir, year }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn year(&self) -> u32 {
        self.year
    }

    /// Whether the year directory contains the given `xxx` range directory
    pub fn has_range(&self, xxx_range: &str) -> bool {
        self.dir.is_dir(xxx_range)
    }

    /// Access a range directory within the year directory
    ///
    /// # Errors
    ///
    /// Returns `RangeNotFound` if there is no such directory.
    pub fn range(&self, xxx_range: &str) -> Result<RangeDir> {
        self.find_range(xxx_range)
            .ok_or_else(|| CveListError::RangeNotFound {
                range: xxx_range.to_string(),
                year_dir: self.dir.path().to_path_buf(),
            })
    }

    /// Check once for a range directory
    fn find_range(&self, xxx_range: &str) -> Option<RangeDir> {
        let path = self.dir.child(xxx_range)?;
        path.is_dir().then(|| RangeDir::new(path))
    }

    /// Paths of the `xxx` range directories, sorted
    pub fn directories(&self) -> Result<Vec<PathBuf>> {
        let mut dirs = self.dir.glob_kind(GLOB, EntryKind::Dir)?;
        dirs.sort();
        Ok(dirs)
    }

    /// The range directories, in [`directories`](Self::directories) order
    pub fn ranges(&self) -> Result<Vec<RangeDir>> {
        Ok(self.directories()?.into_iter().map(RangeDir::new).collect())
    }

    /// Every CVE in every range directory that loads
    ///
    /// Range directories are listed up front; each one's files are listed and
    /// loaded only when the iterator reaches it. An `Err` item means a range
    /// directory could not be listed; CVE files that fail to load are skipped.
    pub fn cves(&self) -> Result<impl Iterator<Item = Result<Cve>>> {
        let ranges = self.ranges()?;
        Ok(ranges.into_iter().flat_map(|range| walk::descend(range.cves())))
    }

    /// Every CVE file in every range directory that fails to load
    pub fn malformed(&self) -> Result<impl Iterator<Item = Result<MalformedCve>>> {
        let ranges = self.ranges()?;
        Ok(ranges
            .into_iter()
            .flat_map(|range| walk::descend(range.malformed())))
    }

    /// The CVE JSON files of every range directory, in walk order
    pub fn files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for range in self.ranges()? {
            files.extend(range.files()?);
        }
        Ok(files)
    }

    pub fn has_cve(&self, cve_id: &str) -> bool {
        id::range_of(cve_id)
            .and_then(|xxx_range| self.find_range(&xxx_range))
            .is_some_and(|range| range.has_cve(cve_id))
    }

    /// Load a CVE from its range directory
    ///
    /// Returns `Ok(None)` if the range directory or the file does not exist.
    pub fn get(&self, cve_id: &str) -> Result<Option<Cve>> {
        match id::range_of(cve_id).and_then(|xxx_range| self.find_range(&xxx_range)) {
            Some(range) => range.get(cve_id),
            None => Ok(None),
        }
    }
}
