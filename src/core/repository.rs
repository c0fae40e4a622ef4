//! The cvelist repository root
//!
//! Lookups resolve a CVE ID straight to `<root>/<year>/<range>/<id>.json`,
//! stopping at the first missing directory. Enumeration walks the same
//! hierarchy in sorted order: years, then ranges, then files.

use crate::config::{CloneOptions, PullOptions};
use crate::cve::Cve;
use crate::directory::{Directory, EntryKind};
use crate::error::{CveListError, Result};
use crate::git::{GitCli, Vcs};
use crate::id;
use crate::malformed::MalformedCve;
use crate::walk;
use crate::year_dir::YearDir;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Glob for year directories
pub const GLOB: &str = "[1-2][0-9][0-9][0-9]";

/// A checkout of the cvelist repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    dir: Directory,
}

impl Repository {
    /// Open the repository at `path`
    ///
    /// Nothing is read from disk until a query is made.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            dir: Directory::new(path),
        }
    }

    /// Clone a new repository into `path` using the `git` command line
    ///
    /// # Errors
    ///
    /// Returns `CloneFailed` if `git clone` exits unsuccessfully.
    pub fn download(path: impl AsRef<Path>, options: &CloneOptions) -> Result<Self> {
        Self::download_with(&GitCli::default(), path, options)
    }

    /// Clone a new repository into `path` using the given [`Vcs`]
    pub fn download_with(
        vcs: &impl Vcs,
        path: impl AsRef<Path>,
        options: &CloneOptions,
    ) -> Result<Self> {
        let path = path.as_ref();
        info!("Cloning {} into {}", options.url, path.display());

        let cloned = vcs
            .clone_repo(&options.url, path, options.depth)
            .map_err(CveListError::GitUnavailable)?;
        if !cloned {
            return Err(CveListError::CloneFailed {
                url: options.url.clone(),
                path: path.to_path_buf(),
            });
        }

        info!("Cloned {}", path.display());
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Whether the repository is a git checkout
    pub fn is_git(&self) -> bool {
        self.dir.is_dir(".git")
    }

    /// Pull new commits using the `git` command line
    ///
    /// Returns `Ok(false)` without running anything if the repository is not a
    /// git checkout.
    ///
    /// # Errors
    ///
    /// Returns `PullFailed` if `git pull` exits unsuccessfully.
    pub fn pull(&self, options: &PullOptions) -> Result<bool> {
        self.pull_with(&GitCli::default(), options)
    }

    /// Pull new commits using the given [`Vcs`]
    pub fn pull_with(&self, vcs: &impl Vcs, options: &PullOptions) -> Result<bool> {
        if !self.is_git() {
            debug!("{} is not a git repository, skipping pull", self.dir);
            return Ok(false);
        }

        info!(
            "Pulling {} {} into {}",
            options.remote, options.branch, self.dir
        );
        let pulled = vcs
            .pull(self.dir.path(), &options.remote, &options.branch)
            .map_err(CveListError::GitUnavailable)?;
        if !pulled {
            return Err(CveListError::PullFailed {
                remote: options.remote.clone(),
                branch: options.branch.clone(),
            });
        }

        Ok(true)
    }

    /// Whether the repository contains a directory for the given year
    pub fn has_year(&self, year: impl ToString) -> bool {
        self.dir.is_dir(year.to_string())
    }

    /// Access the directory for a year
    ///
    /// # Errors
    ///
    /// Returns `YearNotFound` if there is no such directory.
    pub fn year(&self, year: impl ToString) -> Result<YearDir> {
        let year = year.to_string();
        self.find_year(&year)
            .ok_or_else(|| CveListError::YearNotFound {
                year,
                root: self.dir.path().to_path_buf(),
            })
    }

    /// Check once for a year directory
    fn find_year(&self, year: &str) -> Option<YearDir> {
        let path = self.dir.child(year)?;
        path.is_dir().then(|| YearDir::new(path))
    }

    /// Paths of the year directories, sorted
    pub fn directories(&self) -> Result<Vec<PathBuf>> {
        let mut dirs = self.dir.glob_kind(GLOB, EntryKind::Dir)?;
        dirs.sort();
        Ok(dirs)
    }

    /// The year directories, in [`directories`](Self::directories) order
    pub fn years(&self) -> Result<Vec<YearDir>> {
        Ok(self.directories()?.into_iter().map(YearDir::new).collect())
    }

    /// Every CVE in the repository that loads
    ///
    /// Year directories are listed up front and walked lazily. An `Err` item
    /// means a directory below the root could not be listed; CVE files that
    /// fail to load are skipped and show up in [`malformed`](Self::malformed).
    pub fn cves(&self) -> Result<impl Iterator<Item = Result<Cve>>> {
        let years = self.years()?;
        Ok(years
            .into_iter()
            .flat_map(|year| walk::flatten(year.cves())))
    }

    /// Every CVE file in the repository that fails to load
    pub fn malformed(&self) -> Result<impl Iterator<Item = Result<MalformedCve>>> {
        let years = self.years()?;
        Ok(years
            .into_iter()
            .flat_map(|year| walk::flatten(year.malformed())))
    }

    /// Every CVE JSON file in the repository, in walk order
    pub fn files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for year in self.years()? {
            files.extend(year.files()?);
        }
        Ok(files)
    }

    /// Number of CVE JSON files in the repository, counted from disk
    pub fn size(&self) -> Result<usize> {
        let mut size = 0;
        for year in self.years()? {
            for range in year.ranges()? {
                size += range.files()?.len();
            }
        }
        Ok(size)
    }

    /// Whether the repository contains a file for the given CVE ID
    pub fn has_cve(&self, cve_id: &str) -> bool {
        id::year_of(cve_id)
            .and_then(|year| self.find_year(year))
            .is_some_and(|year| year.has_cve(cve_id))
    }

    /// Load a CVE by ID
    ///
    /// Returns `Ok(None)` if the year directory, range directory, or file does
    /// not exist.
    ///
    /// # Errors
    ///
    /// Returns the [`RecordError`](crate::RecordError) if the file exists but
    /// is not a valid CVE.
    pub fn get(&self, cve_id: &str) -> Result<Option<Cve>> {
        match id::year_of(cve_id).and_then(|year| self.find_year(year)) {
            Some(year) => year.get(cve_id),
            None => {
                debug!("No year directory for {} in {}", cve_id, self.dir);
                Ok(None)
            }
        }
    }

    /// Path a CVE ID's record would have, whether or not it exists
    pub fn path_of(&self, cve_id: &str) -> Option<PathBuf> {
        id::relative_path_of(cve_id).map(|relative| self.dir.join(relative))
    }
}
