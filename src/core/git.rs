//! Running git to acquire and refresh a cvelist repository
//!
//! The repository code never shells out directly; it goes through [`Vcs`] so the
//! command runner can be swapped (tests use a recording fake). The exit status
//! is the only success signal.

use std::io;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// External version control operations used by [`Repository`](crate::Repository)
pub trait Vcs {
    /// Clone `url` into `dest` with the given history depth
    ///
    /// Returns `Ok(false)` if the command ran and failed, `Err` if it could not
    /// be started.
    fn clone_repo(&self, url: &str, dest: &Path, depth: u32) -> io::Result<bool>;

    /// Pull `branch` from `remote` inside the repository at `repo`
    fn pull(&self, repo: &Path, remote: &str, branch: &str) -> io::Result<bool>;
}

/// [`Vcs`] backed by the `git` command line
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
}

impl GitCli {
    /// Use a specific git executable
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::with_program("git")
    }
}

impl Vcs for GitCli {
    fn clone_repo(&self, url: &str, dest: &Path, depth: u32) -> io::Result<bool> {
        debug!("{} clone --depth {} {} {}", self.program, depth, url, dest.display());
        let depth = depth.to_string();
        let status = Command::new(&self.program)
            .args(["clone", "--depth", depth.as_str(), url])
            .arg(dest)
            .status()?;
        Ok(status.success())
    }

    fn pull(&self, repo: &Path, remote: &str, branch: &str) -> io::Result<bool> {
        debug!("{} pull {} {} in {}", self.program, remote, branch, repo.display());
        let status = Command::new(&self.program)
            .args(["pull", remote, branch])
            .current_dir(repo)
            .status()?;
        Ok(status.success())
    }
}
