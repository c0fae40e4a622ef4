//! Directory handles
//!
//! [`Directory`] is the stateless view every level of the repository is built on:
//! it joins child names onto an absolute path, checks for files and directories,
//! and lists entries matching a glob. Nothing is cached between calls.

use crate::error::Result;
use crate::pattern::GlobPattern;
use std::fmt;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Which kind of entry a glob should return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Files and directories alike
    Any,
    /// Regular files (symlinks are followed)
    File,
    /// Directories (symlinks are followed)
    Dir,
}

impl EntryKind {
    fn accepts(&self, path: &Path) -> bool {
        match self {
            EntryKind::Any => true,
            EntryKind::File => path.is_file(),
            EntryKind::Dir => path.is_dir(),
        }
    }
}

/// An absolute, normalized directory path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Directory {
    path: PathBuf,
}

impl Directory {
    /// Create a handle for `path`
    ///
    /// Relative paths are resolved against the current working directory, and
    /// `.`/`..` components are removed lexically. The directory does not need to exist.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: expand_path(path.as_ref()),
        }
    }

    /// The absolute path of the directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The last component of the path (the directory's own name)
    pub fn name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("")
    }

    /// Join a file or directory name onto the directory path
    pub fn join(&self, name: impl AsRef<Path>) -> PathBuf {
        self.path.join(name)
    }

    /// Join several names onto the directory path, in order
    pub fn join_all<I, P>(&self, names: I) -> PathBuf
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        names
            .into_iter()
            .fold(self.path.clone(), |path, name| path.join(name))
    }

    /// Path of the entry `name` directly inside the directory
    ///
    /// Returns `None` unless `name` is a single plain component, so an absolute
    /// path, `.`, `..` or a nested path never resolves outside the directory.
    pub fn child(&self, name: impl AsRef<Path>) -> Option<PathBuf> {
        is_entry_name(&name).then(|| self.path.join(name))
    }

    /// Whether `name` is a regular file inside the directory
    pub fn is_file(&self, name: impl AsRef<Path>) -> bool {
        self.child(name).is_some_and(|path| path.is_file())
    }

    /// Whether `name` is a directory inside the directory
    pub fn is_dir(&self, name: impl AsRef<Path>) -> bool {
        self.child(name).is_some_and(|path| path.is_dir())
    }

    /// Entries directly inside the directory whose names match `pattern`
    ///
    /// Returned in whatever order the filesystem reports them; callers that need
    /// a stable order sort the result. A directory that does not exist has no
    /// entries.
    pub fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        self.glob_kind(pattern, EntryKind::Any)
    }

    /// Like [`glob`](Self::glob), restricted to one kind of entry
    pub fn glob_kind(&self, pattern: &str, kind: EntryKind) -> Result<Vec<PathBuf>> {
        let pattern = GlobPattern::new(pattern);

        let entries = match std::fs::read_dir(&self.path) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut matches = Vec::new();
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };

            if pattern.matches(name) {
                let path = entry.path();
                if kind.accepts(&path) {
                    matches.push(path);
                }
            }
        }

        Ok(matches)
    }
}

impl AsRef<Path> for Directory {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for Directory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Whether `name` names exactly one entry: a single normal path component
pub fn is_entry_name(name: impl AsRef<Path>) -> bool {
    let mut components = name.as_ref().components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Make `path` absolute and resolve `.` and `..` without touching the filesystem
fn expand_path(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };

    let mut resolved = PathBuf::new();
    for component in absolute.components() {
        match component {
            // Current directory, skip
            Component::CurDir => {}
            // Parent directory, pop if possible
            Component::ParentDir => {
                resolved.pop();
            }
            other => resolved.push(other.as_os_str()),
        }
    }
    resolved
}
