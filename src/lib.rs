//! # cvelist - Lazy access to the cvelist CVE repository
//!
//! `cvelist` reads the [cvelist](https://github.com/CVEProject/cvelist) repository
//! directly from disk. Records are stored one JSON file per CVE:
//!
//! ```text
//! <root>/<YEAR>/<RANGE>xxx/CVE-<YEAR>-<NUMBER>.json
//! ```
//!
//! No index is built. A lookup derives the path from the CVE ID and checks only
//! the directories on that path; enumeration walks years, ranges and files in
//! sorted order, loading each file only when the iterator reaches it.
//!
//! - **Point lookups** (`get`) return `Ok(None)` when any level is missing and
//!   surface a broken file as an error.
//! - **Enumeration** (`cves`) never stops on a broken file; those are reported
//!   separately by `malformed`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cvelist::{Repository, Result};
//!
//! # fn main() -> Result<()> {
//! let repo = Repository::new("cvelist");
//!
//! if let Some(cve) = repo.get("CVE-2021-2001")? {
//!     println!("{}: {:?}", cve.id(), cve.descriptions());
//! }
//!
//! for cve in repo.year(2021)?.cves()? {
//!     println!("{}", cve?.id());
//! }
//!
//! for malformed in repo.malformed()? {
//!     eprintln!("{}", malformed?);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Keeping a Checkout Fresh
//!
//! ```rust,no_run
//! use cvelist::{CloneOptions, PullOptions, Repository, Result};
//!
//! # fn main() -> Result<()> {
//! let repo = Repository::download("/data/cvelist", &CloneOptions::default())?;
//! repo.pull(&PullOptions::default())?;
//! # Ok(())
//! # }
//! ```

pub mod core;

// Re-export core modules internally so crate:: paths in core still work
#[allow(unused_imports)]
pub(crate) use crate::core::{
    config, cve, directory, error, git, malformed, pattern, range_dir, repository, walk, year_dir,
};

pub use crate::core::{
    config::{CloneOptions, PullOptions, SyncConfig},
    cve::{Cve, State},
    directory::{Directory, EntryKind},
    error::{CveListError, RecordError, RecordErrorKind, Result},
    git::{GitCli, Vcs},
    id::CveId,
    malformed::MalformedCve,
    pattern::GlobPattern,
    range_dir::{Cves, MalformedCves, RangeDir},
    repository::Repository,
    year_dir::YearDir,
};

pub use crate::core::id;
