//! Core implementation: directory handles, the year/range hierarchy, and record loading

pub mod config;
pub mod cve;
pub mod directory;
pub mod error;
pub mod git;
pub mod id;
pub mod malformed;
pub mod pattern;
pub mod range_dir;
pub mod repository;
pub(crate) mod walk;
pub mod year_dir;
