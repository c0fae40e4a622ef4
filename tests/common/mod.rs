//! Shared fixtures: small cvelist trees built in temporary directories

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Year directories in the standard fixture
pub const YEARS: std::ops::RangeInclusive<u32> = 1999..=2021;

/// Range directories under 2021 in the standard fixture
pub const RANGES_2021: [&str; 5] = ["0xxx", "1xxx", "20xxx", "21xxx", "2xxx"];

/// CVE files that load
pub const VALID: [&str; 17] = [
    "CVE-1999-0001",
    "CVE-1999-0002",
    "CVE-2020-1994",
    "CVE-2021-0001",
    "CVE-2021-1000",
    "CVE-2021-20001",
    "CVE-2021-21001",
    "CVE-2021-2000",
    "CVE-2021-2001",
    "CVE-2021-2002",
    "CVE-2021-2003",
    "CVE-2021-2004",
    "CVE-2021-2005",
    "CVE-2021-2006",
    "CVE-2021-2007",
    "CVE-2021-2008",
    "CVE-2021-2009",
];

/// CVE files that fail to load
pub const MALFORMED: [&str; 3] = ["CVE-2021-21999", "CVE-2021-2998", "CVE-2021-2999"];

/// Minimal CVE JSON 4.0 document for an ID
pub fn cve_json(cve_id: &str) -> String {
    format!(
        r#"{{
  "data_type": "CVE",
  "data_format": "MITRE",
  "data_version": "4.0",
  "CVE_data_meta": {{
    "ID": "{cve_id}",
    "ASSIGNER": "cve@mitre.org",
    "STATE": "PUBLIC"
  }},
  "description": {{
    "description_data": [{{ "lang": "eng", "value": "Description of {cve_id}" }}]
  }},
  "references": {{
    "reference_data": [{{ "url": "https://example.com/{cve_id}" }}]
  }}
}}"#
    )
}

/// A cvelist tree in a temporary directory
pub struct Fixture {
    temp_dir: TempDir,
}

impl Fixture {
    /// An empty tree
    pub fn empty() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// The standard tree: every year from 1999 to 2021, a handful of ranges,
    /// [`VALID`] and [`MALFORMED`] CVE files, plus files the globs must ignore
    pub fn standard() -> Self {
        let fixture = Self::empty();

        for year in YEARS {
            fixture.mkdir(&year.to_string());
        }
        for range in RANGES_2021 {
            fixture.mkdir(&format!("2021/{range}"));
        }

        for cve_id in VALID {
            fixture.write_cve(cve_id);
        }

        fixture.write_raw("CVE-2021-2998", "{\"data_type\": \"CVE\", ");
        fixture.write_raw("CVE-2021-2999", "[1, 2");
        fixture.write_raw("CVE-2021-21999", "{\"data_type\": \"CVE\"}");

        // Noise
        fs::write(fixture.root().join(".gitkeep"), b"").unwrap();
        fs::write(fixture.root().join("README.md"), b"# cvelist").unwrap();
        fixture.mkdir("tools");
        fixture.mkdir("2021/review");
        fs::write(fixture.root().join("2021/2xxx/README.md"), b"").unwrap();
        fs::write(fixture.root().join("2021/2xxx/CVE-2021-2010.json.bak"), b"{}").unwrap();

        fixture
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn mkdir(&self, relative: &str) -> PathBuf {
        let path = self.root().join(relative);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Where a CVE ID lives in the tree
    pub fn path_of(&self, cve_id: &str) -> PathBuf {
        self.root().join(cvelist::id::relative_path_of(cve_id).unwrap())
    }

    /// Write a valid CVE file, creating its directories
    pub fn write_cve(&self, cve_id: &str) -> PathBuf {
        self.write_raw(cve_id, &cve_json(cve_id))
    }

    /// Write arbitrary contents as a CVE's file, creating its directories
    pub fn write_raw(&self, cve_id: &str, contents: &str) -> PathBuf {
        let path = self.path_of(cve_id);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    /// Paths of the given IDs, sorted the way the walk visits them
    pub fn walk_order(&self, ids: &[&str]) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = ids.iter().map(|id| self.path_of(id)).collect();
        paths.sort();
        paths
    }
}

/// Every permission removed from a path until dropped
#[cfg(unix)]
pub struct Locked {
    path: PathBuf,
    mode: u32,
}

#[cfg(unix)]
impl Locked {
    /// Lock `path`, or `None` if the current user can still open it afterwards
    /// (root ignores permission bits)
    pub fn new(path: impl Into<PathBuf>) -> Option<Self> {
        use std::os::unix::fs::PermissionsExt;

        let path = path.into();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o000)).unwrap();

        let locked = Self { path, mode };
        let still_open = if locked.path.is_dir() {
            fs::read_dir(&locked.path).is_ok()
        } else {
            fs::read(&locked.path).is_ok()
        };
        (!still_open).then_some(locked)
    }
}

#[cfg(unix)]
impl Drop for Locked {
    fn drop(&mut self) {
        use std::os::unix::fs::PermissionsExt;

        // Restore so the temporary directory can be removed
        let _ = fs::set_permissions(&self.path, fs::Permissions::from_mode(self.mode));
    }
}
