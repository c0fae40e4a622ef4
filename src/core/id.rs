//! CVE identifiers and the directory names derived from them
//!
//! A CVE ID such as `CVE-2021-20001` lives at `2021/20xxx/CVE-2021-20001.json`:
//! - the **year** is the text between the first and second hyphen
//! - the **range** is the number after the last hyphen with its last three
//!   digits replaced by `xxx`, so range width grows with the number

use crate::directory::is_entry_name;
use crate::error::{CveListError, Result};
use regex::Regex;
use std::fmt;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Suffix shared by every range directory
pub const RANGE_SUFFIX: &str = "xxx";

/// Year directory of a CVE ID
///
/// Returns `None` when the year is not a single plain path component.
///
/// # Examples
/// ```
/// use cvelist::id::year_of;
///
/// assert_eq!(year_of("CVE-2021-2001"), Some("2021"));
/// assert_eq!(year_of("CVE-2021"), None);
/// ```
pub fn year_of(cve_id: &str) -> Option<&str> {
    let first = cve_id.find('-')?;
    let last = cve_id.rfind('-')?;
    if last <= first {
        return None;
    }
    Some(&cve_id[first + 1..last]).filter(|year| is_entry_name(year))
}

/// Range directory of a CVE ID
///
/// Returns `None` when the number is not made of ASCII digits or has fewer
/// than three of them.
///
/// # Examples
/// ```
/// use cvelist::id::range_of;
///
/// assert_eq!(range_of("CVE-2021-2001").as_deref(), Some("2xxx"));
/// assert_eq!(range_of("CVE-2021-20001").as_deref(), Some("20xxx"));
/// assert_eq!(range_of("CVE-2021-0999").as_deref(), Some("0xxx"));
/// ```
pub fn range_of(cve_id: &str) -> Option<String> {
    let number = &cve_id[cve_id.rfind('-')? + 1..];
    if number.len() < RANGE_SUFFIX.len() || !number.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let prefix = &number[..number.len() - RANGE_SUFFIX.len()];
    Some(format!("{prefix}{RANGE_SUFFIX}"))
}

/// File name of the JSON record for a CVE ID
pub fn file_name_of(cve_id: &str) -> String {
    format!("{cve_id}.json")
}

/// Path of a CVE ID's record relative to the repository root
///
/// ```
/// use cvelist::id::relative_path_of;
/// use std::path::PathBuf;
///
/// assert_eq!(
///     relative_path_of("CVE-2021-2001"),
///     Some(PathBuf::from("2021/2xxx/CVE-2021-2001.json"))
/// );
/// ```
pub fn relative_path_of(cve_id: &str) -> Option<PathBuf> {
    let year = year_of(cve_id)?;
    let range = range_of(cve_id)?;
    let file_name = file_name_of(cve_id);
    if !is_entry_name(&file_name) {
        return None;
    }
    Some([year, range.as_str(), file_name.as_str()].iter().collect())
}

/// A validated CVE ID (`CVE-YYYY-NNNN`, four or more digits in the number)
///
/// Lookups accept any `&str`; `CveId` is for callers that want to reject
/// garbage up front.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CveId(String);

impl CveId {
    /// Pattern for valid CVE IDs
    const PATTERN: &'static str = r"^CVE-[0-9]{4}-[0-9]{4,}$";

    /// Parse and validate a CVE ID
    ///
    /// # Errors
    ///
    /// Returns `InvalidId` if the ID does not look like `CVE-YYYY-NNNN`.
    pub fn parse(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if !Self::regex().is_match(&id) {
            return Err(CveListError::InvalidId(id));
        }
        Ok(CveId(id))
    }

    fn regex() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new(Self::PATTERN).unwrap())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The four digit year
    pub fn year(&self) -> u32 {
        // Validated by PATTERN
        self.0[4..8].parse().unwrap_or(0)
    }

    /// The sequence number after the year
    pub fn number(&self) -> &str {
        &self.0[9..]
    }

    /// The range directory this ID belongs to
    pub fn range(&self) -> String {
        let number = self.number();
        format!("{}{}", &number[..number.len() - RANGE_SUFFIX.len()], RANGE_SUFFIX)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for CveId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for CveId {
    type Err = CveListError;

    fn from_str(s: &str) -> Result<Self> {
        CveId::parse(s)
    }
}

impl fmt::Display for CveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_year_of() {
        assert_eq!(year_of("CVE-2021-2001"), Some("2021"));
        assert_eq!(year_of("CVE-1999-0001"), Some("1999"));
        assert_eq!(year_of("CVE-3000-1234"), Some("3000"));
        assert_eq!(year_of("CVE2021"), None);
        assert_eq!(year_of("CVE-2021"), None);
        assert_eq!(year_of("CVE--2001"), None);
        assert_eq!(year_of("CVE-/tmp-2001"), None);
        assert_eq!(year_of("CVE-..-2001"), None);
        assert_eq!(year_of("CVE-2021/..-2001"), None);
    }

    #[test]
    fn test_range_of() {
        assert_eq!(range_of("CVE-2021-2001").as_deref(), Some("2xxx"));
        assert_eq!(range_of("CVE-2021-9999").as_deref(), Some("9xxx"));
        assert_eq!(range_of("CVE-2021-20001").as_deref(), Some("20xxx"));
        assert_eq!(range_of("CVE-2021-100001").as_deref(), Some("100xxx"));
        assert_eq!(range_of("CVE-2021-123").as_deref(), Some("xxx"));
        assert_eq!(range_of("CVE-2021-12"), None);
        assert_eq!(range_of("CVE-2021-abcd"), None);
        assert_eq!(range_of("CVE"), None);
    }

    #[test]
    fn test_relative_path_of() {
        assert_eq!(
            relative_path_of("CVE-2021-20001"),
            Some(PathBuf::from("2021/20xxx/CVE-2021-20001.json"))
        );
        assert_eq!(relative_path_of("nonsense"), None);
        assert_eq!(relative_path_of("CVE-/etc-2001"), None);
        assert_eq!(relative_path_of("../CVE-2021-2001"), None);
    }

    #[test]
    fn test_valid_ids() {
        assert!(CveId::parse("CVE-2021-2001").is_ok());
        assert!(CveId::parse("CVE-1999-0001").is_ok());
        assert!(CveId::parse("CVE-2021-1234567").is_ok());
    }

    #[test]
    fn test_invalid_ids() {
        assert!(CveId::parse("").is_err());
        assert!(CveId::parse("cve-2021-2001").is_err()); // lowercase
        assert!(CveId::parse("CVE-21-2001").is_err()); // short year
        assert!(CveId::parse("CVE-2021-201").is_err()); // short number
        assert!(CveId::parse("CVE-2021-2001 ").is_err()); // trailing space
        assert!(CveId::parse("CVE-2021-20a1").is_err());
    }

    #[test]
    fn test_cve_id_parts() {
        let id: CveId = "CVE-2021-20001".parse().unwrap();
        assert_eq!(id.year(), 2021);
        assert_eq!(id.number(), "20001");
        assert_eq!(id.range(), "20xxx");
        assert_eq!(id.to_string(), "CVE-2021-20001");
    }

    proptest! {
        #[test]
        fn prop_path_round_trips(year in 1999u32..2030, number in 0u64..10_000_000, width in 4usize..8) {
            let id = format!("CVE-{year}-{number:0width$}");
            let path = relative_path_of(&id).unwrap();

            let parts: Vec<_> = path.iter().map(|p| p.to_str().unwrap().to_string()).collect();
            prop_assert_eq!(parts.len(), 3);
            prop_assert_eq!(&parts[0], &year.to_string());
            prop_assert!(parts[1].ends_with(RANGE_SUFFIX));
            prop_assert_eq!(&parts[2], &format!("{id}.json"));

            // The file name alone recovers the ID, and the ID recovers the directories
            let recovered = parts[2].trim_end_matches(".json");
            prop_assert_eq!(year_of(recovered), Some(parts[0].as_str()));
            prop_assert_eq!(range_of(recovered), Some(parts[1].clone()));
        }

        #[test]
        fn prop_range_keeps_all_but_last_three_digits(number in "[0-9]{3,10}") {
            let range = range_of(&format!("CVE-2021-{number}")).unwrap();
            prop_assert_eq!(range.len(), number.len());
            prop_assert_eq!(&range[..range.len() - 3], &number[..number.len() - 3]);
        }
    }
}
