use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Anchored at the start only: trailing text after the sub-patch digit is tolerated.
static RELEASE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})\.(\d{1,2})\.(\d{1,2})-(ce|ee)\.(\d{1})")
        .expect("release pattern is a valid regex")
});

/// Image edition encoded in a release tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edition {
    Community,
    Enterprise,
}

impl Edition {
    /// Map a tag marker ("ce" / "ee") to an edition
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "ce" => Some(Edition::Community),
            "ee" => Some(Edition::Enterprise),
            _ => None,
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            Edition::Community => "ce",
            Edition::Enterprise => "ee",
        }
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// A release tag of the form `MAJOR.MINOR.PATCH-KIND.SP` (e.g. "10.7.2-ee.3")
///
/// Only two comparisons exist on purpose:
/// - `==` compares the source strings, not the parsed fields
/// - [`ReleaseVersion::is_newer_than`] compares `(major, minor, patch, sp)`
///
/// There is no `PartialOrd`/`Ord`, so `<`, `<=` and `>=` do not compile.
/// Sorting goes through [`ReleaseVersion::sort_key`]. The edition never takes
/// part in ordering: a "ce" and an "ee" tag with equal numbers are not newer
/// than each other in either direction.
#[derive(Debug, Clone, Eq)]
pub struct ReleaseVersion {
    raw: String,
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub edition: Edition,
    pub sp: u32,
}

impl ReleaseVersion {
    /// Parse a tag string.
    ///
    /// Returns `None` when the tag does not match the release pattern; callers
    /// treat such tags as "not a release" rather than as an error.
    pub fn parse(tag: &str) -> Option<Self> {
        let captures = RELEASE_PATTERN.captures(tag)?;
        let number = |i: usize| captures.get(i)?.as_str().parse::<u32>().ok();

        Some(ReleaseVersion {
            raw: tag.to_string(),
            major: number(1)?,
            minor: number(2)?,
            patch: number(3)?,
            edition: Edition::from_marker(captures.get(4)?.as_str())?,
            sp: number(5)?,
        })
    }

    /// Strict greater-than over `(major, minor, patch, sp)`
    pub fn is_newer_than(&self, other: &ReleaseVersion) -> bool {
        self.sort_key() > other.sort_key()
    }

    /// Ascending sort key; the edition is deliberately absent
    pub fn sort_key(&self) -> (u32, u32, u32, u32) {
        (self.major, self.minor, self.patch, self.sp)
    }

    pub fn edition(&self) -> Edition {
        self.edition
    }

    /// The tag string this version was parsed from
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl PartialEq for ReleaseVersion {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(tag: &str) -> ReleaseVersion {
        ReleaseVersion::parse(tag).unwrap()
    }

    #[test]
    fn test_parse_fields() {
        let version = v("10.7.2-ee.3");
        assert_eq!(version.major, 10);
        assert_eq!(version.minor, 7);
        assert_eq!(version.patch, 2);
        assert_eq!(version.edition(), Edition::Enterprise);
        assert_eq!(version.sp, 3);
        assert_eq!(version.as_str(), "10.7.2-ee.3");
    }

    #[test]
    fn test_parse_community_edition() {
        let version = v("1.2.3-ce.0");
        assert_eq!(version.edition(), Edition::Community);
        assert_eq!(version.sort_key(), (1, 2, 3, 0));
    }

    #[test]
    fn test_parse_non_matching() {
        for tag in [
            "latest",
            "nightly",
            "v1.2.3-ce.0",
            "1.2.3",
            "1.2.3-rc.0",
            "1.2.3-ce",
            "123.2.3-ce.0",
            "1.2.3-CE.0",
            "",
        ] {
            assert!(ReleaseVersion::parse(tag).is_none(), "{} should not parse", tag);
        }
    }

    #[test]
    fn test_parse_keeps_trailing_text() {
        // Only the first sub-patch digit is captured, the source string is kept whole
        let version = v("1.2.3-ce.10");
        assert_eq!(version.sp, 1);
        assert_eq!(version.as_str(), "1.2.3-ce.10");

        let rc = v("11.0.0-ee.0-rc1");
        assert_eq!(rc.sort_key(), (11, 0, 0, 0));
    }

    #[test]
    fn test_newer_by_sub_patch() {
        let a = v("1.2.3-ce.1");
        let b = v("1.2.3-ce.0");
        assert!(a.is_newer_than(&b));
        assert!(!b.is_newer_than(&a));
        assert!(!a.is_newer_than(&a));
    }

    #[test]
    fn test_newer_is_lexicographic() {
        assert!(v("1.3.0-ce.0").is_newer_than(&v("1.2.9-ce.9")));
        assert!(v("2.0.0-ce.0").is_newer_than(&v("1.99.99-ce.9")));
        assert!(v("10.0.0-ce.0").is_newer_than(&v("9.9.9-ce.0")));
        assert!(!v("1.2.9-ce.9").is_newer_than(&v("1.3.0-ce.0")));
    }

    #[test]
    fn test_edition_ignored_in_ordering() {
        let ce = v("1.2.3-ce.0");
        let ee = v("1.2.3-ee.0");
        assert!(!ce.is_newer_than(&ee));
        assert!(!ee.is_newer_than(&ce));
        assert_ne!(ce, ee);
    }

    #[test]
    fn test_equality_is_string_identity() {
        let padded = v("01.2.3-ce.0");
        let plain = v("1.2.3-ce.0");
        assert_eq!(padded.sort_key(), plain.sort_key());
        assert_ne!(padded, plain);
        assert_eq!(plain, v("1.2.3-ce.0"));
    }

    #[test]
    fn test_display_is_source_string() {
        assert_eq!(v("8.17.4-ee.0").to_string(), "8.17.4-ee.0");
        assert_eq!(Edition::Community.to_string(), "ce");
    }
}
