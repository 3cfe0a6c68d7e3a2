//! Extension version ordering
//!
//! Versions compare numerically on `major.minor.patch`. Parsing is lenient:
//! a missing or non-numeric component counts as zero and anything past the
//! third component is ignored. `"1.10"` sorts after `"1.2.9"`, and
//! `"2.0.0-beta"` compares equal to `"2.0.0"`.
//!
//! [`highest`] is the exception: it compares every component. The README
//! table uses it.

use std::cmp::Ordering;
use std::fmt;

use crate::types::ExtensionVersion;

/// Numeric sort key for a version string
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionKey {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl VersionKey {
    /// Parse a version string, never failing
    pub fn parse(version: &str) -> Self {
        let mut parts = version.split('.').map(parse_component);
        Self {
            major: parts.next().unwrap_or(0),
            minor: parts.next().unwrap_or(0),
            patch: parts.next().unwrap_or(0),
        }
    }
}

impl From<&str> for VersionKey {
    fn from(version: &str) -> Self {
        Self::parse(version)
    }
}

impl fmt::Display for VersionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

fn parse_component(part: &str) -> u64 {
    part.trim().parse().unwrap_or(0)
}

/// Compare two version strings
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    VersionKey::parse(a).cmp(&VersionKey::parse(b))
}

/// Sort versions ascending; equal keys keep their original order
pub fn sort_versions(versions: &mut [ExtensionVersion]) {
    versions.sort_by(|a, b| compare_versions(&a.version, &b.version));
}

/// Index of the first version that is not strictly greater than its
/// predecessor
pub fn first_order_violation(versions: &[ExtensionVersion]) -> Option<usize> {
    versions
        .windows(2)
        .position(|pair| compare_versions(&pair[0].version, &pair[1].version) != Ordering::Less)
        .map(|i| i + 1)
}

/// Strictly ascending with no ties
pub fn is_strictly_ascending(versions: &[ExtensionVersion]) -> bool {
    first_order_violation(versions).is_none()
}

/// Compare every dotted component, not just the first three
///
/// The shorter version is padded with zeros, so `1.2.3.9` is above
/// `1.2.3.4` and `1.2` equals `1.2.0.0`.
pub fn compare_all_components(a: &str, b: &str) -> Ordering {
    let pa: Vec<u64> = a.split('.').map(parse_component).collect();
    let pb: Vec<u64> = b.split('.').map(parse_component).collect();
    (0..pa.len().max(pb.len()))
        .map(|i| {
            let x = pa.get(i).copied().unwrap_or(0);
            let y = pb.get(i).copied().unwrap_or(0);
            x.cmp(&y)
        })
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Highest version string over all components; the last of equals wins
pub fn highest<'a, I>(versions: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    versions
        .into_iter()
        .reduce(|best, v| match compare_all_components(v, best) {
            Ordering::Less => best,
            _ => v,
        })
}
