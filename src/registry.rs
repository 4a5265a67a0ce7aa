//! Known MSBuild versions and their display strings.

use crate::FinderError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A decimal tools version such as `3.5`, `14.0` or `16.0`.
///
/// Ordering is numeric on `(major, minor)`. Parsing accepts `"12"`, `"12.0"`
/// and `"3.5"`; anything else (including negative numbers) is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionKey {
    major: u32,
    minor: u32,
}

impl VersionKey {
    /// Oldest generation that uses the Visual Studio installation layout.
    pub const VS2017: Self = Self::new(15, 0);

    /// Fallback when nothing newer can be found.
    pub const FRAMEWORK_4: Self = Self::new(4, 0);

    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }
}

impl fmt::Display for VersionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for VersionKey {
    type Err = FinderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FinderError::UnknownVersion {
            requested: s.to_string(),
        };
        let trimmed = s.trim();
        let (major, minor) = match trimmed.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (trimmed, "0"),
        };
        let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !digits(major) || !digits(minor) {
            return Err(invalid());
        }

        Ok(Self {
            major: major.parse().map_err(|_| invalid())?,
            minor: minor.parse().map_err(|_| invalid())?,
        })
    }
}

impl TryFrom<String> for VersionKey {
    type Error = FinderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<VersionKey> for String {
    fn from(value: VersionKey) -> Self {
        value.to_string()
    }
}

/// Versions shipped before runtime discovery existed.
const SEEDED_VERSIONS: &[(VersionKey, &str)] = &[
    (VersionKey::new(1, 0), "v1.0.3705"),
    (VersionKey::new(1, 1), "v1.1.4322"),
    (VersionKey::new(2, 0), "v2.0.50727"),
    (VersionKey::new(3, 5), "v3.5"),
    (VersionKey::new(4, 0), "v4.0.30319"),
    (VersionKey::new(12, 0), "12.0"),
    (VersionKey::new(14, 0), "14.0"),
    (VersionKey::new(15, 0), "15.0"),
];

/// Mapping from version key to the directory name MSBuild uses for it.
///
/// The registry only grows. Registering a key that already exists is a
/// no-op and keeps the original display string.
///
/// # Example
///
/// ```rust
/// use msbuild_finder::{VersionKey, VersionRegistry};
///
/// let mut registry = VersionRegistry::default();
/// assert_eq!(registry.lookup(VersionKey::new(4, 0)), Some("v4.0.30319"));
///
/// assert!(registry.register(VersionKey::new(17, 0), "17.0"));
/// assert!(!registry.register(VersionKey::new(17, 0), "17.9"));
/// assert_eq!(registry.lookup(VersionKey::new(17, 0)), Some("17.0"));
/// ```
#[derive(Debug, Clone)]
pub struct VersionRegistry {
    entries: BTreeMap<VersionKey, String>,
}

impl VersionRegistry {
    /// A registry with no versions at all.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn lookup(&self, key: VersionKey) -> Option<&str> {
        self.entries.get(&key).map(String::as_str)
    }

    pub fn contains(&self, key: VersionKey) -> bool {
        self.entries.contains_key(&key)
    }

    /// Add a version. Returns `false` and changes nothing if it is known.
    pub fn register(&mut self, key: VersionKey, display: impl Into<String>) -> bool {
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, display.into());
        true
    }

    /// Known keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = VersionKey> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for VersionRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        for (key, display) in SEEDED_VERSIONS {
            registry.register(*key, *display);
        }
        registry
    }
}
