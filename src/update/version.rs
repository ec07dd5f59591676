//! Release tag parsing and comparison.

/// A `vMAJOR.MINOR.PATCH` release version.
///
/// Ordering compares major, then minor, then patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReleaseVersion {
    major: u64,
    minor: u64,
    patch: u64,
}

impl ReleaseVersion {
    /// Creates a version from its components.
    #[must_use]
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parses a `v`-prefixed release tag.
    ///
    /// Pre-release (`-rc.1`) and build (`+sha`) suffixes are ignored.
    /// Components with leading zeros are rejected.
    ///
    /// # Example
    ///
    /// ```
    /// use pr_inbox::update::ReleaseVersion;
    ///
    /// assert_eq!(
    ///     ReleaseVersion::parse_tag("v1.4.0-rc.1"),
    ///     Some(ReleaseVersion::new(1, 4, 0))
    /// );
    /// assert_eq!(ReleaseVersion::parse_tag("1.4.0"), None);
    /// ```
    #[must_use]
    pub fn parse_tag(tag: &str) -> Option<Self> {
        let unprefixed = tag.trim().strip_prefix('v')?;
        let core = unprefixed.split(['-', '+']).next()?;

        let mut parts = core.split('.').map(parse_component);
        let (Some(major), Some(minor), Some(patch), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return None;
        };

        Some(Self::new(major?, minor?, patch?))
    }
}

fn parse_component(part: &str) -> Option<u64> {
    if part.is_empty() || !part.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    if part.len() > 1 && part.starts_with('0') {
        return None;
    }
    part.parse().ok()
}

/// Returns `true` when both tags parse and `latest` is strictly newer.
#[must_use]
pub fn is_newer(latest: &str, current: &str) -> bool {
    match (
        ReleaseVersion::parse_tag(latest),
        ReleaseVersion::parse_tag(current),
    ) {
        (Some(latest_version), Some(current_version)) => latest_version > current_version,
        _ => false,
    }
}
