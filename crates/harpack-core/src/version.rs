//! Release version model

use std::fmt;

use serde::{Deserialize, Serialize};

/// A resolved release version: a base name from project configuration
/// plus a channel suffix derived from repository state.
///
/// Recomputed fresh on every pipeline run; never cached across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Base semantic version (e.g. "2.3.0")
    pub name: String,

    /// Channel qualifier (e.g. "beta.1", "release")
    pub suffix: String,
}

impl VersionInfo {
    /// Create a new version
    pub fn new(name: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            suffix: suffix.into(),
        }
    }

    /// Full version string: `<name>-<suffix>`
    pub fn full_version(&self) -> String {
        format!("{}-{}", self.name, self.suffix)
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.name, self.suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_version() {
        let version = VersionInfo::new("2.3.0", "beta.1");
        assert_eq!(version.full_version(), "2.3.0-beta.1");
    }

    #[test]
    fn test_display_matches_full_version() {
        let version = VersionInfo::new("1.0.0", "release");
        assert_eq!(version.to_string(), version.full_version());
    }
}
