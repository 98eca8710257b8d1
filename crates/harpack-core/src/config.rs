//! Project configuration
//!
//! The base version name lives in the project's `build_config.py`
//! (shared with the native build tooling), as a line of the form
//! `VERSION_NAME = "1.2.3"`. The reader is deliberately forgiving: a
//! missing or unparseable file falls back to a default so version
//! resolution never fails.

use std::path::Path;

use regex::Regex;
use tracing::debug;

/// File consulted for the base version name
pub const BUILD_CONFIG_FILE: &str = "build_config.py";

/// Version name used when the configuration is missing or unreadable
pub const DEFAULT_VERSION_NAME: &str = "1.0.0";

/// Project-level configuration values consumed by the pipeline
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    /// Base semantic version name (e.g. "1.2.3")
    pub version_name: String,
}

impl ProjectConfig {
    /// Load the configuration from a project root, falling back to
    /// defaults for anything missing.
    pub fn load(project_root: &Path) -> Self {
        let version_name = read_version_name(project_root)
            .unwrap_or_else(|| DEFAULT_VERSION_NAME.to_string());

        debug!(version_name, "loaded project config");
        Self { version_name }
    }
}

fn read_version_name(project_root: &Path) -> Option<String> {
    let path = project_root.join(BUILD_CONFIG_FILE);
    let content = std::fs::read_to_string(&path).ok()?;

    let pattern = Regex::new(r#"VERSION_NAME\s*=\s*["']([^"']+)["']"#).ok()?;
    pattern
        .captures(&content)
        .map(|caps| caps[1].to_string())
}
