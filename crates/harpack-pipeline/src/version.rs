//! Release version resolution
//!
//! Derives the channel suffix from repository state with an ordered
//! fallback chain; the base name comes from project configuration.
//! Resolution never fails: any git error is treated as "no match" and
//! falls through to the next rule.

use std::path::Path;

use tracing::{debug, instrument};

use harpack_core::{ProjectConfig, VersionInfo};
use harpack_git::GitRepo;

/// Suffix for builds from the default branch
pub const SUFFIX_RELEASE: &str = "release";

/// Suffix when no tag or release branch applies
pub const SUFFIX_BETA: &str = "beta.0";

/// Branches that produce a `release` suffix
const RELEASE_BRANCHES: [&str; 2] = ["main", "master"];

/// Resolve the release version for a project root.
///
/// Suffix rules, first match wins:
/// 1. latest reachable tag containing `-`: everything after the first `-`
/// 2. current branch is `main` or `master`: `release`
/// 3. otherwise: `beta.0`
#[instrument(fields(project_root = %project_root.display()))]
pub fn resolve(project_root: &Path) -> VersionInfo {
    let name = ProjectConfig::load(project_root).version_name;
    let suffix = resolve_suffix(project_root);

    let version = VersionInfo::new(name, suffix);
    debug!(version = %version, "resolved release version");
    version
}

fn resolve_suffix(project_root: &Path) -> String {
    let repo = match GitRepo::discover(project_root) {
        Ok(repo) => repo,
        Err(_) => return SUFFIX_BETA.to_string(),
    };

    if let Ok(Some(tag)) = repo.latest_reachable_tag() {
        if let Some((_, suffix)) = tag.split_once('-') {
            return suffix.to_string();
        }
    }

    match repo.current_branch() {
        Ok(Some(branch)) if RELEASE_BRANCHES.contains(&branch.as_str()) => {
            SUFFIX_RELEASE.to_string()
        }
        _ => SUFFIX_BETA.to_string(),
    }
}
