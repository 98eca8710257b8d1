//! Pipeline execution context
//!
//! All paths are explicit and threaded through every operation; no
//! component reads the process working directory. The context is built
//! once at pipeline start and read-only afterwards.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use harpack_core::error::PipelineError;
use harpack_core::VersionInfo;

use crate::Result;

/// Where a platform's build tree keeps its outputs, and how the
/// packaged SDK is labelled.
///
/// Defaulted for OpenHarmony; every field can be overridden for the
/// alternate output modes (e.g. `target/<platform>` instead of `bin`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformLayout {
    /// Platform label used in artifact names (e.g. "OHOS")
    pub platform: String,

    /// Platform build tree directory, relative to the project root
    pub platform_dir: String,

    /// SDK module directory, relative to the platform directory
    pub module_dir: String,

    /// File extension of the primary package artifact
    pub package_ext: String,

    /// Where the packager drops the primary package, relative to the module
    pub package_search_path: PathBuf,

    /// Debug-symbol tree, relative to the module
    pub symbols_path: PathBuf,

    /// Stripped release libraries, relative to the module
    pub libs_path: PathBuf,

    /// Generated/source tree shipped with the SDK, relative to the module
    pub source_path: PathBuf,

    /// Output directory for the versioned package and archive,
    /// relative to the project root
    pub output_dir: PathBuf,
}

impl PlatformLayout {
    /// Layout of an OpenHarmony SDK module built with hvigor
    pub fn ohos() -> Self {
        Self {
            platform: "OHOS".to_string(),
            platform_dir: "ohos".to_string(),
            module_dir: "main_ohos_sdk".to_string(),
            package_ext: "har".to_string(),
            package_search_path: ["build", "default", "outputs", "default"].iter().collect(),
            symbols_path: ["obj", "local"].iter().collect(),
            libs_path: PathBuf::from("libs"),
            source_path: ["src", "main", "ets"].iter().collect(),
            output_dir: PathBuf::from("bin"),
        }
    }

    /// Override the output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}

impl Default for PlatformLayout {
    fn default() -> Self {
        Self::ohos()
    }
}

/// Everything a pipeline run needs to know: resolved directories, the
/// release version, and the upper-cased project identifier used in
/// artifact names.
#[derive(Debug, Clone)]
pub struct PipelineContext {
    /// Overall project root (the SDK template checkout)
    pub project_root: PathBuf,

    /// Platform build tree root (e.g. `<root>/ohos`)
    pub platform_root: PathBuf,

    /// SDK module root (e.g. `<root>/ohos/main_ohos_sdk`)
    pub module_root: PathBuf,

    /// Output directory for the versioned package and archive
    pub output_dir: PathBuf,

    /// Upper-cased project name, from the project root's directory name
    pub project_name: String,

    /// Resolved release version
    pub version: VersionInfo,

    /// Platform filesystem layout
    pub layout: PlatformLayout,
}

impl PipelineContext {
    /// Build a context from a project root, layout, and resolved version.
    ///
    /// The project name is the root directory's own name, upper-cased,
    /// matching how the native build scripts name the project.
    pub fn new(project_root: &Path, layout: PlatformLayout, version: VersionInfo) -> Result<Self> {
        let project_name = project_root
            .file_name()
            .map(|n| n.to_string_lossy().to_uppercase())
            .ok_or_else(|| PipelineError::InvalidProjectRoot(project_root.to_path_buf()))?;

        let platform_root = project_root.join(&layout.platform_dir);
        let module_root = platform_root.join(&layout.module_dir);
        let output_dir = project_root.join(&layout.output_dir);

        Ok(Self {
            project_root: project_root.to_path_buf(),
            platform_root,
            module_root,
            output_dir,
            project_name,
            version,
            layout,
        })
    }

    /// `<PROJECT>_<PLATFORM>_SDK-<fullVersion>`
    pub fn release_stem(&self) -> String {
        format!(
            "{}_{}_SDK-{}",
            self.project_name,
            self.layout.platform,
            self.version.full_version()
        )
    }

    /// Destination filename of the primary package
    pub fn package_file_name(&self) -> String {
        format!("{}.{}", self.release_stem(), self.layout.package_ext)
    }

    /// Name of the staging directory (and the archive's top-level entry)
    pub fn archive_stem(&self) -> String {
        format!("(ARCHIVE)_{}", self.release_stem())
    }

    /// Staging directory assembled before compression
    pub fn staging_dir(&self) -> PathBuf {
        self.output_dir.join(self.archive_stem())
    }

    /// Final archive path
    pub fn archive_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.zip", self.archive_stem()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> PipelineContext {
        PipelineContext::new(
            Path::new("/proj/widgetsdk"),
            PlatformLayout::ohos(),
            VersionInfo::new("2.3.0", "beta.1"),
        )
        .unwrap()
    }

    #[test]
    fn test_derived_paths() {
        let ctx = context();
        assert_eq!(ctx.platform_root, Path::new("/proj/widgetsdk/ohos"));
        assert_eq!(
            ctx.module_root,
            Path::new("/proj/widgetsdk/ohos/main_ohos_sdk")
        );
        assert_eq!(ctx.output_dir, Path::new("/proj/widgetsdk/bin"));
    }

    #[test]
    fn test_project_name_upper_cased() {
        let ctx = context();
        assert_eq!(ctx.project_name, "WIDGETSDK");
    }

    #[test]
    fn test_versioned_artifact_names() {
        let ctx = context();
        assert_eq!(
            ctx.package_file_name(),
            "WIDGETSDK_OHOS_SDK-2.3.0-beta.1.har"
        );
        assert_eq!(
            ctx.archive_stem(),
            "(ARCHIVE)_WIDGETSDK_OHOS_SDK-2.3.0-beta.1"
        );
        assert!(ctx
            .archive_path()
            .ends_with("bin/(ARCHIVE)_WIDGETSDK_OHOS_SDK-2.3.0-beta.1.zip"));
    }

    #[test]
    fn test_invalid_project_root() {
        let result = PipelineContext::new(
            Path::new("/"),
            PlatformLayout::ohos(),
            VersionInfo::new("1.0.0", "release"),
        );
        assert!(matches!(result, Err(PipelineError::InvalidProjectRoot(_))));
    }

    #[test]
    fn test_alternate_output_dir() {
        let layout = PlatformLayout::ohos().with_output_dir("target/ohos");
        let ctx = PipelineContext::new(
            Path::new("/proj/widgetsdk"),
            layout,
            VersionInfo::new("1.0.0", "release"),
        )
        .unwrap();
        assert_eq!(ctx.output_dir, Path::new("/proj/widgetsdk/target/ohos"));
    }
}
