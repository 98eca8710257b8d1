//! Artifact discovery and staging
//!
//! After the build and packaging steps, the platform build tree holds
//! four classes of output: the primary package file, the debug-symbol
//! tree, the stripped release libraries, and the generated source tree.
//! Each is searched for independently; a missing category is a warning,
//! not a failure.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use walkdir::WalkDir;

use harpack_core::error::PipelineError;

use crate::context::PipelineContext;
use crate::Result;

/// One of the fixed classes of build output the collector looks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactCategory {
    /// Primary package file (e.g. the `.har`)
    Package,
    /// Debug-symbol tree (must be stored permanently)
    Symbols,
    /// Stripped release libraries
    StrippedLibs,
    /// Generated/declaration source tree
    Source,
}

impl ArtifactCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Package => "package",
            Self::Symbols => "symbols",
            Self::StrippedLibs => "libs",
            Self::Source => "source",
        }
    }

    /// Destination sub-path under the staging root, for directory categories
    fn staging_subpath(&self) -> Option<&'static str> {
        match self {
            Self::Package => None,
            Self::Symbols => Some("obj/local"),
            Self::StrippedLibs => Some("libs"),
            Self::Source => Some("ets"),
        }
    }
}

/// Where each artifact category was found, if at all.
///
/// Absence of a category is not fatal; materialization simply skips it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtifactManifest {
    /// Primary package file
    pub package: Option<PathBuf>,

    /// Debug-symbol tree
    pub symbols: Option<PathBuf>,

    /// Stripped release libraries
    pub stripped_libs: Option<PathBuf>,

    /// Generated source tree
    pub source: Option<PathBuf>,
}

impl ArtifactManifest {
    /// True when no category was found at all
    pub fn is_empty(&self) -> bool {
        self.package.is_none()
            && self.symbols.is_none()
            && self.stripped_libs.is_none()
            && self.source.is_none()
    }
}

/// Locate build outputs under the module root.
///
/// The package search is deterministic: candidates are sorted and more
/// than one match is an error rather than a silent first-pick.
#[instrument(skip(ctx), fields(module_root = %ctx.module_root.display()))]
pub fn collect(ctx: &PipelineContext) -> Result<ArtifactManifest> {
    let manifest = ArtifactManifest {
        package: find_package(ctx)?,
        symbols: find_directory(ctx, ArtifactCategory::Symbols, &ctx.layout.symbols_path),
        stripped_libs: find_directory(ctx, ArtifactCategory::StrippedLibs, &ctx.layout.libs_path),
        source: find_directory(ctx, ArtifactCategory::Source, &ctx.layout.source_path),
    };

    if manifest.is_empty() {
        warn!("no build artifacts found; archive will be empty");
    }

    Ok(manifest)
}

fn find_package(ctx: &PipelineContext) -> Result<Option<PathBuf>> {
    let search_root = ctx.module_root.join(&ctx.layout.package_search_path);
    if !search_root.is_dir() {
        warn!(
            path = %search_root.display(),
            "package search directory does not exist"
        );
        return Ok(None);
    }

    let mut candidates: Vec<PathBuf> = fs::read_dir(&search_root)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path.extension().and_then(|e| e.to_str())
                    == Some(ctx.layout.package_ext.as_str())
        })
        .collect();
    candidates.sort();

    match candidates.len() {
        0 => {
            warn!(
                path = %search_root.display(),
                ext = %ctx.layout.package_ext,
                "no package file found"
            );
            Ok(None)
        }
        1 => Ok(candidates.pop()),
        _ => Err(PipelineError::AmbiguousArtifact {
            category: ArtifactCategory::Package.as_str().to_string(),
            candidates,
        }),
    }
}

fn find_directory(
    ctx: &PipelineContext,
    category: ArtifactCategory,
    relative: &Path,
) -> Option<PathBuf> {
    let path = ctx.module_root.join(relative);
    if path.is_dir() {
        Some(path)
    } else {
        warn!(
            category = category.as_str(),
            path = %path.display(),
            "artifact category missing; continuing without it"
        );
        None
    }
}

/// Copy collected artifacts to their canonical destinations.
///
/// The package file lands in the output directory under its versioned
/// name; directory categories are copied wholesale into the staging
/// tree. A staging directory left over from a prior run is deleted and
/// recreated first.
#[instrument(skip(manifest, ctx), fields(staging = %ctx.staging_dir().display()))]
pub fn materialize(manifest: &ArtifactManifest, ctx: &PipelineContext) -> Result<()> {
    fs::create_dir_all(&ctx.output_dir)?;

    if let Some(ref package) = manifest.package {
        let dest = ctx.output_dir.join(ctx.package_file_name());
        fs::copy(package, &dest)?;
        info!(dest = %dest.display(), "copied package");
        println!("Copied package: {}", dest.display());
    }

    let staging = ctx.staging_dir();
    if staging.exists() {
        fs::remove_dir_all(&staging)?;
    }
    fs::create_dir_all(&staging)?;

    for (category, source) in [
        (ArtifactCategory::Symbols, &manifest.symbols),
        (ArtifactCategory::StrippedLibs, &manifest.stripped_libs),
        (ArtifactCategory::Source, &manifest.source),
    ] {
        let Some(source) = source else { continue };
        // staging_subpath is always Some for directory categories
        let Some(subpath) = category.staging_subpath() else {
            continue;
        };

        let dest = staging.join(subpath);
        copy_tree(source, &dest)?;
        info!(category = category.as_str(), dest = %dest.display(), "staged artifact tree");
        println!("Copied {}: {}", category.as_str(), subpath);
    }

    Ok(())
}

/// Recursive copy preserving relative structure
fn copy_tree(src: &Path, dest: &Path) -> Result<()> {
    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            PipelineError::Io(e.into_io_error().unwrap_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::Other, "walk error")
            }))
        })?;

        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| PipelineError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
        }
    }

    Ok(())
}
