//! Archive creation
//!
//! Compresses the staging tree into a single zip whose sole top-level
//! entry is the staging directory's own name, so extracting the archive
//! anywhere reproduces the directory as assembled. The staging tree is
//! deleted only after the zip is fully written; on failure it is kept
//! on disk for diagnosis.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use harpack_core::error::PipelineError;

use crate::Result;

/// A successfully written archive
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveResult {
    /// Path of the zip file
    pub path: PathBuf,

    /// Size of the zip file in bytes
    pub size_bytes: u64,
}

/// Compress a staging directory into `zip_path`.
///
/// Any pre-existing file at `zip_path` is replaced outright; archives
/// are never appended to or merged.
#[instrument(fields(staging = %staging_dir.display(), zip = %zip_path.display()))]
pub fn archive(staging_dir: &Path, zip_path: &Path) -> Result<ArchiveResult> {
    let top_level = staging_dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| {
            PipelineError::ArchiveFailed(format!(
                "staging directory has no name: {}",
                staging_dir.display()
            ))
        })?;

    if zip_path.exists() {
        fs::remove_file(zip_path)?;
    }

    if let Err(e) = write_zip(staging_dir, &top_level, zip_path) {
        // Leave the staging tree in place; drop any partial zip.
        let _ = fs::remove_file(zip_path);
        return Err(e);
    }

    fs::remove_dir_all(staging_dir)?;

    let size_bytes = fs::metadata(zip_path)?.len();
    info!(size_bytes, "archive written");

    Ok(ArchiveResult {
        path: zip_path.to_path_buf(),
        size_bytes,
    })
}

fn write_zip(staging_dir: &Path, top_level: &str, zip_path: &Path) -> Result<()> {
    let file = File::create(zip_path)?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in WalkDir::new(staging_dir).sort_by_file_name() {
        let entry = entry.map_err(|e| PipelineError::ArchiveFailed(e.to_string()))?;
        let relative = entry
            .path()
            .strip_prefix(staging_dir)
            .map_err(|e| PipelineError::ArchiveFailed(e.to_string()))?;

        let name = Path::new(top_level)
            .join(relative)
            .to_string_lossy()
            .replace('\\', "/");

        if entry.file_type().is_dir() {
            writer
                .add_directory(name, options)
                .map_err(|e| PipelineError::ArchiveFailed(e.to_string()))?;
        } else {
            writer
                .start_file(name, options)
                .map_err(|e| PipelineError::ArchiveFailed(e.to_string()))?;
            let mut source = File::open(entry.path())?;
            io::copy(&mut source, &mut writer)?;
        }
    }

    writer
        .finish()
        .map_err(|e| PipelineError::ArchiveFailed(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn populate_staging(root: &Path) -> PathBuf {
        let staging = root.join("(ARCHIVE)_WIDGETSDK_OHOS_SDK-1.0.0-release");
        fs::create_dir_all(staging.join("libs/arm64-v8a")).unwrap();
        fs::create_dir_all(staging.join("obj/local/arm64-v8a")).unwrap();
        fs::write(staging.join("libs/arm64-v8a/libwidget.so"), "stripped").unwrap();
        fs::write(staging.join("obj/local/arm64-v8a/libwidget.so"), "symbols").unwrap();
        staging
    }

    #[test]
    fn test_archive_removes_staging_and_reports_size() {
        let temp = TempDir::new().unwrap();
        let staging = populate_staging(temp.path());
        let zip_path = temp.path().join("out.zip");

        let result = archive(&staging, &zip_path).unwrap();

        assert_eq!(result.path, zip_path);
        assert!(result.size_bytes > 0);
        assert_eq!(result.size_bytes, fs::metadata(&zip_path).unwrap().len());
        assert!(!staging.exists());
    }

    #[test]
    fn test_archive_top_level_entry_is_staging_name() {
        let temp = TempDir::new().unwrap();
        let staging = populate_staging(temp.path());
        let zip_path = temp.path().join("out.zip");

        archive(&staging, &zip_path).unwrap();

        let reader = File::open(&zip_path).unwrap();
        let mut zip = zip::ZipArchive::new(reader).unwrap();
        let names: Vec<String> = (0..zip.len())
            .map(|i| zip.by_index(i).unwrap().name().to_string())
            .collect();

        assert!(names.iter().all(|n| {
            n.starts_with("(ARCHIVE)_WIDGETSDK_OHOS_SDK-1.0.0-release/")
                || n == "(ARCHIVE)_WIDGETSDK_OHOS_SDK-1.0.0-release/"
        }));
        assert!(names
            .iter()
            .any(|n| n.ends_with("libs/arm64-v8a/libwidget.so")));
        assert!(names
            .iter()
            .any(|n| n.ends_with("obj/local/arm64-v8a/libwidget.so")));
    }

    #[test]
    fn test_archive_replaces_existing_zip() {
        let temp = TempDir::new().unwrap();
        let staging = populate_staging(temp.path());
        let zip_path = temp.path().join("out.zip");
        fs::write(&zip_path, "not a zip").unwrap();

        let result = archive(&staging, &zip_path).unwrap();

        // The stale file was replaced with a real zip
        let reader = File::open(&result.path).unwrap();
        assert!(zip::ZipArchive::new(reader).is_ok());
    }

    #[test]
    fn test_archive_missing_staging_keeps_nothing() {
        let temp = TempDir::new().unwrap();
        let staging = temp.path().join("never-created");
        let zip_path = temp.path().join("out.zip");

        let result = archive(&staging, &zip_path);
        assert!(result.is_err());
        assert!(!zip_path.exists());
    }

    #[test]
    fn test_archive_failure_keeps_staging() {
        let temp = TempDir::new().unwrap();
        let staging = populate_staging(temp.path());
        // Target the zip inside a directory that does not exist
        let zip_path = temp.path().join("missing-dir").join("out.zip");

        let result = archive(&staging, &zip_path);
        assert!(result.is_err());
        assert!(staging.exists());
    }
}
