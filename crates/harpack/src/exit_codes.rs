//! Exit codes for the CLI

#![allow(dead_code)]

use harpack_core::error::{HarpackError, PipelineError};

/// Success
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Configuration error
pub const CONFIG_ERROR: i32 = 2;

/// Git error
pub const GIT_ERROR: i32 = 3;

/// External build/package command failed
pub const BUILD_ERROR: i32 = 4;

/// Archive creation failed
pub const ARCHIVE_ERROR: i32 = 5;

/// Map an error to the process exit code
pub fn for_error(err: &HarpackError) -> i32 {
    match err {
        HarpackError::Config(_) => CONFIG_ERROR,
        HarpackError::Git(_) => GIT_ERROR,
        HarpackError::Pipeline(
            PipelineError::CommandFailed { .. } | PipelineError::CommandSpawnFailed { .. },
        ) => BUILD_ERROR,
        HarpackError::Pipeline(PipelineError::ArchiveFailed(_)) => ARCHIVE_ERROR,
        _ => ERROR,
    }
}
