//! The harpack release packaging pipeline
//!
//! A fixed, linear build-and-package workflow: resolve a release
//! version from repository state, drive the native build and platform
//! packaging tools, collect their outputs into a staging tree, and
//! compress it into a single versioned archive.
//!
//! Each run is a fresh pipeline instance; no state is carried between
//! invocations. External tool failures abort the run immediately.

pub mod archive;
pub mod collect;
pub mod command;
pub mod context;
pub mod orchestrator;
pub mod version;

pub use archive::ArchiveResult;
pub use collect::{ArtifactCategory, ArtifactManifest};
pub use command::{CommandRunner, CommandSpec, ShellRunner};
pub use context::{PipelineContext, PlatformLayout};
pub use orchestrator::{Pipeline, PipelineConfig, PipelineReport, PipelineState};

use harpack_core::error::PipelineError;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;
