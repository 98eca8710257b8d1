//! Core types shared across the harpack workspace.
//!
//! Holds the error hierarchy, the project configuration reader, and the
//! release version model. Everything here is passive data; the pipeline
//! logic lives in `harpack-pipeline`.

pub mod config;
pub mod error;
pub mod version;

pub use config::ProjectConfig;
pub use error::{HarpackError, Result};
pub use version::VersionInfo;
