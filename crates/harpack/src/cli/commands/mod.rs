//! CLI command implementations

mod archive;
mod version;

pub use archive::ArchiveCommand;
pub use version::VersionCommand;
