//! Version command - print the resolved release version

use std::path::Path;

use clap::Args;
use tracing::info;

use harpack_core::Result;
use harpack_pipeline::version;

/// Print the release version that a pipeline run would use
#[derive(Debug, Args)]
pub struct VersionCommand {
    /// Print only the full version string
    #[arg(long)]
    pub short: bool,
}

impl VersionCommand {
    pub fn execute(&self, project_root: &Path) -> Result<()> {
        let version = version::resolve(project_root);
        info!(version = %version, "resolved version");

        if self.short {
            println!("{}", version.full_version());
        } else {
            println!("name:   {}", version.name);
            println!("suffix: {}", version.suffix);
            println!("full:   {}", version.full_version());
        }
        Ok(())
    }
}
