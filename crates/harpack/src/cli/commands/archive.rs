//! Archive command - run the full release packaging pipeline

use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use tracing::info;

use harpack_core::Result;
use harpack_pipeline::{Pipeline, PipelineConfig, ShellRunner};

/// Build, package, and archive the SDK into a versioned zip
#[derive(Debug, Args)]
pub struct ArchiveCommand {
    /// Output directory for the package and archive, relative to the
    /// project root (e.g. `target/ohos` instead of `bin`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ArchiveCommand {
    pub fn execute(&self, project_root: &Path) -> Result<()> {
        let mut config = PipelineConfig::ohos();
        if let Some(ref output) = self.output {
            config.layout = config.layout.with_output_dir(output);
        }

        info!(project_root = %project_root.display(), "starting archive pipeline");

        let pipeline = Pipeline::new(ShellRunner::new()).with_config(config);
        let report = pipeline.run(project_root)?;

        info!(
            archive = %report.archive.path.display(),
            size_bytes = report.archive.size_bytes,
            duration_ms = report.duration_ms,
            "archive pipeline finished"
        );

        println!(
            "\n{} {} ({})",
            style("Done:").green().bold(),
            report.archive.path.display(),
            report.version.full_version()
        );
        Ok(())
    }
}
