//! Pipeline orchestration
//!
//! A fixed linear sequence: resolve version, run the native build, run
//! the platform packager, collect and stage artifacts, archive. The
//! sequence is modelled as a tagged state enum driven by a single loop;
//! an error from any step aborts the run and propagates to the caller.
//! There is no partial re-entry; a retried run starts from `Start`.

use std::fs;
use std::path::Path;
use std::time::Instant;

use tracing::{info, instrument};

use harpack_core::VersionInfo;

use crate::archive::{self, ArchiveResult};
use crate::collect::{self, ArtifactManifest};
use crate::command::{CommandRunner, CommandSpec};
use crate::context::{PipelineContext, PlatformLayout};
use crate::{version, Result};

/// Pipeline configuration: platform layout plus the two external
/// commands the pipeline drives.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Platform filesystem layout
    pub layout: PlatformLayout,

    /// Native build command, run in the project root
    pub native_build: CommandSpec,

    /// Platform packaging command, run in the platform root
    pub package: CommandSpec,
}

impl PipelineConfig {
    /// Default OHOS configuration: native libraries via the project
    /// build tool, the HAR via hvigor.
    pub fn ohos() -> Self {
        Self {
            layout: PlatformLayout::ohos(),
            native_build: CommandSpec::new("ccgo", &["build", "ohos", "--native-only"]),
            package: CommandSpec::new(
                "hvigorw",
                &[
                    "assembleHar",
                    "--mode",
                    "module",
                    "-p",
                    "product=default",
                    "--no-daemon",
                    "--info",
                ],
            ),
        }
    }

    /// Override the platform layout
    pub fn with_layout(mut self, layout: PlatformLayout) -> Self {
        self.layout = layout;
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::ohos()
    }
}

/// Pipeline progress, one variant per completed phase.
///
/// The terminal failure state is represented by the `Err` returned from
/// the failing step; there is no `Failed` variant to resume from.
#[derive(Debug)]
pub enum PipelineState {
    /// Nothing done yet
    Start,
    /// Version resolved, context built
    VersionResolved(PipelineContext),
    /// Native build command succeeded
    NativeBuilt(PipelineContext),
    /// Platform packaging command succeeded
    Packaged(PipelineContext),
    /// Artifacts collected and staged
    Collected(PipelineContext, ArtifactManifest),
    /// Archive written, staging removed
    Archived(PipelineContext, ArtifactManifest, ArchiveResult),
    /// Summary reported
    Done(PipelineReport),
}

impl PipelineState {
    /// Phase label for progress and error reporting
    pub fn phase(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::VersionResolved(_) => "version",
            Self::NativeBuilt(_) => "native build",
            Self::Packaged(_) => "package",
            Self::Collected(..) => "collect",
            Self::Archived(..) => "archive",
            Self::Done(_) => "done",
        }
    }
}

/// Final outcome of a successful run
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Resolved release version
    pub version: VersionInfo,

    /// What was collected
    pub manifest: ArtifactManifest,

    /// The written archive
    pub archive: ArchiveResult,

    /// Wall-clock duration of the run in milliseconds
    pub duration_ms: u64,
}

/// Drives the release packaging pipeline.
///
/// Owns the configuration and the command runner; each call to
/// [`Pipeline::run`] is an independent, full build-and-package cycle.
pub struct Pipeline<R: CommandRunner> {
    config: PipelineConfig,
    runner: R,
}

impl<R: CommandRunner> Pipeline<R> {
    /// Create a pipeline with the default OHOS configuration
    pub fn new(runner: R) -> Self {
        Self {
            config: PipelineConfig::default(),
            runner,
        }
    }

    /// Set configuration
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the full pipeline for a project root.
    ///
    /// Fails fast: the first hard failure aborts the remaining steps.
    /// On archive failure the staging directory is left on disk for
    /// diagnosis; every other cleanup has already happened by then.
    #[instrument(skip(self), fields(project_root = %project_root.display()))]
    pub fn run(&self, project_root: &Path) -> Result<PipelineReport> {
        let start = Instant::now();
        let mut state = PipelineState::Start;

        loop {
            info!(phase = state.phase(), "entering phase");
            state = match state {
                PipelineState::Start => self.resolve_version(project_root)?,
                PipelineState::VersionResolved(ctx) => self.native_build(ctx)?,
                PipelineState::NativeBuilt(ctx) => self.package(ctx)?,
                PipelineState::Packaged(ctx) => self.collect(ctx)?,
                PipelineState::Collected(ctx, manifest) => self.archive(ctx, manifest)?,
                PipelineState::Archived(ctx, manifest, result) => {
                    self.report(ctx, manifest, result, start)?
                }
                PipelineState::Done(report) => return Ok(report),
            };
        }
    }

    fn resolve_version(&self, project_root: &Path) -> Result<PipelineState> {
        banner(&format!(
            "{} Release Package",
            self.config.layout.platform
        ));

        let version = version::resolve(project_root);
        let ctx = PipelineContext::new(project_root, self.config.layout.clone(), version)?;

        println!("Project: {}", ctx.project_name);
        println!("Version: {}", ctx.version.full_version());
        info!(project = %ctx.project_name, version = %ctx.version, "version resolved");

        Ok(PipelineState::VersionResolved(ctx))
    }

    fn native_build(&self, ctx: PipelineContext) -> Result<PipelineState> {
        section("Step 1: Building native libraries");
        self.runner
            .run(&self.config.native_build, &ctx.project_root)?;
        Ok(PipelineState::NativeBuilt(ctx))
    }

    fn package(&self, ctx: PipelineContext) -> Result<PipelineState> {
        section("Step 2: Packaging SDK module");
        self.runner.run(&self.config.package, &ctx.platform_root)?;
        Ok(PipelineState::Packaged(ctx))
    }

    fn collect(&self, ctx: PipelineContext) -> Result<PipelineState> {
        section("Step 3: Collecting artifacts");
        let manifest = collect::collect(&ctx)?;
        collect::materialize(&manifest, &ctx)?;
        Ok(PipelineState::Collected(ctx, manifest))
    }

    fn archive(&self, ctx: PipelineContext, manifest: ArtifactManifest) -> Result<PipelineState> {
        section("Step 4: Writing archive");
        let result = archive::archive(&ctx.staging_dir(), &ctx.archive_path())?;
        println!(
            "Archive created: {} ({})",
            result.path.display(),
            human_size(result.size_bytes)
        );
        Ok(PipelineState::Archived(ctx, manifest, result))
    }

    fn report(
        &self,
        ctx: PipelineContext,
        manifest: ArtifactManifest,
        result: ArchiveResult,
        start: Instant,
    ) -> Result<PipelineState> {
        banner("Archive Complete");

        if manifest.package.is_some() {
            println!(
                "Package: {}",
                ctx.output_dir.join(ctx.package_file_name()).display()
            );
        }
        println!("Archive: {}", result.path.display());

        println!("\nContents of {}:", ctx.output_dir.display());
        for (name, size) in list_directory(&ctx.output_dir)? {
            println!("  {} ({})", name, human_size(size));
        }

        let duration_ms = start.elapsed().as_millis() as u64;
        println!("\nUse time: {}s", duration_ms / 1000);
        info!(duration_ms, "pipeline finished");

        Ok(PipelineState::Done(PipelineReport {
            version: ctx.version,
            manifest,
            archive: result,
            duration_ms,
        }))
    }
}

/// Sorted file listing of a directory with sizes
fn list_directory(dir: &Path) -> Result<Vec<(String, u64)>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let metadata = entry.metadata()?;
        if metadata.is_file() {
            entries.push((entry.file_name().to_string_lossy().to_string(), metadata.len()));
        }
    }
    entries.sort();
    Ok(entries)
}

/// Human-readable size, matching the build scripts' MB formatting
fn human_size(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

fn banner(title: &str) {
    println!("=================={}========================", title);
}

fn section(title: &str) {
    println!("\n--- {} ---", title);
}
