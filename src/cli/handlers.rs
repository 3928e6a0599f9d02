//! Subcommand handlers. Each returns the process exit code.

use anyhow::{bail, Context, Result};
use std::env;
use std::path::Path;
use tracing::{debug, error, info};

use super::commands::{InspectArgs, MigrateArgs};
use super::output::OutputFormatter;
use crate::analysis::{analyze, MigrationReport};
use crate::config::ShiftpackConfig;
use crate::fs::{FileSystem, RealFileSystem};
use crate::generate::ArtifactGenerator;

pub fn handle_migrate(args: &MigrateArgs, config: ShiftpackConfig) -> i32 {
    exit_code(run_migrate(args, config))
}

pub fn handle_inspect(args: &InspectArgs, config: ShiftpackConfig) -> i32 {
    exit_code(run_inspect(args, config))
}

fn exit_code(result: Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

fn run_migrate(args: &MigrateArgs, config: ShiftpackConfig) -> Result<()> {
    ensure_directory(&args.source)?;

    let config = match &args.output {
        Some(output) => config.with_output_dir(output),
        None => config,
    };
    validate(&config)?;

    let report = MigrationReport::build(&args.source);

    let artifacts = if args.dry_run {
        info!("Dry run, skipping artifact generation");
        None
    } else {
        let generator = ArtifactGenerator::new(&config.output_dir)
            .context("Failed to load artifact templates")?;
        let artifacts = generator.generate(&report.application).with_context(|| {
            format!(
                "Failed to write artifacts to {}",
                generator.output_dir().display()
            )
        })?;
        Some(artifacts)
    };

    let formatter = OutputFormatter::new(args.format.into());
    println!("{}", formatter.format(&report, artifacts.as_ref())?);
    Ok(())
}

fn run_inspect(args: &InspectArgs, config: ShiftpackConfig) -> Result<()> {
    validate(&config)?;

    let path = match &args.path {
        Some(path) => path.clone(),
        None => env::current_dir().context("Failed to determine current directory")?,
    };
    ensure_directory(&path)?;

    let formatter = OutputFormatter::new(args.format.into());
    let output = if args.with_dependencies {
        formatter.format(&MigrationReport::build(&path), None)?
    } else {
        let (application, diagnostics) = analyze(&path).into_parts();
        formatter.format_application(&application, &diagnostics)?
    };

    println!("{}", output);
    Ok(())
}

fn validate(config: &ShiftpackConfig) -> Result<()> {
    config.validate().context("Invalid configuration")?;
    debug!("Configuration: {:?}", config.to_display_map());
    Ok(())
}

fn ensure_directory(path: &Path) -> Result<()> {
    let fs = RealFileSystem::new();
    if !fs.exists(path) {
        bail!("Source directory does not exist: {}", path.display());
    }
    if !fs.is_dir(path) {
        bail!("Source path is not a directory: {}", path.display());
    }
    Ok(())
}
