use shiftpack::cli::commands::{CliArgs, Commands};
use shiftpack::cli::handlers::{handle_inspect, handle_migrate};
use shiftpack::config::ShiftpackConfig;
use shiftpack::util::logging::{init_logging, LoggingConfig};
use shiftpack::{NAME, VERSION};

use clap::Parser;
use tracing::debug;

fn main() {
    let args = CliArgs::parse();
    let config = match &args.log_level {
        Some(level) => ShiftpackConfig::default().with_log_level(level),
        None => ShiftpackConfig::default(),
    };
    init_logging(LoggingConfig::from_config(&config).with_cli_overrides(
        args.log_level.as_deref(),
        args.verbose,
        args.quiet,
    ));

    debug!("{} v{} starting", NAME, VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Migrate(migrate_args) => handle_migrate(migrate_args, config),
        Commands::Inspect(inspect_args) => handle_inspect(inspect_args, config),
    };

    std::process::exit(exit_code);
}
