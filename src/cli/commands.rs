use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Moves platform-as-a-service applications onto containers
#[derive(Parser, Debug)]
#[command(
    name = "shiftpack",
    about = "Classify platform applications and generate container deployment artifacts",
    version,
    author,
    long_about = "shiftpack reads deployment manifests and build descriptors from an \
                  application directory, classifies the application, lists its declared \
                  dependencies and writes a Dockerfile plus a Helm chart for it."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Analyze an application and generate deployment artifacts",
        long_about = "Resolves manifests, classifies the application, maps its dependencies \
                      and writes a Dockerfile and Helm chart into the output directory.\n\n\
                      Examples:\n  \
                      shiftpack migrate --source ./legacy-app\n  \
                      shiftpack migrate --source ./legacy-app --output ./deploy\n  \
                      shiftpack migrate --source ./legacy-app --dry-run --format json"
    )]
    Migrate(MigrateArgs),

    #[command(
        about = "Print what shiftpack knows about an application",
        long_about = "Classifies the application and prints the descriptor without \
                      writing any files.\n\n\
                      Examples:\n  \
                      shiftpack inspect\n  \
                      shiftpack inspect ./legacy-app --format yaml\n  \
                      shiftpack inspect ./legacy-app --with-dependencies"
    )]
    Inspect(InspectArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct MigrateArgs {
    #[arg(
        short = 's',
        long,
        value_name = "DIR",
        help = "Application source directory"
    )]
    pub source: PathBuf,

    #[arg(
        short = 'o',
        long,
        value_name = "DIR",
        help = "Directory for generated artifacts (defaults to SHIFTPACK_OUTPUT_DIR or ./output)"
    )]
    pub output: Option<PathBuf>,

    #[arg(long, help = "Analyze only, do not write artifacts")]
    pub dry_run: bool,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Report format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct InspectArgs {
    #[arg(
        value_name = "PATH",
        help = "Application directory (defaults to current directory)"
    )]
    pub path: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(long, help = "Also list declared dependencies")]
    pub with_dependencies: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
