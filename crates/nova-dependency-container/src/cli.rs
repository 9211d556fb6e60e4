use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cmd::{
    self, describe::DescribeArgs, evaluate::EvaluateArgs, fill::FillArgs, schema::SchemaArgs,
};

/// Environment variable holding a `tracing` filter directive, e.g. `dependency_rules=debug`.
pub const LOG_ENV: &str = "NOVA_DEPS_LOG";

#[derive(Parser, Debug)]
#[command(
    name = "nova-dependency-container",
    about = "Inspect and evaluate dependency containers",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate dependency rules against current field values
    Evaluate(EvaluateArgs),
    /// Print the serialized descriptor of a container
    Describe(DescribeArgs),
    /// Fill model attributes from a submitted request
    Fill(FillArgs),
    /// Print the JSON Schema of descriptor files
    Schema(SchemaArgs),
}

pub fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Evaluate(args) => cmd::evaluate::run(args),
        Commands::Describe(args) => cmd::describe::run(args),
        Commands::Fill(args) => cmd::fill::run(args),
        Commands::Schema(args) => cmd::schema::run(args),
    }
}

fn init_tracing(verbose: u8) {
    let default_directive = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
