mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dexboot_lib::consts::CONFIG_ENV;
use tracing_subscriber::EnvFilter;

use crate::output::{OutputFormat, print_error};

/// dexboot - boot image configuration for dexpreopt
#[derive(Parser)]
#[command(name = "dexboot")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Path to the global dexpreopt configuration
  #[arg(short, long, global = true, env = CONFIG_ENV, default_value = "dexpreopt.json")]
  config: PathBuf,

  /// Output format
  #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
  format: OutputFormat,

  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// List the targets boot images are compiled for
  Targets,

  /// Show the boot image configurations
  Images,

  /// Show the boot classpath used for dexpreopting
  Classpath {
    /// Append the updatable boot jars
    #[arg(long)]
    with_updatable: bool,
  },

  /// Show the system server classpath
  SystemServer,

  /// Print build variables exported to make
  MakeVars,

  /// Show a summary of the loaded configuration
  Info,
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let result = cmd::load_context(&cli.config).and_then(|ctx| match cli.command {
    Commands::Targets => cmd::cmd_targets(&ctx, cli.format),
    Commands::Images => cmd::cmd_images(&ctx, cli.verbose, cli.format),
    Commands::Classpath { with_updatable } => cmd::cmd_classpath(&ctx, with_updatable, cli.format),
    Commands::SystemServer => cmd::cmd_system_server(&ctx, cli.format),
    Commands::MakeVars => cmd::cmd_make_vars(&ctx, cli.format),
    Commands::Info => cmd::cmd_info(&ctx, &cli.config, cli.format),
  });

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{err:#}"));
      ExitCode::FAILURE
    }
  }
}
