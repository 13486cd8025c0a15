use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use drivecmd::cmd::shared::Reported;
use drivecmd::cmd::{self, DeleteArgs, ListArgs, RunContext, SummaryArgs, TransferArgs};
use drivecmd::config::{CliOverrides, Settings};
use drivecmd::utils;

/// drivecmd - command-line client for a free-text cloud-drive executor
///
/// Command layout:
///   drivecmd list [PATH] [--only all|files|folders]
///   drivecmd delete PATH
///   drivecmd move SRC DST
///   drivecmd copy SRC DST
///   drivecmd summary <file|folder> PATH
///   drivecmd help-text
///   drivecmd status
///   drivecmd ping
///
/// Global flags / env:
///   -v / -vv          Increase verbosity (RUST_LOG overrides)
///   -q / --quiet      Errors only
///   -s / --server     Executor base URL (or DRIVECMD_SERVER; default http://localhost:5000)
///   -w / --whatsapp   Identity sent with each instruction (or DRIVECMD_WHATSAPP)
///   -H / --header     Extra HTTP header KEY=VALUE (repeatable)
///   -c / --config     YAML/JSON settings file (or DRIVECMD_CONFIG)
///   --json            Machine-readable output
///
/// Examples:
///   drivecmd list /Photos --only folders
///   drivecmd move /report.pdf /Archive -w +15550001
///   drivecmd summary folder /Projects --json
#[derive(Parser, Debug)]
#[command(
    name = "drivecmd",
    version,
    author,
    about = "drivecmd - typed client for a free-text cloud-drive executor",
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence all non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Executor base URL
    #[arg(short = 's', long = "server", global = true, value_name = "URL")]
    server: Option<String>,

    /// WhatsApp number identifying the caller
    #[arg(short = 'w', long = "whatsapp", global = true, value_name = "NUMBER")]
    whatsapp: Option<String>,

    /// Extra header(s) sent with every request (repeatable KEY=VALUE)
    #[arg(short = 'H', long = "header", global = true, value_name = "KEY=VALUE")]
    headers: Vec<String>,

    /// Settings file (YAML or JSON)
    #[arg(short = 'c', long = "config", global = true, value_name = "PATH")]
    config: Option<String>,

    /// Emit JSON instead of human-readable output
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List a folder's entries
    List(ListArgs),

    /// Delete a file
    Delete(DeleteArgs),

    /// Move a file into a folder
    Move(TransferArgs),

    /// Copy a file into a folder
    Copy(TransferArgs),

    /// Summarize a file or folder
    Summary(SummaryArgs),

    /// Show the executor's own help text
    HelpText,

    /// Check Drive authorization for the configured identity
    Status,

    /// Run the executor's connectivity self-test
    Ping,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(msg) = unreported(&e) {
                eprintln!("Error: {msg}");
            }
            ExitCode::FAILURE
        }
    }
}

/// Text still owed to stderr; `None` when the command already printed it.
fn unreported(err: &anyhow::Error) -> Option<String> {
    match err.downcast_ref::<Reported>() {
        Some(_) => None,
        None => Some(format!("{err:#}")),
    }
}

fn run(cli: Cli) -> Result<()> {
    utils::init_logging(utils::derive_level(cli.verbose, cli.quiet));

    let settings = Settings::resolve(CliOverrides {
        server: cli.server,
        whatsapp_number: cli.whatsapp,
        headers: cli.headers,
        config_path: cli.config,
    })?;
    tracing::debug!(server = %settings.server, "settings resolved");

    let ctx = RunContext {
        settings,
        json: cli.json,
    };

    match cli.command {
        Commands::List(args) => cmd::execute_list(&ctx, args),
        Commands::Delete(args) => cmd::execute_delete(&ctx, args),
        Commands::Move(args) => cmd::execute_move(&ctx, args),
        Commands::Copy(args) => cmd::execute_copy(&ctx, args),
        Commands::Summary(args) => cmd::execute_summary(&ctx, args),
        Commands::HelpText => cmd::execute_help_text(&ctx),
        Commands::Status => cmd::execute_status(&ctx),
        Commands::Ping => cmd::execute_ping(&ctx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "drivecmd", "move", "/a", "/B", "-w", "+1555", "-H", "X-Key=1", "--json",
        ])
        .unwrap();
        assert_eq!(cli.whatsapp.as_deref(), Some("+1555"));
        assert_eq!(cli.headers, vec!["X-Key=1"]);
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Move(_)));
    }

    #[test]
    fn reported_errors_are_not_repeated() {
        let shown = anyhow::Error::from(Reported("Failed to delete file".into()));
        assert_eq!(unreported(&shown), None);

        let fresh = anyhow::anyhow!("bad config").context("Failed to load settings");
        assert_eq!(
            unreported(&fresh).as_deref(),
            Some("Failed to load settings: bad config")
        );
    }

    #[test]
    fn help_text_is_a_subcommand() {
        let cli = Cli::try_parse_from(["drivecmd", "help-text"]).unwrap();
        assert!(matches!(cli.command, Commands::HelpText));
    }
}
