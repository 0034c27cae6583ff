mod cli;
mod commands;
mod config;
mod error;
mod output;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use indexa_core::Portal;

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::output::TerminalNotifier;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't talk to the backend
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "indexa", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let portal_config = config::build_portal_config(&cli.global)?;
            let notifier = TerminalNotifier::new(
                cli.global.quiet,
                output::should_color(cli.global.color),
            );
            let portal = Portal::with_notifier(portal_config, Arc::new(notifier))?;

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &portal, &cli.global).await
        }
    }
}
