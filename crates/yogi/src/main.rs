mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use yogi_core::Site;

use crate::cli::{Cli, Command};
use crate::commands::RunContext;
use crate::error::CliError;

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
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "yogi", &mut std::io::stdout());
            Ok(())
        }

        // Config commands work even when the config file is broken.
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        cmd => {
            let resolved = config::resolve(&cli.global)?;
            let ctx = RunContext::new(&cli.global, &resolved);
            let site = Site::connect(&resolved.client, config::admin_session())?;

            tracing::debug!(command = ?cmd, api_url = %resolved.client.api_url, "dispatching command");
            commands::dispatch(cmd, &site, &ctx).await
        }
    }
}
