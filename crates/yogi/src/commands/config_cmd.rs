//! Config subcommand handlers.

use std::fmt::Write as _;

use dialoguer::{Input, Select};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

use super::util::prompt_err;

fn format_config(cfg: &Config) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "api_url = \"{}\"", cfg.api_url);
    match cfg.timeout {
        Some(t) => {
            let _ = writeln!(out, "timeout = {t}");
        }
        None => {
            let _ = writeln!(out, "# timeout unset (no client-side limit)");
        }
    }
    let _ = writeln!(out, "insecure = {}", cfg.insecure);
    if let Some(ref ca) = cfg.ca_cert {
        let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
    }
    let _ = writeln!(out, "output = \"{}\"", cfg.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.color);
    let _ = write!(out, "search_debounce_ms = {}", cfg.search_debounce_ms);
    out
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let mut cfg = config::load_config()?;
            if let Some(ref url) = global.api_url {
                cfg.api_url.clone_from(url);
            }
            let format = global.output.unwrap_or(OutputFormat::Table);
            let out = output::render_single(format, &cfg, format_config, |c| c.api_url.clone())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Init => init(global),
    }
}

fn init(global: &GlobalOpts) -> Result<(), CliError> {
    let path = config::config_path();
    if path.exists() && !global.yes {
        let overwrite = dialoguer::Confirm::new()
            .with_prompt(format!("{} exists. Overwrite?", path.display()))
            .default(false)
            .interact()
            .map_err(prompt_err)?;
        if !overwrite {
            return Ok(());
        }
    }

    let defaults = Config::default();
    let api_url: String = Input::new()
        .with_prompt("Backend URL")
        .default(
            global
                .api_url
                .clone()
                .unwrap_or_else(|| defaults.api_url.clone()),
        )
        .interact_text()
        .map_err(prompt_err)?;

    let formats = ["table", "json", "yaml", "plain"];
    let selection = Select::new()
        .with_prompt("Default output format")
        .items(&formats)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    let timeout: String = Input::new()
        .with_prompt("Request timeout in seconds (blank for none)")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;
    let timeout = match timeout.trim() {
        "" => None,
        raw => Some(raw.parse::<u64>().map_err(|e| CliError::Validation {
            field: "timeout".into(),
            reason: e.to_string(),
        })?),
    };

    let cfg = Config {
        api_url,
        timeout,
        output: formats.get(selection).copied().unwrap_or("table").to_owned(),
        ..defaults
    };
    // Reject a bad URL before writing it.
    cfg.to_client_config()?;

    let written = config::save_config(&cfg)?;
    if !global.quiet {
        eprintln!("Config written to {}", written.display());
    }
    Ok(())
}
