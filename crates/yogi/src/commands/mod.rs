//! Command dispatch: bridges CLI args -> core controllers -> output formatting.

pub mod admin;
pub mod analytics;
pub mod blogs;
pub mod config_cmd;
pub mod contact;
pub mod projects;
pub mod services;
pub mod util;

use yogi_core::Site;

use crate::cli::{Command, GlobalOpts, OutputFormat};
use crate::config::Resolved;
use crate::error::CliError;
use crate::output;

/// Output settings shared by every handler.
#[derive(Debug, Clone, Copy)]
pub struct RunContext {
    pub output: OutputFormat,
    pub color: bool,
    pub quiet: bool,
    pub yes: bool,
}

impl RunContext {
    pub fn new(global: &GlobalOpts, resolved: &Resolved) -> Self {
        Self {
            output: resolved.output,
            color: output::should_color(resolved.color),
            quiet: global.quiet,
            yes: global.yes,
        }
    }
}

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, site: &Site, ctx: &RunContext) -> Result<(), CliError> {
    match cmd {
        Command::Services(args) => services::handle(site, args, ctx).await,
        Command::Projects(args) => projects::handle(site, args, ctx).await,
        Command::Blogs(args) => blogs::handle(site, args, ctx).await,
        Command::Analytics => analytics::handle(site, ctx).await,
        Command::Contact(args) => contact::handle(site, args, ctx).await,
        Command::Admin(args) => admin::handle(site, args, ctx),
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "command is handled before connecting".into(),
        )),
    }
}
