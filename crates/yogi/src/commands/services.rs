//! Service command handlers.

use tabled::Tabled;
use yogi_core::{Service, Site};

use crate::cli::{ServicesArgs, ServicesCommand};
use crate::error::CliError;
use crate::output;

use super::{RunContext, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ServiceRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Link")]
    link: String,
}

impl From<&Service> for ServiceRow {
    fn from(s: &Service) -> Self {
        Self {
            id: s.id,
            name: s.name.clone(),
            description: util::truncate(s.description.as_deref().unwrap_or_default(), 60),
            link: s.link.clone().unwrap_or_default(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(site: &Site, args: ServicesArgs, ctx: &RunContext) -> Result<(), CliError> {
    match args.command {
        ServicesCommand::List => {
            let services = site.services().await?;
            let out = output::render_list(ctx.output, &services, |s| ServiceRow::from(s), |s| {
                s.id.to_string()
            })?;
            output::print_output(&out, ctx.quiet);
            Ok(())
        }
    }
}
