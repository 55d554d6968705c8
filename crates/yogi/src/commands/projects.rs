//! Project command handlers.

use tabled::Tabled;
use yogi_core::{Project, Site};

use crate::cli::{ProjectsArgs, ProjectsCommand};
use crate::error::CliError;
use crate::output;

use super::RunContext;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Video")]
    video: &'static str,
    #[tabled(rename = "Photos")]
    photos: usize,
    #[tabled(rename = "Thumbnail")]
    thumbnail: &'static str,
    #[tabled(rename = "Created")]
    created: String,
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "-" }
}

impl From<&Project> for ProjectRow {
    fn from(p: &Project) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            video: yes_no(p.has_video()),
            photos: p.photo_list().len(),
            thumbnail: yes_no(p.has_thumbnail()),
            created: p
                .created_at
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(site: &Site, args: ProjectsArgs, ctx: &RunContext) -> Result<(), CliError> {
    match args.command {
        ProjectsCommand::List { service } => {
            let projects = site.service_projects(service).await?;
            let out = output::render_list(ctx.output, &projects, |p| ProjectRow::from(p), |p| {
                p.id.to_string()
            })?;
            output::print_output(&out, ctx.quiet);
            Ok(())
        }
    }
}
