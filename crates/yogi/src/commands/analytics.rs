//! Analytics command handler.

use std::fmt::Write as _;

use tabled::Tabled;
use yogi_core::{AggregatedProjectStats, RecentProject, ServiceProjectCount, Site};

use crate::error::CliError;
use crate::output;

use super::{RunContext, util};

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct ServiceCountRow {
    #[tabled(rename = "Service")]
    service: String,
    #[tabled(rename = "Projects")]
    count: usize,
    #[tabled(rename = "Color")]
    color: &'static str,
}

impl From<&ServiceProjectCount> for ServiceCountRow {
    fn from(c: &ServiceProjectCount) -> Self {
        Self {
            service: c.service_name.clone(),
            count: c.count,
            color: c.color,
        }
    }
}

#[derive(Tabled)]
struct RecentRow {
    #[tabled(rename = "Project")]
    name: String,
    #[tabled(rename = "Service")]
    service: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl From<&RecentProject> for RecentRow {
    fn from(p: &RecentProject) -> Self {
        Self {
            name: p.name.clone(),
            service: p.service_name.clone(),
            created: p
                .created_at
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".into()),
        }
    }
}

fn dashboard(stats: &AggregatedProjectStats, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", output::heading("Project analytics", color));
    let _ = writeln!(
        out,
        "{} projects across {} services",
        stats.total_projects, stats.total_services
    );
    let _ = writeln!(out);

    let by_service: Vec<ServiceCountRow> = stats
        .projects_by_service
        .iter()
        .map(ServiceCountRow::from)
        .collect();
    let _ = writeln!(out, "{}", output::render_table(&by_service));

    if !stats.recent_projects.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", output::heading("Recent projects", color));
        let recent: Vec<RecentRow> = stats.recent_projects.iter().map(RecentRow::from).collect();
        let _ = writeln!(out, "{}", output::render_table(&recent));
    }

    let m = &stats.media;
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", output::heading("Media", color));
    let _ = writeln!(out, "With video:      {}", m.with_video);
    let _ = writeln!(out, "With photos:     {}", m.with_photos);
    let _ = writeln!(out, "With thumbnail:  {}", m.with_thumbnail);
    let _ = write!(out, "Without media:   {}", m.without_media);
    out
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(site: &Site, ctx: &RunContext) -> Result<(), CliError> {
    let controller = site.analytics();
    let pb = util::spinner("Aggregating projects...", ctx);
    let result = controller.load().await;
    pb.finish_and_clear();
    let analytics = result?;

    let out = output::render_single(
        ctx.output,
        &analytics.stats,
        |s| dashboard(s, ctx.color),
        |s| s.total_projects.to_string(),
    )?;
    output::print_output(&out, ctx.quiet);
    Ok(())
}
