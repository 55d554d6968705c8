// ── Project analytics ──
//
// Fans out one projects request per service, merges the successes into a
// single tagged list, and derives the dashboard statistics. A failing
// service contributes nothing; only the services request itself can fail
// the whole load.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::Display;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use yogi_api::{ApiClient, Project, Service};

use crate::api::SiteApi;
use crate::error::CoreError;

/// Chart colors, assigned by service position.
pub const PALETTE: [&str; 8] = [
    "#6366F1", "#8B5CF6", "#EC4899", "#F59E0B", "#10B981", "#3B82F6", "#EF4444", "#14B8A6",
];

/// How many projects the "recent" panel shows.
pub const RECENT_LIMIT: usize = 5;

pub const ANALYTICS_ERROR_MESSAGE: &str = "Failed to load analytics data.";

// ── Types ────────────────────────────────────────────────────────

/// A project with the service it was fetched under.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaggedProject {
    pub service_id: i64,
    pub service_name: String,
    pub project: Project,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceProjectCount {
    pub service_id: i64,
    pub service_name: String,
    pub count: usize,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentProject {
    pub id: i64,
    pub name: String,
    pub service_name: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MediaBreakdown {
    pub with_video: usize,
    pub with_photos: usize,
    pub with_thumbnail: usize,
    pub without_media: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedProjectStats {
    pub total_services: usize,
    pub total_projects: usize,
    pub projects_by_service: Vec<ServiceProjectCount>,
    pub recent_projects: Vec<RecentProject>,
    pub media: MediaBreakdown,
}

/// Everything one analytics load produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectAnalytics {
    pub services: Vec<Service>,
    pub projects: Vec<TaggedProject>,
    pub stats: AggregatedProjectStats,
}

/// Color for the service at `index` in the services list.
pub fn service_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

// ── Loading ──────────────────────────────────────────────────────

/// Fetch services, then every service's projects concurrently.
///
/// Waits for all per-service requests to settle. Merge order follows the
/// services list regardless of which request finished first.
pub async fn load_project_analytics<A: SiteApi>(api: &A) -> Result<ProjectAnalytics, CoreError> {
    let services = api.fetch_services().await?;
    debug!(count = services.len(), "services fetched, fanning out");

    let futs = services.iter().map(|service| async move {
        (service, api.fetch_service_projects(service.id).await)
    });
    let results = futures_util::future::join_all(futs).await;

    let mut projects = Vec::new();
    for (service, result) in results {
        match result {
            Ok(list) => {
                projects.extend(list.into_iter().map(|project| TaggedProject {
                    service_id: service.id,
                    service_name: service.name.clone(),
                    project,
                }));
            }
            Err(e) => {
                warn!(
                    service_id = service.id,
                    service = %service.name,
                    error = %e,
                    "projects fetch failed, skipping service"
                );
            }
        }
    }

    let stats = compute_project_stats(&services, &projects);
    info!(
        services = stats.total_services,
        projects = stats.total_projects,
        "project analytics loaded"
    );
    Ok(ProjectAnalytics {
        services,
        projects,
        stats,
    })
}

/// Derive the dashboard statistics from an already merged project list.
pub fn compute_project_stats(
    services: &[Service],
    projects: &[TaggedProject],
) -> AggregatedProjectStats {
    let projects_by_service = services
        .iter()
        .enumerate()
        .map(|(index, service)| ServiceProjectCount {
            service_id: service.id,
            service_name: service.name.clone(),
            count: projects
                .iter()
                .filter(|p| p.service_id == service.id)
                .count(),
            color: service_color(index),
        })
        .collect();

    let mut by_date: Vec<&TaggedProject> = projects.iter().collect();
    // Stable: equal dates keep merge order. `None` sorts last.
    by_date.sort_by(|a, b| b.project.created_at.cmp(&a.project.created_at));
    let recent_projects = by_date
        .into_iter()
        .take(RECENT_LIMIT)
        .map(|p| RecentProject {
            id: p.project.id,
            name: p.project.name.clone(),
            service_name: p.service_name.clone(),
            created_at: p.project.created_at,
        })
        .collect();

    let mut media = MediaBreakdown::default();
    for tagged in projects {
        let p = &tagged.project;
        let (video, photos, thumbnail) = (p.has_video(), p.has_photos(), p.has_thumbnail());
        media.with_video += usize::from(video);
        media.with_photos += usize::from(photos);
        media.with_thumbnail += usize::from(thumbnail);
        media.without_media += usize::from(!(video || photos || thumbnail));
    }

    AggregatedProjectStats {
        total_services: services.len(),
        total_projects: projects.len(),
        projects_by_service,
        recent_projects,
        media,
    }
}

// ── Controller ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Display)]
pub enum AnalyticsState {
    #[strum(to_string = "loading")]
    Loading,
    #[strum(to_string = "loaded")]
    Loaded(Arc<ProjectAnalytics>),
    #[strum(to_string = "error")]
    Error(String),
}

/// Drives the analytics dashboard.
pub struct AnalyticsController<A: SiteApi = ApiClient> {
    api: Arc<A>,
    state: watch::Sender<AnalyticsState>,
}

impl<A: SiteApi> AnalyticsController<A> {
    pub fn new(api: Arc<A>) -> Self {
        let (state, _) = watch::channel(AnalyticsState::Loading);
        Self { api, state }
    }

    pub fn subscribe(&self) -> watch::Receiver<AnalyticsState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> AnalyticsState {
        self.state.borrow().clone()
    }

    pub async fn load(&self) -> Result<Arc<ProjectAnalytics>, CoreError> {
        self.state.send_replace(AnalyticsState::Loading);
        match load_project_analytics(self.api.as_ref()).await {
            Ok(analytics) => {
                let analytics = Arc::new(analytics);
                self.state
                    .send_replace(AnalyticsState::Loaded(Arc::clone(&analytics)));
                Ok(analytics)
            }
            Err(e) => {
                warn!(error = %e, "analytics load failed");
                self.state
                    .send_replace(AnalyticsState::Error(ANALYTICS_ERROR_MESSAGE.into()));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn service(id: i64, name: &str) -> Service {
        serde_json::from_value(serde_json::json!({ "id": id, "name": name })).expect("service")
    }

    fn tagged(service: &Service, project: serde_json::Value) -> TaggedProject {
        TaggedProject {
            service_id: service.id,
            service_name: service.name.clone(),
            project: serde_json::from_value(project).expect("project"),
        }
    }

    #[test]
    fn palette_wraps_by_position() {
        assert_eq!(service_color(0), PALETTE[0]);
        assert_eq!(service_color(8), PALETTE[0]);
        assert_eq!(service_color(9), PALETTE[1]);
    }

    #[test]
    fn counts_include_services_without_projects() {
        let a = service(1, "Web");
        let b = service(2, "Mobile");
        let projects = vec![
            tagged(&a, serde_json::json!({ "id": 10, "service_id": 1, "name": "x" })),
            tagged(&a, serde_json::json!({ "id": 11, "service_id": 1, "name": "y" })),
        ];

        let stats = compute_project_stats(&[a, b], &projects);

        assert_eq!(stats.total_projects, 2);
        assert_eq!(stats.total_services, 2);
        let counts: Vec<(i64, usize)> = stats
            .projects_by_service
            .iter()
            .map(|c| (c.service_id, c.count))
            .collect();
        assert_eq!(counts, vec![(1, 2), (2, 0)]);
        assert_eq!(stats.projects_by_service[1].color, PALETTE[1]);
    }

    #[test]
    fn recent_takes_latest_five_descending() {
        let a = service(1, "Web");
        let projects: Vec<TaggedProject> = (1..=6)
            .map(|day| {
                tagged(
                    &a,
                    serde_json::json!({
                        "id": day,
                        "service_id": 1,
                        "name": format!("p{day}"),
                        "created_at": format!("2024-01-0{day}T00:00:00Z")
                    }),
                )
            })
            .collect();

        let stats = compute_project_stats(&[a], &projects);

        let ids: Vec<i64> = stats.recent_projects.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![6, 5, 4, 3, 2]);
    }

    #[test]
    fn undated_projects_sort_last() {
        let a = service(1, "Web");
        let projects = vec![
            tagged(&a, serde_json::json!({ "id": 1, "service_id": 1, "name": "undated" })),
            tagged(
                &a,
                serde_json::json!({
                    "id": 2, "service_id": 1, "name": "dated",
                    "created_at": "2024-03-01T00:00:00Z"
                }),
            ),
        ];
        let stats = compute_project_stats(&[a], &projects);
        let ids: Vec<i64> = stats.recent_projects.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn media_buckets() {
        let a = service(1, "Web");
        let projects = vec![
            tagged(
                &a,
                serde_json::json!({ "id": 1, "service_id": 1, "name": "v", "video": "v.mp4" }),
            ),
            tagged(
                &a,
                serde_json::json!({
                    "id": 2, "service_id": 1, "name": "pt",
                    "photos": "[\"a.jpg\"]", "thumbnail": "t.jpg"
                }),
            ),
            tagged(
                &a,
                serde_json::json!({ "id": 3, "service_id": 1, "name": "bad", "photos": "oops" }),
            ),
            tagged(&a, serde_json::json!({ "id": 4, "service_id": 1, "name": "none" })),
        ];

        let media = compute_project_stats(&[a], &projects).media;

        assert_eq!(
            media,
            MediaBreakdown {
                with_video: 1,
                with_photos: 1,
                with_thumbnail: 1,
                without_media: 2,
            }
        );
    }
}
