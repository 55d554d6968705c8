//! Blog command handlers.

use std::fmt::Write as _;
use std::path::PathBuf;

use tabled::Tabled;
use tokio::io::{AsyncBufReadExt, BufReader};
use yogi_core::{
    Blog, BlogDraft, BlogListView, BlogStatus, CoreError, DetailState, ImageFile, ListState,
    SEARCH_PAGE_LIMIT, SearchState, Site,
};

use crate::cli::{BlogFormArgs, BlogsArgs, BlogsCommand};
use crate::error::CliError;
use crate::output;

use super::{RunContext, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct BlogRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Slug")]
    slug: String,
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Likes")]
    likes: u64,
    #[tabled(rename = "Featured")]
    featured: &'static str,
}

impl From<&Blog> for BlogRow {
    fn from(b: &Blog) -> Self {
        Self {
            id: b.id,
            title: util::truncate(&b.title, 48),
            slug: b.slug.clone(),
            author: b.author_name.clone(),
            category: b.category.clone().unwrap_or_default(),
            likes: b.likes_count,
            featured: if b.is_featured() { "★" } else { "" },
        }
    }
}

fn render_blogs(blogs: &[Blog], ctx: &RunContext) -> Result<String, CliError> {
    output::render_list(ctx.output, blogs, |b| BlogRow::from(b), |b| b.slug.clone())
}

fn detail(blog: &Blog, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", output::heading(&blog.title, color));
    if let Some(ref subtitle) = blog.subtitle {
        let _ = writeln!(out, "{subtitle}");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Slug:      {}", blog.slug);
    let _ = writeln!(out, "ID:        {}", blog.id);
    let _ = writeln!(out, "Author:    {}", blog.author_name);
    if let Some(ref category) = blog.category {
        let _ = writeln!(out, "Category:  {category}");
    }
    if !blog.tags.is_empty() {
        let _ = writeln!(out, "Tags:      {}", blog.tags.join(", "));
    }
    if let Some(published) = blog.published_at {
        let _ = writeln!(out, "Published: {}", published.format("%Y-%m-%d"));
    }
    if let Some(minutes) = blog.reading_time {
        let _ = writeln!(out, "Reading:   {minutes} min");
    }
    let _ = writeln!(
        out,
        "Views:     {}   Likes: {}",
        blog.views_count, blog.likes_count
    );
    let _ = writeln!(out);
    let _ = write!(out, "{}", blog.content);
    out
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(site: &Site, args: BlogsArgs, ctx: &RunContext) -> Result<(), CliError> {
    match args.command {
        BlogsCommand::List { featured, regular } => list(site, featured, regular, ctx).await,

        BlogsCommand::Show { slug } => {
            let controller = site.blog_detail();
            let blog = controller.load(&slug).await?;
            let out = output::render_single(
                ctx.output,
                blog.as_ref(),
                |b| detail(b, ctx.color),
                |b| b.slug.clone(),
            )?;
            output::print_output(&out, ctx.quiet);
            Ok(())
        }

        BlogsCommand::Search { term } => {
            let term = term.trim();
            if term.is_empty() {
                return Err(CliError::Validation {
                    field: "term".into(),
                    reason: "search term cannot be blank".into(),
                });
            }
            let page = site
                .api()
                .search_blogs(term, 1, SEARCH_PAGE_LIMIT)
                .await
                .map_err(CoreError::from)?;
            if page.data.is_empty() {
                util::note(&format!("No posts match '{term}'."), ctx);
                return Ok(());
            }
            output::print_output(&render_blogs(&page.data, ctx)?, ctx.quiet);
            Ok(())
        }

        BlogsCommand::Watch => watch(site, ctx).await,

        BlogsCommand::Like { slug } => {
            let controller = site.blog_detail();
            controller.load(&slug).await?;
            let likes = controller.like().await?;
            let title = match controller.state() {
                DetailState::Loaded(blog) => blog.title.clone(),
                _ => slug,
            };
            util::note(&format!("Liked '{title}' ({likes} likes)"), ctx);
            Ok(())
        }

        BlogsCommand::Create(form) => {
            let editor = site.blog_editor()?;
            let title = form.title.clone();
            let draft = build_draft(form).await?;
            let record = editor.create(draft).await?;
            print_record(&record, &format!("Created '{title}'"), ctx)
        }

        BlogsCommand::Update { id, form } => {
            let editor = site.blog_editor()?;
            let draft = build_draft(form).await?;
            let record = editor.update(id, draft).await?;
            print_record(&record, &format!("Updated post {id}"), ctx)
        }

        BlogsCommand::Delete { id } => {
            let editor = site.blog_editor()?;
            if !util::confirm(
                &format!("Delete blog post {id}? This cannot be undone."),
                "blogs delete",
                ctx,
            )? {
                return Ok(());
            }
            let record = editor.delete(id).await?;
            print_record(&record, &format!("Deleted post {id}"), ctx)
        }
    }
}

async fn list(site: &Site, featured: bool, regular: bool, ctx: &RunContext) -> Result<(), CliError> {
    let controller = site.blog_list();
    controller.load().await?;
    let view = controller.view();

    if view.truncated {
        util::note(
            "Showing the first page only; the backend reports more posts.",
            ctx,
        );
    }

    let blogs: Vec<Blog> = if featured {
        view.featured().into_iter().cloned().collect()
    } else if regular {
        view.regular().into_iter().cloned().collect()
    } else {
        view.displayed().to_vec()
    };
    output::print_output(&render_blogs(&blogs, ctx)?, ctx.quiet);
    Ok(())
}

// ── Live search ─────────────────────────────────────────────────────

/// What `watch` last printed, so unchanged states are not repeated.
#[derive(PartialEq)]
enum Shown {
    All,
    Searching(String),
    Results(String),
    Failed,
}

fn shown(view: &BlogListView) -> Option<Shown> {
    if view.search_error.is_some() {
        return Some(Shown::Failed);
    }
    match (&view.search, &view.list) {
        (SearchState::Searching { term }, _) => Some(Shown::Searching(term.clone())),
        (SearchState::Results { term, .. }, _) => Some(Shown::Results(term.clone())),
        (SearchState::Idle, ListState::Loaded(_)) => Some(Shown::All),
        (SearchState::Idle, _) => None,
    }
}

fn print_view(view: &BlogListView, state: &Shown, ctx: &RunContext) -> Result<(), CliError> {
    match state {
        Shown::Searching(term) => util::note(&format!("Searching for '{term}'..."), ctx),
        Shown::Failed => {
            let message = view.search_error.as_deref().unwrap_or_default();
            util::note(message, ctx);
        }
        Shown::Results(term) => {
            util::note(
                &format!("{} result(s) for '{term}':", view.displayed().len()),
                ctx,
            );
            output::print_output(&render_blogs(view.displayed(), ctx)?, ctx.quiet);
        }
        Shown::All => {
            util::note("All posts:", ctx);
            output::print_output(&render_blogs(view.displayed(), ctx)?, ctx.quiet);
        }
    }
    Ok(())
}

/// Feed stdin lines to the debounced search and print each applied view.
async fn watch(site: &Site, ctx: &RunContext) -> Result<(), CliError> {
    let controller = site.blog_list();
    let mut rx = controller.subscribe();
    controller.load().await?;

    let mut last: Option<Shown> = None;
    let mut pending: Option<String> = None;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(input) => {
                    let term = input.trim();
                    pending = (!term.is_empty()).then(|| term.to_owned());
                    controller.set_search_input(term);
                }
                None => break,
            },
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = rx.borrow_and_update().clone();
                if let Some(state) = shown(&view) {
                    if last.as_ref() != Some(&state) {
                        print_view(&view, &state, ctx)?;
                        last = Some(state);
                    }
                }
            }
        }
    }

    // Input closed: wait for the last scheduled search to land. Scheduling
    // it cleared any earlier failure, so an error here is that term's own.
    let view = match pending {
        Some(term) => rx
            .wait_for(|v| {
                v.search_error.is_some()
                    || matches!(&v.search, SearchState::Results { term: t, .. } if *t == term)
            })
            .await
            .map_err(|_| CliError::Internal("blog list controller dropped".into()))?
            .clone(),
        None => rx.borrow().clone(),
    };
    if let Some(state) = shown(&view) {
        if last.as_ref() != Some(&state) {
            print_view(&view, &state, ctx)?;
        }
    }

    controller.shutdown();
    Ok(())
}

// ── Editor helpers ──────────────────────────────────────────────────

async fn build_draft(form: BlogFormArgs) -> Result<BlogDraft, CliError> {
    let content = match (form.content, form.content_file) {
        (Some(content), _) => content,
        (None, Some(path)) => tokio::fs::read_to_string(&path).await?,
        (None, None) => String::new(),
    };

    Ok(BlogDraft {
        title: form.title,
        subtitle: form.subtitle,
        content,
        excerpt: form.excerpt,
        author_name: form.author,
        category: form.category,
        tags: form.tags,
        status: if form.publish {
            BlogStatus::Published
        } else {
            BlogStatus::Draft
        },
        is_featured: form.featured,
        featured_image: read_image(form.featured_image).await?,
        banner_image: read_image(form.banner_image).await?,
        images: read_images(form.images).await?,
    })
}

async fn read_image(path: Option<PathBuf>) -> Result<Option<ImageFile>, CliError> {
    match path {
        Some(path) => Ok(Some(
            ImageFile::from_path(&path)
                .await
                .map_err(CoreError::from)?,
        )),
        None => Ok(None),
    }
}

async fn read_images(paths: Vec<PathBuf>) -> Result<Vec<ImageFile>, CliError> {
    let mut images = Vec::with_capacity(paths.len());
    for path in paths {
        images.push(ImageFile::from_path(&path).await.map_err(CoreError::from)?);
    }
    Ok(images)
}

fn print_record(
    record: &serde_json::Value,
    summary: &str,
    ctx: &RunContext,
) -> Result<(), CliError> {
    let out = output::render_single(
        ctx.output,
        record,
        |_| summary.to_owned(),
        |r| {
            r.get("id")
                .or_else(|| r.pointer("/data/id"))
                .map(ToString::to_string)
                .unwrap_or_default()
        },
    )?;
    output::print_output(&out, ctx.quiet);
    Ok(())
}
