//! Clap derive structures for the `yogi` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// yogi -- command-line client for the Yogineers site backend
#[derive(Debug, Parser)]
#[command(
    name = "yogi",
    version,
    about = "Browse and manage Yogineers site content from the command line",
    long_about = "Reads services, projects and blog posts from the Yogineers backend,\n\
        searches the blog with the same debounce the site uses, aggregates\n\
        project analytics, and offers the admin blog editor.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend origin (overrides config file)
    #[arg(long, short = 'u', env = "YOGI_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(long, short = 'o', env = "YOGI_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (no limit when unset)
    #[arg(long, env = "YOGI_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the services offered
    #[command(alias = "svc")]
    Services(ServicesArgs),

    /// List a service's showcase projects
    #[command(alias = "proj")]
    Projects(ProjectsArgs),

    /// Read, search and edit blog posts
    #[command(alias = "blog", alias = "b")]
    Blogs(BlogsArgs),

    /// Aggregated project statistics across all services
    Analytics,

    /// Send the contact form
    Contact(ContactArgs),

    /// Admin session (gates the blog editor)
    Admin(AdminArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Services & projects ──────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ServicesArgs {
    #[command(subcommand)]
    pub command: ServicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum ServicesCommand {
    /// List all services
    #[command(alias = "ls")]
    List,
}

#[derive(Debug, Args)]
pub struct ProjectsArgs {
    #[command(subcommand)]
    pub command: ProjectsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProjectsCommand {
    /// List the projects of one service
    #[command(alias = "ls")]
    List {
        /// Service ID
        #[arg(long, short = 's')]
        service: i64,
    },
}

// ── Blogs ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct BlogsArgs {
    #[command(subcommand)]
    pub command: BlogsCommand,
}

#[derive(Debug, Subcommand)]
pub enum BlogsCommand {
    /// List the first page of posts
    #[command(alias = "ls")]
    List {
        /// Only featured posts
        #[arg(long, conflicts_with = "regular")]
        featured: bool,

        /// Only non-featured posts
        #[arg(long)]
        regular: bool,
    },

    /// Show one post by slug
    Show {
        /// Post slug
        slug: String,
    },

    /// Search posts (first page of matches)
    Search {
        /// Search term
        term: String,
    },

    /// Live search: reads search-box contents from stdin, one per line
    Watch,

    /// Like a post
    Like {
        /// Post slug
        slug: String,
    },

    /// Create a post (admin)
    Create(BlogFormArgs),

    /// Update a post (admin)
    Update {
        /// Post ID
        id: i64,

        #[command(flatten)]
        form: BlogFormArgs,
    },

    /// Delete a post (admin)
    #[command(alias = "rm")]
    Delete {
        /// Post ID
        id: i64,
    },
}

#[derive(Debug, Args)]
pub struct BlogFormArgs {
    #[arg(long)]
    pub title: String,

    /// Post body (use --content-file to read it from disk)
    #[arg(long, required_unless_present = "content_file")]
    pub content: Option<String>,

    /// Read the post body from a file
    #[arg(long, conflicts_with = "content")]
    pub content_file: Option<PathBuf>,

    #[arg(long)]
    pub author: String,

    #[arg(long)]
    pub subtitle: Option<String>,

    #[arg(long)]
    pub excerpt: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    /// Tag (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Publish instead of saving as draft
    #[arg(long)]
    pub publish: bool,

    /// Mark as featured
    #[arg(long)]
    pub featured: bool,

    #[arg(long)]
    pub featured_image: Option<PathBuf>,

    #[arg(long)]
    pub banner_image: Option<PathBuf>,

    /// Gallery image (repeatable)
    #[arg(long = "image")]
    pub images: Vec<PathBuf>,
}

// ── Contact ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ContactArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub subject: String,

    #[arg(long)]
    pub message: String,
}

// ── Admin ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Log in as admin (prompts when --password is omitted)
    Login {
        #[arg(long, env = "YOGI_ADMIN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Clear the admin flag
    Logout,

    /// Show whether the admin flag is set
    Status,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create the config file with guided setup
    Init,

    /// Display the resolved configuration
    Show,

    /// Print the config file path
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
