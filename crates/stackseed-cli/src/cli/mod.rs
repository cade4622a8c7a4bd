//! Argument definitions using the clap derive API.
//!
//! Only names, help text and value enums live here. Backend and database
//! values stay strings until `SelectionResolver` sees them, so flags, config
//! defaults and prompt answers share one validation path.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name     = "stackseed",
    bin_name = "stackseed",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f331} Full-stack project scaffolding",
    long_about = "Stackseed generates a React frontend and a FastAPI or Express.js \
                  backend wired to SQL or MongoDB, and records every created path \
                  in log/setup.log, log/frontend.log and log/backend.log.",
    after_help = "EXAMPLES:\n\
        \x20 stackseed new shop --backend fastapi --database sql --db-name shop_db\n\
        \x20 stackseed new                              # interactive\n\
        \x20 stackseed list --backend express --format paths\n\
        \x20 stackseed completions bash > /usr/share/bash-completion/completions/stackseed",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new full-stack project.
    #[command(
        visible_alias = "n",
        after_help = "EXAMPLES:\n\
            \x20 stackseed new shop --backend fastapi --database sql --db-name shop_db --yes\n\
            \x20 stackseed new blog --backend 2 --database 2 --db-name blog_db\n\
            \x20 stackseed new shop --dry-run"
    )]
    New(NewArgs),

    /// Show the paths a backend/database combination produces.
    #[command(
        visible_alias = "ls",
        after_help = "EXAMPLES:\n\
            \x20 stackseed list\n\
            \x20 stackseed list --backend express --database mongodb\n\
            \x20 stackseed list --format json"
    )]
    List(ListArgs),

    /// Verify the built-in templates for every combination.
    Check,

    /// Write a default configuration file.
    #[command(after_help = "EXAMPLES:\n\
            \x20 stackseed init\n\
            \x20 stackseed init --force")]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(after_help = "EXAMPLES:\n\
            \x20 stackseed completions bash > ~/.local/share/bash-completion/completions/stackseed\n\
            \x20 stackseed completions zsh  > ~/.zfunc/_stackseed\n\
            \x20 stackseed completions fish > ~/.config/fish/completions/stackseed.fish")]
    Completions(CompletionsArgs),

    /// Inspect the active configuration.
    #[command(
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 stackseed config get defaults.backend\n\
            \x20 stackseed config list\n\
            \x20 stackseed config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project name; becomes the root directory. Prompted when omitted.
    #[arg(value_name = "NAME")]
    pub name: Option<String>,

    /// Backend framework: `fastapi` (1) or `express` (2).
    #[arg(short = 'b', long = "backend", value_name = "BACKEND")]
    pub backend: Option<String>,

    /// Database: `sql` (1) or `mongodb` (2).
    #[arg(short = 'd', long = "database", value_name = "DATABASE")]
    pub database: Option<String>,

    /// Database name wired into the backend's database setup file.
    #[arg(long = "db-name", value_name = "NAME")]
    pub db_name: Option<String>,

    /// Directory the project root is created in.
    #[arg(
        short = 'o',
        long = "output-dir",
        value_name = "DIR",
        default_value = "."
    )]
    pub output_dir: PathBuf,

    /// Never prompt; fail on missing or invalid values.
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,

    /// Print the resolved plan without writing anything.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only combinations with this backend.
    #[arg(short = 'b', long = "backend", value_name = "BACKEND")]
    pub backend: Option<String>,

    /// Only combinations with this database.
    #[arg(short = 'd', long = "database", value_name = "DATABASE")]
    pub database: Option<String>,

    #[arg(long = "format", value_enum, default_value = "tree")]
    pub format: ListFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Indented tree, directories marked with `/`.
    Tree,
    /// One relative path per line.
    Paths,
    /// JSON array of combinations with their entries.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config ────────────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print one value, e.g. `defaults.backend`.
    Get { key: String },
    /// Print every value as TOML.
    List,
    /// Print the default configuration file path.
    Path,
}
