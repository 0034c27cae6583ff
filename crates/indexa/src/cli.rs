//! Clap derive structures for the `indexa` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// indexa -- kubectl-style CLI for the Indexa search portal
#[derive(Debug, Parser)]
#[command(
    name = "indexa",
    version,
    about = "Manage Indexa domain services, reindex jobs and events",
    long_about = "Administer an Indexa search backend from the command line.\n\n\
        Lists are cached per invocation; every mutation reports its outcome\n\
        as a notification on stderr.",
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
    /// Backend profile to use
    #[arg(long, short = 'p', env = "INDEXA_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API base URL (overrides profile)
    #[arg(long, short = 'u', env = "INDEXA_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Backend environment (development, test, staging, production)
    #[arg(long, short = 'e', env = "INDEXA_ENVIRONMENT", global = true)]
    pub environment: Option<String>,

    /// Bearer token
    #[arg(long, env = "INDEXA_TOKEN", global = true, hide_env = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "INDEXA_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "INDEXA_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "INDEXA_TIMEOUT", global = true)]
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
    /// Manage domain services
    #[command(alias = "ds")]
    DomainServices(DomainServicesArgs),

    /// Manage reindex jobs
    #[command(alias = "rj")]
    ReindexJobs(ReindexJobsArgs),

    /// Browse and re-index events
    #[command(alias = "ev")]
    Events(EventsArgs),

    /// View identity provider status
    Providers(ProvidersArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared List Arguments ────────────────────────────────────────────

/// Pagination and search arguments shared by list commands.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Page number (1-based)
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Results per page
    #[arg(long, short = 'n', default_value = "25", value_parser = clap::value_parser!(u32).range(1..))]
    pub size: u32,

    /// Free-text search
    #[arg(long, short = 'Q')]
    pub query: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DOMAIN SERVICES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DomainServicesArgs {
    #[command(subcommand)]
    pub command: DomainServicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DomainServicesCommand {
    /// List domain services
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one domain service
    Get {
        /// Domain service ID
        id: String,
    },

    /// Register a new domain service
    Create(DomainServiceFields),

    /// Replace a domain service's settings
    Update {
        /// Domain service ID
        id: String,

        #[command(flatten)]
        fields: DomainServiceUpdateFields,
    },

    /// Delete a domain service
    #[command(alias = "rm")]
    Delete {
        /// Domain service ID
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct DomainServiceFields {
    /// Service name
    #[arg(long)]
    pub name: Option<String>,

    /// Domain served (repeatable; prompted when omitted on a terminal)
    #[arg(long = "domain", short = 'd')]
    pub domains: Vec<String>,

    /// Base URL of the service
    #[arg(long)]
    pub base_url: Option<String>,

    /// Prefix of the search indexes
    #[arg(long)]
    pub indexes_path_prefix: Option<String>,

    /// Entity excluded from indexing (repeatable)
    #[arg(long = "exclude", short = 'x')]
    pub excluded_entities: Vec<String>,

    /// Create the service disabled
    #[arg(long)]
    pub disabled: bool,
}

#[derive(Debug, Args)]
pub struct DomainServiceUpdateFields {
    #[arg(long)]
    pub name: Option<String>,

    /// Replace domains (repeatable)
    #[arg(long = "domain", short = 'd')]
    pub domains: Vec<String>,

    #[arg(long)]
    pub base_url: Option<String>,

    #[arg(long)]
    pub indexes_path_prefix: Option<String>,

    /// Replace excluded entities (repeatable)
    #[arg(long = "exclude", short = 'x')]
    pub excluded_entities: Vec<String>,

    /// Enable or disable the service
    #[arg(long)]
    pub enabled: Option<bool>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  REINDEX JOBS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ReindexJobsArgs {
    #[command(subcommand)]
    pub command: ReindexJobsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ReindexJobsCommand {
    /// List reindex jobs
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one reindex job
    Get {
        /// Reindex job ID
        id: String,
    },

    /// Schedule a reindex job
    Create(ReindexJobFields),

    /// Cancel a pending or running job
    Cancel {
        /// Reindex job ID
        id: String,
    },

    /// Start a job now
    Run {
        /// Reindex job ID
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct ReindexJobFields {
    /// Domain to reindex (repeatable; prompted when omitted on a terminal)
    #[arg(long = "domain", short = 'd')]
    pub domains: Vec<String>,

    /// Entity type to reindex (repeatable; prompted when omitted on a terminal)
    #[arg(long = "entity-type", short = 't')]
    pub entity_types: Vec<String>,

    /// Lower bound of the update window (RFC 3339)
    #[arg(long)]
    pub updated_after: Option<String>,

    /// Upper bound of the update window (RFC 3339)
    #[arg(long)]
    pub updated_before: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  EVENTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct EventsArgs {
    #[command(subcommand)]
    pub command: EventsCommand,
}

#[derive(Debug, Subcommand)]
pub enum EventsCommand {
    /// List recorded events
    #[command(alias = "ls")]
    List(ListArgs),

    /// Re-index one event
    Index {
        /// Event ID
        id: String,
    },

    /// Show the data payload of one event from a listed page
    Data {
        /// Event ID
        id: String,

        #[command(flatten)]
        list: ListArgs,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PROVIDERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ProvidersArgs {
    #[command(subcommand)]
    pub command: ProvidersCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProvidersCommand {
    /// List identity providers and their health
    #[command(alias = "ls")]
    List,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Set a configuration value
    Set {
        /// Key on the active profile: api_url, environment, token, token_env,
        /// ca_cert, insecure, timeout or stale_time_secs
        key: String,

        /// Value to set
        value: String,
    },

    /// Store a bearer token in the system keyring
    SetToken {
        /// Profile name (defaults to the active profile)
        #[arg(long)]
        profile: Option<String>,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Print the config file location
    Path,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
