//! Command dispatch: bridges CLI args -> portal hooks -> output formatting.

pub mod config_cmd;
pub mod domain_services;
pub mod events;
pub mod providers;
pub mod reindex_jobs;
pub mod util;

use indexa_core::Portal;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, portal: &Portal, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::DomainServices(args) => domain_services::handle(portal, args, global).await,
        Command::ReindexJobs(args) => reindex_jobs::handle(portal, args, global).await,
        Command::Events(args) => events::handle(portal, args, global).await,
        Command::Providers(args) => providers::handle(portal, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
