//! Identity provider command handlers.

use tabled::Tabled;

use indexa_core::{Portal, Provider, QueryOptions, StatusBadge};

use crate::cli::{GlobalOpts, ProvidersArgs, ProvidersCommand};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct ProviderRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Enabled")]
    enabled: String,
    #[tabled(rename = "Health")]
    health: String,
}

impl ProviderRow {
    fn new(p: &Provider, color: bool) -> Self {
        Self {
            name: p.name.clone(),
            enabled: output::paint_badge(StatusBadge::for_enabled(Some(p.enabled)), color),
            health: output::paint_badge(StatusBadge::for_health(p.healthy), color),
        }
    }
}

pub async fn handle(
    portal: &Portal,
    args: ProvidersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ProvidersCommand::List => {
            let Some(list) = portal.providers().list(QueryOptions::default()).await? else {
                return Ok(());
            };
            let color = output::should_color(global.color);
            let out = output::render_list(
                global.output,
                &list.items,
                |p| ProviderRow::new(p, color),
                |p| p.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
