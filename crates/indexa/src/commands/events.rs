//! Event command handlers.

use tabled::Tabled;

use indexa_core::{Event, Portal, QueryOptions};

use crate::cli::{EventsArgs, EventsCommand, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct EventRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Type")]
    event_type: String,
    #[tabled(rename = "Subject")]
    subject: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "User")]
    user: String,
    #[tabled(rename = "Time")]
    time: String,
}

impl From<&Event> for EventRow {
    fn from(e: &Event) -> Self {
        Self {
            id: e.id.clone(),
            event_type: output::or_dash(e.event_type.as_deref()).to_owned(),
            subject: output::or_dash(e.subject.as_deref()).to_owned(),
            source: output::or_dash(e.source.as_deref()).to_owned(),
            user: e.user.as_ref().map_or_else(
                || output::or_dash(e.user_id.as_deref()).to_owned(),
                indexa_core::EventUser::display_name,
            ),
            time: output::fmt_time(e.time.or(e.created_at)),
        }
    }
}

pub async fn handle(portal: &Portal, args: EventsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let events = portal.events();

    match args.command {
        EventsCommand::List(list) => {
            let params = util::list_params(&list);
            let Some(page) = events.list(&params, QueryOptions::default()).await? else {
                return Ok(());
            };
            let out = output::render_list(
                global.output,
                &page.items,
                |e| EventRow::from(e),
                |e| e.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            if global.output == OutputFormat::Table && !global.quiet {
                eprintln!("{}", util::page_footer(&page));
            }
            Ok(())
        }

        EventsCommand::Data { id, list } => {
            let params = util::list_params(&list);
            let Some(page) = events.list(&params, QueryOptions::default()).await? else {
                return Ok(());
            };
            let event = page
                .items
                .iter()
                .find(|e| e.id == id)
                .ok_or_else(|| CliError::from_missing("event", &id, "events list"))?;
            let out = output::render_single(
                global.output,
                &event.event_data,
                |data| serde_json::to_string_pretty(data).unwrap_or_default(),
                ToString::to_string,
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        EventsCommand::Index { id } => {
            let response = events
                .index(&id)
                .await
                .map_err(|e| CliError::from_lookup(e, "event", &id, "events list"))?;
            // The notification already reports success in table mode.
            let out = output::render_single(global.output, &response, |_| String::new(), |_| {
                id.clone()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
