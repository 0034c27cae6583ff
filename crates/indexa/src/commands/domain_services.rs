//! Domain service command handlers.

use tabled::Tabled;

use indexa_core::{DialogConfig, DomainService, DomainServiceForm, Portal, QueryOptions, StatusBadge};

use crate::cli::{
    DomainServiceFields, DomainServiceUpdateFields, DomainServicesArgs, DomainServicesCommand,
    GlobalOpts, OutputFormat,
};
use crate::error::CliError;
use crate::output;

use super::util;

const RESOURCE: &str = "domain service";
const LIST_COMMAND: &str = "domain-services list";

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DomainServiceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Domains")]
    domains: String,
    #[tabled(rename = "Base URL")]
    base_url: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl DomainServiceRow {
    fn new(s: &DomainService, color: bool) -> Self {
        Self {
            id: s.id.clone(),
            name: output::or_dash(s.name.as_deref()).to_owned(),
            domains: output::join_or_dash(s.domains.as_deref()),
            base_url: output::or_dash(s.base_url.as_deref()).to_owned(),
            status: output::paint_badge(StatusBadge::for_enabled(s.enabled), color),
        }
    }
}

fn detail(s: &DomainService) -> String {
    [
        format!("ID:                {}", s.id),
        format!("Name:              {}", output::or_dash(s.name.as_deref())),
        format!("Domains:           {}", output::join_or_dash(s.domains.as_deref())),
        format!("Base URL:          {}", output::or_dash(s.base_url.as_deref())),
        format!(
            "Index prefix:      {}",
            output::or_dash(s.indexes_path_prefix.as_deref())
        ),
        format!(
            "Excluded entities: {}",
            output::join_or_dash(s.excluded_entities.as_deref())
        ),
        format!("Status:            {}", StatusBadge::for_enabled(s.enabled).label),
        format!("Created:           {}", output::fmt_time(s.created_at)),
        format!("Updated:           {}", output::fmt_time(s.updated_at)),
    ]
    .join("\n")
}

// ── Form assembly ───────────────────────────────────────────────────

fn create_form(fields: DomainServiceFields) -> Result<DomainServiceForm, CliError> {
    Ok(DomainServiceForm {
        name: util::prompt_text("Name", fields.name)?,
        domains: util::prompt_tags("Domains", fields.domains, true)?,
        base_url: util::prompt_text("Base URL", fields.base_url)?,
        indexes_path_prefix: util::prompt_text("Indexes path prefix", fields.indexes_path_prefix)?,
        excluded_entities: util::prompt_tags(
            "Excluded entities",
            fields.excluded_entities,
            false,
        )?,
        enabled: !fields.disabled,
    })
}

/// Start from the stored entity and apply only the flags that were given.
fn edit_form(current: &DomainService, fields: DomainServiceUpdateFields) -> DomainServiceForm {
    let mut form = DomainServiceForm::from(current);
    if let Some(name) = fields.name {
        form.name = name;
    }
    if !fields.domains.is_empty() {
        form.domains = indexa_core::TagInput::with_values(fields.domains).into_values();
    }
    if let Some(base_url) = fields.base_url {
        form.base_url = base_url;
    }
    if let Some(prefix) = fields.indexes_path_prefix {
        form.indexes_path_prefix = prefix;
    }
    if !fields.excluded_entities.is_empty() {
        form.excluded_entities =
            indexa_core::TagInput::with_values(fields.excluded_entities).into_values();
    }
    if let Some(enabled) = fields.enabled {
        form.enabled = enabled;
    }
    form
}

fn print_service(service: &DomainService, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(global.output, service, detail, |s| s.id.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    portal: &Portal,
    args: DomainServicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let services = portal.domain_services();

    match args.command {
        DomainServicesCommand::List(list) => {
            let params = util::list_params(&list);
            let Some(page) = services.list(&params, QueryOptions::default()).await? else {
                return Ok(());
            };
            let color = output::should_color(global.color);
            let out = output::render_list(
                global.output,
                &page.items,
                |s| DomainServiceRow::new(s, color),
                |s| s.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            if global.output == OutputFormat::Table && !global.quiet {
                eprintln!("{}", util::page_footer(&page));
            }
            Ok(())
        }

        DomainServicesCommand::Get { id } => {
            let service = services
                .detail(&id, QueryOptions::default())
                .await
                .map_err(|e| CliError::from_lookup(e, RESOURCE, &id, LIST_COMMAND))?
                .ok_or_else(|| CliError::from_missing(RESOURCE, &id, LIST_COMMAND))?;
            print_service(&service, global)
        }

        DomainServicesCommand::Create(fields) => {
            // Token check first, so nobody is prompted for a doomed request.
            let create = services.create()?;
            let data = create_form(fields)?.into_create()?;
            let created = create.mutate(&data).await?;
            print_service(&created, global)
        }

        DomainServicesCommand::Update { id, fields } => {
            let current = services
                .detail(&id, QueryOptions::default())
                .await
                .map_err(|e| CliError::from_lookup(e, RESOURCE, &id, LIST_COMMAND))?
                .ok_or_else(|| CliError::from_missing(RESOURCE, &id, LIST_COMMAND))?;
            let data = edit_form(&current, fields).into_update()?;
            let updated = services
                .update(&id, &data)
                .await
                .map_err(|e| CliError::from_lookup(e, RESOURCE, &id, LIST_COMMAND))?;
            print_service(&updated, global)
        }

        DomainServicesCommand::Delete { id } => {
            let dialog = DialogConfig::new(
                "Delete domain service?",
                format!("'{id}' will be removed permanently."),
            );
            let (services, id) = (&services, id.as_str());
            let deleted = util::confirm_and_run(dialog, global.yes, move || async move {
                services
                    .delete(id)
                    .await
                    .map_err(|e| CliError::from_lookup(e, RESOURCE, id, LIST_COMMAND))
            })
            .await?;
            match deleted {
                Some(Some(service)) if global.output != OutputFormat::Table => {
                    print_service(&service, global)
                }
                _ => Ok(()),
            }
        }
    }
}
