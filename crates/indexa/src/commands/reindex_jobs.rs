//! Reindex job command handlers.

use tabled::Tabled;

use indexa_core::{DialogConfig, Portal, QueryOptions, ReindexJob, ReindexJobForm, StatusBadge};

use crate::cli::{GlobalOpts, OutputFormat, ReindexJobFields, ReindexJobsArgs, ReindexJobsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

const RESOURCE: &str = "reindex job";
const LIST_COMMAND: &str = "reindex-jobs list";

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ReindexJobRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Domains")]
    domains: String,
    #[tabled(rename = "Entity types")]
    entity_types: String,
    #[tabled(rename = "Started")]
    started_at: String,
    #[tabled(rename = "Completed")]
    completed_at: String,
}

impl ReindexJobRow {
    fn new(j: &ReindexJob, color: bool) -> Self {
        Self {
            id: j.id.clone(),
            status: output::paint_badge(StatusBadge::for_job(j.status), color),
            domains: output::join_or_dash(j.domains.as_deref()),
            entity_types: output::join_or_dash(j.entity_types.as_deref()),
            started_at: output::fmt_time(j.started_at),
            completed_at: output::fmt_time(j.completed_at),
        }
    }
}

fn detail(j: &ReindexJob) -> String {
    let mut lines = vec![
        format!("ID:             {}", j.id),
        format!("Status:         {}", StatusBadge::for_job(j.status).label),
        format!("Domains:        {}", output::join_or_dash(j.domains.as_deref())),
        format!("Entity types:   {}", output::join_or_dash(j.entity_types.as_deref())),
        format!("Updated after:  {}", output::fmt_time(j.updated_after)),
        format!("Updated before: {}", output::fmt_time(j.updated_before)),
        format!("Started:        {}", output::fmt_time(j.started_at)),
        format!("Completed:      {}", output::fmt_time(j.completed_at)),
    ];
    if let Some(ref message) = j.error_message {
        lines.push(format!("Error:          {message}"));
    }
    lines.join("\n")
}

fn create_form(fields: ReindexJobFields) -> Result<ReindexJobForm, CliError> {
    Ok(ReindexJobForm {
        domains: util::prompt_tags("Domains", fields.domains, true)?,
        entity_types: util::prompt_tags("Entity types", fields.entity_types, true)?,
        updated_after: util::prompt_text("Updated after (RFC 3339)", fields.updated_after)?,
        updated_before: util::prompt_text("Updated before (RFC 3339)", fields.updated_before)?,
    })
}

fn print_job(job: &ReindexJob, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(global.output, job, detail, |j| j.id.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    portal: &Portal,
    args: ReindexJobsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let jobs = portal.reindex_jobs();

    match args.command {
        ReindexJobsCommand::List(list) => {
            let params = util::list_params(&list);
            let Some(page) = jobs.list(&params, QueryOptions::default()).await? else {
                return Ok(());
            };
            let color = output::should_color(global.color);
            let out = output::render_list(
                global.output,
                &page.items,
                |j| ReindexJobRow::new(j, color),
                |j| j.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            if global.output == OutputFormat::Table && !global.quiet {
                eprintln!("{}", util::page_footer(&page));
            }
            Ok(())
        }

        ReindexJobsCommand::Get { id } => {
            let job = jobs
                .detail(&id, QueryOptions::default())
                .await
                .map_err(|e| CliError::from_lookup(e, RESOURCE, &id, LIST_COMMAND))?
                .ok_or_else(|| CliError::from_missing(RESOURCE, &id, LIST_COMMAND))?;
            print_job(&job, global)
        }

        ReindexJobsCommand::Create(fields) => {
            let create = jobs.create()?;
            let data = create_form(fields)?.into_create()?;
            let created = create.mutate(&data).await?;
            print_job(&created, global)
        }

        ReindexJobsCommand::Cancel { id } => {
            let dialog = DialogConfig::new(
                "Cancel reindex job?",
                format!("Job '{id}' will stop and cannot be resumed."),
            );
            let (jobs, id) = (&jobs, id.as_str());
            let cancelled = util::confirm_and_run(dialog, global.yes, move || async move {
                jobs.cancel(id)
                    .await
                    .map_err(|e| CliError::from_lookup(e, RESOURCE, id, LIST_COMMAND))
            })
            .await?;
            match cancelled {
                Some(job) => print_job(&job, global),
                None => Ok(()),
            }
        }

        ReindexJobsCommand::Run { id } => {
            let job = jobs
                .run(&id)
                .await
                .map_err(|e| CliError::from_lookup(e, RESOURCE, &id, LIST_COMMAND))?;
            print_job(&job, global)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexa_core::JobStatus;

    #[test]
    fn failed_job_detail_shows_error() {
        let job = ReindexJob {
            id: "rj-1".into(),
            status: Some(JobStatus::Failed),
            started_at: None,
            completed_at: None,
            error_message: Some("index locked".into()),
            domains: Some(vec!["orders".into()]),
            entity_types: None,
            updated_after: None,
            updated_before: None,
            created_at: None,
            updated_at: None,
        };
        let text = detail(&job);
        assert!(text.contains("Status:         Failed"));
        assert!(text.contains("Entity types:   -"));
        assert!(text.ends_with("Error:          index locked"));
    }

    #[test]
    fn flags_fill_the_form_without_prompting() {
        let form = create_form(ReindexJobFields {
            domains: vec!["orders".into()],
            entity_types: vec!["order".into(), "order".into()],
            updated_after: Some("2024-01-01T00:00:00Z".into()),
            updated_before: Some("2024-02-01T00:00:00Z".into()),
        });
        let Ok(form) = form else {
            panic!("form should build from flags");
        };
        assert_eq!(form.entity_types, vec!["order"]);
        assert!(form.validate().is_ok());
    }
}
