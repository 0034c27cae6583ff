// Reindex job creation form. Timestamps are kept as typed text until
// submission.

use chrono::{DateTime, Utc};

use indexa_api::types::{CreateReindexJob, ReindexJob};

use super::FormErrors;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReindexJobForm {
    pub domains: Vec<String>,
    pub entity_types: Vec<String>,
    pub updated_after: String,
    pub updated_before: String,
}

impl From<&ReindexJob> for ReindexJobForm {
    fn from(job: &ReindexJob) -> Self {
        Self {
            domains: job.domains.clone().unwrap_or_default(),
            entity_types: job.entity_types.clone().unwrap_or_default(),
            updated_after: job.updated_after.map(|t| t.to_rfc3339()).unwrap_or_default(),
            updated_before: job.updated_before.map(|t| t.to_rfc3339()).unwrap_or_default(),
        }
    }
}

impl ReindexJobForm {
    pub fn validate(&self) -> Result<(), FormErrors> {
        self.parse().map(|_| ())
    }

    pub fn into_create(self) -> Result<CreateReindexJob, FormErrors> {
        let (updated_after, updated_before) = self.parse()?;
        Ok(CreateReindexJob {
            domains: self.domains,
            entity_types: self.entity_types,
            updated_after,
            updated_before,
        })
    }

    fn parse(&self) -> Result<(DateTime<Utc>, DateTime<Utc>), FormErrors> {
        let mut errors = FormErrors::default();
        if self.domains.is_empty() {
            errors.push("domains", "At least one domain is required");
        }
        if self.entity_types.is_empty() {
            errors.push("entity_types", "At least one entity type is required");
        }
        let after = parse_timestamp(&mut errors, "updated_after", &self.updated_after, "Updated after");
        let before = parse_timestamp(
            &mut errors,
            "updated_before",
            &self.updated_before,
            "Updated before",
        );

        match (after, before) {
            (Some(after), Some(before)) if errors.is_empty() => Ok((after, before)),
            _ => Err(errors),
        }
    }
}

fn parse_timestamp(
    errors: &mut FormErrors,
    field: &'static str,
    raw: &str,
    label: &str,
) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.push(field, format!("{label} is required"));
        return None;
    }
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => Some(ts.with_timezone(&Utc)),
        Err(_) => {
            errors.push(field, format!("{label} must be an RFC 3339 timestamp"));
            None
        }
    }
}
