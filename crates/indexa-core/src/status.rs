// ── Status badges ──
//
// Label and colour tone for the status cells shown in job, service and
// provider tables.

use indexa_api::types::JobStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum BadgeTone {
    Amber,
    Orange,
    Green,
    Red,
    Slate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBadge {
    pub label: &'static str,
    pub tone: BadgeTone,
}

impl StatusBadge {
    /// Badge for a job status; missing or unrecognised statuses render "-".
    pub fn for_job(status: Option<JobStatus>) -> Self {
        let status = status.unwrap_or(JobStatus::Unknown);
        let tone = match status {
            JobStatus::Pending => BadgeTone::Amber,
            JobStatus::Running => BadgeTone::Orange,
            JobStatus::Completed => BadgeTone::Green,
            JobStatus::Failed | JobStatus::Cancelled => BadgeTone::Red,
            JobStatus::Unknown => BadgeTone::Slate,
        };
        let label = status.label();
        Self { label, tone }
    }

    pub fn for_enabled(enabled: Option<bool>) -> Self {
        match enabled {
            Some(true) => Self {
                label: "Enabled",
                tone: BadgeTone::Green,
            },
            _ => Self {
                label: "Disabled",
                tone: BadgeTone::Slate,
            },
        }
    }

    pub fn for_health(healthy: bool) -> Self {
        if healthy {
            Self {
                label: "Healthy",
                tone: BadgeTone::Green,
            }
        } else {
            Self {
                label: "Unhealthy",
                tone: BadgeTone::Red,
            }
        }
    }
}
