// Wire types for the Indexa portal REST API.
//
// Every field the backend may omit is optional and defaults on decode.
// The client adds no invariants of its own.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

// ── Pagination ───────────────────────────────────────────────────────

/// Page envelope returned by every paginated list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub total: u64,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Pagination and free-text filter for list calls.
///
/// `Hash + Eq` so it can take part in cache keys: two calls that differ
/// in any field are cached independently.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListParams {
    pub page: u32,
    pub size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
}

impl ListParams {
    pub const DEFAULT_PAGE: u32 = 1;
    pub const DEFAULT_SIZE: u32 = 25;

    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size, q: None }
    }

    /// Attach a free-text filter. Blank filters are dropped.
    #[must_use]
    pub fn with_query(mut self, q: impl Into<String>) -> Self {
        let q = q.into();
        self.q = if q.trim().is_empty() { None } else { Some(q) };
        self
    }

    /// Query-string pairs: `page`, `size`, and `q` when present.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string()), ("size", self.size.to_string())];
        if let Some(ref q) = self.q {
            pairs.push(("q", q.clone()));
        }
        pairs
    }
}

impl Default for ListParams {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PAGE, Self::DEFAULT_SIZE)
    }
}

// ── Domain services ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainService {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub domains: Option<Vec<String>>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub indexes_path_prefix: Option<String>,
    #[serde(default)]
    pub excluded_entities: Option<Vec<String>>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default, with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "lenient_datetime")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// `POST /domain-services` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDomainService {
    pub name: String,
    pub domains: Vec<String>,
    pub base_url: String,
    pub indexes_path_prefix: String,
    pub excluded_entities: Vec<String>,
    pub enabled: bool,
}

/// `PUT /domain-services/{id}` body. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateDomainService {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domains: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexes_path_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excluded_entities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl UpdateDomainService {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ── Reindex jobs ─────────────────────────────────────────────────────

/// Lifecycle state of a reindex job as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Running,
    Completed,
    Failed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    /// Human-readable label; statuses the client does not know render "-".
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Running => "Running",
            Self::Completed => "Completed",
            Self::Failed => "Failed",
            Self::Cancelled => "Cancelled",
            Self::Unknown => "-",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReindexJob {
    pub id: String,
    #[serde(default)]
    pub status: Option<JobStatus>,
    #[serde(default, with = "lenient_datetime")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, with = "lenient_datetime")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub domains: Option<Vec<String>>,
    #[serde(default)]
    pub entity_types: Option<Vec<String>>,
    #[serde(default, with = "lenient_datetime")]
    pub updated_after: Option<DateTime<Utc>>,
    #[serde(default, with = "lenient_datetime")]
    pub updated_before: Option<DateTime<Utc>>,
    #[serde(default, with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "lenient_datetime")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// `POST /reindex-jobs` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateReindexJob {
    pub domains: Vec<String>,
    pub entity_types: Vec<String>,
    pub updated_after: DateTime<Utc>,
    pub updated_before: DateTime<Utc>,
}

// ── Events ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default, with = "lenient_datetime")]
    pub confirmed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub verified: Option<bool>,
    #[serde(default, with = "lenient_datetime")]
    pub verified_at: Option<DateTime<Utc>>,
    #[serde(default, with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "lenient_datetime")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl EventUser {
    /// Best human-readable name: full name, then username, then email.
    pub fn display_name(&self) -> String {
        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !full.is_empty() {
            return full;
        }
        self.username
            .clone()
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| self.id.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub spec_version: Option<String>,
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub event_data: serde_json::Value,
    #[serde(default)]
    pub data_content_type: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default, with = "lenient_datetime")]
    pub time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub labels: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    pub privy: Option<bool>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default, with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "lenient_datetime")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user: Option<EventUser>,
}

// ── Providers ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
    /// The backend spells this field `healty`.
    #[serde(default, rename = "healty", alias = "healthy")]
    pub healthy: bool,
}

/// `GET /providers` envelope (not paginated).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderList {
    #[serde(default)]
    pub items: Vec<Provider>,
}

// ── Timestamp decoding ───────────────────────────────────────────────

/// Accepts RFC 3339 timestamps as well as naive ISO-8601 ones (assumed
/// UTC), and `null`. Serializes as RFC 3339.
mod lenient_datetime {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        if raw.is_empty() {
            return Ok(None);
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(Some(dt.with_timezone(&Utc)));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(&raw, fmt).ok())
            .map(|naive| Some(naive.and_utc()))
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
    }
}
