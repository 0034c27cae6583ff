//! Resource-query layer between `indexa-api` and UI consumers (the CLI).
//!
//! - **[`Portal`]**: Facade owning the HTTP client, the [`QueryCache`] and
//!   a [`Notifier`]. Hands out one hook struct per backend resource.
//!
//! - **[`QueryCache`]**: Explicit keyed cache service. Entries are keyed by
//!   [`QueryKey`] (ordered segments), expire after a staleness window, and
//!   are invalidated by key prefix after mutations.
//!
//! - **Resource hooks** ([`resources`]): `list` / `detail` queries and
//!   `create` / `update` / `delete` / action mutations for domain services,
//!   reindex jobs, events and providers. Every failure surfaces as a
//!   [`QueryError`].
//!
//! - **Presentation state**: [`form::TagInput`] (free text → unique tag
//!   list), validated form models, and the [`dialog::ConfirmDialog`] state
//!   machine used before destructive actions.

pub mod cache;
pub mod config;
pub mod dialog;
pub mod error;
pub mod form;
pub mod notify;
pub mod portal;
pub mod resources;
pub mod status;

// ── Primary re-exports ──────────────────────────────────────────────
pub use cache::{CacheEvent, QueryCache, QueryKey, Resource, ResourceKeys};
pub use config::{PortalConfig, TlsVerification};
pub use dialog::{ConfirmDialog, DialogConfig, DialogError, DialogPatch, DialogState};
pub use error::{ErrorCode, QueryError};
pub use form::{DomainServiceForm, FormErrors, ReindexJobForm, TagInput};
pub use notify::{ChannelNotifier, Notification, NotificationLevel, Notifier, TracingNotifier};
pub use portal::Portal;
pub use resources::QueryOptions;
pub use status::{BadgeTone, StatusBadge};

// Wire types are the domain model; re-export them so consumers only
// depend on this crate.
pub use indexa_api::Environment;
pub use indexa_api::types::{
    CreateDomainService, CreateReindexJob, DomainService, Event, EventUser, JobStatus,
    ListParams, Page, Provider, ProviderList, ReindexJob, UpdateDomainService,
};
