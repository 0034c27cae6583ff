// ── Query keys ──
//
// A key is an ordered list of string segments. Invalidation works on
// prefixes: `[domain-services]` matches every domain-service entry,
// `[domain-services, list]` only the lists.

use std::fmt;

use strum::{Display, IntoStaticStr};

use indexa_api::ListParams;

/// Ordered cache-key segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Returns a new key with `segment` appended.
    #[must_use]
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    /// Segment-wise prefix test. The empty key is a prefix of every key.
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

/// Backend resource families with their own cache namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Resource {
    DomainServices,
    ReindexJobs,
    Events,
    Providers,
}

impl Resource {
    /// Resource path segment relative to the API base URL.
    pub fn path(self) -> &'static str {
        match self {
            Self::DomainServices => "domain-services",
            Self::ReindexJobs => "reindex-jobs",
            Self::Events => "events",
            Self::Providers => "providers",
        }
    }

    pub fn keys(self) -> ResourceKeys {
        ResourceKeys { resource: self }
    }
}

/// Key builders for one resource family.
#[derive(Debug, Clone, Copy)]
pub struct ResourceKeys {
    resource: Resource,
}

impl ResourceKeys {
    pub fn all(self) -> QueryKey {
        let name: &'static str = self.resource.into();
        QueryKey::new([name])
    }

    pub fn lists(self) -> QueryKey {
        self.all().child("list")
    }

    /// `scope` identifies the backend (base URL + environment).
    pub fn list(self, scope: &str, params: &ListParams) -> QueryKey {
        self.lists().child(scope).child(params_segment(params))
    }

    pub fn details(self) -> QueryKey {
        self.all().child("detail")
    }

    pub fn detail(self, id: &str) -> QueryKey {
        self.details().child(id)
    }
}

fn params_segment(params: &ListParams) -> String {
    let mut segment = format!("page={}&size={}", params.page, params.size);
    if let Some(q) = &params.q {
        segment.push_str("&q=");
        segment.push_str(q);
    }
    segment
}
