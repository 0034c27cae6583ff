// Async HTTP client for the Indexa portal REST API.
//
// Base path: whatever `api_url` the caller configured, e.g.
// `https://indexa.example.com/api/v1/`.
// Auth: `Authorization: Bearer <token>` plus an `X-Environment` marker.

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::{ApiCredentials, Environment};
use crate::error::Error;
use crate::transport::TransportConfig;

// ── Error response shape ─────────────────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the Indexa portal API.
///
/// One inherent method per endpoint; the endpoint modules
/// (`domain_services`, `reindex_jobs`, `events`, `providers`) extend this
/// type so this module stays focused on transport mechanics.
pub struct PortalClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: ApiCredentials,
}

impl PortalClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client for `base_url` using the given credentials.
    ///
    /// The environment marker is injected as a default header; the bearer
    /// token is attached per request so a missing token simply sends none.
    pub fn new(
        base_url: &str,
        credentials: ApiCredentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let env_value = HeaderValue::from_str(&credentials.environment.to_string()).map_err(
            |e| Error::InvalidHeader {
                header: Environment::HEADER,
                message: e.to_string(),
            },
        )?;
        headers.insert(Environment::HEADER, env_value);

        let http = transport.build_client_with_headers(headers)?;
        let base_url = Self::normalize_base_url(base_url)?;

        Ok(Self {
            http,
            base_url,
            credentials,
        })
    }

    /// Wrap an existing `reqwest::Client` (caller manages default headers).
    pub fn from_reqwest(
        base_url: &str,
        http: reqwest::Client,
        credentials: ApiCredentials,
    ) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            credentials,
        })
    }

    /// Ensure the base URL ends in `/` so relative joins append rather
    /// than replace the last path segment.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// The normalized API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Credentials this client sends.
    pub fn credentials(&self) -> &ApiCredentials {
        &self.credentials
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append `segments` to the base URL, one path segment each.
    ///
    /// Every segment is percent-encoded, so an id holding `/`, `?` or `#`
    /// stays inside its own segment. Empty, `.` and `..` segments are
    /// rejected since they would resolve to a different endpoint.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url, Error> {
        if let Some(bad) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(Error::InvalidPathSegment {
                segment: (*bad).to_owned(),
            });
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.credentials.token {
            Some(ref token) => req.bearer_auth(token.expose_secret()),
            None => req,
        }
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, Error> {
        let url = self.url(segments)?;
        debug!("GET {url}");

        let resp = self.authorize(self.http.get(url)).send().await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn get_with_params<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(segments)?;
        debug!("GET {url} params={params:?}");

        let resp = self
            .authorize(self.http.get(url).query(params))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(segments)?;
        debug!("POST {url}");

        let resp = self.authorize(self.http.post(url).json(body)).send().await?;
        self.handle_response(resp).await
    }

    /// POST without a request body (action endpoints).
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, Error> {
        let url = self.url(segments)?;
        debug!("POST {url}");

        let resp = self.authorize(self.http.post(url)).send().await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(segments)?;
        debug!("PUT {url}");

        let resp = self.authorize(self.http.put(url).json(body)).send().await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, Error> {
        let url = self.url(segments)?;
        debug!("DELETE {url}");

        let resp = self.authorize(self.http.delete(url)).send().await?;
        self.handle_response(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            // Some endpoints answer 204 or an empty 200; treat that as JSON null.
            let text = if body.trim().is_empty() { "null" } else { body.as_str() };
            serde_json::from_str(text).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();
        let parsed = serde_json::from_str::<ErrorResponse>(&raw).ok();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Error::Unauthorized {
                message: parsed
                    .and_then(|e| e.message)
                    .unwrap_or_else(|| status.to_string()),
            };
        }

        match parsed {
            Some(err) => Error::Api {
                status: status.as_u16(),
                message: err
                    .message
                    .or_else(|| err.detail.as_ref().and_then(detail_message))
                    .unwrap_or_else(|| status.to_string()),
                code: err.code,
                details: err.detail,
            },
            None => Error::Api {
                status: status.as_u16(),
                message: if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                },
                code: None,
                details: None,
            },
        }
    }
}

/// Pull a message out of a `detail` field: either a plain string or the
/// first entry of a validation-error list carrying `msg`.
fn detail_message(detail: &serde_json::Value) -> Option<String> {
    match detail {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(items) => items
            .first()
            .and_then(|item| item.get("msg"))
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned),
        _ => None,
    }
}
