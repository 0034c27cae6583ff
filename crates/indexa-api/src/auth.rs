use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Deployment environment marker sent with every request.
///
/// The backend uses it to route between its own data planes; the client
/// only forwards it in the `X-Environment` header.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Environment {
    Development,
    Test,
    Staging,
    #[default]
    Production,
}

impl Environment {
    /// Header carrying the environment marker.
    pub const HEADER: &'static str = "X-Environment";
}

/// Credentials attached to outgoing requests.
///
/// The token is optional at this layer: query functions send whatever
/// they are given, and callers higher up decide whether a missing token
/// is an error.
#[derive(Debug, Clone, Default)]
pub struct ApiCredentials {
    /// Bearer token issued by the authentication provider.
    pub token: Option<SecretString>,
    /// Environment marker forwarded to the backend.
    pub environment: Environment,
}

impl ApiCredentials {
    pub fn new(token: Option<SecretString>, environment: Environment) -> Self {
        Self { token, environment }
    }

    /// Whether a non-blank bearer token is available.
    pub fn has_token(&self) -> bool {
        self.token
            .as_ref()
            .is_some_and(|t| !t.expose_secret().trim().is_empty())
    }
}
