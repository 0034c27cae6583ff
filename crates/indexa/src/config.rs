//! CLI configuration: thin wrapper around `indexa_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--api-url, --token, --environment, ...).

use std::time::Duration;

use secrecy::SecretString;

use indexa_core::{Environment, PortalConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use indexa_config::{
    Config, Defaults, Profile, config_path, load_config_or_default, save_config, store_token,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Comma-separated profile names for help text.
pub fn available_profiles(config: &Config) -> String {
    let names = config.profile_names();
    if names.is_empty() {
        "(none)".into()
    } else {
        names.join(", ")
    }
}

pub fn parse_environment(raw: &str) -> Result<Environment, CliError> {
    raw.parse().map_err(|_| CliError::Validation {
        field: "environment".into(),
        reason: format!("expected development, test, staging or production, got '{raw}'"),
    })
}

/// Build the runtime `PortalConfig` from config file, profile and flags.
///
/// Flags win over profile values. A missing token is not an error here;
/// the query layer rejects it per operation.
pub fn build_portal_config(global: &GlobalOpts) -> Result<PortalConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    let (mut portal, profile) = match cfg.profiles.get(&profile_name) {
        Some(profile) => {
            let mut portal =
                indexa_config::profile_to_portal_config(profile, &profile_name, &cfg.defaults)?;
            if let Some(ref url) = global.api_url {
                portal.api_url = parse_url(url)?;
            }
            (portal, Some(profile))
        }
        None => {
            // An explicitly requested profile must exist.
            if global.profile.is_some() {
                return Err(CliError::ProfileNotFound {
                    name: profile_name,
                    available: available_profiles(&cfg),
                });
            }
            let url = global.api_url.as_deref().ok_or_else(|| CliError::NoConfig {
                path: config_path().display().to_string(),
            })?;
            let portal = PortalConfig::new(parse_url(url)?)
                .with_stale_time(Duration::from_secs(cfg.defaults.stale_time_secs));
            (portal, None)
        }
    };

    if let Some(ref env) = global.environment {
        portal.environment = parse_environment(env)?;
    }
    if let Some(ref token) = global.token {
        portal.token = Some(SecretString::from(token.clone()));
    }
    if global.insecure {
        portal.tls = TlsVerification::DangerAcceptInvalid;
    }
    portal.timeout = Duration::from_secs(
        global
            .timeout
            .or_else(|| profile.and_then(|p| p.timeout))
            .unwrap_or(cfg.defaults.timeout),
    );

    tracing::debug!(
        profile = %profile_name,
        api_url = %portal.api_url,
        environment = %portal.environment,
        has_token = portal.has_token(),
        "resolved portal config"
    );
    Ok(portal)
}

fn parse_url(raw: &str) -> Result<url::Url, CliError> {
    raw.parse().map_err(|_| CliError::Validation {
        field: "api_url".into(),
        reason: format!("invalid URL: {raw}"),
    })
}
