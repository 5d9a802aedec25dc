use crate::domain_model::Privilege;
use anyhow::{Result, anyhow};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::fmt;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub auth: Auth,
    #[serde(default)]
    pub guard: Guard,
    pub http: Http,
    pub log: Log,
    #[serde(default)]
    pub mysql: Option<MySql>,
    pub user: User,
}

#[derive(Deserialize)]
pub struct Auth {
    pub backend: String, // "fake" or "real"
    #[serde(default = "default_issuer")]
    pub issuer: String,
    #[serde(default = "default_audience")]
    pub audience: String,
    #[serde(default)]
    pub signing_key: Option<String>,
    #[serde(default = "default_access_ttl_secs")]
    pub access_ttl_secs: u64,
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Auth")
            .field("backend", &self.backend)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("signing_key", &self.signing_key.as_ref().map(|_| "<redacted>"))
            .field("access_ttl_secs", &self.access_ttl_secs)
            .finish()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Guard {
    /// Privilege required to delete a user account.
    #[serde(default)]
    pub delete_user: Privilege,
}

#[derive(Debug, Deserialize)]
pub struct Http {
    pub address: String,
    /// Origin the served form posts to. Unset means the page's own origin.
    #[serde(default)]
    pub public_base_url: Option<String>,
    #[serde(default)]
    pub cert_path: Option<String>,
    #[serde(default)]
    pub key_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Log {
    pub filter: String,
}

#[derive(Debug, Deserialize)]
pub struct MySql {
    pub dsn: String,
}

#[derive(Debug, Deserialize)]
pub struct User {
    pub backend: String, // "fake" or "mysql"
    /// Usernames preloaded into the fake backend.
    #[serde(default)]
    pub seed: Vec<String>,
}

fn default_issuer() -> String {
    "userdel.auth".to_string()
}

fn default_audience() -> String {
    "userdel-client".to_string()
}

fn default_access_ttl_secs() -> u64 {
    15 * 60
}

#[cfg(debug_assertions)]
const SETTINGS_PATH: &str = "settings/dev.toml";
#[cfg(not(debug_assertions))]
const SETTINGS_PATH: &str = "settings/release.toml";

/// Prefix for environment overrides, e.g. `USERDEL__HTTP__ADDRESS`.
const ENV_PREFIX: &str = "USERDEL";

pub fn parse_settings(path: Option<&str>) -> Result<Settings> {
    let path = path.unwrap_or(SETTINGS_PATH);

    let settings: Settings = Config::builder()
        .add_source(File::with_name(path))
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()
        .map_err(|e| anyhow!(e))?
        .try_deserialize()
        .map_err(|e| anyhow!(e))?;

    Ok(settings)
}
