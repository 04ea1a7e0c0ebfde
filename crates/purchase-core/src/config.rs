//! Configuration module
//!
//! Settings come from the process environment (a `.env` file is loaded first
//! when present). The webhook URL is the only required value.

use std::env;

use crate::constants::{
    BYTES_PER_MIB, DEFAULT_ALLOWED_CONTENT_TYPES, LOGIN_SCOPE, MAX_FILES, MAX_FILE_SIZE_MB,
};
use crate::error::{FormError, FormResult};

const REQUEST_TIMEOUT_SECS: u64 = 60;
const DEFAULT_AUTH_BASE_URL: &str = "http://localhost:4280";
const PLACEHOLDER_WEBHOOK_URL: &str = "YOUR_POWER_AUTOMATE_HTTP_URL";

/// How the current user is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStrategyKind {
    /// Popup-style sign-in and sign-out driven by the user
    Interactive,
    /// Session established by the hosting platform, read from `/.auth/me`
    Delegated,
}

impl std::str::FromStr for AuthStrategyKind {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "interactive" | "popup" | "msal" => Ok(AuthStrategyKind::Interactive),
            "delegated" | "platform" | "swa" => Ok(AuthStrategyKind::Delegated),
            other => Err(FormError::Config(format!(
                "AUTH_STRATEGY must be 'interactive' or 'delegated', got '{}'",
                other
            ))),
        }
    }
}

/// Limits applied to attachments at selection time
#[derive(Clone, Debug)]
pub struct IntakeConfig {
    pub max_files: usize,
    pub max_file_size_bytes: u64,
    pub allowed_content_types: Vec<String>,
}

impl IntakeConfig {
    /// Read `MAX_FILES`, `MAX_FILE_SIZE_MB` and `ALLOWED_CONTENT_TYPES`,
    /// falling back to the defaults for absent or unparsable values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let max_files = lookup("MAX_FILES")
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(defaults.max_files);

        let max_file_size_bytes = lookup("MAX_FILE_SIZE_MB")
            .and_then(|s| s.parse::<u64>().ok())
            .and_then(|mb| mb.checked_mul(BYTES_PER_MIB))
            .unwrap_or(defaults.max_file_size_bytes);

        let allowed_content_types = match lookup("ALLOWED_CONTENT_TYPES") {
            Some(list) => list
                .split(',')
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
            None => defaults.allowed_content_types,
        };

        Self {
            max_files,
            max_file_size_bytes,
            allowed_content_types,
        }
    }

    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn max_file_size_mb(&self) -> u64 {
        self.max_file_size_bytes / BYTES_PER_MIB
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            max_files: MAX_FILES,
            max_file_size_bytes: MAX_FILE_SIZE_MB * BYTES_PER_MIB,
            allowed_content_types: DEFAULT_ALLOWED_CONTENT_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct FormConfig {
    pub webhook_url: String,
    pub auth_strategy: AuthStrategyKind,
    pub auth_base_url: String,
    pub auth_session_cookie: Option<String>,
    pub login_scopes: Vec<String>,
    pub intake: IntakeConfig,
    pub request_timeout_secs: u64,
    pub environment: String,
}

impl FormConfig {
    pub fn from_env() -> FormResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> FormResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let webhook_url = lookup("WEBHOOK_URL")
            .or_else(|| lookup("POWER_AUTOMATE_URL"))
            .ok_or_else(|| FormError::Config("WEBHOOK_URL must be set".into()))?;

        let auth_strategy = match lookup("AUTH_STRATEGY") {
            Some(value) => value.parse()?,
            None => AuthStrategyKind::Interactive,
        };

        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let login_scopes = lookup("LOGIN_SCOPES")
            .unwrap_or_else(|| LOGIN_SCOPE.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = lookup("REQUEST_TIMEOUT_SECS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(REQUEST_TIMEOUT_SECS);

        let config = Self {
            webhook_url: webhook_url.trim().to_string(),
            auth_strategy,
            auth_base_url: lookup("AUTH_BASE_URL")
                .unwrap_or_else(|| DEFAULT_AUTH_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            auth_session_cookie: lookup("AUTH_SESSION_COOKIE").filter(|s| !s.is_empty()),
            login_scopes,
            intake: IntakeConfig::from_lookup(&lookup),
            request_timeout_secs,
            environment,
        };

        config.validate()?;
        Ok(config)
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn validate(&self) -> FormResult<()> {
        if self.is_production() && self.webhook_url == PLACEHOLDER_WEBHOOK_URL {
            return Err(FormError::Config(
                "WEBHOOK_URL still holds the placeholder value. Set the real workflow trigger URL."
                    .into(),
            ));
        }

        if !self.webhook_url.starts_with("http://") && !self.webhook_url.starts_with("https://")
        {
            return Err(FormError::Config(
                "WEBHOOK_URL must start with http:// or https://".into(),
            ));
        }

        if self.intake.max_files == 0 {
            return Err(FormError::Config("MAX_FILES must be greater than 0".into()));
        }

        if self.intake.max_file_size_bytes == 0 {
            return Err(FormError::Config(
                "MAX_FILE_SIZE_MB must be greater than 0".into(),
            ));
        }

        if self.intake.allowed_content_types.is_empty() {
            return Err(FormError::Config(
                "ALLOWED_CONTENT_TYPES must list at least one content type".into(),
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(FormError::Config(
                "REQUEST_TIMEOUT_SECS must be greater than 0".into(),
            ));
        }

        Ok(())
    }
}
