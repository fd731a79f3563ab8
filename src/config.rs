//! Startup configuration.
//!
//! All values are read once from the environment (after an optional `.env`
//! file) and never change afterwards. The widget credentials and the backend
//! URL have no defaults: a missing or malformed value stops the process
//! instead of rendering a broken page.

use std::env;
use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::url_validator::{function_url, validate_base_url, UrlValidationError};

pub const API_KEY_VAR: &str = "GIGYA_API_KEY";
pub const DOMAIN_VAR: &str = "GIGYA_DOMAIN";
pub const BACKEND_URL_VAR: &str = "SUPABASE_URL";
pub const BIND_ADDR_VAR: &str = "BIND_ADDR";
pub const STATIC_DIR_VAR: &str = "STATIC_DIR";
pub const SCOPE_VAR: &str = "INTERCEPT_SCOPE";

/// Bundler-style names accepted when the plain name is unset.
const LEGACY_PREFIX: &str = "VITE_";

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_STATIC_DIR: &str = "public";
pub const DEFAULT_SCOPE: &str = "/sw";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{0} is empty")]
    Empty(&'static str),

    #[error("{name} contains characters that cannot be embedded in markup")]
    UnsafeValue { name: &'static str },

    #[error("{name} is not a valid backend URL: {source}")]
    InvalidUrl {
        name: &'static str,
        source: UrlValidationError,
    },

    #[error("BIND_ADDR is not a socket address: {0}")]
    InvalidBindAddr(String),

    #[error("INTERCEPT_SCOPE must be a sub-path such as /sw, got {0:?}")]
    InvalidScope(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub domain: String,
    pub backend_url: Url,
    pub bind_addr: SocketAddr,
    pub static_dir: String,
    pub scope: String,
}

impl Config {
    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = credential(&lookup, API_KEY_VAR)?;
        let domain = credential(&lookup, DOMAIN_VAR)?;

        let raw_url = required(&lookup, BACKEND_URL_VAR)?;
        let backend_url = validate_base_url(&raw_url).map_err(|source| ConfigError::InvalidUrl {
            name: BACKEND_URL_VAR,
            source,
        })?;

        let raw_addr = optional(&lookup, BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr = raw_addr
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr(raw_addr.clone()))?;

        let static_dir =
            optional(&lookup, STATIC_DIR_VAR).unwrap_or_else(|| DEFAULT_STATIC_DIR.into());

        let scope = optional(&lookup, SCOPE_VAR).unwrap_or_else(|| DEFAULT_SCOPE.into());
        let scope = validate_scope(&scope)?;

        Ok(Self {
            api_key,
            domain,
            backend_url,
            bind_addr,
            static_dir,
            scope,
        })
    }

    /// Full URL of the backend function the proxy posts to.
    pub fn function_url(&self) -> Url {
        function_url(&self.backend_url)
    }
}

fn optional<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(name)
        .or_else(|| lookup(&format!("{}{}", LEGACY_PREFIX, name)))
        .ok_or(ConfigError::Missing(name))?;
    let value = value.trim();
    if value.is_empty() {
        return Err(ConfigError::Empty(name));
    }
    Ok(value.to_string())
}

/// Widget credentials end up inside HTML attributes.
fn credential<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = required(lookup, name)?;
    let unsafe_char = |c: char| c.is_whitespace() || c.is_control() || "\"'<>&`".contains(c);
    if value.chars().any(unsafe_char) {
        return Err(ConfigError::UnsafeValue { name });
    }
    Ok(value)
}

fn validate_scope(scope: &str) -> Result<String, ConfigError> {
    let trimmed = scope.trim_end_matches('/');
    if !scope.starts_with('/') || trimmed.is_empty() {
        return Err(ConfigError::InvalidScope(scope.to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    fn base_pairs() -> Vec<(&'static str, &'static str)> {
        vec![
            (API_KEY_VAR, "3_abcDEF-123"),
            (DOMAIN_VAR, "eu1.gigya.com"),
            (BACKEND_URL_VAR, "https://abc.supabase.co"),
        ]
    }

    #[test]
    fn test_loads_required_values_and_defaults() {
        let config = Config::from_lookup(lookup_from(&base_pairs())).unwrap();
        assert_eq!(config.api_key, "3_abcDEF-123");
        assert_eq!(config.domain, "eu1.gigya.com");
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(config.static_dir, DEFAULT_STATIC_DIR);
        assert_eq!(config.scope, DEFAULT_SCOPE);
        assert_eq!(
            config.function_url().as_str(),
            "https://abc.supabase.co/functions/v1/gigya-api"
        );
    }

    #[test]
    fn test_missing_values_fail_fast() {
        let result = Config::from_lookup(lookup_from(&[(DOMAIN_VAR, "eu1.gigya.com")]));
        assert_eq!(result.unwrap_err(), ConfigError::Missing(API_KEY_VAR));

        let mut pairs = base_pairs();
        pairs.retain(|(k, _)| *k != BACKEND_URL_VAR);
        let result = Config::from_lookup(lookup_from(&pairs));
        assert_eq!(result.unwrap_err(), ConfigError::Missing(BACKEND_URL_VAR));
    }

    #[test]
    fn test_empty_values_fail_fast() {
        let mut pairs = base_pairs();
        pairs[1] = (DOMAIN_VAR, "   ");
        let result = Config::from_lookup(lookup_from(&pairs));
        assert_eq!(result.unwrap_err(), ConfigError::Empty(DOMAIN_VAR));
    }

    #[test]
    fn test_legacy_names_are_accepted() {
        let config = Config::from_lookup(lookup_from(&[
            ("VITE_GIGYA_API_KEY", "3_legacy"),
            ("VITE_GIGYA_DOMAIN", "us1.gigya.com"),
            (BACKEND_URL_VAR, "https://abc.supabase.co"),
        ]))
        .unwrap();
        assert_eq!(config.api_key, "3_legacy");
        assert_eq!(config.domain, "us1.gigya.com");
    }

    #[test]
    fn test_markup_characters_are_rejected() {
        let mut pairs = base_pairs();
        pairs[0] = (API_KEY_VAR, "3_abc\"><script>");
        let result = Config::from_lookup(lookup_from(&pairs));
        assert_eq!(
            result.unwrap_err(),
            ConfigError::UnsafeValue { name: API_KEY_VAR }
        );
    }

    #[test]
    fn test_invalid_backend_url() {
        let mut pairs = base_pairs();
        pairs[2] = (BACKEND_URL_VAR, "abc.supabase.co");
        let result = Config::from_lookup(lookup_from(&pairs));
        assert!(matches!(result, Err(ConfigError::InvalidUrl { .. })));
    }

    #[test]
    fn test_optional_overrides() {
        let mut pairs = base_pairs();
        pairs.push((BIND_ADDR_VAR, "0.0.0.0:8080"));
        pairs.push((STATIC_DIR_VAR, "dist"));
        pairs.push((SCOPE_VAR, "/worker/"));
        let config = Config::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.static_dir, "dist");
        assert_eq!(config.scope, "/worker");
    }

    #[test]
    fn test_invalid_scope_and_addr() {
        let mut pairs = base_pairs();
        pairs.push((SCOPE_VAR, "/"));
        assert!(matches!(
            Config::from_lookup(lookup_from(&pairs)),
            Err(ConfigError::InvalidScope(_))
        ));

        let mut pairs = base_pairs();
        pairs.push((BIND_ADDR_VAR, "localhost"));
        assert!(matches!(
            Config::from_lookup(lookup_from(&pairs)),
            Err(ConfigError::InvalidBindAddr(_))
        ));
    }
}
