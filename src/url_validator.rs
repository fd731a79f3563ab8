//! Backend URL validation.
//!
//! The backend base URL comes straight from the environment and is the only
//! outbound target of the proxy, so it is checked once at startup:
//! - absolute `http` or `https` URL
//! - has a host
//! - carries no credentials, query string or fragment
//!
//! The backend function path is appended to the validated base here as well.

use thiserror::Error;
use url::Url;

/// Path of the backend function, relative to the base URL.
pub const FUNCTION_PATH: &str = "/functions/v1/gigya-api";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlValidationError {
    /// URL is malformed or cannot be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// URL uses a scheme other than http/https
    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
    /// URL has no host component
    #[error("URL has no host")]
    MissingHost,
    /// URL embeds a username or password
    #[error("URL must not embed credentials")]
    EmbeddedCredentials,
    /// URL carries a query string or fragment
    #[error("URL must not carry a query string or fragment")]
    UnexpectedQuery,
}

/// Validate the backend base URL.
///
/// # Returns
/// * `Ok(Url)` - The parsed and validated URL
/// * `Err(UrlValidationError)` - If validation fails
pub fn validate_base_url(url_str: &str) -> Result<Url, UrlValidationError> {
    let url =
        Url::parse(url_str.trim()).map_err(|e| UrlValidationError::InvalidUrl(e.to_string()))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(UrlValidationError::UnsupportedScheme(url.scheme().to_string()));
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => {}
        _ => return Err(UrlValidationError::MissingHost),
    }

    if !url.username().is_empty() || url.password().is_some() {
        return Err(UrlValidationError::EmbeddedCredentials);
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err(UrlValidationError::UnexpectedQuery);
    }

    Ok(url)
}

/// Build `<base>/functions/v1/gigya-api`, keeping any path prefix on the base.
pub fn function_url(base: &Url) -> Url {
    let mut url = base.clone();
    let path = format!("{}{}", base.path().trim_end_matches('/'), FUNCTION_PATH);
    url.set_path(&path);
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(validate_base_url("https://abc.supabase.co").is_ok());
        assert!(validate_base_url("http://127.0.0.1:54321").is_ok());
        assert!(validate_base_url("  https://abc.supabase.co/  ").is_ok());
    }

    #[test]
    fn test_rejects_bad_urls() {
        assert!(matches!(
            validate_base_url("not a url"),
            Err(UrlValidationError::InvalidUrl(_))
        ));
        assert!(matches!(
            validate_base_url("ftp://abc.supabase.co"),
            Err(UrlValidationError::UnsupportedScheme(_))
        ));
        assert_eq!(
            validate_base_url("https://user:pw@abc.supabase.co"),
            Err(UrlValidationError::EmbeddedCredentials)
        );
        assert_eq!(
            validate_base_url("https://abc.supabase.co/?x=1"),
            Err(UrlValidationError::UnexpectedQuery)
        );
    }

    #[test]
    fn test_function_url() {
        let base = validate_base_url("https://abc.supabase.co").unwrap();
        assert_eq!(
            function_url(&base).as_str(),
            "https://abc.supabase.co/functions/v1/gigya-api"
        );

        let base = validate_base_url("http://localhost:54321/").unwrap();
        assert_eq!(
            function_url(&base).as_str(),
            "http://localhost:54321/functions/v1/gigya-api"
        );

        let base = validate_base_url("https://proxy.example.com/edge/").unwrap();
        assert_eq!(
            function_url(&base).as_str(),
            "https://proxy.example.com/edge/functions/v1/gigya-api"
        );
    }
}
