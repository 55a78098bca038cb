use crate::utils::error::{PortfolioError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(PortfolioError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(PortfolioError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(PortfolioError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// 端點路徑必須是絕對路徑，且不可帶 query 或 fragment
pub fn validate_endpoint_path(field_name: &str, path: &str) -> Result<()> {
    let reason = if !path.starts_with('/') {
        Some("Path must start with '/'")
    } else if path.contains('?') || path.contains('#') {
        Some("Path cannot contain a query string or fragment")
    } else if path.chars().any(char::is_whitespace) {
        Some("Path cannot contain whitespace")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(PortfolioError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(PortfolioError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("backend.base_url", "https://example.com").is_ok());
        assert!(validate_url("backend.base_url", "http://localhost:3000").is_ok());
        assert!(validate_url("backend.base_url", "").is_err());
        assert!(validate_url("backend.base_url", "invalid-url").is_err());
        assert!(validate_url("backend.base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_endpoint_path() {
        assert!(validate_endpoint_path("backend.subscribe_path", "/api/subscribers").is_ok());
        assert!(validate_endpoint_path("backend.subscribe_path", "api/subscribers").is_err());
        assert!(validate_endpoint_path("backend.subscribe_path", "/api?x=1").is_err());
        assert!(validate_endpoint_path("backend.subscribe_path", "/api /x").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("backend.timeout_seconds", 10u64, 1, 300).is_ok());
        assert!(validate_range("backend.timeout_seconds", 0u64, 1, 300).is_err());
        assert!(validate_range("backend.timeout_seconds", 301u64, 1, 300).is_err());
    }
}
