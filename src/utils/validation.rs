use crate::utils::error::{MonitorError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(MonitorError::InvalidConfig {
            field: field_name.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(MonitorError::InvalidConfig {
                field: field_name.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(MonitorError::InvalidConfig {
            field: field_name.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_numeric_code(field_name: &str, value: &str) -> Result<()> {
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(MonitorError::InvalidConfig {
            field: field_name.to_string(),
            reason: format!("'{}' is not a numeric code", value),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(MonitorError::InvalidConfig {
            field: field_name.to_string(),
            reason: format!("Value {} must be between {} and {}", value, min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("login_url", "https://example.com").is_ok());
        assert!(validate_url("login_url", "http://example.com").is_ok());
        assert!(validate_url("login_url", "").is_err());
        assert!(validate_url("login_url", "invalid-url").is_err());
        assert!(validate_url("login_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_numeric_code() {
        assert!(validate_numeric_code("local_code", "20").is_ok());
        assert!(validate_numeric_code("local_code", "").is_err());
        assert!(validate_numeric_code("local_code", "2a").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("check_interval_minutes", 5u64, 1, 1440).is_ok());
        assert!(validate_range("check_interval_minutes", 0u64, 1, 1440).is_err());
        assert!(validate_range("check_interval_minutes", 2000u64, 1, 1440).is_err());
    }
}
