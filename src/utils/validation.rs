use crate::utils::error::{GatewayError, Result};
use regex::Regex;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(GatewayError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(GatewayError::InvalidConfigValue {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(GatewayError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_email(field_name: &str, value: &str) -> Result<()> {
    // Deliberately loose: reject obvious garbage, let the mail provider be the judge
    let re = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    if re.is_match(value.trim()) {
        Ok(())
    } else {
        Err(GatewayError::Validation {
            field: field_name.to_string(),
            reason: "must be a valid email address".to_string(),
        })
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(GatewayError::Validation {
            field: field_name.to_string(),
            reason: "cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_negative(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(GatewayError::Validation {
            field: field_name.to_string(),
            reason: "must be a non-negative number".to_string(),
        });
    }
    Ok(())
}

pub fn validate_positive_number<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min_value: T,
) -> Result<()> {
    if value < min_value {
        return Err(GatewayError::Validation {
            field: field_name.to_string(),
            reason: format!("must be at least {}", min_value),
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
        return Err(GatewayError::Validation {
            field: field_name.to_string(),
            reason: format!("must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_at_most(field_name: &str, value: f64, limit: f64, limit_name: &str) -> Result<()> {
    if value > limit {
        return Err(GatewayError::Validation {
            field: field_name.to_string(),
            reason: format!("cannot exceed {}", limit_name),
        });
    }
    Ok(())
}
