use crate::utils::error::{GeneQueryError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(GeneQueryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(GeneQueryError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(GeneQueryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// Returns the trimmed symbol, or a usage error when nothing is left.
pub fn validate_symbol(symbol: &str) -> Result<String> {
    let trimmed = symbol.trim();
    if trimmed.is_empty() {
        return Err(GeneQueryError::usage(
            "Gene symbol cannot be empty or whitespace-only",
        ));
    }
    Ok(trimmed.to_string())
}

pub fn validate_symbols(symbols: &[String]) -> Result<Vec<String>> {
    if symbols.is_empty() {
        return Err(GeneQueryError::usage(
            "A batch query needs at least one gene symbol",
        ));
    }
    symbols.iter().map(|s| validate_symbol(s)).collect()
}

pub fn validate_required_field<T>(field_name: &str, value: Option<T>) -> Result<T> {
    value.ok_or_else(|| {
        GeneQueryError::usage(format!("For this command you must specify {}.", field_name))
    })
}
