use anyhow::{Context, Result};
use intake_widgets::upload::DEFAULT_PDF_MAX_BYTES;

/// Host configuration loaded from environment variables (and `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub env: String,
    /// Directory served under `/static`, holding the compiled widget bundle.
    pub static_dir: String,
    /// Form `action` of the external extraction backend.
    pub upload_action: String,
    /// Customer formats offered in the customer select.
    pub customers: Vec<String>,
    pub max_upload_bytes: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            env: std::env::var("APP_ENV").unwrap_or_else(|_| "production".to_string()),
            static_dir: std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()),
            upload_action: std::env::var("UPLOAD_ACTION")
                .unwrap_or_else(|_| "/upload_file".to_string()),
            customers: parse_customers(&std::env::var("CUSTOMERS").unwrap_or_default()),
            max_upload_bytes: match std::env::var("MAX_UPLOAD_SIZE") {
                Ok(raw) => raw
                    .trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|bytes| *bytes > 0)
                    .with_context(|| format!("MAX_UPLOAD_SIZE must be a positive byte count, got '{raw}'"))?,
                Err(_) => DEFAULT_PDF_MAX_BYTES,
            },
        })
    }
}

/// Splits a comma-separated list, dropping blanks and duplicates while
/// keeping the first occurrence's position.
pub fn parse_customers(raw: &str) -> Vec<String> {
    let mut customers: Vec<String> = Vec::new();
    for name in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !customers.iter().any(|c| c == name) {
            customers.push(name.to_string());
        }
    }
    customers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_customers_trims_and_dedups() {
        assert_eq!(
            parse_customers(" metro, sysco ,,metro,elior "),
            vec!["metro", "sysco", "elior"]
        );
    }

    #[test]
    fn test_parse_customers_empty() {
        assert!(parse_customers("").is_empty());
        assert!(parse_customers(" , ").is_empty());
    }
}
