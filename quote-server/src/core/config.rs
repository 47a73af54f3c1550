/// Server configuration
///
/// # Environment variables
///
/// All settings can be overridden through environment variables:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HTTP_PORT | 3000 | HTTP service port |
/// | ENVIRONMENT | development | Runtime environment |
/// | QUOTE_TTL_DAYS | 7 | Days before an unpaid quote expires |
/// | RATE_REFRESH_SECS | 3600 | Exchange-rate refresh interval |
/// | RATE_SOURCE_URL | (empty) | Live exchange-rate source; seed rates are used when unset |
/// | FUNCTIONS_BASE_URL | http://localhost:54321/functions/v1 | Serverless function boundary |
/// | FUNCTIONS_TOKEN | (empty) | Bearer token for function calls |
/// | DEFAULT_INSURANCE_RATE | 0.015 | Insurance rate when a quote has none carried |
/// | EMAIL_ENABLED | true | Master switch for email notifications |
///
/// # Example
///
/// ```ignore
/// HTTP_PORT=8080 QUOTE_TTL_DAYS=14 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API service port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Days until an unpaid quote expires
    pub quote_ttl_days: i64,
    /// Exchange-rate refresh interval in seconds
    pub rate_refresh_secs: u64,
    /// Live exchange-rate source URL; empty disables live refresh
    pub rate_source_url: String,
    /// Base URL for the serverless function boundary
    pub functions_base_url: String,
    /// Bearer token sent to the function boundary
    pub functions_token: String,
    /// Insurance rate applied when the quote carries none
    pub default_insurance_rate: f64,
    /// Master switch for email notifications
    pub email_enabled: bool,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Missing variables fall back to defaults
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            quote_ttl_days: std::env::var("QUOTE_TTL_DAYS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(7),
            rate_refresh_secs: std::env::var("RATE_REFRESH_SECS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3600),
            rate_source_url: std::env::var("RATE_SOURCE_URL").unwrap_or_default(),
            functions_base_url: std::env::var("FUNCTIONS_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:54321/functions/v1".into()),
            functions_token: std::env::var("FUNCTIONS_TOKEN").unwrap_or_default(),
            default_insurance_rate: std::env::var("DEFAULT_INSURANCE_RATE")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(0.015),
            email_enabled: std::env::var("EMAIL_ENABLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }

    /// Whether this is a production deployment
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Whether this is a development deployment
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
