/// Configuration schemas - all config structures defined once with defaults
///
/// Each struct is defined using the config_struct! macro which provides
/// embedded defaults and serde support.
use crate::config_struct;

// ============================================================================
// GATEWAY CONFIGURATION
// ============================================================================

config_struct! {
    /// Market data gateway configuration
    pub struct GatewayConfig {
        /// Provider REST base path (CoinGecko v3 layout)
        base_url: String = "https://api.coingecko.com/api/v3".to_string(),

        /// Quote currency used for prices, market caps and volumes
        vs_currency: String = "usd".to_string(),

        /// Optional demo-tier API key, sent as x-cg-demo-api-key
        api_key: Option<String> = None,

        /// Per-request timeout enforced by the HTTP client
        timeout_secs: u64 = 20,

        /// Freshness window for cached responses
        cache_ttl_secs: u64 = 300,

        /// Minimum spacing between two outbound calls
        min_request_interval_ms: u64 = 1000,
    }
}

// ============================================================================
// PORTFOLIO CONFIGURATION
// ============================================================================

config_struct! {
    /// Holdings persistence configuration
    pub struct PortfolioConfig {
        /// Holdings file; empty means `<data dir>/holdings.json`
        holdings_path: String = String::new(),

        /// Market list page size used to price holdings
        pricing_page_size: u32 = 250,
    }
}

// ============================================================================
// LOGGING CONFIGURATION
// ============================================================================

config_struct! {
    /// Logger output configuration
    pub struct LoggingConfig {
        /// Append log lines to this file when non-empty
        file_path: String = String::new(),

        /// Prefix console lines with the date as well as the time
        show_date: bool = false,
    }
}

// ============================================================================
// ROOT CONFIGURATION
// ============================================================================

config_struct! {
    /// Root configuration structure containing all sub-configurations
    pub struct Config {
        /// Market data gateway configuration
        gateway: GatewayConfig = GatewayConfig::default(),

        /// Portfolio configuration
        portfolio: PortfolioConfig = PortfolioConfig::default(),

        /// Logging configuration
        logging: LoggingConfig = LoggingConfig::default(),
    }
}

impl Config {
    /// Check values that would otherwise fail much later at request time
    pub fn validate(&self) -> Result<(), String> {
        url::Url::parse(&self.gateway.base_url).map_err(|e| {
            format!(
                "Invalid config field 'gateway.base_url' ({}): {}",
                self.gateway.base_url, e
            )
        })?;

        if self.gateway.timeout_secs == 0 {
            return Err("Invalid config field 'gateway.timeout_secs': must be > 0".to_string());
        }
        if self.gateway.vs_currency.trim().is_empty() {
            return Err("Invalid config field 'gateway.vs_currency': must not be empty".to_string());
        }
        if self.portfolio.pricing_page_size == 0 {
            return Err(
                "Invalid config field 'portfolio.pricing_page_size': must be > 0".to_string(),
            );
        }

        Ok(())
    }
}
