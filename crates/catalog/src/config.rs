//! Catalog configuration module

use clap::Parser;

const DEFAULT_BUFFER_SIZE: usize = 32;
const DEFAULT_PAGE_LIMIT: usize = 10;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Catalog demo configuration, read from CLI flags, the environment and `.env`.
#[derive(Debug, Clone, Parser)]
#[command(name = "catalog", about = "Products & users catalog", long_about = None)]
pub struct CatalogConfig {
    /// Capacity of each store actor's request channel
    #[arg(long, env = "CATALOG_BUFFER_SIZE", default_value_t = DEFAULT_BUFFER_SIZE)]
    pub buffer_size: usize,

    /// Page size the demo binary lists products with
    #[arg(long, env = "CATALOG_PAGE_LIMIT", default_value_t = DEFAULT_PAGE_LIMIT)]
    pub page_limit: usize,

    /// bcrypt work factor for password hashes
    #[arg(
        long,
        env = "CATALOG_BCRYPT_COST",
        default_value_t = bcrypt::DEFAULT_COST,
        value_parser = clap::value_parser!(u32).range(4..=31)
    )]
    pub bcrypt_cost: u32,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,
}

impl CatalogConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            page_limit: DEFAULT_PAGE_LIMIT,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let config =
            CatalogConfig::try_parse_from(["catalog", "--buffer-size", "4", "--bcrypt-cost", "5"])
                .unwrap();
        assert_eq!(config.buffer_size, 4);
        assert_eq!(config.bcrypt_cost, 5);
    }

    #[test]
    fn test_default_values() {
        let default = CatalogConfig::default();
        assert_eq!(default.buffer_size, 32);
        assert_eq!(default.page_limit, 10);
        assert_eq!(default.bcrypt_cost, bcrypt::DEFAULT_COST);
    }

    #[test]
    fn test_bcrypt_cost_is_range_checked() {
        let result = CatalogConfig::try_parse_from(["catalog", "--bcrypt-cost", "2"]);
        assert!(result.is_err());
    }
}
