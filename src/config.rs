use std::env;

use crate::services::SeedCounts;
use crate::types::RiskParameters;

/// Seed data configuration.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    /// RNG seed; the same seed reproduces the same records.
    pub seed: u64,
    pub users: usize,
    pub customers: usize,
    pub products: usize,
    pub notifications: usize,
    /// Capped at the size of the built-in stock table.
    pub stocks: usize,
    pub positions: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            users: 50,
            customers: 100,
            products: 200,
            notifications: 20,
            stocks: 10,
            positions: 20,
        }
    }
}

impl SeedConfig {
    pub fn counts(&self) -> SeedCounts {
        SeedCounts {
            users: self.users,
            customers: self.customers,
            products: self.products,
            notifications: self.notifications,
            stocks: self.stocks,
            positions: self.positions,
        }
    }
}

/// List endpoint paging limits.
#[derive(Debug, Clone, Copy)]
pub struct PageConfig {
    /// Page size used when the request gives none.
    pub default_page_size: i64,
    /// Larger requested page sizes are clamped to this.
    pub max_page_size: i64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    pub seed: SeedConfig,
    pub paging: PageConfig,
    /// Parameters new analyses start from and sessions reset to.
    pub risk_defaults: RiskParameters,
}

fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

impl Config {
    pub fn from_env() -> Self {
        let seed = SeedConfig::default();
        let paging = PageConfig::default();
        let risk = RiskParameters::default();

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parsed("PORT").unwrap_or(3001),
            seed: SeedConfig {
                seed: parsed("SEED").unwrap_or(seed.seed),
                users: parsed("SEED_USERS").unwrap_or(seed.users),
                customers: parsed("SEED_CUSTOMERS").unwrap_or(seed.customers),
                products: parsed("SEED_PRODUCTS").unwrap_or(seed.products),
                notifications: parsed("SEED_NOTIFICATIONS").unwrap_or(seed.notifications),
                stocks: parsed("SEED_STOCKS").unwrap_or(seed.stocks),
                positions: parsed("SEED_POSITIONS").unwrap_or(seed.positions),
            },
            paging: PageConfig {
                default_page_size: parsed("DEFAULT_PAGE_SIZE")
                    .filter(|&n: &i64| n >= 1)
                    .unwrap_or(paging.default_page_size),
                max_page_size: parsed("MAX_PAGE_SIZE")
                    .filter(|&n: &i64| n >= 1)
                    .unwrap_or(paging.max_page_size),
            },
            risk_defaults: RiskParameters {
                portfolio_value: parsed("RISK_PORTFOLIO_VALUE")
                    .filter(|&v: &f64| v.is_finite() && v > 0.0)
                    .unwrap_or(risk.portfolio_value),
                confidence_level: parsed("RISK_CONFIDENCE_LEVEL")
                    .filter(|v: &f64| (90.0..=99.0).contains(v))
                    .unwrap_or(risk.confidence_level),
                ..risk
            },
        }
    }

    /// Configuration without reading the environment.
    pub fn builtin() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            seed: SeedConfig::default(),
            paging: PageConfig::default(),
            risk_defaults: RiskParameters::default(),
        }
    }

    pub fn with_seed(mut self, seed: SeedConfig) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_paging(mut self, paging: PageConfig) -> Self {
        self.paging = paging;
        self
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_defaults() {
        let config = Config::builtin();
        assert_eq!(config.port, 3001);
        assert_eq!(config.paging.default_page_size, 10);
        assert_eq!(config.seed.stocks, 10);
        assert_eq!(config.risk_defaults, RiskParameters::default());
        assert_eq!(config.bind_address(), "0.0.0.0:3001");
    }

    #[test]
    fn test_seed_counts() {
        let counts = SeedConfig::default().counts();
        assert_eq!(counts.users, 50);
        assert_eq!(counts.positions, 20);
    }

    #[test]
    fn test_builders() {
        let config = Config::builtin().with_paging(PageConfig {
            default_page_size: 5,
            max_page_size: 20,
        });
        assert_eq!(config.paging.max_page_size, 20);
    }
}
