use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
    pub summary_api_url: String,
    pub summary_api_token: Option<String>,
    pub fiscal_years: Vec<i32>,
    pub critical_stock_threshold: u32,
    pub top_product_target_units: u32,
    pub currency_symbol: String,
    pub placeholder_image_url: String,
    pub view_idle_timeout: Duration,
    pub view_sweep_interval: Duration,
    pub base_url: String,
    pub port: u16,
    pub testing_mode: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            summary_api_url: env::var("SUMMARY_API_URL")?,
            summary_api_token: env::var("SUMMARY_API_TOKEN").ok().filter(|s| !s.is_empty()),
            fiscal_years: parse_years(
                &env::var("DASHBOARD_FISCAL_YEARS").unwrap_or_else(|_| "2025,2024,2023".to_string()),
            ),
            critical_stock_threshold: env::var("CRITICAL_STOCK_THRESHOLD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            top_product_target_units: env::var("TOP_PRODUCT_TARGET_UNITS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(20),
            currency_symbol: env::var("CURRENCY_SYMBOL").unwrap_or_else(|_| "S/".to_string()),
            placeholder_image_url: env::var("PLACEHOLDER_IMAGE_URL")
                .unwrap_or_else(|_| "/static/placeholder-product.webp".to_string()),
            view_idle_timeout: Duration::from_secs(secs_or("VIEW_IDLE_TIMEOUT_SECS", 1800)),
            view_sweep_interval: Duration::from_secs(secs_or("VIEW_SWEEP_INTERVAL_SECS", 60)),
            base_url: env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            testing_mode: env::var("TESTING_MODE")
                .unwrap_or_else(|_| "false".to_string())
                .to_lowercase() == "true",
        })
    }

    /// Settings that only affect how derived values are presented.
    pub fn display(&self) -> DisplaySettings {
        DisplaySettings {
            fiscal_years: self.fiscal_years.clone(),
            critical_stock_threshold: self.critical_stock_threshold,
            top_product_target_units: self.top_product_target_units,
            currency_symbol: self.currency_symbol.clone(),
            placeholder_image_url: self.placeholder_image_url.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct DisplaySettings {
    pub fiscal_years: Vec<i32>,
    pub critical_stock_threshold: u32,
    pub top_product_target_units: u32,
    pub currency_symbol: String,
    pub placeholder_image_url: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            fiscal_years: vec![2025, 2024, 2023],
            critical_stock_threshold: 5,
            top_product_target_units: 20,
            currency_symbol: "S/".to_string(),
            placeholder_image_url: "/static/placeholder-product.webp".to_string(),
        }
    }
}

fn secs_or(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

fn parse_years(raw: &str) -> Vec<i32> {
    raw.split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect()
}
