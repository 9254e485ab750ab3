use crate::health::{Status, StatusOrder};
use serde;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Settings {
    pub app_port: u16,
    pub app_host: String,
    #[serde(default)]
    pub health: HealthSettings,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct HealthSettings {
    /// Severity order used during aggregation, worst status first.
    /// Falls back to DOWN, OUT_OF_SERVICE, UNKNOWN, UP when unset.
    pub status_order: Option<Vec<Status>>,
}

impl HealthSettings {
    pub fn status_order(&self) -> StatusOrder {
        match &self.status_order {
            Some(order) => StatusOrder::new(order.clone()),
            None => StatusOrder::default(),
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let mut settings = config::Config::default();

    // Add configuration values from a file named `configuration`
    // with the .yaml extension
    settings.merge(config::File::with_name("configuration"))?; // .json, .toml, .yaml, .yml

    settings.try_deserialize()
}
