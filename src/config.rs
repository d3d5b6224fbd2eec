use crate::model::ConfigError;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::time::Duration;

const MAX_POLITENESS_DELAY: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub feed_url: String,
    pub dataset_path: String,
    pub map_output_path: String,
    pub user_agent: String,
    pub geocoder_url: String,
    pub geocode_timeout_seconds: u64,
    pub politeness_delay_ms: u64,
    pub feed_timeout_seconds: u64,
    pub max_body_bytes: usize,
    pub map_center: [f64; 2],
    pub map_zoom: u8,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            feed_url: "https://robertsietsema.substack.com/feed".into(),
            dataset_path: "restaurants.json".into(),
            map_output_path: "public/index.html".into(),
            user_agent: "sietsemap-bot/0.1 (github action)".into(),
            geocoder_url: "https://nominatim.openstreetmap.org/search".into(),
            geocode_timeout_seconds: 15,
            politeness_delay_ms: 1000,
            feed_timeout_seconds: 30,
            max_body_bytes: 2 * 1024 * 1024,
            map_center: [40.73, -73.94],
            map_zoom: 11,
        }
    }
}

impl AppConfig {
    pub fn geocode_timeout(&self) -> Duration {
        Duration::from_secs(self.geocode_timeout_seconds)
    }

    pub fn politeness_delay(&self) -> Duration {
        Duration::from_millis(self.politeness_delay_ms).min(MAX_POLITENESS_DELAY)
    }

    pub fn feed_timeout(&self) -> Duration {
        Duration::from_secs(self.feed_timeout_seconds)
    }
}

/// Loads the config file, falling back to defaults when it does not exist.
pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_string(),
                source,
            });
        }
    };
    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_string(),
        source,
    })
}
