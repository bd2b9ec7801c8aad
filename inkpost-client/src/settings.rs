use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File as ConfigFile, FileFormat};
use eyre::{eyre, Context, Result};
use std::fs::{create_dir_all, File};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

const EXAMPLE_CONFIG: &str = include_str!("../config.toml");

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct Settings {
    pub api_url: String,
    pub data_dir: String,
    pub feed_page_size: u32,
    pub table_page_size: u32,
    pub notification_page_size: u32,
    pub request_timeout_secs: u64,
}

impl Settings {
    pub fn builder() -> Result<ConfigBuilder<DefaultState>> {
        let data_dir = inkpost_common::utils::data_dir();

        Ok(Config::builder()
            .set_default("api_url", "http://localhost:8080/api")?
            .set_default("data_dir", data_dir.to_str())?
            .set_default("feed_page_size", 10)?
            .set_default("table_page_size", 20)?
            .set_default("notification_page_size", 20)?
            .set_default("request_timeout_secs", 30)?
            .add_source(
                Environment::with_prefix("inkpost")
                    .prefix_separator("_")
                    .separator("__"),
            ))
    }

    pub fn config_file() -> PathBuf {
        let mut config_file = if let Ok(p) = std::env::var("INKPOST_CONFIG_DIR") {
            PathBuf::from(p)
        } else {
            inkpost_common::utils::config_dir()
        };
        config_file.push("config.toml");
        config_file
    }

    pub fn new() -> Result<Self> {
        let config_file = Self::config_file();
        if let Some(config_dir) = config_file.parent() {
            create_dir_all(config_dir)
                .wrap_err_with(|| format!("Failed to create dir {config_dir:?}"))?;
        }

        let mut config_builder = Self::builder()?;
        config_builder = if config_file.exists() {
            let path = config_file
                .to_str()
                .ok_or_else(|| eyre!("Config path is not valid utf-8: {config_file:?}"))?;
            config_builder.add_source(ConfigFile::new(path, FileFormat::Toml))
        } else {
            let mut file = File::create(&config_file).wrap_err("Failed to create config file")?;
            file.write_all(EXAMPLE_CONFIG.as_bytes())
                .wrap_err("Failed to write default config file")?;
            config_builder
        };

        let settings: Settings = config_builder
            .build()?
            .try_deserialize()
            .map_err(|e| eyre!("Failed to deserialize {}", e))?;

        settings.normalized()
    }

    /// Expands `~` and env vars in paths and trims the trailing slash off the api url.
    pub fn normalized(mut self) -> Result<Self> {
        self.data_dir = expand_shell(&self.data_dir)?;
        self.api_url = self.api_url.trim_end_matches('/').to_string();
        if self.api_url.is_empty() {
            return Err(eyre!("api_url must not be empty"));
        }
        Ok(self)
    }

    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn expand_shell(value: &str) -> Result<String> {
    Ok(shellexpand::full(value)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_filled_in() {
        let settings: Settings = Settings::builder()
            .unwrap()
            .set_override("data_dir", "/tmp/inkpost-test")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.feed_page_size, 10);
        assert_eq!(settings.table_page_size, 20);
        assert_eq!(settings.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn normalized_trims_api_url() {
        let settings: Settings = Settings::builder()
            .unwrap()
            .set_override("api_url", "http://blog.test/api/")
            .unwrap()
            .set_override("data_dir", "/tmp/inkpost-test")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        let settings = settings.normalized().unwrap();
        assert_eq!(settings.api_url, "http://blog.test/api");
    }
}
