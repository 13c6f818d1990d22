use anyhow::{anyhow, Context};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_SHARE_BASE_URL: &str = "http://localhost:8080/";
pub const DEFAULT_APP_NAME: &str = "osechi_gacha";
pub const DEFAULT_LOCAL_STORAGE_DIR: &str = ".osechi-gacha";
pub const DEFAULT_STORE_SUBDIR: &str = "store";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    File { dir: PathBuf },
    Postgres { database_url: String },
    /// Nothing survives the process.
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthConfig {
    Disable,
    Anonymous,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub share_base_url: String,
    pub app_name: String,
    pub store: StoreConfig,
    pub auth: AuthConfig,
    pub local_storage_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<AppConfig> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<AppConfig> {
        let share_base_url = lookup("SHARE_BASE_URL")
            .unwrap_or_else(|| DEFAULT_SHARE_BASE_URL.to_owned());
        let app_name = lookup("APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_owned());
        let local_storage_dir = lookup("LOCAL_STORAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOCAL_STORAGE_DIR));
        let store = match lookup("STORE_KIND").as_deref().unwrap_or("FILE") {
            "FILE" => StoreConfig::File {
                dir: lookup("STORE_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| local_storage_dir.join(DEFAULT_STORE_SUBDIR)),
            },
            "MEMORY" => StoreConfig::Memory,
            "POSTGRES" => {
                let database_url = lookup("DATABASE_URL")
                    .ok_or_else(|| anyhow!("not set"))
                    .context("DATABASE_URL")?;
                StoreConfig::Postgres { database_url }
            }
            _ => Err(anyhow!("Invalid store kind")).context("STORE_KIND")?,
        };
        let auth = match lookup("AUTH_KIND").as_deref().unwrap_or("ANONYMOUS") {
            "ANONYMOUS" => AuthConfig::Anonymous,
            "DISABLE" => AuthConfig::Disable,
            _ => Err(anyhow!("Invalid auth kind")).context("AUTH_KIND")?,
        };

        Ok(AppConfig {
            share_base_url,
            app_name,
            store,
            auth,
            local_storage_dir,
        })
    }
}
