use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::info;

static DATA_DIR_NAME: &str = "lodge_site";
static DATA_DIR_ENV: &str = "LODGE_DATA_DIR";
static DB_NAME: &str = "lodge.sqlite";
static CONFIG_FILE_NAME: &str = "config.json";

// data_dir_path
// |- lodge_site
//    |- lodge.sqlite
//    |- config.json

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no data directory available on this platform, set LODGE_DATA_DIR")]
    NoDataDir,
    #[error("failed to access config file")]
    Io(#[from] std::io::Error),
    #[error("malformed config file")]
    Json(#[from] serde_json::Error),
}

fn default_bind_address() -> String {
    "127.0.0.1:8000".to_owned()
}

fn default_site_url() -> String {
    "http://localhost:8000".to_owned()
}

fn default_member_header() -> String {
    "x-lodge-member".to_owned()
}

fn default_media_url() -> String {
    "/media/".to_owned()
}

fn default_contact_recipient() -> String {
    "secretaria@kukulkan41.org".to_owned()
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LodgeConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    pub database_path: PathBuf,

    /// Full connection string, takes precedence over `database_path`.
    #[serde(default)]
    pub database_url: Option<String>,

    /// Public base url, used for absolute links in the sitemap.
    #[serde(default = "default_site_url")]
    pub site_url: String,

    /// Header set by the authenticating proxy with the member id.
    #[serde(default = "default_member_header")]
    pub member_header: String,

    #[serde(default = "default_contact_recipient")]
    pub contact_recipient: String,

    /// Base url uploaded pictures are served from.
    #[serde(default = "default_media_url")]
    pub media_url: String,
}

impl LodgeConfig {
    pub fn new(data_dir: &Path) -> Self {
        LodgeConfig {
            bind_address: default_bind_address(),
            database_path: data_dir.join(DB_NAME),
            database_url: None,
            site_url: default_site_url(),
            member_header: default_member_header(),
            contact_recipient: default_contact_recipient(),
            media_url: default_media_url(),
        }
    }

    pub fn connection_string(&self) -> String {
        match &self.database_url {
            Some(url) => url.clone(),
            None => format!("sqlite://{}?mode=rwc", self.database_path.display()),
        }
    }

    /// Public url of an uploaded file given its stored relative path.
    pub fn media_href(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.media_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn data_dir() -> Result<PathBuf, ConfigError> {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    let base = dirs::data_dir().ok_or(ConfigError::NoDataDir)?;
    Ok(base.join(DATA_DIR_NAME))
}

/// Gets the existing config or initializes a new one if it doesn't exist
pub async fn get_or_init() -> Result<LodgeConfig, ConfigError> {
    get_or_init_in(&data_dir()?).await
}

pub async fn get_or_init_in(dir: &Path) -> Result<LodgeConfig, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    fs::create_dir_all(dir).await?;

    if fs::try_exists(&config_path).await? {
        let mut file = fs::File::open(&config_path).await?;
        let mut contents = String::new();
        file.read_to_string(&mut contents).await?;

        let config: LodgeConfig = serde_json::from_str(&contents)?;
        Ok(config)
    } else {
        let config = LodgeConfig::new(dir);

        let json = serde_json::to_string_pretty(&config)?;
        let mut file = fs::File::create(&config_path).await?;
        file.write_all(json.as_bytes()).await?;
        info!(path = %config_path.display(), "wrote default config");

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_start_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let config = get_or_init_in(dir.path()).await.unwrap();

        assert_eq!(config.bind_address, "127.0.0.1:8000");
        assert_eq!(config.database_path, dir.path().join("lodge.sqlite"));
        assert!(dir.path().join("config.json").exists());
    }

    #[tokio::test]
    async fn test_existing_config_is_reused() {
        let dir = tempfile::tempdir().unwrap();
        let first = get_or_init_in(dir.path()).await.unwrap();
        let second = get_or_init_in(dir.path()).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_missing_fields_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.json"),
            r#"{ "database_path": "/tmp/other.sqlite", "member_header": "x-user" }"#,
        )
        .unwrap();

        let config = get_or_init_in(dir.path()).await.unwrap();

        assert_eq!(config.member_header, "x-user");
        assert_eq!(config.site_url, "http://localhost:8000");
        assert_eq!(config.media_url, "/media/");
        assert_eq!(
            config.connection_string(),
            "sqlite:///tmp/other.sqlite?mode=rwc"
        );
    }

    #[test]
    fn test_database_url_wins_over_path() {
        let mut config = LodgeConfig::new(Path::new("/srv/lodge"));
        config.database_url = Some("postgres://lodge@localhost/lodge".to_owned());
        assert_eq!(config.connection_string(), "postgres://lodge@localhost/lodge");
    }

    #[test]
    fn test_media_href_joins_single_slash() {
        let mut config = LodgeConfig::new(Path::new("/srv/lodge"));
        assert_eq!(config.media_href("historia/a.jpg"), "/media/historia/a.jpg");

        config.media_url = "https://cdn.kukulkan41.org".to_owned();
        assert_eq!(config.media_href("/historia/a.jpg"), "https://cdn.kukulkan41.org/historia/a.jpg");
    }
}
