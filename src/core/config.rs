//! Application configuration.
//!
//! Values come from a config file, the Google client secret JSON and
//! `BIGCAL_*` environment variables, in that order. The config file is
//! TOML (see `config.example.toml`). YAML files from earlier deployments
//! are still read when the path ends in `.yaml` or `.yml`. Their
//! `flask:` section is treated as `server:`.

use std::env;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use chrono::{Datelike, Utc};
use serde::Deserialize;

pub const DEFAULT_TITLE: &str = "The Big A$$ Calendar";
pub const DEFAULT_CONFIG_PATH: &str = "./config.toml";
pub const LEGACY_CONFIG_PATH: &str = "./config.yaml";

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub google_client_id: String,
    pub google_client_secret: String,
    pub redirect_uri: String,
    pub app_title: String,
    pub default_year: i32,
    pub static_path: String,
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            google_client_id: String::new(),
            google_client_secret: String::new(),
            redirect_uri: "http://127.0.0.1:5000/oauth2callback".to_string(),
            app_title: DEFAULT_TITLE.to_string(),
            default_year: Utc::now().year(),
            static_path: "./web".to_string(),
            debug: false,
        }
    }
}

// Shape of config.toml

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    google: GoogleSection,
    #[serde(default)]
    app: AppSection,
    #[serde(default, alias = "flask")]
    server: ServerSection,
}

#[derive(Debug, Default, Deserialize)]
struct GoogleSection {
    client_id: Option<String>,
    client_secret: Option<String>,
    redirect_uri: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct AppSection {
    title: Option<String>,
    default_year: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerSection {
    static_path: Option<String>,
    debug: Option<bool>,
}

// Shape of the client secret JSON downloaded from the Google Cloud console

#[derive(Debug, Deserialize)]
struct GoogleClientFile {
    web: Option<GoogleClient>,
    installed: Option<GoogleClient>,
}

#[derive(Debug, Deserialize)]
struct GoogleClient {
    client_id: String,
    client_secret: String,
    #[serde(default)]
    redirect_uris: Vec<String>,
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml" | "yml")
    )
}

impl AppConfig {
    /// Builds the config from defaults, then the TOML file, then the
    /// Google client JSON, then `BIGCAL_*` environment variables.
    ///
    /// A missing `config_path` is an error. When no path is given,
    /// `./config.toml` is used if it exists, then `./config.yaml`.
    pub fn load(config_path: Option<&Path>, google_client_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        match config_path {
            Some(path) => config.apply_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                let legacy_path = Path::new(LEGACY_CONFIG_PATH);
                if default_path.exists() {
                    config.apply_file(default_path)?;
                } else if legacy_path.exists() {
                    tracing::warn!(
                        "Reading YAML config from {}, consider moving it to {}",
                        LEGACY_CONFIG_PATH,
                        DEFAULT_CONFIG_PATH
                    );
                    config.apply_file(legacy_path)?;
                } else {
                    tracing::warn!(
                        "No config file found at {}, using default configuration values",
                        DEFAULT_CONFIG_PATH
                    );
                }
            }
        }

        if let Some(path) = google_client_path {
            config.apply_google_client(path)?;
        }

        config.apply_env();
        Ok(config)
    }

    fn apply_file(&mut self, path: &Path) -> Result<()> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Configuration file not found at {}", path.display()))?;
        let file: FileConfig = if is_yaml(path) {
            serde_yaml::from_str(&contents)
                .with_context(|| format!("Invalid configuration file {}", path.display()))?
        } else {
            toml::from_str(&contents)
                .with_context(|| format!("Invalid configuration file {}", path.display()))?
        };

        let FileConfig {
            google,
            app,
            server,
        } = file;
        if let Some(v) = google.client_id {
            self.google_client_id = v;
        }
        if let Some(v) = google.client_secret {
            self.google_client_secret = v;
        }
        if let Some(v) = google.redirect_uri {
            self.redirect_uri = v;
        }
        if let Some(v) = app.title {
            self.app_title = v;
        }
        if let Some(v) = app.default_year {
            self.default_year = v;
        }
        if let Some(v) = server.static_path {
            self.static_path = v;
        }
        if let Some(v) = server.debug {
            self.debug = v;
        }
        Ok(())
    }

    fn apply_google_client(&mut self, path: &Path) -> Result<()> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Google client file not found at {}", path.display()))?;
        let file: GoogleClientFile = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid Google client file {}", path.display()))?;
        let client = file
            .web
            .or(file.installed)
            .ok_or(anyhow!("Google client file has no \"web\" or \"installed\" entry"))?;

        self.google_client_id = client.client_id;
        self.google_client_secret = client.client_secret;
        if let Some(uri) = client.redirect_uris.into_iter().next() {
            self.redirect_uri = uri;
        }
        Ok(())
    }

    fn apply_env(&mut self) {
        if let Ok(v) = env::var("BIGCAL_GOOGLE_CLIENT_ID") {
            self.google_client_id = v;
        }
        if let Ok(v) = env::var("BIGCAL_GOOGLE_CLIENT_SECRET") {
            self.google_client_secret = v;
        }
        if let Ok(v) = env::var("BIGCAL_REDIRECT_URI") {
            self.redirect_uri = v;
        }
        if let Ok(v) = env::var("BIGCAL_APP_TITLE") {
            self.app_title = v;
        }
        if let Some(v) = env::var("BIGCAL_DEFAULT_YEAR")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.default_year = v;
        }
        if let Ok(v) = env::var("BIGCAL_STATIC_PATH") {
            self.static_path = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    const TOML_CONFIG: &str = r#"
[google]
client_id = "test-client-id"
client_secret = "test-client-secret"

[app]
title = "Test Calendar"
default_year = 2025

[server]
debug = true
"#;

    const CLIENT_JSON: &str = r#"{
  "web": {
    "client_id": "test-json-client-id",
    "project_id": "test-project",
    "auth_uri": "https://accounts.google.com/o/oauth2/auth",
    "token_uri": "https://oauth2.googleapis.com/token",
    "client_secret": "test-json-client-secret",
    "redirect_uris": ["http://localhost:5000/oauth2callback"]
  }
}"#;

    #[test]
    fn test_loads_toml_config() {
        let file = write_temp(".toml", TOML_CONFIG);
        let mut config = AppConfig::default();
        config.apply_file(file.path()).unwrap();
        assert_eq!(config.google_client_id, "test-client-id");
        assert_eq!(config.google_client_secret, "test-client-secret");
        assert_eq!(config.app_title, "Test Calendar");
        assert_eq!(config.default_year, 2025);
        assert!(config.debug);
        assert_eq!(config.static_path, "./web");
    }

    #[test]
    fn test_google_client_json_takes_precedence() {
        let toml_file = write_temp(".toml", TOML_CONFIG);
        let json_file = write_temp(".json", CLIENT_JSON);
        let mut config = AppConfig::default();
        config.apply_file(toml_file.path()).unwrap();
        config.apply_google_client(json_file.path()).unwrap();
        assert_eq!(config.google_client_id, "test-json-client-id");
        assert_eq!(config.google_client_secret, "test-json-client-secret");
        assert_eq!(config.redirect_uri, "http://localhost:5000/oauth2callback");
        assert_eq!(config.app_title, "Test Calendar");
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/config.toml")), None).unwrap_err();
        assert!(err.to_string().contains("Configuration file not found"));
    }

    #[test]
    fn test_loads_legacy_yaml_config() {
        let file = write_temp(
            ".yaml",
            r#"
flask:
  secret_key: test-key
  debug: true
google:
  client_id: test-client-id
  client_secret: test-client-secret
app:
  title: Test Calendar
  default_year: 2025
"#,
        );
        let config = AppConfig::load(Some(file.path()), None).unwrap();
        assert_eq!(config.google_client_id, "test-client-id");
        assert_eq!(config.google_client_secret, "test-client-secret");
        assert_eq!(config.app_title, "Test Calendar");
        assert_eq!(config.default_year, 2025);
        assert!(config.debug);
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let file = write_temp(".yml", "google: [unclosed");
        let err = AppConfig::load(Some(file.path()), None).unwrap_err();
        assert!(err.to_string().contains("Invalid configuration file"));
    }

    #[test]
    fn test_rejects_client_file_without_entry() {
        let json_file = write_temp(".json", r#"{"other": {}}"#);
        let mut config = AppConfig::default();
        assert!(config.apply_google_client(json_file.path()).is_err());
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.app_title, DEFAULT_TITLE);
        assert_eq!(config.default_year, Utc::now().year());
        assert!(!config.debug);
    }
}
