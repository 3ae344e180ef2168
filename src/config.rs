use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::model::hallplan::Exhibitor;

pub const PRODUCTION_API_URL: &str = "https://api.innoloft.com";
pub const PRODUCTION_APP_ID: &str = "8085445";
pub const DEV_API_URL: &str = "https://testing.api.innoloft.com";
pub const DEV_APP_ID: &str = "7648562";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Bearer token; absence disables all favorite operations
    #[serde(default)]
    pub token: Option<String>,
    /// `dev` switches API base URL and app id
    #[serde(default)]
    pub env: Option<String>,
    /// Legacy comma-separated seed list of favorite exhibitor ids
    #[serde(default)]
    pub favorites: Option<String>,
    /// Optional label filter for the watchlist listing
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub app_id: Option<String>,
    #[serde(default)]
    pub preferences_path: Option<PathBuf>,
    /// Exhibitors shown on the hall plan
    #[serde(default)]
    pub exhibitors: Vec<Exhibitor>,
}

impl Config {
    pub fn from_yaml(raw: &str) -> Result<Self> {
        serde_yaml::from_str(raw).context("Failed to parse config")
    }

    /// Launch parameters as written in the config file
    pub fn launch_params(&self) -> LaunchParams {
        LaunchParams {
            token: non_empty(self.token.clone()),
            env: non_empty(self.env.clone()),
            favorites: self
                .favorites
                .as_deref()
                .map(parse_seed_favorites)
                .unwrap_or_default(),
        }
    }
}

/// Determine the config file path with fallback logic
///
/// An explicit path must exist. Otherwise `<config_dir>/hallfav/config.yaml`
/// is tried, then `./config.yaml`; `None` means run on defaults.
pub fn get_config_path(cli_path: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = cli_path {
        if path.exists() {
            return Ok(Some(path.to_path_buf()));
        }
        anyhow::bail!("Config file not found at specified path: {}", path.display());
    }

    if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("hallfav").join("config.yaml");
        if config_path.exists() {
            return Ok(Some(config_path));
        }
    }

    let local_config = PathBuf::from("config.yaml");
    if local_config.exists() {
        return Ok(Some(local_config));
    }

    Ok(None)
}

/// Load the config file, or defaults if there is none
pub fn load_config(cli_path: Option<&Path>) -> Result<Config> {
    match get_config_path(cli_path)? {
        Some(path) => {
            tracing::debug!("Loading config from: {:?}", path);
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Config::from_yaml(&raw)
        }
        None => {
            tracing::info!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Production,
    Dev,
}

impl Environment {
    pub fn from_param(env: Option<&str>) -> Self {
        match env {
            Some("dev") => Environment::Dev,
            _ => Environment::Production,
        }
    }

    pub fn api_base_url(&self) -> &'static str {
        match self {
            Environment::Production => PRODUCTION_API_URL,
            Environment::Dev => DEV_API_URL,
        }
    }

    pub fn app_id(&self) -> &'static str {
        match self {
            Environment::Production => PRODUCTION_APP_ID,
            Environment::Dev => DEV_APP_ID,
        }
    }
}

/// Parameters the hall plan was launched with (`token`, `env`, `favorites`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchParams {
    pub token: Option<String>,
    pub env: Option<String>,
    pub favorites: Vec<String>,
}

impl LaunchParams {
    /// Read launch parameters from the query string of a launch URL
    pub fn from_url(launch_url: &str) -> Result<Self> {
        let url = url::Url::parse(launch_url)
            .with_context(|| format!("Invalid launch URL: {}", launch_url))?;
        Ok(Self::from_query(url.query().unwrap_or("")))
    }

    pub fn from_query(query: &str) -> Self {
        let mut params = LaunchParams::default();
        for (key, value) in url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            match key.as_ref() {
                "token" => params.token = non_empty(Some(value.into_owned())),
                "env" => params.env = non_empty(Some(value.into_owned())),
                "favorites" => params.favorites = parse_seed_favorites(&value),
                _ => {}
            }
        }
        params
    }

    /// Overlay `overrides` on top of `self`; set fields in `overrides` win
    pub fn merge(self, overrides: LaunchParams) -> Self {
        LaunchParams {
            token: overrides.token.or(self.token),
            env: overrides.env.or(self.env),
            favorites: if overrides.favorites.is_empty() {
                self.favorites
            } else {
                overrides.favorites
            },
        }
    }
}

/// Split the legacy `favorites` parameter into exhibitor ids
pub fn parse_seed_favorites(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Credentials and endpoint for one run; built once, never mutated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub app_id: String,
    pub api_base_url: String,
}

impl Session {
    pub fn from_launch(params: &LaunchParams, config: &Config) -> Self {
        let environment = Environment::from_param(params.env.as_deref());
        Self {
            token: params.token.clone(),
            app_id: config
                .app_id
                .clone()
                .unwrap_or_else(|| environment.app_id().to_string()),
            api_base_url: config
                .api_base_url
                .clone()
                .unwrap_or_else(|| environment.api_base_url().to_string()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_params_from_url() {
        let params = LaunchParams::from_url(
            "https://hallplan.example.com/?token=abc&env=dev&favorites=1,%202,,3",
        )
        .unwrap();
        assert_eq!(params.token.as_deref(), Some("abc"));
        assert_eq!(params.env.as_deref(), Some("dev"));
        assert_eq!(params.favorites, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_empty_token_is_absent() {
        let params = LaunchParams::from_query("?token=&env=prod");
        assert_eq!(params.token, None);
    }

    #[test]
    fn test_merge_prefers_overrides() {
        let base = LaunchParams {
            token: Some("config".to_string()),
            env: Some("dev".to_string()),
            favorites: vec!["a".to_string()],
        };
        let merged = base.merge(LaunchParams {
            token: Some("cli".to_string()),
            ..Default::default()
        });
        assert_eq!(merged.token.as_deref(), Some("cli"));
        assert_eq!(merged.env.as_deref(), Some("dev"));
        assert_eq!(merged.favorites, vec!["a"]);
    }

    #[test]
    fn test_dev_env_switches_endpoint_and_app_id() {
        let params = LaunchParams::from_query("token=t&env=dev");
        let session = Session::from_launch(&params, &Config::default());
        assert_eq!(session.api_base_url, DEV_API_URL);
        assert_eq!(session.app_id, DEV_APP_ID);

        let session = Session::from_launch(&LaunchParams::default(), &Config::default());
        assert_eq!(session.api_base_url, PRODUCTION_API_URL);
        assert_eq!(session.app_id, PRODUCTION_APP_ID);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        assert!(load_config(Some(&missing)).is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "token: abc\nenv: dev\nfavorites: \"a,b\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        let params = config.launch_params();
        assert_eq!(params.token.as_deref(), Some("abc"));
        assert_eq!(params.favorites, vec!["a", "b"]);
    }

    #[test]
    fn test_config_overrides_endpoint() {
        let config = Config::from_yaml(
            "api_base_url: http://localhost:9000\napp_id: \"1\"\nexhibitors:\n  - id: ex-1\n    name: ACME\n",
        )
        .unwrap();
        let session = Session::from_launch(&config.launch_params(), &config);
        assert_eq!(session.api_base_url, "http://localhost:9000");
        assert_eq!(session.app_id, "1");
        assert_eq!(config.exhibitors.len(), 1);
    }
}
