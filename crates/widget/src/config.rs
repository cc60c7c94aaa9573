use adapter::HttpConfig;
use config::ConfigError;
use domain::ContentId;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::controller::DEFAULT_MAX_COMMENT_CHARS;

const ENV_PREFIX: &str = "CUMMENTS_";

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub page: PageSettings,
    pub widget: WidgetSettings,
    pub storage: StorageSettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct PageSettings {
    pub origin: String,
    pub path: String,
    /// `data-post-id` on the mount element, if the page sets one.
    pub mount_post_id: Option<String>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct WidgetSettings {
    pub api_base: Option<String>,
    pub post_id: Option<String>,
    pub max_comment_chars: usize,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct StorageSettings {
    pub url: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        Self::load(&run_mode, collect_env_vars(std::env::vars()))
    }

    pub fn load(run_mode: &str, env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let env_json = serde_json::to_string(&env_map)
            .map_err(|e| ConfigError::Message(format!("Environment overrides: {}", e)))?;

        let s = config::Config::builder()
            .set_default("page.origin", "http://localhost:8000")?
            .set_default("page.path", "/")?
            .set_default("widget.max_comment_chars", DEFAULT_MAX_COMMENT_CHARS as i64)?
            .set_default("storage.url", "sqlite://data/widget.db")?
            .add_source(config::File::with_name("widget").required(false))
            .add_source(config::File::with_name(&format!("widget.{}", run_mode)).required(false))
            .add_source(config::File::from_str(&env_json, config::FileFormat::Json))
            .build()?;

        s.try_deserialize()
    }

    /// Requests go to the page origin unless an API base is configured.
    pub fn api_base(&self) -> &str {
        self.widget
            .api_base
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.page.origin)
    }

    pub fn content_id(&self) -> Result<ContentId, String> {
        ContentId::resolve(
            self.widget.post_id.as_deref(),
            self.page.mount_post_id.as_deref(),
            &self.page.path,
        )
    }

    pub fn http_config(&self) -> HttpConfig {
        HttpConfig {
            api_base: self.api_base().to_string(),
            timeout: self.widget.request_timeout_secs.map(Duration::from_secs),
        }
    }
}

/// `CUMMENTS_WIDGET__API_BASE=...` becomes `widget.api_base`.
fn collect_env_vars(vars: impl Iterator<Item = (String, String)>) -> HashMap<String, String> {
    vars.filter(|(k, _)| k.starts_with(ENV_PREFIX))
        .map(|(k, v)| {
            let new_key = k
                .trim_start_matches(ENV_PREFIX)
                .replace("__", ".")
                .to_lowercase();
            (new_key, v)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        collect_env_vars(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<Vec<_>>()
                .into_iter(),
        )
    }

    #[test]
    fn defaults_fall_back_to_page() {
        let s = Settings::load("test", HashMap::new()).unwrap();
        assert_eq!(s.api_base(), "http://localhost:8000");
        assert_eq!(s.content_id().unwrap().as_str(), "/");
        assert_eq!(s.widget.max_comment_chars, 2000);
        assert!(s.http_config().timeout.is_none());
    }

    #[test]
    fn env_overrides_nested_keys() {
        let s = Settings::load(
            "test",
            env(&[
                ("CUMMENTS_WIDGET__API_BASE", "https://comments.example.org"),
                ("CUMMENTS_PAGE__PATH", "/2024/05/hello/"),
                ("CUMMENTS_PAGE__MOUNT_POST_ID", "hello"),
                ("CUMMENTS_WIDGET__REQUEST_TIMEOUT_SECS", "15"),
                ("UNRELATED", "x"),
            ]),
        )
        .unwrap();
        assert_eq!(s.api_base(), "https://comments.example.org");
        assert_eq!(s.content_id().unwrap().as_str(), "hello");
        assert_eq!(s.http_config().timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn explicit_post_id_wins() {
        let s = Settings::load(
            "test",
            env(&[
                ("CUMMENTS_WIDGET__POST_ID", "post-42"),
                ("CUMMENTS_PAGE__MOUNT_POST_ID", "hello"),
            ]),
        )
        .unwrap();
        assert_eq!(s.content_id().unwrap().as_str(), "post-42");
    }
}
