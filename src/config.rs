use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context};

use crate::constants::{TAVILY_SEARCH_ENDPOINT, XUEQIU_WEB_URL};
use crate::helpers::string_helpers::FormatToken;

#[derive(Debug, Clone)]
pub struct XueqiuCredentials {
    pub user_id: String,
    pub access_token: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub is_dev_build: bool,
    pub credentials: Option<XueqiuCredentials>,
    pub tavily_api_key: Option<String>,
    pub xueqiu_base_url: String,
    pub tavily_endpoint: String,
    pub chromium_path: Option<String>,
    pub scheduler_tick: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Config> {
        let is_dev_build = match env::var("DEVELOPMENT_BUILD") {
            Ok(value) => {
                i32::from_str(value.trim())
                    .with_context(|| format!("DEVELOPMENT_BUILD must be 0 or 1, got \'{}\'", value))? == 1
            }
            Err(_) => false,
        };

        let credentials = match (non_empty_var("XUEQIU_U"), non_empty_var("XUEQIU_TOKEN")) {
            (Some(user_id), Some(access_token)) => Some(XueqiuCredentials { user_id, access_token }),
            _ => None,
        };

        let scheduler_tick_seconds = match non_empty_var("SCHEDULER_TICK_SECONDS") {
            Some(value) => {
                u64::from_str(value.as_str())
                    .with_context(|| format!("SCHEDULER_TICK_SECONDS is not a number: \'{}\'", value))?
            }
            None => 60,
        };

        let config = Config {
            is_dev_build,
            credentials,
            tavily_api_key: non_empty_var("TAVILY_API_KEY"),
            xueqiu_base_url: non_empty_var("XUEQIU_BASE_URL").unwrap_or(XUEQIU_WEB_URL.to_string()),
            tavily_endpoint: non_empty_var("TAVILY_ENDPOINT").unwrap_or(TAVILY_SEARCH_ENDPOINT.to_string()),
            chromium_path: non_empty_var("XQFEED_CHROMIUM_PATH"),
            scheduler_tick: Duration::from_secs(scheduler_tick_seconds.max(1)),
        };

        url::Url::parse(&config.xueqiu_base_url)
            .with_context(|| format!("XUEQIU_BASE_URL is not a valid url: \'{}\'", config.xueqiu_base_url))?;
        url::Url::parse(&config.tavily_endpoint)
            .with_context(|| format!("TAVILY_ENDPOINT is not a valid url: \'{}\'", config.tavily_endpoint))?;

        return Ok(config);
    }

    pub fn require_credentials(&self) -> anyhow::Result<&XueqiuCredentials> {
        return self.credentials
            .as_ref()
            .ok_or_else(|| anyhow!("XUEQIU_U and XUEQIU_TOKEN must both be set for this command"));
    }

    pub fn require_tavily_api_key(&self) -> anyhow::Result<&str> {
        return self.tavily_api_key
            .as_deref()
            .ok_or_else(|| anyhow!("TAVILY_API_KEY must be set for this command"));
    }

    pub fn log_summary(&self) {
        info!("config() is_dev_build: {}", self.is_dev_build);
        info!(
            "config() xueqiu credentials: {}",
            self.credentials
                .as_ref()
                .map(|credentials| {
                    format!("u={}, xq_a_token={}", credentials.user_id, credentials.access_token.format_token())
                })
                .unwrap_or(String::from("<not set>"))
        );
        info!(
            "config() tavily api key: {}",
            self.tavily_api_key
                .as_ref()
                .map(|api_key| api_key.format_token().to_string())
                .unwrap_or(String::from("<not set>"))
        );
        info!("config() xueqiu_base_url: {}, tavily_endpoint: {}", self.xueqiu_base_url, self.tavily_endpoint);
        info!("config() scheduler_tick: {}s", self.scheduler_tick.as_secs());
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    return env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());
}

#[test]
fn test_required_settings() {
    let mut config = Config {
        is_dev_build: false,
        credentials: None,
        tavily_api_key: None,
        xueqiu_base_url: XUEQIU_WEB_URL.to_string(),
        tavily_endpoint: TAVILY_SEARCH_ENDPOINT.to_string(),
        chromium_path: None,
        scheduler_tick: Duration::from_secs(60),
    };

    assert!(config.require_credentials().is_err());
    assert!(config.require_tavily_api_key().is_err());

    config.credentials = Some(XueqiuCredentials {
        user_id: "1".to_string(),
        access_token: "token".to_string(),
    });
    config.tavily_api_key = Some("tvly-key".to_string());

    assert_eq!("1", config.require_credentials().unwrap().user_id);
    assert_eq!("tvly-key", config.require_tavily_api_key().unwrap());
}
