use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context};
use reqwest::cookie::Jar;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT};
use url::Url;

use crate::config::XueqiuCredentials;
use crate::constants::{
    BODY_PREVIEW_CHARS,
    COOKIE_ACCESS_TOKEN,
    COOKIE_USER_ID,
    DESKTOP_USER_AGENT,
    DIRECT_ACCESS_MAX_POSTS
};
use crate::helpers::string_helpers::{body_preview, FormatToken};
use crate::model::data::post::FeedPost;
use crate::model::parser::status_parser;
use crate::model::parser::status_parser::{TimelineParseResult, XueqiuStatus};

struct TimelineEndpoint {
    path: &'static str,
    params: &'static [(&'static str, &'static str)],
}

/// Tried in order by `try_direct_access()`, the first one returning statuses wins.
const TIMELINE_ENDPOINTS: [TimelineEndpoint; 3] = [
    TimelineEndpoint {
        path: "/v4/statuses/public_timeline_by_category.json",
        params: &[("category", "6"), ("page", "1")],
    },
    TimelineEndpoint {
        path: "/statuses/hot_timeline.json",
        params: &[("page", "1"), ("size", "10")],
    },
    TimelineEndpoint {
        path: "/trends/statuses.json",
        params: &[("since_id", "-1"), ("max_id", "-1"), ("count", "10")],
    },
];

pub struct XueqiuClient {
    base_url: Url,
    http_client: reqwest::Client,
}

impl XueqiuClient {
    pub fn new(base_url: &str, credentials: &XueqiuCredentials) -> anyhow::Result<XueqiuClient> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("XueqiuClient::new() Bad base url \'{}\'", base_url))?;

        let jar = Jar::default();
        jar.add_cookie_str(&format!("{}={}; Path=/", COOKIE_USER_ID, credentials.user_id), &base_url);
        jar.add_cookie_str(&format!("{}={}; Path=/", COOKIE_ACCESS_TOKEN, credentials.access_token), &base_url);

        let http_client = reqwest::Client::builder()
            .default_headers(default_headers())
            .cookie_provider(Arc::new(jar))
            .timeout(Duration::from_secs(10))
            .build()
            .context("XueqiuClient::new() Failed to create HTTP client")?;

        info!(
            "XueqiuClient::new() base_url: {}, u: {}, xq_a_token: {}",
            base_url,
            credentials.user_id,
            credentials.access_token.format_token()
        );

        return Ok(XueqiuClient { base_url, http_client });
    }

    /// Opens the home page to warm up the session, then walks the timeline endpoints.
    /// Every failure is logged and the result degrades to an empty list.
    pub async fn try_direct_access(&self) -> Vec<FeedPost> {
        let home_url = self.base_url.clone();

        let home_response = self.http_client.get(home_url.clone()).send().await;
        match home_response {
            Ok(response) if response.status().as_u16() == 200 => {
                info!("try_direct_access() home page opened");
            }
            Ok(response) => {
                error!("try_direct_access() home page bad status code {}", response.status().as_u16());
                return vec![];
            }
            Err(error) => {
                error!("try_direct_access() Failed to open home page \'{}\': {}", home_url, error);
                return vec![];
            }
        }

        for endpoint in &TIMELINE_ENDPOINTS {
            let params = endpoint.params.iter()
                .map(|(name, value)| (*name, value.to_string()))
                .collect::<Vec<(&str, String)>>();

            let response_text = match self.get_text(endpoint.path, &params).await {
                Ok(response_text) => response_text,
                Err(error) => {
                    error!("try_direct_access() {} failed: {}", endpoint.path, error);
                    continue;
                }
            };

            let statuses = match status_parser::parse_timeline(&response_text) {
                Ok(TimelineParseResult::Ok(statuses)) => statuses,
                Ok(TimelineParseResult::NoStatuses) => {
                    info!("try_direct_access() {} returned no statuses", endpoint.path);
                    continue;
                }
                Ok(TimelineParseResult::UnknownShape) => {
                    error!(
                        "try_direct_access() {} unknown response shape: \'{}\'",
                        endpoint.path,
                        body_preview(&response_text, BODY_PREVIEW_CHARS)
                    );
                    continue;
                }
                Err(error) => {
                    error!("try_direct_access() {} response is not json: {}", endpoint.path, error);
                    continue;
                }
            };

            info!("try_direct_access() {} returned {} statuses", endpoint.path, statuses.len());

            return statuses.iter()
                .take(DIRECT_ACCESS_MAX_POSTS)
                .map(|status| status.to_feed_post())
                .collect::<Vec<FeedPost>>();
        }

        error!("try_direct_access() no endpoint returned usable data");
        return vec![];
    }

    pub async fn hot_topics(&self, count: usize) -> anyhow::Result<Vec<XueqiuStatus>> {
        let params = vec![
            ("page", String::from("1")),
            ("size", count.to_string()),
            ("t", timestamp_millis()),
        ];

        let response_text = self.get_text("/v2/statuses/mini.json", &params).await?;
        return statuses_field_or_error("hot_topics", &response_text);
    }

    pub async fn search_posts(&self, query: &str, count: usize) -> anyhow::Result<Vec<XueqiuStatus>> {
        let params = vec![
            ("q", query.to_string()),
            ("count", count.to_string()),
            ("page", String::from("1")),
            ("t", timestamp_millis()),
        ];

        let response_text = self.get_text("/statuses/search.json", &params).await?;
        return statuses_field_or_error("search_posts", &response_text);
    }

    pub async fn user_posts(&self, user_id: &str, count: usize) -> anyhow::Result<Vec<XueqiuStatus>> {
        let params = vec![
            ("user_id", user_id.to_string()),
            ("page", String::from("1")),
            ("count", count.to_string()),
        ];

        let response_text = self.get_text("/v4/statuses/user_timeline.json", &params).await?;
        return statuses_field_or_error("user_posts", &response_text);
    }

    pub async fn post_detail(&self, post_id: &str) -> anyhow::Result<XueqiuStatus> {
        let params = vec![
            ("id", post_id.to_string()),
            ("t", timestamp_millis()),
        ];

        let response_text = self.get_text("/statuses/original/show.json", &params).await?;

        let status = serde_json::from_str::<XueqiuStatus>(&response_text)
            .with_context(|| {
                return format!(
                    "post_detail({}) response is not a status: \'{}\'",
                    post_id,
                    body_preview(&response_text, BODY_PREVIEW_CHARS)
                );
            })?;

        return Ok(status);
    }

    async fn get_text(&self, path: &str, params: &[(&str, String)]) -> anyhow::Result<String> {
        let endpoint = self.base_url
            .join(path)
            .with_context(|| format!("get_text() Failed to join \'{}\' with \'{}\'", self.base_url, path))?;

        let response = self.http_client
            .get(endpoint.clone())
            .query(params)
            .send()
            .await
            .with_context(|| {
                return format!("get_text() Failed to execute GET request to \'{}\' endpoint", endpoint);
            })?;

        let status_code = response.status().as_u16();
        let response_text = response.text()
            .await
            .with_context(|| format!("get_text() Failed to extract text from \'{}\' response", endpoint))?;

        if status_code != 200 {
            return Err(anyhow!(
                "get_text() \'{}\' bad status code {}, body: \'{}\'",
                endpoint.path(),
                status_code,
                body_preview(&response_text, BODY_PREVIEW_CHARS)
            ));
        }

        debug!("get_text() \'{}\' response len: {}", endpoint.path(), response_text.len());
        return Ok(response_text);
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(5);

    headers.insert(USER_AGENT, HeaderValue::from_static(DESKTOP_USER_AGENT));
    headers.insert(REFERER, HeaderValue::from_static("https://xueqiu.com/"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("zh-CN,zh;q=0.9,en;q=0.8"));
    headers.insert("X-Requested-With", HeaderValue::from_static("XMLHttpRequest"));

    return headers;
}

fn statuses_field_or_error(function_name: &str, response_text: &str) -> anyhow::Result<Vec<XueqiuStatus>> {
    let statuses = status_parser::parse_statuses_field(response_text)
        .with_context(|| {
            return format!(
                "{}() response is not json: \'{}\'",
                function_name,
                body_preview(response_text, BODY_PREVIEW_CHARS)
            );
        })?;

    return statuses.ok_or_else(|| {
        anyhow!(
            "{}() unexpected response format: \'{}\'",
            function_name,
            body_preview(response_text, BODY_PREVIEW_CHARS)
        )
    });
}

fn timestamp_millis() -> String {
    return chrono::Utc::now().timestamp_millis().to_string();
}

#[test]
fn test_timeline_endpoints_order() {
    let paths = TIMELINE_ENDPOINTS.iter().map(|endpoint| endpoint.path).collect::<Vec<&str>>();

    assert_eq!(
        vec![
            "/v4/statuses/public_timeline_by_category.json",
            "/statuses/hot_timeline.json",
            "/trends/statuses.json"
        ],
        paths
    );
}
