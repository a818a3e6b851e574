use std::time::Duration;

use anyhow::{bail, Context};
use async_trait::async_trait;
use serde::Serialize;

use crate::constants::BODY_PREVIEW_CHARS;
use crate::helpers::string_helpers::body_preview;
use crate::service::search_service::{SearchDepth, SearchRequest, SearchResponse, SearchService};

#[derive(Debug, Serialize)]
struct TavilyRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    search_depth: SearchDepth,
    include_answer: bool,
    include_sources: bool,
    max_results: usize,
    include_images: bool,
    include_raw_content: bool,
}

pub struct TavilyClient {
    api_key: String,
    endpoint: String,
    http_client: reqwest::Client,
}

impl TavilyClient {
    pub fn new(api_key: String, endpoint: String) -> anyhow::Result<TavilyClient> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .context("TavilyClient::new() Failed to create HTTP client")?;

        return Ok(TavilyClient { api_key, endpoint, http_client });
    }
}

#[async_trait]
impl SearchService for TavilyClient {
    fn name(&self) -> &'static str {
        return "tavily";
    }

    async fn search(&self, request: &SearchRequest) -> anyhow::Result<SearchResponse> {
        debug!("search() query: \'{}\', depth: {:?}", request.query, request.search_depth);

        let tavily_request = TavilyRequest {
            api_key: &self.api_key,
            query: &request.query,
            search_depth: request.search_depth,
            include_answer: request.include_answer,
            include_sources: request.include_sources,
            max_results: request.max_results,
            include_images: request.include_images,
            include_raw_content: request.include_raw_content,
        };

        let response = self.http_client
            .post(self.endpoint.as_str())
            .json(&tavily_request)
            .send()
            .await
            .with_context(|| {
                return format!("search() Failed to send search request for \'{}\'", request.query);
            })?;

        let status = response.status();
        let response_text = response.text()
            .await
            .with_context(|| format!("search() Failed to read response for \'{}\'", request.query))?;

        if !status.is_success() {
            bail!(
                "search() Tavily API error {}: {}",
                status.as_u16(),
                body_preview(&response_text, BODY_PREVIEW_CHARS)
            );
        }

        let search_response = serde_json::from_str::<SearchResponse>(&response_text)
            .with_context(|| {
                return format!(
                    "search() Failed to parse response: \'{}\'",
                    body_preview(&response_text, BODY_PREVIEW_CHARS)
                );
            })?;

        debug!(
            "search() query: \'{}\' has answer: {}, results: {}",
            request.query,
            search_response.answer.is_some(),
            search_response.search_sources().len()
        );

        return Ok(search_response);
    }
}
