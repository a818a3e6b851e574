use std::sync::Arc;
use std::time::Duration;

use crate::model::data::post::{FeedPost, FetchMethod, NO_CONTENT, NO_TITLE, NOT_AVAILABLE};
use crate::service::search_service::{SearchRequest, SearchResponse, SearchService};
use crate::service::xueqiu_client::XueqiuClient;

pub const FALLBACK_QUERIES: [&str; 4] = [
    "雪球网 热门帖子 今日讨论",
    "雪球 投资者热议话题 最新",
    "雪球社区 高热度 投资讨论",
    "雪球 今日热门 投资观点",
];

const FALLBACK_MAX_RESULTS: usize = 3;
const FALLBACK_SOURCES_PER_QUERY: usize = 2;
const FALLBACK_SOURCE_CONTENT_CHARS: usize = 500;

pub const SEARCH_RESULT_AUTHOR: &str = "Tavily search result";
pub const SEARCH_SOURCE_AUTHOR: &str = "Tavily source";

/// Direct API access first, search fallback only when it yields nothing.
pub struct ContentFetcher {
    xueqiu_client: XueqiuClient,
    search_service: Arc<dyn SearchService>,
    query_pause: Duration,
}

impl ContentFetcher {
    pub fn new(
        xueqiu_client: XueqiuClient,
        search_service: Arc<dyn SearchService>,
        query_pause: Duration
    ) -> ContentFetcher {
        return ContentFetcher { xueqiu_client, search_service, query_pause };
    }

    pub async fn get_comprehensive_content(&self) -> Vec<FeedPost> {
        info!("get_comprehensive_content() trying direct access...");

        let direct_posts = self.xueqiu_client.try_direct_access().await;
        if !direct_posts.is_empty() {
            info!("get_comprehensive_content() direct access returned {} posts", direct_posts.len());
            return direct_posts;
        }

        info!(
            "get_comprehensive_content() direct access failed, switching to {} search",
            self.search_service.name()
        );

        return self.search_fallback().await;
    }

    pub async fn search_fallback(&self) -> Vec<FeedPost> {
        let mut all_posts = Vec::<FeedPost>::with_capacity(FALLBACK_QUERIES.len() * 3);

        for (index, query) in FALLBACK_QUERIES.iter().enumerate() {
            if index > 0 && !self.query_pause.is_zero() {
                tokio::time::sleep(self.query_pause).await;
            }

            info!("search_fallback() searching \'{}\'", query);

            let request = SearchRequest::advanced(query, FALLBACK_MAX_RESULTS);
            match self.search_service.search(&request).await {
                Ok(response) => all_posts.extend(search_response_to_posts(query, &response)),
                Err(error) => {
                    error!("search_fallback() search for \'{}\' failed: {:#}", query, error);
                    continue;
                }
            }
        }

        info!("search_fallback() got {} results", all_posts.len());
        return all_posts;
    }
}

/// The answer becomes one post, followed by at most two source posts.
pub fn search_response_to_posts(query: &str, response: &SearchResponse) -> Vec<FeedPost> {
    let mut posts = Vec::<FeedPost>::with_capacity(1 + FALLBACK_SOURCES_PER_QUERY);

    if let Some(answer) = response.answer.as_ref().filter(|answer| !answer.is_empty()) {
        posts.push(FeedPost {
            title: format!("Tavily search: {}", query),
            content: answer.clone(),
            author: SEARCH_RESULT_AUTHOR.to_string(),
            time: NOT_AVAILABLE.to_string(),
            likes: 0,
            comments: 0,
            shares: 0,
            url: NOT_AVAILABLE.to_string(),
            method: FetchMethod::TavilySearch,
        });
    }

    for source in response.search_sources().iter().take(FALLBACK_SOURCES_PER_QUERY) {
        let content = source.content.as_deref().unwrap_or(NO_CONTENT);

        posts.push(FeedPost {
            title: source.title.clone().unwrap_or(NO_TITLE.to_string()),
            content: content.chars().take(FALLBACK_SOURCE_CONTENT_CHARS).collect::<String>(),
            author: SEARCH_SOURCE_AUTHOR.to_string(),
            time: NOT_AVAILABLE.to_string(),
            likes: 0,
            comments: 0,
            shares: 0,
            url: source.url.clone().unwrap_or(NOT_AVAILABLE.to_string()),
            method: FetchMethod::TavilySource,
        });
    }

    return posts;
}
