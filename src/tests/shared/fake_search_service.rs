use std::sync::Mutex;

use anyhow::bail;
use async_trait::async_trait;

use crate::service::search_service::{SearchRequest, SearchResponse, SearchService, SearchSource};

/// Answers every query with the same response, except the ones listed as failing.
pub struct FakeSearchService {
    response: SearchResponse,
    failing_queries: Vec<String>,
    requests: Mutex<Vec<SearchRequest>>,
}

impl FakeSearchService {
    pub fn new(response: SearchResponse) -> FakeSearchService {
        return FakeSearchService {
            response,
            failing_queries: vec![],
            requests: Mutex::new(vec![]),
        };
    }

    pub fn failing_on(mut self, query: &str) -> FakeSearchService {
        self.failing_queries.push(query.to_string());
        return self;
    }

    pub fn requests(&self) -> Vec<SearchRequest> {
        return self.requests.lock().unwrap().clone();
    }

    pub fn queries(&self) -> Vec<String> {
        return self.requests()
            .into_iter()
            .map(|request| request.query)
            .collect::<Vec<String>>();
    }
}

#[async_trait]
impl SearchService for FakeSearchService {
    fn name(&self) -> &'static str {
        return "fake";
    }

    async fn search(&self, request: &SearchRequest) -> anyhow::Result<SearchResponse> {
        self.requests.lock().unwrap().push(request.clone());

        if self.failing_queries.contains(&request.query) {
            bail!("search() fake failure for \'{}\'", request.query);
        }

        return Ok(self.response.clone());
    }
}

pub fn response_with_sources(answer: Option<&str>, titles: &[&str]) -> SearchResponse {
    let results = titles.iter()
        .map(|title| {
            SearchSource {
                title: Some(title.to_string()),
                url: Some(format!("https://example.com/{}", title)),
                content: Some(format!("content of {}", title)),
                score: Some(0.5),
            }
        })
        .collect::<Vec<SearchSource>>();

    return SearchResponse {
        answer: answer.map(|answer| answer.to_string()),
        results,
        sources: vec![],
    };
}
