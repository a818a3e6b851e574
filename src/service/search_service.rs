use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchDepth {
    Basic,
    Advanced,
}

#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    pub search_depth: SearchDepth,
    pub include_answer: bool,
    pub include_sources: bool,
    pub max_results: usize,
    pub include_images: bool,
    pub include_raw_content: bool,
}

impl SearchRequest {
    pub fn basic(query: &str) -> SearchRequest {
        return SearchRequest {
            query: query.to_string(),
            search_depth: SearchDepth::Basic,
            include_answer: true,
            include_sources: true,
            max_results: 5,
            include_images: false,
            include_raw_content: false,
        };
    }

    pub fn advanced(query: &str, max_results: usize) -> SearchRequest {
        return SearchRequest {
            search_depth: SearchDepth::Advanced,
            max_results,
            ..SearchRequest::basic(query)
        };
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchSource {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub results: Vec<SearchSource>,
    #[serde(default)]
    pub sources: Vec<SearchSource>,
}

impl SearchResponse {
    /// `results` when present, otherwise the older `sources` field.
    pub fn search_sources(&self) -> &[SearchSource] {
        if !self.results.is_empty() {
            return &self.results;
        }

        return &self.sources;
    }
}

#[async_trait]
pub trait SearchService: Send + Sync {
    fn name(&self) -> &'static str;

    async fn search(&self, request: &SearchRequest) -> anyhow::Result<SearchResponse>;
}

/// Used when no search API key is configured.
pub struct NoopSearchService;

#[async_trait]
impl SearchService for NoopSearchService {
    fn name(&self) -> &'static str {
        return "noop";
    }

    async fn search(&self, request: &SearchRequest) -> anyhow::Result<SearchResponse> {
        warn!("search() no search API key configured, ignoring query \'{}\'", request.query);
        return Ok(SearchResponse::default());
    }
}

#[test]
fn test_response_accepts_sources_field() {
    let json = r#"{"answer":"summary","sources":[{"title":"t","url":"https://a.b","content":"c"}]}"#;
    let response: SearchResponse = serde_json::from_str(json).unwrap();

    assert_eq!(Some("summary".to_string()), response.answer);
    assert_eq!(1, response.search_sources().len());
    assert_eq!(Some("https://a.b".to_string()), response.search_sources()[0].url);

    let json = r#"{"query":"q","results":[{"title":"t","score":0.5}]}"#;
    let response: SearchResponse = serde_json::from_str(json).unwrap();

    assert_eq!(None, response.answer);
    assert_eq!(Some(0.5), response.search_sources()[0].score);
}

#[test]
fn test_response_with_both_source_fields() {
    let json = r#"{"answer":"a","results":[{"title":"r1"},{"title":"r2"}],"sources":[{"title":"s1"}]}"#;
    let response: SearchResponse = serde_json::from_str(json).unwrap();

    let titles = response.search_sources()
        .iter()
        .map(|source| source.title.as_deref().unwrap_or(""))
        .collect::<Vec<&str>>();
    assert_eq!(vec!["r1", "r2"], titles);

    let json = r#"{"results":[],"sources":[{"title":"s1"}]}"#;
    let response: SearchResponse = serde_json::from_str(json).unwrap();

    assert_eq!(Some("s1".to_string()), response.search_sources()[0].title);
}
