#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use crate::config::XueqiuCredentials;
    use crate::model::data::post::FetchMethod;
    use crate::service::content_fetcher::{ContentFetcher, FALLBACK_QUERIES, SEARCH_RESULT_AUTHOR};
    use crate::service::search_service::{SearchDepth, SearchService};
    use crate::service::xueqiu_client::XueqiuClient;
    use crate::tests::shared::fake_search_service::{response_with_sources, FakeSearchService};
    use crate::tests::shared::server_shared::{MockResponse, TestServer};

    fn content_fetcher(server: &TestServer, search_service: &Arc<FakeSearchService>) -> ContentFetcher {
        let credentials = XueqiuCredentials {
            user_id: "1".to_string(),
            access_token: "token".to_string(),
        };

        let xueqiu_client = XueqiuClient::new(&server.base_url(), &credentials).unwrap();
        let search_service: Arc<dyn SearchService> = search_service.clone();

        return ContentFetcher::new(xueqiu_client, search_service, Duration::ZERO);
    }

    #[tokio::test]
    async fn test_direct_access_skips_search() {
        let server = TestServer::start(vec![
            ("/", MockResponse::ok("<html></html>")),
            (
                "/v4/statuses/public_timeline_by_category.json",
                MockResponse::ok(r#"{"statuses":[{"title":"direct","text":"body"}]}"#)
            ),
        ]).await;

        let search_service = Arc::new(FakeSearchService::new(response_with_sources(Some("answer"), &["a"])));
        let posts = content_fetcher(&server, &search_service).get_comprehensive_content().await;

        assert_eq!(1, posts.len());
        assert_eq!("direct", posts[0].title);
        assert_eq!(FetchMethod::DirectApi, posts[0].method);
        assert!(search_service.queries().is_empty());
    }

    #[tokio::test]
    async fn test_falls_back_to_search() {
        let server = TestServer::start(vec![
            ("/", MockResponse::status(404, "not found")),
        ]).await;

        let search_service = Arc::new(FakeSearchService::new(response_with_sources(Some("answer"), &["a", "b", "c"])));
        let posts = content_fetcher(&server, &search_service).get_comprehensive_content().await;

        assert_eq!(
            FALLBACK_QUERIES.iter().map(|query| query.to_string()).collect::<Vec<String>>(),
            search_service.queries()
        );

        for request in search_service.requests() {
            assert_eq!(SearchDepth::Advanced, request.search_depth);
            assert_eq!(3, request.max_results);
            assert!(request.include_answer);
        }

        assert_eq!(12, posts.len());
        assert_eq!(format!("Tavily search: {}", FALLBACK_QUERIES[0]), posts[0].title);
        assert_eq!(SEARCH_RESULT_AUTHOR, posts[0].author);
        assert_eq!(vec!["a", "b"], posts[1..3].iter().map(|post| post.title.as_str()).collect::<Vec<&str>>());
        assert_eq!(format!("Tavily search: {}", FALLBACK_QUERIES[3]), posts[9].title);
    }

    #[tokio::test]
    async fn test_failed_query_is_skipped() {
        let server = TestServer::start(vec![]).await;

        let search_service = Arc::new(
            FakeSearchService::new(response_with_sources(None, &["only"])).failing_on(FALLBACK_QUERIES[1])
        );
        let posts = content_fetcher(&server, &search_service).search_fallback().await;

        assert_eq!(4, search_service.queries().len());
        assert_eq!(3, posts.len());
        assert!(posts.iter().all(|post| post.method == FetchMethod::TavilySource));
        assert!(server.requested_paths().is_empty());
    }
}
