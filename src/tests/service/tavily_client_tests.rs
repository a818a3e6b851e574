#[cfg(test)]
mod tests {
    use serde_json::Value;

    use crate::service::search_service::{SearchRequest, SearchService};
    use crate::service::tavily_client::TavilyClient;
    use crate::tests::shared::server_shared::{MockResponse, TestServer};

    #[tokio::test]
    async fn test_search_sends_request_fields() {
        let server = TestServer::start(vec![
            (
                "/search",
                MockResponse::ok(
                    r#"{"query":"雪球 热门","answer":"今日热议银行股","results":[{"title":"a","url":"https://xueqiu.com/1","content":"c","score":0.9}]}"#
                )
            ),
        ]).await;

        let tavily_client = TavilyClient::new("tvly-test-key".to_string(), server.url("/search")).unwrap();
        let response = tavily_client.search(&SearchRequest::advanced("雪球 热门", 3)).await.unwrap();

        assert_eq!(Some("今日热议银行股".to_string()), response.answer);
        assert_eq!(1, response.search_sources().len());
        assert_eq!(Some("https://xueqiu.com/1".to_string()), response.search_sources()[0].url);

        let requests = server.requests();
        assert_eq!(1, requests.len());
        assert_eq!("POST", requests[0].method);

        let body: Value = serde_json::from_str(&requests[0].body).unwrap();
        assert_eq!("tvly-test-key", body["api_key"]);
        assert_eq!("雪球 热门", body["query"]);
        assert_eq!("advanced", body["search_depth"]);
        assert_eq!(true, body["include_answer"]);
        assert_eq!(true, body["include_sources"]);
        assert_eq!(3, body["max_results"]);
        assert_eq!(false, body["include_images"]);
        assert_eq!(false, body["include_raw_content"]);
    }

    #[tokio::test]
    async fn test_search_accepts_sources_field() {
        let server = TestServer::start(vec![
            ("/search", MockResponse::ok(r#"{"sources":[{"title":"s1"},{"title":"s2"}]}"#)),
        ]).await;

        let tavily_client = TavilyClient::new("key".to_string(), server.url("/search")).unwrap();
        let response = tavily_client.search(&SearchRequest::basic("q")).await.unwrap();

        assert_eq!(None, response.answer);
        assert_eq!(2, response.search_sources().len());

        let body: Value = serde_json::from_str(&server.requests()[0].body).unwrap();
        assert_eq!("basic", body["search_depth"]);
        assert_eq!(5, body["max_results"]);
    }

    #[tokio::test]
    async fn test_search_with_results_and_sources() {
        let server = TestServer::start(vec![
            (
                "/search",
                MockResponse::ok(r#"{"answer":"a","results":[{"title":"r1"}],"sources":[{"title":"s1"},{"title":"s2"}]}"#)
            ),
        ]).await;

        let tavily_client = TavilyClient::new("key".to_string(), server.url("/search")).unwrap();
        let response = tavily_client.search(&SearchRequest::basic("q")).await.unwrap();

        assert_eq!(Some("a".to_string()), response.answer);
        assert_eq!(1, response.search_sources().len());
        assert_eq!(Some("r1".to_string()), response.search_sources()[0].title);
    }

    #[tokio::test]
    async fn test_search_error_status() {
        let server = TestServer::start(vec![
            ("/search", MockResponse::status(401, r#"{"detail":"invalid api key"}"#)),
        ]).await;

        let tavily_client = TavilyClient::new("bad".to_string(), server.url("/search")).unwrap();
        let error = tavily_client.search(&SearchRequest::basic("q")).await.unwrap_err();
        let message = format!("{:#}", error);

        assert!(message.contains("401"), "message: {}", message);
        assert!(message.contains("invalid api key"), "message: {}", message);
    }

    #[tokio::test]
    async fn test_search_malformed_body() {
        let server = TestServer::start(vec![
            ("/search", MockResponse::ok("<html>gateway</html>")),
        ]).await;

        let tavily_client = TavilyClient::new("key".to_string(), server.url("/search")).unwrap();

        assert!(tavily_client.search(&SearchRequest::basic("q")).await.is_err());
    }
}
