#[cfg(test)]
mod tests {
    use crate::config::XueqiuCredentials;
    use crate::model::data::post::FetchMethod;
    use crate::service::xueqiu_client::XueqiuClient;
    use crate::tests::shared::server_shared::{MockResponse, TestServer};

    const FIRST_ENDPOINT: &str = "/v4/statuses/public_timeline_by_category.json";
    const SECOND_ENDPOINT: &str = "/statuses/hot_timeline.json";
    const THIRD_ENDPOINT: &str = "/trends/statuses.json";

    fn credentials() -> XueqiuCredentials {
        return XueqiuCredentials {
            user_id: "1234567".to_string(),
            access_token: "token0123456789".to_string(),
        };
    }

    fn statuses_json(count: usize) -> String {
        let statuses = (1..=count)
            .map(|id| {
                format!(
                    r#"{{"id":{id},"title":"title {id}","text":"text {id}","user":{{"screen_name":"user{id}"}},"target":"/u/{id}","like_count":{id},"created_at":"today"}}"#
                )
            })
            .collect::<Vec<String>>();

        return statuses.join(",");
    }

    fn client(server: &TestServer) -> XueqiuClient {
        return XueqiuClient::new(&server.base_url(), &credentials()).unwrap();
    }

    #[tokio::test]
    async fn test_home_page_failure_short_circuits() {
        let server = TestServer::start(vec![
            ("/", MockResponse::status(403, "forbidden")),
            (FIRST_ENDPOINT, MockResponse::ok(&format!(r#"{{"statuses":[{}]}}"#, statuses_json(3)))),
        ]).await;

        let posts = client(&server).try_direct_access().await;

        assert!(posts.is_empty());
        assert_eq!(vec!["/".to_string()], server.requested_paths());
    }

    #[tokio::test]
    async fn test_falls_through_to_next_endpoint() {
        let server = TestServer::start(vec![
            ("/", MockResponse::ok("<html></html>")),
            (FIRST_ENDPOINT, MockResponse::status(500, "internal error")),
            (SECOND_ENDPOINT, MockResponse::ok(&format!(r#"{{"list":[{}]}}"#, statuses_json(7)))),
            (THIRD_ENDPOINT, MockResponse::ok(&format!("[{}]", statuses_json(1)))),
        ]).await;

        let posts = client(&server).try_direct_access().await;

        assert_eq!(5, posts.len());
        assert_eq!("title 1", posts[0].title);
        assert_eq!("text 1", posts[0].content);
        assert_eq!("user1", posts[0].author);
        assert_eq!("today", posts[0].time);
        assert_eq!("https://xueqiu.com/u/1", posts[0].url);
        assert_eq!(FetchMethod::DirectApi, posts[0].method);
        assert_eq!("title 5", posts[4].title);

        assert_eq!(
            vec!["/".to_string(), FIRST_ENDPOINT.to_string(), SECOND_ENDPOINT.to_string()],
            server.requested_paths()
        );
    }

    #[tokio::test]
    async fn test_bare_array_and_unknown_shapes() {
        let server = TestServer::start(vec![
            ("/", MockResponse::ok("<html></html>")),
            (FIRST_ENDPOINT, MockResponse::ok(r#"{"error_code":"400016"}"#)),
            (SECOND_ENDPOINT, MockResponse::ok("not json at all")),
            (THIRD_ENDPOINT, MockResponse::ok(&format!("[{}]", statuses_json(2)))),
        ]).await;

        let posts = client(&server).try_direct_access().await;

        assert_eq!(2, posts.len());
        assert_eq!("title 2", posts[1].title);
        assert_eq!(4, server.requested_paths().len());
    }

    #[tokio::test]
    async fn test_all_endpoints_empty() {
        let server = TestServer::start(vec![
            ("/", MockResponse::ok("<html></html>")),
            (FIRST_ENDPOINT, MockResponse::ok(r#"{"statuses":[]}"#)),
            (SECOND_ENDPOINT, MockResponse::ok(r#"{"list":[1, 2, "three"]}"#)),
        ]).await;

        let posts = client(&server).try_direct_access().await;

        assert!(posts.is_empty());
        assert_eq!(
            vec![
                "/".to_string(),
                FIRST_ENDPOINT.to_string(),
                SECOND_ENDPOINT.to_string(),
                THIRD_ENDPOINT.to_string()
            ],
            server.requested_paths()
        );
    }

    #[tokio::test]
    async fn test_session_cookies_are_sent() {
        let server = TestServer::start(vec![
            ("/", MockResponse::ok("<html></html>")),
            (FIRST_ENDPOINT, MockResponse::ok(&format!(r#"{{"statuses":[{}]}}"#, statuses_json(1)))),
        ]).await;

        let posts = client(&server).try_direct_access().await;
        assert_eq!(1, posts.len());

        let requests = server.requests();
        assert_eq!(2, requests.len());

        for request in &requests {
            assert!(request.cookie.contains("u=1234567"), "cookie: {}", request.cookie);
            assert!(request.cookie.contains("xq_a_token=token0123456789"), "cookie: {}", request.cookie);
        }

        assert!(requests[1].query.contains("category=6"));
        assert!(requests[1].query.contains("page=1"));
    }

    #[tokio::test]
    async fn test_search_posts() {
        let server = TestServer::start(vec![
            ("/statuses/search.json", MockResponse::ok(&format!(r#"{{"count":2,"statuses":[{}]}}"#, statuses_json(2)))),
        ]).await;

        let statuses = client(&server).search_posts("maotai", 3).await.unwrap();

        assert_eq!(2, statuses.len());
        assert_eq!(Some("user2"), statuses[1].screen_name());

        let requests = server.requests();
        assert_eq!("GET", requests[0].method);
        assert!(requests[0].query.contains("q=maotai"));
        assert!(requests[0].query.contains("count=3"));
        assert!(requests[0].query.contains("t="));
    }

    #[tokio::test]
    async fn test_user_posts_and_hot_topics() {
        let server = TestServer::start(vec![
            ("/v4/statuses/user_timeline.json", MockResponse::ok(&format!(r#"{{"statuses":[{}]}}"#, statuses_json(4)))),
            ("/v2/statuses/mini.json", MockResponse::ok(r#"{"items":[]}"#)),
        ]).await;

        let client = client(&server);

        let statuses = client.user_posts("42", 20).await.unwrap();
        assert_eq!(4, statuses.len());
        assert!(server.requests()[0].query.contains("user_id=42"));

        let error = client.hot_topics(10).await.unwrap_err();
        assert!(format!("{:#}", error).contains("unexpected response format"));
    }

    #[tokio::test]
    async fn test_loosely_typed_statuses_are_kept() {
        let server = TestServer::start(vec![
            ("/", MockResponse::ok("<html></html>")),
            (
                FIRST_ENDPOINT,
                MockResponse::ok(r#"{"statuses":[{"id":"12345","title":"t","text":"body","like_count":-1}]}"#)
            ),
            (
                "/statuses/search.json",
                MockResponse::ok(r#"{"statuses":[{"id":1},{"id":2,"comment_count":"n/a"}]}"#)
            ),
        ]).await;

        let client = client(&server);

        let posts = client.try_direct_access().await;
        assert_eq!(1, posts.len());
        assert_eq!("t", posts[0].title);
        assert_eq!(0, posts[0].likes);
        assert_eq!(
            vec!["/".to_string(), FIRST_ENDPOINT.to_string()],
            server.requested_paths()
        );

        let statuses = client.search_posts("maotai", 10).await.unwrap();
        assert_eq!(2, statuses.len());
        assert_eq!(None, statuses[1].comment_count);
    }

    #[tokio::test]
    async fn test_bad_status_code_is_an_error() {
        let server = TestServer::start(vec![
            ("/statuses/search.json", MockResponse::status(400, r#"{"error_description":"need login"}"#)),
        ]).await;

        let error = client(&server).search_posts("maotai", 10).await.unwrap_err();
        let message = format!("{:#}", error);

        assert!(message.contains("400"), "message: {}", message);
        assert!(message.contains("need login"), "message: {}", message);
    }

    #[tokio::test]
    async fn test_post_detail() {
        let server = TestServer::start(vec![
            (
                "/statuses/original/show.json",
                MockResponse::ok(
                    r#"{"id":99,"title":"detail","text":"full text","user":{"screen_name":"bob"},"tags":[{"tag":"银行"},{"tag":""}]}"#
                )
            ),
        ]).await;

        let status = client(&server).post_detail("99").await.unwrap();

        assert_eq!(Some(99), status.id);
        assert_eq!(vec!["银行"], status.tag_names());
        assert_eq!("full text", status.to_feed_post().content);
        assert!(server.requests()[0].query.contains("id=99"));
    }
}
