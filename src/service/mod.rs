pub mod browser_collector;
pub mod content_fetcher;
pub mod post_scheduler;
pub mod search_service;
pub mod tavily_client;
pub mod xueqiu_client;
