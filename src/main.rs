use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use chrono::Local;
use clap::Parser;
use log::LevelFilter;

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::helpers::display_helpers;
use crate::model::data::platform::Platform;
use crate::model::data::post::FeedPost;
use crate::service::browser_collector::BrowserCollector;
use crate::service::content_fetcher::ContentFetcher;
use crate::service::post_scheduler::{default_jobs, fetch_and_push, PostScheduler};
use crate::service::search_service::{NoopSearchService, SearchRequest, SearchService};
use crate::service::tavily_client::TavilyClient;
use crate::service::xueqiu_client::XueqiuClient;

#[macro_use]
extern crate log;

mod cli;
mod config;
mod constants;
mod helpers;
mod model;
mod service;


#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::from_env()?;
    init_logger(config.is_dev_build);

    info!("main() starting {:?}", cli.command);
    config.log_summary();

    match cli.command {
        Command::Browser { max_posts } => {
            let credentials = config.require_credentials()?.clone();
            let home_url = format!("{}/", config.xueqiu_base_url.trim_end_matches('/'));
            let collector = BrowserCollector::new(credentials, home_url, config.chromium_path.clone());

            let posts = collector.get_posts(max_posts).await;
            println!("{}", display_helpers::format_parsed_posts(&posts));
            info!("main() done, collected {} posts", posts.len());
        }
        Command::Direct => {
            let posts = xueqiu_client(&config)?.try_direct_access().await;
            print_feed_posts(&posts);
        }
        Command::Comprehensive => {
            let content_fetcher = ContentFetcher::new(
                xueqiu_client(&config)?,
                Arc::new(TavilyClient::new(config.require_tavily_api_key()?.to_string(), config.tavily_endpoint.clone())?),
                Duration::from_secs(1)
            );

            let posts = content_fetcher.get_comprehensive_content().await;
            print_feed_posts(&posts);
        }
        Command::Hot { count } => {
            let statuses = xueqiu_client(&config)?.hot_topics(count).await?;
            let posts = statuses.iter().map(|status| status.to_feed_post()).collect::<Vec<FeedPost>>();
            print_feed_posts(&posts);
        }
        Command::Search { query, count } => {
            let statuses = xueqiu_client(&config)?.search_posts(&query, count).await?;
            let posts = statuses.iter().map(|status| status.to_feed_post()).collect::<Vec<FeedPost>>();
            print_feed_posts(&posts);
        }
        Command::User { user_id, count } => {
            let statuses = xueqiu_client(&config)?.user_posts(&user_id, count).await?;
            let posts = statuses.iter().map(|status| status.to_feed_post()).collect::<Vec<FeedPost>>();
            print_feed_posts(&posts);
        }
        Command::Detail { post_id } => {
            let status = xueqiu_client(&config)?.post_detail(&post_id).await?;
            println!("{}", display_helpers::format_feed_post(1, &status.to_feed_post()));

            let tags = status.tag_names();
            if !tags.is_empty() {
                println!("tags: {}", tags.join(", "));
            }
        }
        Command::Tavily { query } => {
            let tavily_client = TavilyClient::new(
                config.require_tavily_api_key()?.to_string(),
                config.tavily_endpoint.clone()
            )?;

            let response = tavily_client.search(&SearchRequest::basic(&query.join(" "))).await?;
            println!("{}", display_helpers::format_search_response(&response));
        }
        Command::Push { platform, keyword } => {
            fetch_and_push(&search_service(&config)?, platform, &keyword, Local::now().naive_local()).await;
        }
        Command::Demo => {
            let search_service = search_service(&config)?;

            fetch_and_push(&search_service, Platform::Xiaohongshu, "热门", Local::now().naive_local()).await;
            tokio::time::sleep(Duration::from_secs(2)).await;
            fetch_and_push(&search_service, Platform::Xueqiu, "热门讨论", Local::now().naive_local()).await;
        }
        Command::Schedule => {
            let jobs = default_jobs(Local::now().naive_local());
            let mut post_scheduler = PostScheduler::new(search_service(&config)?, jobs, config.scheduler_tick);
            let working_flag = post_scheduler.working_flag();

            tokio::select! {
                _ = post_scheduler.start() => {}
                _ = tokio::signal::ctrl_c() => {
                    info!("main() ctrl-c received, stopping scheduler");
                    working_flag.store(false, Ordering::SeqCst);
                }
            }
        }
    }

    return Ok(());
}

fn xueqiu_client(config: &Config) -> anyhow::Result<XueqiuClient> {
    return XueqiuClient::new(&config.xueqiu_base_url, config.require_credentials()?);
}

fn search_service(config: &Config) -> anyhow::Result<Arc<dyn SearchService>> {
    let search_service: Arc<dyn SearchService> = match &config.tavily_api_key {
        Some(api_key) => Arc::new(TavilyClient::new(api_key.clone(), config.tavily_endpoint.clone())?),
        None => Arc::new(NoopSearchService),
    };

    return Ok(search_service);
}

fn print_feed_posts(posts: &[FeedPost]) {
    println!("{}", display_helpers::format_feed_posts(posts));
    info!("main() done, fetched {} posts", posts.len());
}

fn init_logger(is_dev_build: bool) {
    let level_filter = if is_dev_build {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::builder()
        .filter_level(level_filter)
        .init();
}
