use clap::{Parser, Subcommand};

use crate::constants::DEFAULT_BROWSER_MAX_POSTS;
use crate::model::data::platform::Platform;

#[derive(Debug, Parser)]
#[command(name = "xqfeed", about = "Fetches Xueqiu posts through the API, a headless browser or web search")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render the home feed in headless Chromium and classify each post
    Browser {
        #[arg(long, default_value_t = DEFAULT_BROWSER_MAX_POSTS)]
        max_posts: usize,
    },
    /// Query the timeline JSON endpoints directly
    Direct,
    /// Direct access with web search as the fallback
    Comprehensive,
    /// Hot posts from the mini feed
    Hot {
        #[arg(long, default_value_t = 10)]
        count: usize,
    },
    /// Search posts on Xueqiu
    Search {
        query: String,
        #[arg(long, default_value_t = 10)]
        count: usize,
    },
    /// Timeline of one user
    User {
        user_id: String,
        #[arg(long, default_value_t = 20)]
        count: usize,
    },
    /// Full content of one post
    Detail {
        post_id: String,
    },
    /// Free-form web search
    Tavily {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Search one platform once and print the push summary
    Push {
        platform: Platform,
        #[arg(default_value = "")]
        keyword: String,
    },
    /// One push per platform with the hourly keywords
    Demo,
    /// Run the periodic push jobs until interrupted
    Schedule,
}

#[test]
fn test_parse_commands() {
    let cli = Cli::try_parse_from(["xqfeed", "browser"]).unwrap();
    assert!(matches!(cli.command, Command::Browser { max_posts: DEFAULT_BROWSER_MAX_POSTS }));

    let cli = Cli::try_parse_from(["xqfeed", "push", "xiaohongshu", "美妆"]).unwrap();
    match cli.command {
        Command::Push { platform, keyword } => {
            assert_eq!(Platform::Xiaohongshu, platform);
            assert_eq!("美妆", keyword);
        }
        command => panic!("unexpected command {:?}", command),
    }

    let cli = Cli::try_parse_from(["xqfeed", "tavily", "雪球", "热门"]).unwrap();
    match cli.command {
        Command::Tavily { query } => assert_eq!(vec!["雪球", "热门"], query),
        command => panic!("unexpected command {:?}", command),
    }

    assert!(Cli::try_parse_from(["xqfeed", "push", "weibo"]).is_err());
}
