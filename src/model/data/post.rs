use std::fmt::{Display, Formatter};

pub const NO_TITLE: &str = "no title";
pub const UNKNOWN_AUTHOR: &str = "unknown author";
pub const NO_CONTENT: &str = "no content";
pub const UNKNOWN_TIME: &str = "unknown time";
pub const NOT_AVAILABLE: &str = "N/A";

/// Best-effort extraction from the rendered text of one feed element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPost {
    pub index: usize,
    pub title: String,
    pub author: String,
    pub content: String,
    pub time_info: String,
    pub interactions: String,
}

impl ParsedPost {
    pub fn placeholder(index: usize) -> ParsedPost {
        return ParsedPost {
            index,
            title: NO_TITLE.to_string(),
            author: UNKNOWN_AUTHOR.to_string(),
            content: String::new(),
            time_info: String::new(),
            interactions: String::new(),
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMethod {
    DirectApi,
    TavilySearch,
    TavilySource,
}

impl Display for FetchMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchMethod::DirectApi => write!(f, "direct_api")?,
            FetchMethod::TavilySearch => write!(f, "tavily_search")?,
            FetchMethod::TavilySource => write!(f, "tavily_source")?,
        }

        return Ok(());
    }
}

/// A post normalized from either the Xueqiu JSON endpoints or the search fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedPost {
    pub title: String,
    pub content: String,
    pub author: String,
    pub time: String,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub url: String,
    pub method: FetchMethod,
}
