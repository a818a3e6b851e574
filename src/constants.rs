pub const XUEQIU_WEB_URL: &str = "https://xueqiu.com";
pub const XUEQIU_COOKIE_DOMAIN: &str = ".xueqiu.com";
pub const TAVILY_SEARCH_ENDPOINT: &str = "https://api.tavily.com/search";

pub const DESKTOP_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
    Chrome/120.0.0.0 Safari/537.36";

pub const COOKIE_USER_ID: &str = "u";
pub const COOKIE_ACCESS_TOKEN: &str = "xq_a_token";

/// Elements whose trimmed text is shorter than this are never classified.
pub const RAW_BLOCK_MIN_LENGTH: usize = 20;
pub const DEFAULT_BROWSER_MAX_POSTS: usize = 10;
pub const DIRECT_ACCESS_MAX_POSTS: usize = 5;

pub const BODY_PREVIEW_CHARS: usize = 200;
