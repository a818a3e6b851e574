use std::fmt::{Display, Formatter};
use std::str::FromStr;

use anyhow::anyhow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Xueqiu,
    Xiaohongshu,
}

impl Platform {
    pub fn name(&self) -> &'static str {
        return match self {
            Platform::Xueqiu => "xueqiu",
            Platform::Xiaohongshu => "xiaohongshu",
        };
    }

    pub fn home_url(&self) -> &'static str {
        return match self {
            Platform::Xueqiu => "https://xueqiu.com/",
            Platform::Xiaohongshu => "https://www.xiaohongshu.com/",
        };
    }

    /// Builds the search query sent to the search service for this platform.
    pub fn search_query(&self, keyword: &str) -> String {
        let (prefix, default_topic) = match self {
            Platform::Xueqiu => ("雪球", "热门讨论"),
            Platform::Xiaohongshu => ("小红书", "热门内容"),
        };

        let keyword = keyword.trim();
        if keyword.is_empty() {
            return format!("{} {}", prefix, default_topic);
        }

        return format!("{} {}", prefix, keyword);
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())?;

        return Ok(());
    }
}

impl FromStr for Platform {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        return match value.trim().to_lowercase().as_str() {
            "xueqiu" => Ok(Platform::Xueqiu),
            "xiaohongshu" => Ok(Platform::Xiaohongshu),
            _ => Err(anyhow!("Unsupported platform \'{}\'", value)),
        };
    }
}

#[test]
fn test_search_query() {
    assert_eq!("雪球 热门讨论", Platform::Xueqiu.search_query(""));
    assert_eq!("雪球 股票投资", Platform::Xueqiu.search_query("股票投资"));
    assert_eq!("小红书 热门内容", Platform::Xiaohongshu.search_query("  "));
    assert_eq!("小红书 美妆", Platform::Xiaohongshu.search_query(" 美妆 "));
}

#[test]
fn test_from_str() {
    assert_eq!(Platform::Xueqiu, Platform::from_str("XueQiu").unwrap());
    assert_eq!(Platform::Xiaohongshu, Platform::from_str("xiaohongshu").unwrap());
    assert!(Platform::from_str("weibo").is_err());
}
