use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::{CookieParam, SetUserAgentOverrideParams};
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;

use crate::config::XueqiuCredentials;
use crate::constants::{COOKIE_ACCESS_TOKEN, COOKIE_USER_ID, DESKTOP_USER_AGENT, RAW_BLOCK_MIN_LENGTH, XUEQIU_COOKIE_DOMAIN};
use crate::model::data::post::ParsedPost;
use crate::model::parser::post_text_classifier;

/// Tried in order, the first selector matching anything wins.
pub const FEED_SELECTORS: [&str; 4] = ["article", "div.feed-item", "div.status-item", "div.stream-item"];
pub const GENERIC_FEED_SELECTOR: &str =
    r#"div[class*="feed" i], div[class*="status" i], div[class*="post" i]"#;

const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(15);
const RENDER_WAIT: Duration = Duration::from_secs(3);

pub struct BrowserCollector {
    credentials: XueqiuCredentials,
    home_url: String,
    chromium_path: Option<String>,
}

impl BrowserCollector {
    pub fn new(
        credentials: XueqiuCredentials,
        home_url: String,
        chromium_path: Option<String>
    ) -> BrowserCollector {
        return BrowserCollector { credentials, home_url, chromium_path };
    }

    /// Renders the feed in headless Chromium and classifies up to `max_posts` elements.
    /// Failures are logged and yield no posts. The browser is closed in every case.
    pub async fn get_posts(&self, max_posts: usize) -> Vec<ParsedPost> {
        let (mut browser, handler_task) = match self.launch().await {
            Ok(launched) => launched,
            Err(error) => {
                error!("get_posts() Failed to launch browser: {:#}", error);
                return vec![];
            }
        };

        let result = self.collect(&browser, max_posts).await;

        if let Err(error) = browser.close().await {
            warn!("get_posts() Failed to close browser: {}", error);
        }
        if let Err(error) = browser.wait().await {
            warn!("get_posts() Failed to wait for browser exit: {}", error);
        }
        handler_task.abort();

        return match result {
            Ok(posts) => {
                info!("get_posts() collected {} posts", posts.len());
                posts
            }
            Err(error) => {
                error!("get_posts() Browser automation failed: {:#}", error);
                vec![]
            }
        };
    }

    async fn launch(&self) -> anyhow::Result<(Browser, JoinHandle<()>)> {
        let mut builder = BrowserConfig::builder()
            .arg("--no-sandbox")
            .arg("--disable-setuid-sandbox")
            .arg("--disable-dev-shm-usage");

        if let Some(chrome_path) = find_chromium(&self.chromium_path) {
            info!("launch() using chromium at {}", chrome_path.display());
            builder = builder.chrome_executable(chrome_path);
        }

        let browser_config = builder
            .build()
            .map_err(|error| anyhow!("launch() Failed to build browser config: {}", error))?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .context("launch() Failed to launch chromium")?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(error) = event {
                    debug!("launch() browser handler error: {}", error);
                }
            }
        });

        return Ok((browser, handler_task));
    }

    async fn collect(&self, browser: &Browser, max_posts: usize) -> anyhow::Result<Vec<ParsedPost>> {
        let page = browser.new_page("about:blank")
            .await
            .context("collect() Failed to open a new page")?;

        page.set_user_agent(user_agent_override())
            .await
            .context("collect() Failed to set user agent")?;

        page.set_cookies(self.cookies()?)
            .await
            .context("collect() Failed to set cookies")?;

        info!("collect() opening {}...", self.home_url);

        tokio::time::timeout(NAVIGATION_TIMEOUT, page.goto(self.home_url.as_str()))
            .await
            .map_err(|_| anyhow!("collect() navigation timed out after {}s", NAVIGATION_TIMEOUT.as_secs()))?
            .with_context(|| format!("collect() Failed to open \'{}\'", self.home_url))?;

        tokio::time::sleep(RENDER_WAIT).await;

        info!("collect() opening {}... done, looking for feed elements", self.home_url);

        let texts = read_feed_texts(&page, max_posts).await?;
        return Ok(parse_listing(&texts, max_posts));
    }

    fn cookies(&self) -> anyhow::Result<Vec<CookieParam>> {
        let cookies = [
            (COOKIE_USER_ID, &self.credentials.user_id),
            (COOKIE_ACCESS_TOKEN, &self.credentials.access_token),
        ];

        let mut cookie_params = Vec::<CookieParam>::with_capacity(cookies.len());

        for (name, value) in cookies {
            let cookie_param = CookieParam::builder()
                .name(name)
                .value(value.as_str())
                .domain(XUEQIU_COOKIE_DOMAIN)
                .path("/")
                .build()
                .map_err(|error| anyhow!("cookies() Failed to build cookie \'{}\': {}", name, error))?;

            cookie_params.push(cookie_param);
        }

        return Ok(cookie_params);
    }
}

fn user_agent_override() -> SetUserAgentOverrideParams {
    return SetUserAgentOverrideParams::new(DESKTOP_USER_AGENT);
}

/// Reads the inner text of the first `max_posts` feed elements. An element whose text
/// cannot be read is kept as `None` so positions stay stable.
async fn read_feed_texts(page: &Page, max_posts: usize) -> anyhow::Result<Vec<Option<String>>> {
    let mut elements = vec![];

    for selector in FEED_SELECTORS {
        match page.find_elements(selector).await {
            Ok(found) if !found.is_empty() => {
                info!("read_feed_texts() selector \'{}\' found {} elements", selector, found.len());
                elements = found;
                break;
            }
            Ok(_) => {}
            Err(error) => {
                debug!("read_feed_texts() selector \'{}\' failed: {}", selector, error);
            }
        }
    }

    if elements.is_empty() {
        info!("read_feed_texts() no feed elements found, trying generic selector");

        elements = page.find_elements(GENERIC_FEED_SELECTOR)
            .await
            .context("read_feed_texts() generic selector failed")?;
    }

    info!("read_feed_texts() parsing {} elements", elements.len().min(max_posts));

    let mut texts = Vec::<Option<String>>::with_capacity(max_posts);

    for (position, element) in elements.iter().take(max_posts).enumerate() {
        match element.inner_text().await {
            Ok(text) => texts.push(text),
            Err(error) => {
                error!("read_feed_texts() Failed to read element {}: {}", position + 1, error);
                texts.push(None);
            }
        }
    }

    return Ok(texts);
}

/// Applies the minimum-length guard and classifies what remains. The ordinal is the
/// element's 1-based position in the listing, skipped elements included.
pub fn parse_listing(texts: &[Option<String>], max_posts: usize) -> Vec<ParsedPost> {
    let mut posts = Vec::<ParsedPost>::with_capacity(texts.len().min(max_posts));

    for (position, text) in texts.iter().take(max_posts).enumerate() {
        let text = match text {
            Some(text) => text,
            None => continue,
        };

        if !passes_min_length(text) {
            debug!("parse_listing() skipping element {}, text is too short", position + 1);
            continue;
        }

        posts.push(post_text_classifier::classify(text, position + 1));
    }

    return posts;
}

pub fn passes_min_length(raw_block: &str) -> bool {
    return raw_block.trim().chars().count() >= RAW_BLOCK_MIN_LENGTH;
}

fn find_chromium(configured_path: &Option<String>) -> Option<PathBuf> {
    if let Some(configured_path) = configured_path {
        let path = PathBuf::from(configured_path);
        if path.exists() {
            return Some(path);
        }

        warn!("find_chromium() configured path \'{}\' does not exist", configured_path);
    }

    for binary_name in ["google-chrome", "chromium", "chromium-browser"] {
        if let Ok(path) = which::which(binary_name) {
            return Some(path);
        }
    }

    // Let chromiumoxide try its own detection
    return None;
}
