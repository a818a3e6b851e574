use std::fmt::Write;

use crate::helpers::string_helpers::truncate_with_ellipsis;
use crate::model::data::post::{FeedPost, ParsedPost, NOT_AVAILABLE, NO_TITLE};
use crate::service::search_service::SearchResponse;

const SEPARATOR_WIDTH: usize = 60;
const FEED_POST_CONTENT_PREVIEW_CHARS: usize = 300;
const SEARCH_RESULT_CONTENT_PREVIEW_CHARS: usize = 200;

pub fn format_parsed_post(post: &ParsedPost) -> String {
    let mut output = String::with_capacity(256);

    let _ = writeln!(output, "Post {}:", post.index);
    let _ = writeln!(output, "  title: {}", post.title);
    let _ = writeln!(output, "  author: {}", post.author);
    let _ = writeln!(output, "  content: {}", post.content);
    output.push_str(&"-".repeat(SEPARATOR_WIDTH));

    return output;
}

pub fn format_parsed_posts(posts: &[ParsedPost]) -> String {
    if posts.is_empty() {
        return String::from("No posts collected");
    }

    let mut output = format!("Collected {} posts:\n{}\n", posts.len(), "=".repeat(SEPARATOR_WIDTH));
    for post in posts {
        output.push('\n');
        output.push_str(&format_parsed_post(post));
        output.push('\n');
    }

    return output;
}

/// `ordinal` is the 1-based position in the printed listing.
pub fn format_feed_post(ordinal: usize, post: &FeedPost) -> String {
    let mut output = String::with_capacity(512);

    let _ = writeln!(output, "{}. {}", ordinal, post.title);
    let _ = writeln!(output, "   author: {}", post.author);
    let _ = writeln!(output, "   time: {}", post.time);
    let _ = writeln!(
        output,
        "   content: {}",
        truncate_with_ellipsis(&post.content, FEED_POST_CONTENT_PREVIEW_CHARS)
    );
    let _ = writeln!(
        output,
        "   interactions: likes {} | comments {} | shares {}",
        post.likes,
        post.comments,
        post.shares
    );
    let _ = writeln!(output, "   url: {}", post.url);
    let _ = writeln!(output, "   method: {}", post.method);
    output.push_str(&"-".repeat(SEPARATOR_WIDTH));

    return output;
}

pub fn format_feed_posts(posts: &[FeedPost]) -> String {
    if posts.is_empty() {
        return String::from("No content could be fetched");
    }

    let mut output = format!("Fetched {} posts:\n{}\n", posts.len(), "=".repeat(SEPARATOR_WIDTH));
    for (index, post) in posts.iter().enumerate() {
        output.push('\n');
        output.push_str(&format_feed_post(index + 1, post));
        output.push('\n');
    }

    return output;
}

pub fn format_search_response(response: &SearchResponse) -> String {
    let mut output = String::with_capacity(1024);

    if let Some(answer) = response.answer.as_ref().filter(|answer| !answer.is_empty()) {
        let _ = writeln!(output, "summary: {}\n", answer);
    }

    output.push_str("results:");
    for (index, source) in response.search_sources().iter().enumerate() {
        let _ = write!(
            output,
            "\n{}. {}\n   url: {}\n   content: {}\n",
            index + 1,
            source.title.as_deref().unwrap_or(NO_TITLE),
            source.url.as_deref().unwrap_or(NOT_AVAILABLE),
            truncate_with_ellipsis(source.content.as_deref().unwrap_or(NOT_AVAILABLE), SEARCH_RESULT_CONTENT_PREVIEW_CHARS)
        );
    }

    return output;
}
