use lazy_static::lazy_static;
use regex::Regex;

use crate::model::data::post::ParsedPost;

lazy_static! {
    static ref EDIT_TIME_REGEX: Regex = Regex::new(r"修改于").unwrap();
    static ref VIA_SOURCE_REGEX: Regex = Regex::new(r"·\s*来自").unwrap();
    static ref CLOCK_TIME_REGEX: Regex = Regex::new(r"\d{1,2}:\d{2}").unwrap();
    static ref DATE_REGEX: Regex = Regex::new(r"\d{1,2}-\d{1,2}").unwrap();
}

pub const CONTENT_LINE_MIN_LENGTH: usize = 20;
pub const CONTENT_MAX_LINES: usize = 5;
pub const CONTENT_MAX_LENGTH: usize = 500;
pub const TITLE_MIN_LENGTH: usize = 10;
pub const TITLE_MAX_LENGTH: usize = 100;
pub const ELLIPSIS: &str = "...";

pub struct MetadataRule {
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
}

/// Evaluated top to bottom, the first matching rule classifies the line.
pub const METADATA_RULES: [MetadataRule; 4] = [
    MetadataRule { name: "edit_time", matches: is_edit_time_line },
    MetadataRule { name: "via_source", matches: is_via_source_line },
    MetadataRule { name: "clock_time", matches: is_clock_time_line },
    MetadataRule { name: "date", matches: is_date_line },
];

fn is_edit_time_line(line: &str) -> bool {
    return EDIT_TIME_REGEX.is_match(line);
}

fn is_via_source_line(line: &str) -> bool {
    return VIA_SOURCE_REGEX.is_match(line);
}

fn is_clock_time_line(line: &str) -> bool {
    return CLOCK_TIME_REGEX.is_match(line);
}

fn is_date_line(line: &str) -> bool {
    return DATE_REGEX.is_match(line);
}

/// Returns the name of the first metadata rule matching `line`.
pub fn metadata_rule_for(line: &str) -> Option<&'static str> {
    return METADATA_RULES.iter()
        .find(|rule| (rule.matches)(line))
        .map(|rule| rule.name);
}

/// Splits the visible text of one feed element into a best-effort post.
/// Never fails: anything not found keeps its placeholder.
pub fn classify(raw_block: &str, index: usize) -> ParsedPost {
    let lines = raw_block
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<&str>>();

    let mut post = ParsedPost::placeholder(index);
    let mut author_line: Option<&str> = None;
    let mut content_lines = Vec::<&str>::with_capacity(CONTENT_MAX_LINES);

    for line in lines.iter().copied() {
        if metadata_rule_for(line).is_some() {
            author_line = Some(line);
            continue;
        }

        if line.chars().count() > CONTENT_LINE_MIN_LENGTH {
            content_lines.push(line);
        }
    }

    if let Some(author_line) = author_line {
        post.author = author_line.to_string();
    }

    if !content_lines.is_empty() {
        let joined = content_lines.iter()
            .take(CONTENT_MAX_LINES)
            .copied()
            .collect::<Vec<&str>>()
            .join(" ");

        post.content = truncate_content(joined);
    }

    // Every line is a title candidate, content lines included.
    let title_line = lines.iter().find(|line| {
        let length = line.chars().count();
        return length > TITLE_MIN_LENGTH
            && length < TITLE_MAX_LENGTH
            && metadata_rule_for(line).is_none();
    });

    if let Some(title_line) = title_line {
        post.title = title_line.to_string();
    }

    return post;
}

fn truncate_content(content: String) -> String {
    if content.chars().count() <= CONTENT_MAX_LENGTH {
        return content;
    }

    let mut truncated = content.chars().take(CONTENT_MAX_LENGTH).collect::<String>();
    truncated.push_str(ELLIPSIS);

    return truncated;
}
