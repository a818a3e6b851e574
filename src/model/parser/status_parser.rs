use chrono::{Local, TimeZone};
use serde::Deserialize;
use serde_json::Value;

use crate::constants::XUEQIU_WEB_URL;
use crate::helpers::serde_helpers::{deserialize_lenient, deserialize_lenient_string, deserialize_lenient_u64};
use crate::model::data::post::{FeedPost, FetchMethod, NO_CONTENT, NO_TITLE, UNKNOWN_AUTHOR, UNKNOWN_TIME};

pub enum TimelineParseResult {
    Ok(Vec<XueqiuStatus>),
    NoStatuses,
    UnknownShape,
}

/// Timeline endpoints disagree on where the statuses live.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TimelineShape {
    Statuses { statuses: Vec<Value> },
    List { list: Vec<Value> },
    Bare(Vec<Value>),
}

/// Xueqiu is loose with types, so a wrong-typed field becomes `None` instead of dropping the status.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct XueqiuUser {
    #[serde(deserialize_with = "deserialize_lenient_u64")]
    pub id: Option<u64>,
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub screen_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct XueqiuTag {
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub tag: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct XueqiuStatus {
    #[serde(deserialize_with = "deserialize_lenient_u64")]
    pub id: Option<u64>,
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub text: Option<String>,
    pub created_at: Option<Value>,
    #[serde(deserialize_with = "deserialize_lenient_u64")]
    pub like_count: Option<u64>,
    #[serde(deserialize_with = "deserialize_lenient_u64")]
    pub comment_count: Option<u64>,
    #[serde(deserialize_with = "deserialize_lenient_u64")]
    pub retweet_count: Option<u64>,
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub target: Option<String>,
    #[serde(deserialize_with = "deserialize_lenient")]
    pub user: Option<XueqiuUser>,
    #[serde(deserialize_with = "deserialize_lenient")]
    pub tags: Option<Vec<XueqiuTag>>,
}

impl XueqiuStatus {
    pub fn screen_name(&self) -> Option<&str> {
        return self.user.as_ref()
            .and_then(|user| user.screen_name.as_deref())
            .filter(|screen_name| !screen_name.is_empty());
    }

    pub fn href(&self) -> String {
        return format!("{}{}", XUEQIU_WEB_URL, self.target.as_deref().unwrap_or(""));
    }

    pub fn tag_names(&self) -> Vec<&str> {
        return self.tags.as_ref()
            .map(|tags| {
                tags.iter()
                    .filter_map(|tag| tag.tag.as_deref())
                    .filter(|tag| !tag.is_empty())
                    .collect::<Vec<&str>>()
            })
            .unwrap_or_default();
    }

    pub fn to_feed_post(&self) -> FeedPost {
        let title = first_non_empty(&[&self.title, &self.description]).unwrap_or(NO_TITLE);
        let content = first_non_empty(&[&self.text, &self.description]).unwrap_or(NO_CONTENT);

        return FeedPost {
            title: title.to_string(),
            content: content.to_string(),
            author: self.screen_name().unwrap_or(UNKNOWN_AUTHOR).to_string(),
            time: format_created_at(&self.created_at),
            likes: self.like_count.unwrap_or(0),
            comments: self.comment_count.unwrap_or(0),
            shares: self.retweet_count.unwrap_or(0),
            url: self.href(),
            method: FetchMethod::DirectApi,
        };
    }
}

pub fn parse_timeline(json: &str) -> anyhow::Result<TimelineParseResult> {
    let value: Value = serde_json::from_str(json)?;

    let items = match serde_json::from_value::<TimelineShape>(value) {
        Ok(TimelineShape::Statuses { statuses }) => statuses,
        Ok(TimelineShape::List { list }) => list,
        Ok(TimelineShape::Bare(items)) => items,
        Err(_) => return Ok(TimelineParseResult::UnknownShape),
    };

    let statuses = statuses_from_items(items);
    if statuses.is_empty() {
        return Ok(TimelineParseResult::NoStatuses);
    }

    return Ok(TimelineParseResult::Ok(statuses));
}

/// Endpoints like search and the mini feed only ever answer with `statuses`.
pub fn parse_statuses_field(json: &str) -> anyhow::Result<Option<Vec<XueqiuStatus>>> {
    let value: Value = serde_json::from_str(json)?;

    let items = match value.get("statuses").and_then(|statuses| statuses.as_array()) {
        Some(items) => items.clone(),
        None => return Ok(None),
    };

    return Ok(Some(statuses_from_items(items)));
}

/// Non-object items are skipped.
fn statuses_from_items(items: Vec<Value>) -> Vec<XueqiuStatus> {
    return items.into_iter()
        .filter(|item| item.is_object())
        .filter_map(|item| serde_json::from_value::<XueqiuStatus>(item).ok())
        .collect::<Vec<XueqiuStatus>>();
}

pub fn format_created_at(created_at: &Option<Value>) -> String {
    return match created_at {
        Some(Value::Number(number)) => {
            number.as_i64()
                .and_then(|millis| Local.timestamp_millis_opt(millis).single())
                .map(|date_time| date_time.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| number.to_string())
        }
        Some(Value::String(string)) if !string.is_empty() => string.clone(),
        _ => UNKNOWN_TIME.to_string(),
    };
}

fn first_non_empty<'a>(candidates: &[&'a Option<String>]) -> Option<&'a str> {
    return candidates.iter()
        .copied()
        .filter_map(|candidate| candidate.as_deref())
        .find(|candidate| !candidate.trim().is_empty());
}
