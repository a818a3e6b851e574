use std::borrow::Cow;

pub trait FormatToken {
    fn format_token(&self) -> Cow<str>;
}

impl FormatToken for str {
    fn format_token(&self) -> Cow<str> {
        let chars: Vec<char> = self.chars().collect();
        let string_length = chars.len();

        if string_length < 6 {
            return Cow::Borrowed(self);
        }

        let part_length = (string_length / 10).clamp(1, 4);

        let start = &chars[0..part_length];
        let end = &chars[string_length - part_length..];

        let formatted_token = format!("{}...{}", String::from_iter(start), String::from_iter(end));
        return Cow::Owned(formatted_token);
    }
}

impl FormatToken for String {
    fn format_token(&self) -> Cow<str> {
        return self.as_str().format_token();
    }
}

/// Keeps the first `max_chars` characters and appends `...` when anything was cut.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> Cow<str> {
    let mut char_indices = text.char_indices();
    let cut_at = char_indices.nth(max_chars).map(|(index, _)| index);

    return match cut_at {
        None => Cow::Borrowed(text),
        Some(index) => Cow::Owned(format!("{}...", &text[..index])),
    };
}

/// Renders a response body for logs: `<body is empty>`, the body itself, or a prefix
/// with the count of remaining characters.
pub fn body_preview(body: &str, max_chars: usize) -> String {
    if body.is_empty() {
        return String::from("<body is empty>");
    }

    let chars_count = body.chars().count();
    if chars_count <= max_chars {
        return body.to_string();
    }

    let remaining_chars_count = chars_count - max_chars;
    let prefix = body.chars().take(max_chars).collect::<String>();

    return format!("{} (+{} more)", prefix, remaining_chars_count);
}

#[test]
fn test_format_token() {
    assert_eq!("abc", "abc".format_token());
    assert_eq!("1...f", "1234567890abcdef".to_string().format_token());

    let token = "17fa2787f256c2057245b461d0c6085a10db6eef";
    let formatted = token.format_token();
    assert_eq!("17fa...6eef", formatted);
    assert!(!formatted.contains("f256c2057245"));
}

#[test]
fn test_truncate_with_ellipsis() {
    assert_eq!("雪球", truncate_with_ellipsis("雪球", 2));
    assert_eq!("雪...", truncate_with_ellipsis("雪球", 1));
    assert_eq!("abc...", truncate_with_ellipsis("abcdef", 3));
    assert_eq!("", truncate_with_ellipsis("", 3));
}

#[test]
fn test_body_preview() {
    assert_eq!("<body is empty>", body_preview("", 10));
    assert_eq!("short", body_preview("short", 10));
    assert_eq!("abc (+3 more)", body_preview("abcdef", 3));
}
