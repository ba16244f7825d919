//! Small string helpers shared by the catalog and the CLI output.

/// Escape the characters that are significant in HTML markup.
pub fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '/' => escaped.push_str("&#x2f;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Reverse [`escape_html`]; unknown entities are left as they are.
pub fn unescape_html(s: &str) -> String {
    const ENTITIES: [(&str, char); 6] = [
        ("&amp;", '&'),
        ("&lt;", '<'),
        ("&gt;", '>'),
        ("&quot;", '"'),
        ("&#39;", '\''),
        ("&#x2f;", '/'),
    ];

    let mut unescaped = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find('&') {
        unescaped.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match ENTITIES.iter().find(|(entity, _)| rest.starts_with(entity)) {
            Some((entity, c)) => {
                unescaped.push(*c);
                rest = &rest[entity.len()..];
            }
            None => {
                unescaped.push('&');
                rest = &rest[1..];
            }
        }
    }
    unescaped.push_str(rest);
    unescaped
}

/// Return the part of `s` after the last occurrence of `separator`,
/// or the whole string when the separator does not occur.
pub fn substring_after_last<'a>(s: &'a str, separator: char) -> &'a str {
    match s.rfind(separator) {
        Some(pos) => &s[pos + separator.len_utf8()..],
        None => s,
    }
}

/// True when the string is empty or whitespace only.
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Truncate a string to a maximum length, handling multi-byte characters properly.
/// Appends "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}
