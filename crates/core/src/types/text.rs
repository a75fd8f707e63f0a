//! Sanitizing of free-text form input
//!
//! Everything a user submits is trimmed and HTML-escaped before it is stored,
//! so the stored text can be embedded in a page as-is. On top of the usual
//! markup characters, the record separator and line breaks are encoded as
//! numeric entities. A stored value therefore never contains `|`, `\n` or `\r`.

/// Escapes a string for safe embedding in HTML text and attribute values
///
/// `&`, `<`, `>`, `"` and `'` become `&amp;`, `&lt;`, `&gt;`, `&quot;` and
/// `&#039;`. `|`, `\n` and `\r` become `&#124;`, `&#10;` and `&#13;`.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            '|' => escaped.push_str("&#124;"),
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Trims surrounding whitespace and escapes the remainder
pub fn sanitize_field(raw: &str) -> String {
    escape_html(raw.trim())
}
