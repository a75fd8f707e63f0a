//! Line format of the flat-file stores
//!
//! Categories are stored one name per line. Books are stored one per line as
//! `title|link|category`. Only the first two separators split fields, so the
//! category part may itself contain `|`.

use crate::store::MalformedRecordPolicy;
use bookboard_core::{Book, Category, Result, StorageError};

/// Separates the fields of a book line
pub const FIELD_SEPARATOR: char = '|';

/// Encodes a category name as a complete line, newline included
pub fn encode_category(name: &str) -> Result<String> {
    ensure_single_line("name", name)?;
    Ok(format!("{}\n", name))
}

/// Encodes a book as a complete line, newline included
pub fn encode_book(book: &Book) -> Result<String> {
    ensure_no_separator("title", &book.title)?;
    ensure_no_separator("link", &book.link)?;
    ensure_single_line("title", &book.title)?;
    ensure_single_line("link", &book.link)?;
    ensure_single_line("category", &book.category)?;

    Ok(format!(
        "{}{sep}{}{sep}{}\n",
        book.title,
        book.link,
        book.category,
        sep = FIELD_SEPARATOR
    ))
}

/// Splits one stored line into a book
pub fn decode_book(line: &str) -> std::result::Result<Book, String> {
    let mut fields = line.splitn(3, FIELD_SEPARATOR);
    match (fields.next(), fields.next(), fields.next()) {
        (Some(title), Some(link), Some(category)) => Ok(Book::new(title, link, category)),
        _ => Err(format!(
            "expected 3 fields separated by '{}'",
            FIELD_SEPARATOR
        )),
    }
}

/// Yields `(line_number, line)` for every non-blank line
///
/// Line numbers are 1-based. A trailing `\r` is dropped. Lines that are not
/// valid UTF-8 come back as an error carrying the reason.
pub fn record_lines(
    contents: &[u8],
) -> impl Iterator<Item = (usize, std::result::Result<&str, String>)> {
    contents
        .split(|&byte| byte == b'\n')
        .enumerate()
        .map(|(index, line)| {
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            let decoded = std::str::from_utf8(line)
                .map_err(|e| format!("not valid UTF-8 ({})", e));
            (index + 1, decoded)
        })
        .filter(|(_, line)| !matches!(line, Ok(text) if text.trim().is_empty()))
}

/// Parses the contents of a category store, applying the malformed-line policy
pub fn parse_categories(
    contents: &[u8],
    store: &str,
    policy: MalformedRecordPolicy,
) -> Result<Vec<Category>> {
    parse_records(contents, store, policy, |line| Ok(Category::new(line)))
}

/// Parses the contents of a book store, applying the malformed-line policy
pub fn parse_books(
    contents: &[u8],
    store: &str,
    policy: MalformedRecordPolicy,
) -> Result<Vec<Book>> {
    parse_records(contents, store, policy, decode_book)
}

fn parse_records<T, F>(
    contents: &[u8],
    store: &str,
    policy: MalformedRecordPolicy,
    decode: F,
) -> Result<Vec<T>>
where
    F: Fn(&str) -> std::result::Result<T, String>,
{
    let mut records = Vec::new();

    for (line_number, line) in record_lines(contents) {
        match line.and_then(&decode) {
            Ok(record) => records.push(record),
            Err(reason) => match policy {
                MalformedRecordPolicy::Skip => {
                    log::warn!(
                        "Skipping malformed record in {} at line {}: {}",
                        store,
                        line_number,
                        reason
                    );
                }
                MalformedRecordPolicy::Fail => {
                    return Err(StorageError::MalformedRecord {
                        store: store.to_string(),
                        line: line_number,
                        reason,
                    });
                }
            },
        }
    }

    Ok(records)
}

fn ensure_no_separator(field: &'static str, value: &str) -> Result<()> {
    if value.contains(FIELD_SEPARATOR) {
        return Err(StorageError::InvalidRecord {
            field,
            reason: format!("must not contain '{}'", FIELD_SEPARATOR),
        });
    }
    Ok(())
}

fn ensure_single_line(field: &'static str, value: &str) -> Result<()> {
    if value.contains(['\n', '\r']) {
        return Err(StorageError::InvalidRecord {
            field,
            reason: "must not contain line breaks".to_string(),
        });
    }
    Ok(())
}
