//! UTF-16 / UTF-8 offset conversion
//!
//! Browsers report selection offsets in UTF-16 code units while Rust
//! strings index by byte. Every splice into an input value goes through
//! these helpers.

use super::cursor::TextRange;

/// Number of UTF-16 code units in `text`
pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Convert a UTF-16 offset to a byte offset.
///
/// Returns `None` when the offset is past the end or lands in the middle of
/// a surrogate pair.
pub fn utf16_to_byte(text: &str, offset: usize) -> Option<usize> {
    let mut units = 0;
    for (byte, ch) in text.char_indices() {
        if units == offset {
            return Some(byte);
        }
        units += ch.len_utf16();
        if units > offset {
            return None;
        }
    }
    (units == offset).then_some(text.len())
}

/// Convert a byte offset to a UTF-16 offset
pub fn byte_to_utf16(text: &str, byte: usize) -> Option<usize> {
    text.get(..byte).map(utf16_len)
}

/// Slice `text` by a UTF-16 range
pub fn slice_utf16(text: &str, range: TextRange) -> Option<&str> {
    let start = utf16_to_byte(text, range.start)?;
    let end = utf16_to_byte(text, range.end)?;
    text.get(start..end)
}

/// Narrow `range` so it excludes leading and trailing whitespace.
///
/// Snapshot text is always trimmed; a double-click selection in an input
/// usually drags the trailing space along with the word.
pub fn trim_range(text: &str, range: TextRange) -> Option<TextRange> {
    let selected = slice_utf16(text, range)?;
    let leading = selected.len() - selected.trim_start().len();
    let trailing = selected.len() - selected.trim_end().len();
    if leading == selected.len() {
        return Some(TextRange::collapsed(range.start));
    }
    let start = range.start + utf16_len(&selected[..leading]);
    let end = range.end - utf16_len(&selected[selected.len() - trailing..]);
    Some(TextRange::new(start, end))
}

/// Replace `range` of `value` with `replacement`.
///
/// Returns the new value and the caret position (UTF-16) just after the
/// inserted text.
pub fn splice_utf16(value: &str, range: TextRange, replacement: &str) -> Option<(String, usize)> {
    let start = utf16_to_byte(value, range.start)?;
    let end = utf16_to_byte(value, range.end)?;
    let mut spliced = String::with_capacity(value.len() - (end - start) + replacement.len());
    spliced.push_str(&value[..start]);
    spliced.push_str(replacement);
    spliced.push_str(&value[end..]);
    Some((spliced, range.start + utf16_len(replacement)))
}

/// Locate the only occurrence of `needle` in `haystack` as a UTF-16 range.
///
/// Returns `None` when the needle is missing or appears more than once;
/// replacing an ambiguous match could rewrite the wrong sentence.
pub fn find_unique_utf16(haystack: &str, needle: &str) -> Option<TextRange> {
    if needle.is_empty() {
        return None;
    }
    let mut matches = haystack.match_indices(needle);
    let (byte, _) = matches.next()?;
    if matches.next().is_some() {
        return None;
    }
    let start = byte_to_utf16(haystack, byte)?;
    Some(TextRange::new(start, start + utf16_len(needle)))
}

/// Collapse every whitespace run to a single space and trim the ends.
///
/// Used to compare the live page selection against snapshot text: rich
/// editors report line breaks and non-breaking spaces inconsistently.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
