//! Word / whitespace tokenizer
//!
//! Splits text into alternating runs of non-whitespace and whitespace.
//! Concatenating the tokens always yields the input.

/// Split `text` into word and whitespace runs
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_space: Option<bool> = None;

    for (idx, ch) in text.char_indices() {
        let space = ch.is_whitespace();
        match in_space {
            Some(prev) if prev != space => {
                tokens.push(&text[start..idx]);
                start = idx;
            }
            _ => {}
        }
        in_space = Some(space);
    }

    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}
