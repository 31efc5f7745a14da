//! Selection ranges inside a plain input value
//!
//! Offsets are UTF-16 code units, the unit the DOM uses for
//! `selectionStart` / `selectionEnd`.

use serde::{Deserialize, Serialize};

/// A range of a value from start (inclusive) to end (exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    /// Build a range, swapping the ends when the selection was made backwards
    pub fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self { start: end, end: start }
        }
    }

    /// Create a collapsed range (caret only)
    pub fn collapsed(at: usize) -> Self {
        Self { start: at, end: at }
    }

    /// Check if this range is empty (start == end)
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Length in UTF-16 code units
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if a position is contained within this range
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }
}

impl From<(usize, usize)> for TextRange {
    fn from((start, end): (usize, usize)) -> Self {
        Self::new(start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backward_selection_is_ordered() {
        let range = TextRange::new(9, 2);
        assert_eq!(range.start, 2);
        assert_eq!(range.end, 9);
        assert_eq!(range.len(), 7);
    }

    #[test]
    fn test_text_range_contains() {
        let range = TextRange::new(2, 5);

        assert!(range.contains(2));
        assert!(range.contains(4));
        assert!(!range.contains(5)); // Exclusive end
        assert!(!range.contains(1));
    }

    #[test]
    fn test_collapsed() {
        let range = TextRange::collapsed(4);
        assert!(range.is_empty());
        assert_eq!(range.len(), 0);
    }
}
