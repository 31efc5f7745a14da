//! Word-level diff for highlighting model corrections
//!
//! The diff is display-only: the injector always writes the full corrected
//! string back to the page, never a patch built from these segments.
//!
//! ## Algorithm
//!
//! 1. Split both strings into word and whitespace tokens, keeping the
//!    whitespace runs so concatenation reproduces the input exactly.
//! 2. Fill the classical `(m+1) x (n+1)` LCS table.
//! 3. Backtrack from `[m][n]`. On a tie between moving left and moving up
//!    the corrected-side move (Inserted) is taken first, so after reversal a
//!    replaced word reads as Deleted followed by Inserted.
//! 4. Coalesce neighbouring tokens of the same kind into maximal runs.

pub mod tokenize;

use serde::{Deserialize, Serialize};

pub use tokenize::tokenize;

/// Above this many table cells the engine reports a full replacement
/// instead of allocating the LCS table.
pub const MAX_DIFF_CELLS: usize = 4_000_000;

/// Kind of a diff segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    Equal,
    Inserted,
    Deleted,
}

/// A maximal run of tokens sharing one kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSegment {
    pub kind: DiffKind,
    pub text: String,
}

impl DiffSegment {
    pub fn new(kind: DiffKind, text: impl Into<String>) -> Self {
        Self { kind, text: text.into() }
    }
}

/// Word counts for a summary line ("2 words changed")
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    pub inserted_words: usize,
    pub deleted_words: usize,
}

/// Ordered list of segments; adjacent segments never share a kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiffScript {
    segments: Vec<DiffSegment>,
}

impl DiffScript {
    pub fn segments(&self) -> &[DiffSegment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<DiffSegment> {
        self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Rebuild the original string (Equal + Deleted)
    pub fn original(&self) -> String {
        self.collect_except(DiffKind::Inserted)
    }

    /// Rebuild the corrected string (Equal + Inserted)
    pub fn corrected(&self) -> String {
        self.collect_except(DiffKind::Deleted)
    }

    /// True when nothing was inserted or deleted
    pub fn is_unchanged(&self) -> bool {
        self.segments.iter().all(|s| s.kind == DiffKind::Equal)
    }

    pub fn stats(&self) -> DiffStats {
        let mut stats = DiffStats::default();
        for segment in &self.segments {
            let words = segment.text.split_whitespace().count();
            match segment.kind {
                DiffKind::Inserted => stats.inserted_words += words,
                DiffKind::Deleted => stats.deleted_words += words,
                DiffKind::Equal => {}
            }
        }
        stats
    }

    fn collect_except(&self, skip: DiffKind) -> String {
        self.segments
            .iter()
            .filter(|s| s.kind != skip)
            .map(|s| s.text.as_str())
            .collect()
    }

    /// Append a token, extending the last segment when the kind matches
    fn push(&mut self, kind: DiffKind, token: &str) {
        if token.is_empty() {
            return;
        }
        match self.segments.last_mut() {
            Some(last) if last.kind == kind => last.text.push_str(token),
            _ => self.segments.push(DiffSegment::new(kind, token)),
        }
    }
}

/// Compute the word diff between `original` and `corrected`
pub fn diff_words(original: &str, corrected: &str) -> DiffScript {
    let mut script = DiffScript::default();

    if original == corrected {
        script.push(DiffKind::Equal, original);
        return script;
    }

    let old = tokenize(original);
    let new = tokenize(corrected);
    let (m, n) = (old.len(), new.len());

    if (m + 1).saturating_mul(n + 1) > MAX_DIFF_CELLS {
        log::debug!("diff: {}x{} tokens over cell limit, reporting full replacement", m, n);
        script.push(DiffKind::Deleted, original);
        script.push(DiffKind::Inserted, corrected);
        return script;
    }

    let table = lcs_table(&old, &new);

    // Backtrack from the bottom-right corner; tokens come out in reverse.
    let mut reversed: Vec<(DiffKind, &str)> = Vec::with_capacity(m + n);
    let (mut i, mut j) = (m, n);
    while i > 0 || j > 0 {
        if i > 0 && j > 0 && old[i - 1] == new[j - 1] {
            reversed.push((DiffKind::Equal, old[i - 1]));
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || table[i][j - 1] >= table[i - 1][j]) {
            reversed.push((DiffKind::Inserted, new[j - 1]));
            j -= 1;
        } else {
            reversed.push((DiffKind::Deleted, old[i - 1]));
            i -= 1;
        }
    }

    for (kind, token) in reversed.into_iter().rev() {
        script.push(kind, token);
    }
    script
}

/// `table[i][j]` = LCS length of `old[..i]` and `new[..j]`
fn lcs_table(old: &[&str], new: &[&str]) -> Vec<Vec<usize>> {
    let mut table = vec![vec![0usize; new.len() + 1]; old.len() + 1];
    for i in 1..=old.len() {
        for j in 1..=new.len() {
            table[i][j] = if old[i - 1] == new[j - 1] {
                table[i - 1][j - 1] + 1
            } else {
                table[i - 1][j].max(table[i][j - 1])
            };
        }
    }
    table
}
