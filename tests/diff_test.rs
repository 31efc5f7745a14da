//! Word diff behaviour on realistic correction pairs

use grammarwise_wasm::diff::{diff_words, DiffKind, DiffScript, DiffSegment, MAX_DIFF_CELLS};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn seg(kind: DiffKind, text: &str) -> DiffSegment {
    DiffSegment::new(kind, text)
}

/// Both sides reconstruct exactly, no empty segments, no adjacent repeats
fn assert_well_formed(script: &DiffScript, original: &str, corrected: &str) {
    assert_eq!(script.original(), original);
    assert_eq!(script.corrected(), corrected);
    assert!(script.segments().iter().all(|s| !s.text.is_empty()));
    for pair in script.segments().windows(2) {
        assert_ne!(pair[0].kind, pair[1].kind, "adjacent segments not merged: {:?}", pair);
    }
}

const PAIRS: &[(&str, &str)] = &[
    ("I has a dream", "I have a dream"),
    ("Teh cat sat on teh mat.", "The cat sat on the mat."),
    ("their going too the store", "they're going to the store"),
    ("Hello world", "Hello, world!"),
    ("one two three", "three two one"),
    ("  leading and trailing  ", "leading and trailing"),
    ("line one\nline  two", "line one\n\nline two"),
    ("Ça va très bien", "Ça va très bien 😀"),
    ("", "Brand new text"),
    ("Removed entirely", ""),
];

#[test]
fn test_reconstructs_both_sides() {
    for (original, corrected) in PAIRS {
        let script = diff_words(original, corrected);
        assert_well_formed(&script, original, corrected);
    }
}

#[test]
fn test_replaced_word_reads_deleted_then_inserted() {
    let script = diff_words("I has a dream", "I have a dream");
    assert_eq!(
        script.segments(),
        &[
            seg(DiffKind::Equal, "I "),
            seg(DiffKind::Deleted, "has"),
            seg(DiffKind::Inserted, "have"),
            seg(DiffKind::Equal, " a dream"),
        ]
    );
}

#[test]
fn test_disjoint_texts() {
    let script = diff_words("foo bar", "baz");
    assert_eq!(
        script.segments(),
        &[seg(DiffKind::Deleted, "foo bar"), seg(DiffKind::Inserted, "baz")]
    );
}

#[test]
fn test_identical_texts_have_no_changes() {
    let script = diff_words("Nothing to fix here.", "Nothing to fix here.");
    assert!(script.is_unchanged());
    assert_eq!(script.stats().inserted_words, 0);
    assert_eq!(script.stats().deleted_words, 0);
}

#[test]
fn test_both_empty() {
    let script = diff_words("", "");
    assert!(script.is_empty());
    assert_eq!(script.original(), "");
}

#[test]
fn test_whitespace_only_change_is_visible() {
    let script = diff_words("a  b", "a b");
    assert_well_formed(&script, "a  b", "a b");
    assert!(!script.is_unchanged());
    // No word changed, only spacing
    assert_eq!(script.stats().inserted_words, 0);
    assert_eq!(script.stats().deleted_words, 0);
}

#[test]
fn test_stats_count_words() {
    let script = diff_words("Teh cat sat on teh mat.", "The cat sat on the mat.");
    let stats = script.stats();
    assert_eq!(stats.inserted_words, 2);
    assert_eq!(stats.deleted_words, 2);
}

#[test]
fn test_oversized_input_falls_back_to_full_replacement() {
    let words = (MAX_DIFF_CELLS as f64).sqrt() as usize;
    let original = vec!["word"; words].join(" ");
    let corrected = vec!["other"; words].join(" ");

    let script = diff_words(&original, &corrected);
    assert_eq!(
        script.segments(),
        &[seg(DiffKind::Deleted, &original), seg(DiffKind::Inserted, &corrected)]
    );
}

#[test]
fn test_serializes_for_renderer() {
    let script = diff_words("I has", "I have");
    let json = serde_json::to_value(&script).unwrap();
    assert_eq!(json[0]["kind"], "equal");
    assert_eq!(json[1]["kind"], "deleted");
    assert_eq!(json[1]["text"], "has");
    assert_eq!(json[2]["kind"], "inserted");
}

/// Short texts built from a small vocabulary so both sides share words
fn text() -> impl Strategy<Value = String> {
    let pieces = vec![
        "teh", "the", "cat", "Ça", "été", "😀", "a🎉b", " ", "  ", "\t", "\n", " \n ", "\u{00A0}", ".", ",",
    ];
    prop::collection::vec(prop::sample::select(pieces), 0..24).prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn diff_reconstructs_arbitrary_text(original in text(), corrected in text()) {
        let script = diff_words(&original, &corrected);
        prop_assert_eq!(script.original(), original);
        prop_assert_eq!(script.corrected(), corrected);
    }

    #[test]
    fn diff_segments_are_maximal_runs(original in text(), corrected in text()) {
        let script = diff_words(&original, &corrected);
        prop_assert!(script.segments().iter().all(|s| !s.text.is_empty()));
        for pair in script.segments().windows(2) {
            prop_assert_ne!(pair[0].kind, pair[1].kind);
        }
    }

    #[test]
    fn diff_of_identical_text_is_one_equal_run(original in text()) {
        let script = diff_words(&original, &original);
        if original.is_empty() {
            prop_assert!(script.is_empty());
        } else {
            prop_assert_eq!(script.segments(), &[seg(DiffKind::Equal, &original)][..]);
        }
    }
}
