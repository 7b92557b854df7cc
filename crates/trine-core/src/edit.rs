//! Edit scripts and the character diff primitive that produces them

use dissimilar::Chunk;
use serde::{Deserialize, Serialize};

/// One chunk of an edit script from a source text to a target text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "text", rename_all = "lowercase")]
pub enum EditOp {
    /// Present in both texts
    Equal(String),
    /// Present only in the source
    Delete(String),
    /// Present only in the target
    Insert(String),
}

impl EditOp {
    pub fn text(&self) -> &str {
        match self {
            EditOp::Equal(text) | EditOp::Delete(text) | EditOp::Insert(text) => text,
        }
    }

    fn text_mut(&mut self) -> &mut String {
        match self {
            EditOp::Equal(text) | EditOp::Delete(text) | EditOp::Insert(text) => text,
        }
    }
}

impl From<Chunk<'_>> for EditOp {
    fn from(chunk: Chunk<'_>) -> Self {
        match chunk {
            Chunk::Equal(text) => EditOp::Equal(text.to_string()),
            Chunk::Delete(text) => EditOp::Delete(text.to_string()),
            Chunk::Insert(text) => EditOp::Insert(text.to_string()),
        }
    }
}

/// A character-level diff between two full texts.
///
/// Implementations return an ordered script where `Equal` + `Insert`
/// rebuilds `target` and `Equal` + `Delete` rebuilds `source`.
pub trait CharDiff {
    fn diff(&self, source: &str, target: &str) -> Vec<EditOp>;
}

impl<F> CharDiff for F
where
    F: Fn(&str, &str) -> Vec<EditOp>,
{
    fn diff(&self, source: &str, target: &str) -> Vec<EditOp> {
        self(source, target)
    }
}

/// Character diff followed by a semantic cleanup pass.
///
/// Short equalities that happen to line up inside a rewrite (a shared
/// `"a\n"` between `"alpha"` and `"omega"`) are folded into the edits around
/// them, so a rewritten block comes out as one delete and one insert.
#[derive(Debug, Clone, Copy, Default)]
pub struct SemanticCharDiff;

impl SemanticCharDiff {
    pub fn new() -> Self {
        Self
    }
}

impl CharDiff for SemanticCharDiff {
    fn diff(&self, source: &str, target: &str) -> Vec<EditOp> {
        dissimilar::diff(source, target)
            .into_iter()
            .map(EditOp::from)
            .collect()
    }
}

/// Move a newline across chunk boundaries where the diff split a blank line.
///
/// Walking in order, whenever chunk `i` ends with `'\n'` and chunk `i + 1`
/// starts with one, a single newline moves from the head of `i + 1` to the
/// tail of `i`. Chunks emptied by the move are kept; the translator skips
/// them.
pub fn normalize_newline_splits(script: &[EditOp]) -> Vec<EditOp> {
    let mut normalized = script.to_vec();
    for i in 0..normalized.len().saturating_sub(1) {
        let moves = normalized[i].text().ends_with('\n') && normalized[i + 1].text().starts_with('\n');
        if moves {
            normalized[i].text_mut().push('\n');
            normalized[i + 1].text_mut().remove(0);
        }
    }
    normalized
}

/// Text of the source side of a script
#[cfg(test)]
pub(crate) fn source_text(script: &[EditOp]) -> String {
    script
        .iter()
        .filter(|op| !matches!(op, EditOp::Insert(_)))
        .map(EditOp::text)
        .collect()
}

/// Text of the target side of a script
#[cfg(test)]
pub(crate) fn target_text(script: &[EditOp]) -> String {
    script
        .iter()
        .filter(|op| !matches!(op, EditOp::Delete(_)))
        .map(EditOp::text)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eq(s: &str) -> EditOp {
        EditOp::Equal(s.to_string())
    }

    fn ins(s: &str) -> EditOp {
        EditOp::Insert(s.to_string())
    }

    fn del(s: &str) -> EditOp {
        EditOp::Delete(s.to_string())
    }

    #[test]
    fn test_semantic_diff_reconstructs_both_texts() {
        let cases = [
            ("a\nb\nc\n", "a\nX\nc\n"),
            ("a\nb\n", "a\nnew\nb\n"),
            ("", "hello\n"),
            ("gone\n", ""),
            ("fn main() {}\n", "fn main() {\n    run();\n}\n"),
            ("héllo wörld\n", "hello world\n"),
        ];
        let differ = SemanticCharDiff::new();
        for (source, target) in cases {
            let script = differ.diff(source, target);
            assert_eq!(source_text(&script), source, "source of {:?}", script);
            assert_eq!(target_text(&script), target, "target of {:?}", script);
        }
    }

    #[test]
    fn test_replaced_word_is_one_delete_and_one_insert() {
        let script = SemanticCharDiff::new().diff("a\nb\nc\n", "a\nX\nc\n");
        assert_eq!(script, vec![eq("a\n"), del("b"), ins("X"), eq("\nc\n")]);
    }

    #[test]
    fn test_inserted_line_lands_on_line_boundaries() {
        let script = SemanticCharDiff::new().diff("a\nb\n", "a\nnew\nb\n");
        assert_eq!(script, vec![eq("a\n"), ins("new\n"), eq("b\n")]);
    }

    #[test]
    fn test_rewritten_block_is_not_interleaved() {
        let source = "alpha\nbeta\ngamma\n";
        let target = "omega\ndelta\nsigma\n";
        let script = SemanticCharDiff::new().diff(source, target);

        let deletes = script.iter().filter(|op| matches!(op, EditOp::Delete(_))).count();
        let inserts = script.iter().filter(|op| matches!(op, EditOp::Insert(_))).count();
        assert_eq!((deletes, inserts), (1, 1), "{:?}", script);
        assert!(matches!(script.first(), Some(EditOp::Delete(_))), "{:?}", script);
        assert_eq!(source_text(&script), source);
        assert_eq!(target_text(&script), target);
    }

    #[test]
    fn test_identical_texts_are_all_equal() {
        let script = SemanticCharDiff::new().diff("same\n", "same\n");
        assert_eq!(script, vec![eq("same\n")]);
    }

    #[test]
    fn test_closure_as_differ() {
        let differ = |_: &str, target: &str| vec![ins(target)];
        assert_eq!(differ.diff("x", "y"), vec![ins("y")]);
    }

    #[test]
    fn test_newline_split_moves_one_newline() {
        let script = vec![eq("a\n"), ins("\nb\n"), eq("c")];
        let normalized = normalize_newline_splits(&script);
        assert_eq!(normalized, vec![eq("a\n\n"), ins("b\n"), eq("c")]);
        // Input untouched
        assert_eq!(script[1], ins("\nb\n"));
    }

    #[test]
    fn test_newline_split_cascades_in_order() {
        let script = vec![del("x\n"), ins("\n"), eq("\ny")];
        let normalized = normalize_newline_splits(&script);
        // The insert empties, then no longer starts with a newline
        assert_eq!(normalized, vec![del("x\n\n"), ins(""), eq("\ny")]);
    }

    #[test]
    fn test_newline_split_ignores_other_boundaries() {
        let script = vec![eq("a"), ins("\nb"), eq("\n")];
        assert_eq!(normalize_newline_splits(&script), script);
        assert!(normalize_newline_splits(&[]).is_empty());
    }
}
