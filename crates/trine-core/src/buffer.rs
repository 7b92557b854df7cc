//! Buffer roles and the text accessors the engine reads through

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Which of the three panes a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BufferRole {
    Left,
    Common,
    Right,
}

impl BufferRole {
    pub const ALL: [BufferRole; 3] = [BufferRole::Left, BufferRole::Common, BufferRole::Right];

    pub fn name(self) -> &'static str {
        match self {
            BufferRole::Left => "left",
            BufferRole::Common => "common",
            BufferRole::Right => "right",
        }
    }
}

impl fmt::Display for BufferRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Read access to a pane's text.
///
/// Lines are the text split on `'\n'`, so a trailing newline produces a
/// final empty line the same way an editor document does.
pub trait TextBuffer {
    /// The whole text of the buffer
    fn full_text(&self) -> Cow<'_, str>;

    /// Number of lines (always at least one)
    fn line_count(&self) -> usize;

    /// A single line without its terminator
    fn line(&self, index: usize) -> Option<Cow<'_, str>>;

    /// All lines without terminators
    fn lines(&self) -> Vec<Cow<'_, str>> {
        (0..self.line_count()).filter_map(|i| self.line(i)).collect()
    }
}

/// A buffer the merge operations are allowed to rewrite
pub trait EditableBuffer: TextBuffer {
    /// Replace everything from the start of line `start` up to the start of
    /// line `end` with `content`. Lines past the end clamp to the end of the
    /// text.
    fn replace_lines(&mut self, start: usize, end: usize, content: &str);

    /// Replace the whole text
    fn set_full_text(&mut self, text: &str);
}

/// Plain in-memory buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringBuffer {
    text: String,
}

impl StringBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Byte offset where `line` starts, clamped to the end of the text
    fn line_start(&self, line: usize) -> usize {
        if line == 0 {
            return 0;
        }
        self.text
            .match_indices('\n')
            .nth(line - 1)
            .map(|(idx, _)| idx + 1)
            .unwrap_or(self.text.len())
    }
}

impl From<&str> for StringBuffer {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for StringBuffer {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl TextBuffer for StringBuffer {
    fn full_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.text)
    }

    fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }

    fn line(&self, index: usize) -> Option<Cow<'_, str>> {
        self.text.split('\n').nth(index).map(Cow::Borrowed)
    }

    fn lines(&self) -> Vec<Cow<'_, str>> {
        self.text.split('\n').map(Cow::Borrowed).collect()
    }
}

impl EditableBuffer for StringBuffer {
    fn replace_lines(&mut self, start: usize, end: usize, content: &str) {
        let from = self.line_start(start);
        let to = self.line_start(end.max(start));
        self.text.replace_range(from..to, content);
    }

    fn set_full_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
    }
}

/// The three panes of a comparison
#[derive(Debug, Clone, Default)]
pub struct Buffers<B = StringBuffer> {
    left: B,
    common: B,
    right: B,
}

impl<B> Buffers<B> {
    pub fn new(left: B, common: B, right: B) -> Self {
        Self {
            left,
            common,
            right,
        }
    }

    pub fn get(&self, role: BufferRole) -> &B {
        match role {
            BufferRole::Left => &self.left,
            BufferRole::Common => &self.common,
            BufferRole::Right => &self.right,
        }
    }

    pub fn get_mut(&mut self, role: BufferRole) -> &mut B {
        match role {
            BufferRole::Left => &mut self.left,
            BufferRole::Common => &mut self.common,
            BufferRole::Right => &mut self.right,
        }
    }

    /// Borrow an outer pane to read from together with the common pane to
    /// write to. `None` when `outer` is the common pane itself.
    pub(crate) fn outer_and_common(&mut self, outer: BufferRole) -> Option<(&B, &mut B)> {
        match outer {
            BufferRole::Left => Some((&self.left, &mut self.common)),
            BufferRole::Right => Some((&self.right, &mut self.common)),
            BufferRole::Common => None,
        }
    }
}

impl Buffers<StringBuffer> {
    /// Build from raw contents; missing panes are empty
    pub fn from_contents(left: Option<&str>, common: Option<&str>, right: Option<&str>) -> Self {
        Self::new(
            StringBuffer::new(normalize_content(left)),
            StringBuffer::new(normalize_content(common)),
            StringBuffer::new(normalize_content(right)),
        )
    }
}

/// Missing content becomes empty text; CRLF line endings become LF
pub fn normalize_content(content: Option<&str>) -> String {
    content.map(|c| c.replace("\r\n", "\n")).unwrap_or_default()
}
