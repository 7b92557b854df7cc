//! Offset to line mapping for a single buffer

/// Location of a character range inside a buffer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Span {
    pub start_line: usize,
    pub start_char: usize,
    pub end_line: usize,
    pub end_char: usize,
}

/// Per-line lengths of a buffer, terminator included.
///
/// Every line counts one extra unit for its `'\n'`, the final line
/// included, so the lengths sum to one past the text length and every
/// offset in `0..=text.len()` falls inside the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    lengths: Vec<usize>,
}

impl LineIndex {
    pub fn from_text(text: &str) -> Self {
        Self {
            lengths: text.split('\n').map(|line| line.len() + 1).collect(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.lengths.len()
    }

    /// Sum of all line lengths, one past the text length
    pub fn total_len(&self) -> usize {
        self.lengths.iter().sum()
    }

    fn last_line(&self) -> usize {
        self.lengths.len().saturating_sub(1)
    }

    /// Characters on `line`, terminator excluded. Zero past the last line.
    pub fn chars_on_line(&self, line: usize) -> usize {
        self.lengths.get(line).map_or(0, |len| len - 1)
    }

    /// Line whose range contains `offset`.
    ///
    /// An offset sitting exactly on a line's terminator boundary belongs to
    /// that line, not the next one. Offsets past the end clamp to the last
    /// line.
    pub fn line_for_offset(&self, offset: usize) -> usize {
        let mut running = 0;
        for (line, len) in self.lengths.iter().enumerate() {
            running += len;
            if offset <= running {
                return line;
            }
        }
        self.last_line()
    }

    /// True when `offset` equals the cumulative end of some line, or one
    /// before it when the edit had a leading newline stripped.
    pub fn is_line_end(&self, offset: usize, leading_newline: bool) -> bool {
        let mut running = 0;
        self.lengths.iter().any(|len| {
            running += len;
            let boundary = if leading_newline { running - 1 } else { running };
            boundary == offset
        })
    }

    /// Raw start/end location of `len` characters starting at `offset`.
    ///
    /// The start resolves to the first line whose end lies strictly past the
    /// offset; the end resolves to the first line whose end is at or past
    /// `offset + len`.
    pub fn span(&self, offset: usize, len: usize) -> Span {
        let end = offset + len;
        let mut span = Span::default();
        let mut start_set = false;
        let mut end_set = false;
        let mut running = 0;

        for (line, &line_len) in self.lengths.iter().enumerate() {
            let line_start = running;
            running += line_len;

            if !start_set && offset < running {
                span.start_line = line;
                span.start_char = offset - line_start;
                start_set = true;
            }

            if !end_set && end <= running {
                span.end_line = line;
                span.end_char = end - line_start;
                end_set = true;
            }

            if start_set && end_set {
                break;
            }
        }

        let last = self.last_line();
        if !start_set {
            span.start_line = last;
            span.start_char = self.chars_on_line(last);
        }
        if !end_set {
            span.end_line = last;
            span.end_char = self.chars_on_line(last);
        }

        span
    }
}
