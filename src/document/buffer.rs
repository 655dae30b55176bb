//! The flattened dialogue text and turn layout.
//!
//! Every non-Server turn is rendered as `"{id} : {emitter} : {text} "` and
//! appended to one buffer. Segment markers inside the text are consumed
//! while appending, so every offset recorded here is already a final
//! position in the buffer: nothing is ever deleted after the fact.

use super::Span;

/// Separator that precedes the first turn.
const LEADING_SEPARATOR: char = ' ';

/// Separator that follows every turn.
const TURN_SEPARATOR: char = ' ';

/// Growing text buffer shared by the whole document.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    text: String,
    /// Length in characters
    len: usize,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    pub fn new() -> Self {
        Self {
            text: LEADING_SEPARATOR.to_string(),
            len: 1,
        }
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Offset of the last character (the separator after the latest turn).
    pub fn last_offset(&self) -> usize {
        self.len.saturating_sub(1)
    }

    /// Text covered by a span, or `None` if it falls outside the buffer.
    pub fn slice(&self, span: Span) -> Option<&str> {
        if span.start > span.end || span.end > self.len {
            return None;
        }
        let start = self.byte_offset(span.start);
        let end = self.byte_offset(span.end);
        Some(&self.text[start..end])
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.text
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    fn push(&mut self, c: char) {
        self.text.push(c);
        self.len += 1;
    }

    fn push_str(&mut self, s: &str) {
        self.text.push_str(s);
        self.len += s.chars().count();
    }

    /// Append one turn, consuming its segment markers.
    pub fn append_turn(&mut self, id: &str, emitter: &str, text: &str, marker: char) -> TurnLayout {
        let turn_start = self.len;
        self.push_str(&format!("{id} : {emitter} : "));

        let mut borders = SegmentBorders::starting_at(self.len);
        let mut stripped = String::with_capacity(text.len());

        for c in text.chars() {
            if c == marker {
                borders.close_at(self.len);
            } else {
                self.push(c);
                stripped.push(c);
            }
        }

        self.push(TURN_SEPARATOR);
        let end = self.last_offset();
        borders.finish_at(end);

        TurnLayout {
            span: Span::new(turn_start, end),
            borders,
            text: stripped,
        }
    }
}

/// Where one appended turn landed in the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnLayout {
    /// The rendered turn, without its trailing separator
    pub span: Span,
    pub borders: SegmentBorders,
    /// Turn text with markers removed
    pub text: String,
}

/// Left and right segment borders collected while appending a turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentBorders {
    lefts: Vec<usize>,
    rights: Vec<usize>,
}

/// Segment borders that cannot be paired into spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unbalanced segment borders: {lefts} left, {rights} right")]
pub struct UnbalancedSegments {
    pub lefts: usize,
    pub rights: usize,
}

impl SegmentBorders {
    fn starting_at(offset: usize) -> Self {
        Self {
            lefts: vec![offset],
            rights: Vec::new(),
        }
    }

    /// A marker at `offset` closes one segment and opens the next.
    fn close_at(&mut self, offset: usize) {
        self.rights.push(offset);
        self.lefts.push(offset);
    }

    fn finish_at(&mut self, offset: usize) {
        self.rights.push(offset);
    }

    #[cfg(test)]
    pub(crate) fn from_parts(lefts: Vec<usize>, rights: Vec<usize>) -> Self {
        Self { lefts, rights }
    }

    /// Pair the borders into segment spans.
    pub fn spans(&self) -> Result<Vec<Span>, UnbalancedSegments> {
        let unbalanced = UnbalancedSegments {
            lefts: self.lefts.len(),
            rights: self.rights.len(),
        };
        if self.lefts.len() != self.rights.len() {
            return Err(unbalanced);
        }

        self.lefts
            .iter()
            .zip(&self.rights)
            .map(|(&start, &end)| {
                if start <= end {
                    Ok(Span::new(start, end))
                } else {
                    Err(unbalanced)
                }
            })
            .collect()
    }
}
