/// The styling a resolved inline span carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanKind {
    Bold,
    Italic,
    /// Backtick-delimited code. A "raw zone" - no parsing occurs inside.
    Code,
    /// A link with its destination URL. The URL never appears in plain text.
    Link(String),
}

/// A resolved inline span.
///
/// Offsets are character positions into the owning block's *stripped plain
/// text*, half-open `[start, end)`. They are derived structurally while the
/// plain text is built, never by searching the rendered text, so spans stay
/// correct under repeated substrings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSpan {
    pub kind: SpanKind,
    pub start: usize,
    pub end: usize,
}

impl InlineSpan {
    /// Returns the length in characters. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
