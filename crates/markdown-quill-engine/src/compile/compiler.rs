//! The block compiler: walks a parsed document and emits the operation
//! stream against a single monotonic cursor.

use crate::parsing::{Block, ListItem, MarkupDocument};
use crate::parsing::extract::render_block;
use crate::parsing::inline::{InlineSpan, SpanKind};

use super::ops::{BulletPreset, EditOperation, NamedStyle, TextStyle};

/// Per-call compilation settings. Presets can be swapped without touching
/// compiler logic; the default pair matches the rendering side's defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    pub unordered_preset: BulletPreset,
    pub ordered_preset: BulletPreset,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            unordered_preset: BulletPreset::DiscCircleSquare,
            ordered_preset: BulletPreset::DecimalAlphaRoman,
        }
    }
}

/// The result of one compile call.
///
/// Replaying `ops` verbatim and in order against a buffer whose end offset
/// was `start_offset` reproduces the document text and every style range
/// exactly once, leaving the buffer's end at `end_offset`.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledDocument {
    pub ops: Vec<EditOperation>,
    pub end_offset: usize,
    /// Constructs the grammar recognizes but the compiler does not emit
    /// operations for. Surfaced so callers can see what was left out
    /// instead of losing content silently.
    pub skipped: Vec<UnsupportedConstruct>,
}

/// A recognized-but-uncompiled construct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnsupportedConstruct {
    Table { source: String },
}

/// Compiles a parsed document into an operation stream.
///
/// `start_offset` must be the target buffer's current end offset; the
/// returned `end_offset` is what it will be after replay. The call is
/// stateless: nothing persists between calls and no staleness is possible.
pub fn compile(
    doc: &MarkupDocument,
    start_offset: usize,
    options: &CompileOptions,
) -> CompiledDocument {
    let mut emitter = Emitter::new(start_offset);
    let mut skipped = Vec::new();

    for block in &doc.blocks {
        match block {
            Block::Paragraph { text } => {
                let rendered = render_block(text);
                let (start, _) = emitter.insert_line(&rendered.text);
                emitter.text_styles(&rendered.spans, start);
            }
            Block::Heading { level, text } => {
                let rendered = render_block(text);
                let (start, end) = emitter.insert_line(&rendered.text);
                emitter.ops.push(EditOperation::SetParagraphStyle {
                    start,
                    end,
                    named_style: NamedStyle::heading(*level),
                });
                emitter.text_styles(&rendered.spans, start);
            }
            Block::List { ordered, items } => {
                let preset = if *ordered {
                    options.ordered_preset
                } else {
                    options.unordered_preset
                };
                compile_list(&mut emitter, items, preset);
            }
            Block::Table { source } => {
                skipped.push(UnsupportedConstruct::Table {
                    source: source.clone(),
                });
            }
        }
    }

    CompiledDocument {
        end_offset: emitter.cursor,
        ops: emitter.ops,
        skipped,
    }
}

/// Inserts every item as one contiguous text run, then brackets the whole
/// group with a single bullet operation so all items share one list
/// identity.
fn compile_list(emitter: &mut Emitter, items: &[ListItem], preset: BulletPreset) {
    let mut first_start = None;
    let mut last_end = emitter.cursor;

    for item in items {
        let (text, spans) = render_item(item);
        let (start, end) = emitter.insert(&text);
        first_start.get_or_insert(start);
        last_end = end;
        emitter.text_styles(&spans, start);
    }

    if let Some(start) = first_start {
        emitter.ops.push(EditOperation::SetBullet {
            start,
            end: last_end,
            preset,
        });
    }
}

/// Renders one list item to its concatenated plain text (inner paragraphs
/// joined by a blank line, item terminated by a newline) plus the inline
/// spans shifted into the concatenated coordinate space.
fn render_item(item: &ListItem) -> (String, Vec<InlineSpan>) {
    if item.blocks.is_empty() {
        // No inner blocks were parsed; fall back to the item's raw source.
        let mut text = render_block(item.source.trim()).text;
        text.push('\n');
        return (text, Vec::new());
    }

    let mut text = String::new();
    let mut spans = Vec::new();
    let mut chars = 0usize;
    for block in &item.blocks {
        let source = match block {
            Block::Paragraph { text } | Block::Heading { text, .. } => text,
            // List items only ever contain paragraphs after parsing.
            _ => continue,
        };
        if chars > 0 {
            text.push_str("\n\n");
            chars += 2;
        }
        let rendered = render_block(source);
        for span in rendered.spans {
            spans.push(InlineSpan {
                kind: span.kind,
                start: span.start + chars,
                end: span.end + chars,
            });
        }
        chars += rendered.text.chars().count();
        text.push_str(&rendered.text);
    }
    text.push('\n');
    (text, spans)
}

/// Accumulates the operation stream while threading the cursor.
pub(crate) struct Emitter {
    pub(crate) cursor: usize,
    pub(crate) ops: Vec<EditOperation>,
}

impl Emitter {
    pub(crate) fn new(start_offset: usize) -> Self {
        Self {
            cursor: start_offset,
            ops: Vec::new(),
        }
    }

    /// Emits one insertion at the cursor and advances it by the character
    /// count. Returns the half-open range the text now occupies.
    pub(crate) fn insert(&mut self, text: &str) -> (usize, usize) {
        let start = self.cursor;
        self.cursor += text.chars().count();
        self.ops.push(EditOperation::InsertText {
            offset: start,
            text: text.to_string(),
        });
        (start, self.cursor)
    }

    /// Inserts block content terminated by a newline. Content that stripped
    /// to nothing still inserts the newline, so no zero-length insertion is
    /// ever emitted.
    fn insert_line(&mut self, content: &str) -> (usize, usize) {
        let mut text = String::with_capacity(content.len() + 1);
        text.push_str(content);
        text.push('\n');
        self.insert(&text)
    }

    /// Emits one style op per span, shifted from block-local plain-text
    /// offsets into buffer offsets. Nested constructs (bold inside a link)
    /// arrive as separate spans and become separate ops over the same range.
    pub(crate) fn text_styles(&mut self, spans: &[InlineSpan], base: usize) {
        for span in spans {
            let style = match &span.kind {
                SpanKind::Bold => TextStyle::bold(),
                SpanKind::Italic => TextStyle::italic(),
                SpanKind::Code => TextStyle::code(),
                SpanKind::Link(url) => TextStyle::link(url.clone()),
            };
            self.ops.push(EditOperation::SetTextStyle {
                start: base + span.start,
                end: base + span.end,
                style,
            });
        }
    }
}
