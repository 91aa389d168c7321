//! Block structure, derived from `pulldown-cmark` events with source offsets.
//!
//! Each block keeps the raw inline-markup source for its content; stripping
//! happens later in the extract/resolve pass. Every offset here is a byte
//! range into the original input, taken straight from the parser - block
//! boundaries are never re-discovered by searching the text.

use std::ops::Range;

use pulldown_cmark::{Event, Options, Parser, Tag};

/// A parsed markup document: an ordered sequence of top-level blocks.
///
/// Immutable after parse; owned by the compile call that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkupDocument {
    pub blocks: Vec<Block>,
}

/// A top-level (or list-item-inner) block.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// A paragraph. `text` holds the raw inline-markup source, not yet stripped.
    Paragraph { text: String },
    /// A heading. `text` holds the raw source including the `#` marker;
    /// levels outside 1-6 are clamped at compile time, never rejected.
    Heading { level: u8, text: String },
    /// An ordered or unordered list.
    List { ordered: bool, items: Vec<ListItem> },
    /// A table. Recognized by the grammar but not compiled into buffer
    /// operations; the compiler surfaces it as an unsupported construct.
    Table { source: String },
}

/// One bullet or numbered entry, possibly multi-paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    /// Inner blocks (paragraphs) of this item, in order.
    pub blocks: Vec<Block>,
    /// Raw source of the whole item, used as the fallback when no inner
    /// blocks were parsed.
    pub source: String,
}

/// Parses markup text into a [`MarkupDocument`].
///
/// Unrecognized block constructs (code fences, block quotes, HTML, thematic
/// breaks) are recovered locally as paragraphs of their raw text - parsing
/// never fails.
pub fn parse_document(source: &str) -> MarkupDocument {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    let events: Vec<(Event<'_>, Range<usize>)> = Parser::new_ext(source, options)
        .into_offset_iter()
        .collect();

    let mut blocks = Vec::new();
    let mut i = 0;
    while i < events.len() {
        match &events[i].0 {
            Event::Start(Tag::Heading { level, .. }) => {
                let level = *level as u8;
                let text = slice(source, &events[i].1);
                i = skip_to_end(&events, i);
                blocks.push(Block::Heading { level, text });
            }
            Event::Start(Tag::Paragraph) => {
                let text = slice(source, &events[i].1);
                i = skip_to_end(&events, i);
                blocks.push(Block::Paragraph { text });
            }
            Event::Start(Tag::List(start)) => {
                let ordered = start.is_some();
                let (items, next) = parse_list(source, &events, i);
                i = next;
                blocks.push(Block::List { ordered, items });
            }
            Event::Start(Tag::Table(_)) => {
                let table_source = slice(source, &events[i].1);
                i = skip_to_end(&events, i);
                blocks.push(Block::Table {
                    source: table_source,
                });
            }
            Event::Start(_) => {
                // Block kind outside the supported grammar: recover as a
                // paragraph of its raw text so no content is lost.
                let text = slice(source, &events[i].1);
                i = skip_to_end(&events, i);
                blocks.push(Block::Paragraph { text });
            }
            Event::Rule => {
                let text = slice(source, &events[i].1);
                i += 1;
                blocks.push(Block::Paragraph { text });
            }
            _ => {
                i += 1;
            }
        }
    }

    MarkupDocument { blocks }
}

/// Parses the items of a list whose `Start(List)` event sits at `start`.
/// Returns the items and the index just past the list's `End` event.
fn parse_list(
    source: &str,
    events: &[(Event<'_>, Range<usize>)],
    start: usize,
) -> (Vec<ListItem>, usize) {
    let end = skip_to_end(events, start);
    let mut items = Vec::new();
    let mut i = start + 1;
    while i + 1 < end {
        if matches!(events[i].0, Event::Start(Tag::Item)) {
            let item_end = skip_to_end(events, i);
            items.push(parse_item(source, events, i, item_end));
            i = item_end;
        } else {
            i += 1;
        }
    }
    (items, end)
}

/// Parses one list item spanning `events[start..end]` (inclusive of its
/// `Start(Item)` and `End(Item)` events).
///
/// Loose items contribute their inner paragraphs. Tight items carry inline
/// content directly under the item; that content is gathered into one
/// synthesized paragraph so inline styling still resolves. Nested lists are
/// flattened into additional paragraphs of the parent item.
fn parse_item(
    source: &str,
    events: &[(Event<'_>, Range<usize>)],
    start: usize,
    end: usize,
) -> ListItem {
    let item_source = slice(source, &events[start].1);
    let mut blocks = Vec::new();
    let mut bare: Option<Range<usize>> = None;

    let mut flush_bare = |bare: &mut Option<Range<usize>>, blocks: &mut Vec<Block>| {
        if let Some(range) = bare.take() {
            let text = slice(source, &range);
            if !text.is_empty() {
                blocks.push(Block::Paragraph { text });
            }
        }
    };

    let mut i = start + 1;
    while i + 1 < end {
        let range = events[i].1.clone();
        match &events[i].0 {
            Event::Start(Tag::Paragraph) => {
                flush_bare(&mut bare, &mut blocks);
                i = skip_to_end(events, i);
                blocks.push(Block::Paragraph {
                    text: slice(source, &range),
                });
            }
            Event::Start(Tag::List(_)) => {
                flush_bare(&mut bare, &mut blocks);
                let (nested, next) = parse_list(source, events, i);
                i = next;
                for item in nested {
                    if item.blocks.is_empty() {
                        blocks.push(Block::Paragraph { text: item.source });
                    } else {
                        blocks.extend(item.blocks);
                    }
                }
            }
            Event::Start(tag) if is_inline_tag(tag) => {
                // Inline construct directly under a tight item; its range
                // covers the whole construct.
                extend(&mut bare, range);
                i = skip_to_end(events, i);
            }
            Event::Start(_) => {
                flush_bare(&mut bare, &mut blocks);
                i = skip_to_end(events, i);
                blocks.push(Block::Paragraph {
                    text: slice(source, &range),
                });
            }
            _ => {
                extend(&mut bare, range);
                i += 1;
            }
        }
    }
    flush_bare(&mut bare, &mut blocks);

    ListItem {
        blocks,
        source: item_source,
    }
}

fn is_inline_tag(tag: &Tag<'_>) -> bool {
    matches!(
        tag,
        Tag::Emphasis | Tag::Strong | Tag::Strikethrough | Tag::Link { .. } | Tag::Image { .. }
    )
}

/// Grows an accumulated source range to cover `range`.
fn extend(acc: &mut Option<Range<usize>>, range: Range<usize>) {
    match acc {
        Some(r) => {
            r.start = r.start.min(range.start);
            r.end = r.end.max(range.end);
        }
        None => *acc = Some(range),
    }
}

/// Advances from a `Start` event to just past its matching `End`.
fn skip_to_end(events: &[(Event<'_>, Range<usize>)], start: usize) -> usize {
    let mut depth = 0usize;
    let mut i = start;
    while i < events.len() {
        match &events[i].0 {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    return i + 1;
                }
            }
            _ => {}
        }
        i += 1;
    }
    events.len()
}

fn slice(source: &str, range: &Range<usize>) -> String {
    source[range.clone()].trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraphs_split_on_blank_lines() {
        let doc = parse_document("first paragraph\n\nsecond paragraph\n");
        assert_eq!(
            doc.blocks,
            vec![
                Block::Paragraph {
                    text: "first paragraph".to_string()
                },
                Block::Paragraph {
                    text: "second paragraph".to_string()
                },
            ]
        );
    }

    #[test]
    fn heading_keeps_raw_marker_and_level() {
        let doc = parse_document("### Third level\n");
        assert_eq!(
            doc.blocks,
            vec![Block::Heading {
                level: 3,
                text: "### Third level".to_string()
            }]
        );
    }

    #[test]
    fn unordered_list_items_in_order() {
        let doc = parse_document("- one\n- two\n- three\n");
        let Block::List { ordered, items } = &doc.blocks[0] else {
            panic!("expected list, got {:?}", doc.blocks);
        };
        assert!(!ordered);
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].source, "- one");
        assert_eq!(items[2].source, "- three");
    }

    #[test]
    fn ordered_list_is_flagged_ordered() {
        let doc = parse_document("1. first\n2. second\n");
        let Block::List { ordered, items } = &doc.blocks[0] else {
            panic!("expected list");
        };
        assert!(ordered);
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn tight_item_synthesizes_one_paragraph() {
        let doc = parse_document("- plain **bold** tail\n");
        let Block::List { items, .. } = &doc.blocks[0] else {
            panic!("expected list");
        };
        assert_eq!(
            items[0].blocks,
            vec![Block::Paragraph {
                text: "plain **bold** tail".to_string()
            }]
        );
    }

    #[test]
    fn loose_item_keeps_multiple_paragraphs() {
        let md = "- first paragraph\n\n  second paragraph\n\n- next item\n";
        let doc = parse_document(md);
        let Block::List { items, .. } = &doc.blocks[0] else {
            panic!("expected list");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(
            items[0].blocks,
            vec![
                Block::Paragraph {
                    text: "first paragraph".to_string()
                },
                Block::Paragraph {
                    text: "second paragraph".to_string()
                },
            ]
        );
    }

    #[test]
    fn nested_list_flattens_into_parent_item() {
        let md = "- parent\n  - child one\n  - child two\n";
        let doc = parse_document(md);
        let Block::List { items, .. } = &doc.blocks[0] else {
            panic!("expected list");
        };
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].blocks.len(), 3);
        assert_eq!(
            items[0].blocks[0],
            Block::Paragraph {
                text: "parent".to_string()
            }
        );
    }

    #[test]
    fn table_is_recognized_but_kept_raw() {
        let md = "| a | b |\n|---|---|\n| 1 | 2 |\n";
        let doc = parse_document(md);
        assert_eq!(doc.blocks.len(), 1);
        let Block::Table { source } = &doc.blocks[0] else {
            panic!("expected table, got {:?}", doc.blocks);
        };
        assert!(source.contains("| a | b |"));
    }

    #[test]
    fn code_fence_recovers_as_paragraph() {
        let md = "```\nlet x = 1;\n```\n";
        let doc = parse_document(md);
        assert_eq!(doc.blocks.len(), 1);
        assert!(matches!(doc.blocks[0], Block::Paragraph { .. }));
    }

    #[test]
    fn mixed_document_preserves_block_order() {
        let md = "# Title\n\nintro\n\n- a\n- b\n\noutro\n";
        let doc = parse_document(md);
        assert!(matches!(doc.blocks[0], Block::Heading { level: 1, .. }));
        assert!(matches!(doc.blocks[1], Block::Paragraph { .. }));
        assert!(matches!(doc.blocks[2], Block::List { .. }));
        assert!(matches!(doc.blocks[3], Block::Paragraph { .. }));
    }

    #[test]
    fn empty_input_parses_to_empty_document() {
        assert_eq!(parse_document("").blocks, vec![]);
    }
}
