use super::{
    cursor::Cursor,
    kinds::{Bold, Code, Italic, Link},
    types::{InlineSpan, SpanKind},
};

/// The result of the single structural pass over a block's source text:
/// the plain text with all markup syntax removed, and every resolved span
/// expressed in character offsets into that plain text.
#[derive(Debug, Clone, Default)]
pub struct Rendered {
    pub text: String,
    pub spans: Vec<InlineSpan>,
}

/// Resolution context threaded through nested constructs.
///
/// Italic inside bold is parsed (its delimiters are stripped) but its span is
/// suppressed, so `**a *b* c**` yields one Bold span over `a b c` and nothing
/// else. Links do not nest inside links.
#[derive(Clone, Copy)]
struct Ctx {
    bold: bool,
    italic: bool,
    emit_italic: bool,
    link: bool,
}

impl Ctx {
    fn top() -> Self {
        Ctx {
            bold: true,
            italic: true,
            emit_italic: true,
            link: true,
        }
    }

    fn inside_bold(self) -> Self {
        Ctx {
            bold: false,
            italic: true,
            emit_italic: false,
            link: self.link,
        }
    }

    fn inside_italic(self) -> Self {
        Ctx {
            bold: false,
            italic: false,
            emit_italic: false,
            link: self.link,
        }
    }

    fn inside_link(self) -> Self {
        Ctx {
            bold: true,
            italic: true,
            emit_italic: self.emit_italic,
            link: false,
        }
    }
}

/// A recognized inline construct with borrowed source slices.
enum Construct<'a> {
    Code { inner: &'a str },
    Bold { inner: &'a str },
    Italic { inner: &'a str },
    Link { text: &'a str, url: &'a str },
}

/// Resolves one block's marker-stripped source into plain text plus spans.
///
/// # Precedence
/// Code spans are checked first and are raw zones: nothing is parsed inside
/// them. Bold is checked before italic so a `**` opener is never read as two
/// italic stars. Unclosed delimiters fall back to literal text.
///
/// Spans are returned sorted by start offset; zero-length spans are dropped.
pub fn render_inline(s: &str) -> Rendered {
    let mut r = Renderer::default();
    parse_segment(&mut r, s, Ctx::top());
    r.spans.sort_by_key(|sp| (sp.start, sp.end));
    Rendered {
        text: r.text,
        spans: r.spans,
    }
}

/// Accumulates plain text and spans while tracking the character length of
/// the text built so far (so span offsets never require a re-count).
#[derive(Default)]
struct Renderer {
    text: String,
    chars: usize,
    spans: Vec<InlineSpan>,
}

impl Renderer {
    fn push(&mut self, s: &str) {
        self.chars += s.chars().count();
        self.text.push_str(s);
    }

    fn mark(&self) -> usize {
        self.chars
    }

    /// Closes a span opened at `start`. Empty spans are dropped, never emitted.
    fn span(&mut self, kind: SpanKind, start: usize) {
        if self.chars > start {
            self.spans.push(InlineSpan {
                kind,
                start,
                end: self.chars,
            });
        }
    }
}

fn parse_segment(r: &mut Renderer, s: &str, ctx: Ctx) {
    let mut cur = Cursor::new(s);
    let mut text_start = 0;

    while !cur.eof() {
        let at = cur.i;
        if let Some(construct) = try_construct(&mut cur, ctx) {
            r.push(&s[text_start..at]);
            emit(r, construct, ctx);
            text_start = cur.i;
        } else {
            cur.bump();
        }
    }

    r.push(&s[text_start..]);
}

fn emit(r: &mut Renderer, construct: Construct<'_>, ctx: Ctx) {
    match construct {
        Construct::Code { inner } => {
            let start = r.mark();
            // Raw zone: inner text is copied verbatim
            r.push(inner);
            r.span(SpanKind::Code, start);
        }
        Construct::Bold { inner } => {
            let start = r.mark();
            parse_segment(r, inner, ctx.inside_bold());
            r.span(SpanKind::Bold, start);
        }
        Construct::Italic { inner } => {
            let start = r.mark();
            parse_segment(r, inner, ctx.inside_italic());
            if ctx.emit_italic {
                r.span(SpanKind::Italic, start);
            }
        }
        Construct::Link { text, url } => {
            let start = r.mark();
            parse_segment(r, text, ctx.inside_link());
            r.span(SpanKind::Link(url.to_string()), start);
        }
    }
}

fn try_construct<'a>(cur: &mut Cursor<'a>, ctx: Ctx) -> Option<Construct<'a>> {
    let b = cur.peek()?;
    if b == Code::TICK {
        return try_code_span(cur);
    }
    if b == Italic::STAR {
        if cur.starts_with(Bold::DELIM) {
            return if ctx.bold { try_bold(cur) } else { None };
        }
        return if ctx.italic { try_italic(cur) } else { None };
    }
    if b == Link::OPEN && ctx.link {
        return try_link(cur);
    }
    None
}

/// Attempts to parse a code span starting at the current position.
///
/// Returns `None` if the code span isn't closed. On failure, cursor position
/// is restored.
fn try_code_span<'a>(cur: &mut Cursor<'a>) -> Option<Construct<'a>> {
    let saved = cur.clone();
    cur.bump_n(1);
    let Some(close) = cur.find_byte(Code::TICK) else {
        *cur = saved;
        return None;
    };
    let inner = &cur.s[cur.i..close];
    cur.jump(close + 1);
    Some(Construct::Code { inner })
}

fn try_bold<'a>(cur: &mut Cursor<'a>) -> Option<Construct<'a>> {
    let saved = cur.clone();
    cur.bump_n(Bold::DELIM.len());
    let Some(close) = cur.find(Bold::DELIM) else {
        *cur = saved;
        return None;
    };
    let inner = &cur.s[cur.i..close];
    cur.jump(close + Bold::DELIM.len());
    Some(Construct::Bold { inner })
}

fn try_italic<'a>(cur: &mut Cursor<'a>) -> Option<Construct<'a>> {
    let saved = cur.clone();
    cur.bump_n(1);
    let Some(close) = cur.find_byte(Italic::STAR) else {
        *cur = saved;
        return None;
    };
    let inner = &cur.s[cur.i..close];
    cur.jump(close + 1);
    Some(Construct::Italic { inner })
}

/// Attempts to parse `[text](url)` starting at the current position.
///
/// The closing bracket must be immediately followed by `(`. On any missing
/// delimiter the cursor is restored and the `[` is treated as literal text.
fn try_link<'a>(cur: &mut Cursor<'a>) -> Option<Construct<'a>> {
    let saved = cur.clone();
    cur.bump_n(1);
    let Some(close) = cur.find_byte(Link::CLOSE) else {
        *cur = saved;
        return None;
    };
    let text = &cur.s[cur.i..close];
    if cur.s.as_bytes().get(close + 1) != Some(&Link::URL_OPEN) {
        *cur = saved;
        return None;
    }
    cur.jump(close + 2);
    let Some(url_close) = cur.find_byte(Link::URL_CLOSE) else {
        *cur = saved;
        return None;
    };
    let url = &cur.s[cur.i..url_close];
    cur.jump(url_close + 1);
    Some(Construct::Link { text, url })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passes_through() {
        let r = render_inline("hello world");
        assert_eq!(r.text, "hello world");
        assert!(r.spans.is_empty());
    }

    #[test]
    fn bold_span_offsets_are_into_plain_text() {
        let r = render_inline("Hello **world**");
        assert_eq!(r.text, "Hello world");
        assert_eq!(
            r.spans,
            vec![InlineSpan {
                kind: SpanKind::Bold,
                start: 6,
                end: 11,
            }]
        );
    }

    #[test]
    fn italic_span_resolves() {
        let r = render_inline("an *important* word");
        assert_eq!(r.text, "an important word");
        assert_eq!(
            r.spans,
            vec![InlineSpan {
                kind: SpanKind::Italic,
                start: 3,
                end: 12,
            }]
        );
    }

    #[test]
    fn italic_fully_inside_bold_is_suppressed() {
        let r = render_inline("**a *b* c**");
        assert_eq!(r.text, "a b c");
        assert_eq!(
            r.spans,
            vec![InlineSpan {
                kind: SpanKind::Bold,
                start: 0,
                end: 5,
            }]
        );
    }

    #[test]
    fn code_span_is_a_raw_zone() {
        let r = render_inline("run `**not bold**` now");
        assert_eq!(r.text, "run **not bold** now");
        assert_eq!(
            r.spans,
            vec![InlineSpan {
                kind: SpanKind::Code,
                start: 4,
                end: 16,
            }]
        );
    }

    #[test]
    fn link_keeps_display_text_and_drops_url() {
        let r = render_inline("see [the docs](https://example.com) here");
        assert_eq!(r.text, "see the docs here");
        assert_eq!(
            r.spans,
            vec![InlineSpan {
                kind: SpanKind::Link("https://example.com".to_string()),
                start: 4,
                end: 12,
            }]
        );
    }

    #[test]
    fn bold_inside_link_text_emits_both_spans() {
        let r = render_inline("[**a**](u)");
        assert_eq!(r.text, "a");
        assert_eq!(r.spans.len(), 2);
        assert!(r.spans.iter().any(|s| s.kind == SpanKind::Bold));
        assert!(
            r.spans
                .iter()
                .any(|s| s.kind == SpanKind::Link("u".to_string()))
        );
        // Both cover the same display-text range
        assert!(r.spans.iter().all(|s| s.start == 0 && s.end == 1));
    }

    #[test]
    fn unclosed_bold_stays_literal() {
        let r = render_inline("a **b");
        assert_eq!(r.text, "a **b");
        assert!(r.spans.is_empty());
    }

    #[test]
    fn unclosed_code_stays_literal() {
        let r = render_inline("a `b");
        assert_eq!(r.text, "a `b");
        assert!(r.spans.is_empty());
    }

    #[test]
    fn bracket_without_url_stays_literal() {
        let r = render_inline("[not a link] text");
        assert_eq!(r.text, "[not a link] text");
        assert!(r.spans.is_empty());
    }

    #[test]
    fn empty_bold_is_stripped_but_emits_no_span() {
        let r = render_inline("a ****b");
        assert_eq!(r.text, "a b");
        assert!(r.spans.is_empty());
    }

    #[test]
    fn repeated_words_get_distinct_offsets() {
        // Offsets are structural, so two bold runs over the same word
        // resolve to their own positions rather than the first match.
        let r = render_inline("**go** and **go**");
        assert_eq!(r.text, "go and go");
        assert_eq!(
            r.spans,
            vec![
                InlineSpan {
                    kind: SpanKind::Bold,
                    start: 0,
                    end: 2,
                },
                InlineSpan {
                    kind: SpanKind::Bold,
                    start: 7,
                    end: 9,
                },
            ]
        );
    }

    #[test]
    fn offsets_count_characters_not_bytes() {
        let r = render_inline("héllo **wörld**");
        assert_eq!(r.text, "héllo wörld");
        assert_eq!(
            r.spans,
            vec![InlineSpan {
                kind: SpanKind::Bold,
                start: 6,
                end: 11,
            }]
        );
    }

    #[test]
    fn link_inside_bold_emits_both_spans() {
        let r = render_inline("**see [x](u)**");
        assert_eq!(r.text, "see x");
        assert_eq!(r.spans.len(), 2);
        let bold = r
            .spans
            .iter()
            .find(|s| s.kind == SpanKind::Bold)
            .expect("bold span");
        assert_eq!((bold.start, bold.end), (0, 5));
        let link = r
            .spans
            .iter()
            .find(|s| matches!(s.kind, SpanKind::Link(_)))
            .expect("link span");
        assert_eq!((link.start, link.end), (4, 5));
    }
}
