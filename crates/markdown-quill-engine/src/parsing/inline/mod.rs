//! Inline resolution: one structural pass per block.
//!
//! The resolver walks a block's marker-stripped source text with a cursor and
//! produces two things at once: the stripped plain text, and the set of
//! styled spans expressed as character offsets into that plain text. Because
//! both come out of the same pass, span positions are derived, never found by
//! searching the rendered text - repeated substrings cannot misplace a style.
//!
//! ## Precedence
//!
//! - Code spans first; they are raw zones that suppress all other parsing.
//! - Bold (`**`) before italic, so a bold opener is never read as italics.
//! - Italic fully nested inside bold is stripped but emits no span.
//! - Links resolve to their display text; nested bold/italic/code inside the
//!   display text emit their own spans over the same plain-text range.
//!
//! ## Modules
//!
//! - **`types`**: `InlineSpan` and `SpanKind`
//! - **`kinds`**: delimiter constants owned by their construct
//! - **`cursor`**: byte cursor with save/restore for backtracking
//! - **`parser`**: `render_inline()` entry point with `try_*` helpers

pub mod cursor;
pub mod kinds;
pub mod parser;
pub mod types;

pub use parser::{Rendered, render_inline};
pub use types::{InlineSpan, SpanKind};
