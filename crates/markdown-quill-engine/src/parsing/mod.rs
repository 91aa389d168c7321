//! Markup parsing: block structure plus inline style resolution.
//!
//! The pipeline runs in two layers. [`blocks`] turns raw markup into an
//! ordered [`MarkupDocument`] of blocks, each still carrying its inline
//! markup source. [`extract`] and [`inline`] then turn a block's source into
//! plain text and character-offset style spans in a single pass, so the
//! compiler never searches the output text for styled fragments.

pub mod blocks;
pub mod extract;
pub mod inline;

pub use blocks::{Block, ListItem, MarkupDocument, parse_document};
pub use extract::{extract, resolve};
pub use inline::{InlineSpan, Rendered, SpanKind, render_inline};
