pub mod buffer;
pub mod compile;
pub mod error;
pub mod parsing;

// Re-export key types for easier usage
pub use buffer::{ApplyOutcome, BufferError, DocumentBuffer, LocalBuffer, PushOutcome, push_markdown};
pub use compile::{
    CompileOptions, CompiledDocument, UnsupportedConstruct, compile, compile_answer_sheet,
    compile_worksheet,
    ops::{BulletPreset, EditOperation, NamedStyle, ParsePresetError, Rgb, TextStyle},
};
pub use error::CompileError;
pub use parsing::{
    Block, InlineSpan, ListItem, MarkupDocument, SpanKind, extract, parse_document, resolve,
};
