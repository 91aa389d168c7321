//! Compilation: block tree in, ordered operation stream out.
//!
//! The compiler threads one cursor through the whole document. Every insert
//! lands at the cursor and advances it by the inserted character count;
//! every style range is derived from the cursor positions recorded while the
//! covered text was inserted. Nothing is ever located by searching output
//! text.

pub mod compiler;
pub mod ops;
pub mod worksheet;

pub use compiler::{CompileOptions, CompiledDocument, UnsupportedConstruct, compile};
pub use worksheet::{compile_answer_sheet, compile_worksheet};
