//! The document-buffer facade: the compiler's only I/O seam.
//!
//! The compiler never talks to a remote document directly. It reads one end
//! offset through [`DocumentBuffer`], emits its stream, and hands the ops
//! back through `apply`. [`LocalBuffer`] is the in-memory implementation
//! used by the CLI preview and by tests to replay streams and check that
//! every range lands inside inserted text.

use thiserror::Error;

use crate::compile::{CompileOptions, UnsupportedConstruct, compile};
use crate::compile::ops::{BulletPreset, EditOperation, NamedStyle, TextStyle};
use crate::parsing::parse_document;

#[derive(Debug, Error)]
pub enum BufferError {
    #[error("insert offset {offset} is outside the buffer (valid range {base}..={end})")]
    InsertOutOfBounds {
        offset: usize,
        base: usize,
        end: usize,
    },
    #[error("style range [{start}, {end}) is not covered by buffer text (end {buffer_end})")]
    RangeOutOfBounds {
        start: usize,
        end: usize,
        buffer_end: usize,
    },
    /// A transport or remote-state failure from a non-local implementation.
    /// The stream is no longer valid; re-query the end offset and recompile.
    #[error("buffer apply failed: {0}")]
    Apply(String),
}

/// Result of one `apply` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyOutcome {
    pub new_end_offset: usize,
    pub applied: usize,
}

/// The target buffer's contract: one offset query, then ordered applies.
///
/// Operations must be applied in the exact order the compiler produced
/// them; every op's offsets assume the cumulative effect of all earlier
/// ops. After a failed apply the remaining ops are invalid and the caller
/// must re-query the end offset and recompile.
pub trait DocumentBuffer {
    fn current_end_offset(&self) -> usize;
    fn apply(&mut self, ops: &[EditOperation]) -> Result<ApplyOutcome, BufferError>;
}

/// An in-memory buffer addressed by character offset.
///
/// `base` models a buffer whose writable region starts above zero (remote
/// document bodies commonly start at 1). Applies are all-or-nothing: the
/// ops are staged against a copy and committed only if every one lands.
#[derive(Debug, Clone, Default)]
pub struct LocalBuffer {
    base: usize,
    text: Vec<char>,
    text_styles: Vec<(usize, usize, TextStyle)>,
    paragraph_styles: Vec<(usize, usize, NamedStyle)>,
    bullets: Vec<(usize, usize, BulletPreset)>,
}

impl LocalBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base(base: usize) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    pub fn text(&self) -> String {
        self.text.iter().collect()
    }

    pub fn text_styles(&self) -> &[(usize, usize, TextStyle)] {
        &self.text_styles
    }

    pub fn paragraph_styles(&self) -> &[(usize, usize, NamedStyle)] {
        &self.paragraph_styles
    }

    pub fn bullets(&self) -> &[(usize, usize, BulletPreset)] {
        &self.bullets
    }

    fn apply_one(&mut self, op: &EditOperation) -> Result<(), BufferError> {
        let end = self.base + self.text.len();
        match op {
            EditOperation::InsertText { offset, text } => {
                if *offset < self.base || *offset > end {
                    return Err(BufferError::InsertOutOfBounds {
                        offset: *offset,
                        base: self.base,
                        end,
                    });
                }
                let at = offset - self.base;
                self.text.splice(at..at, text.chars());
            }
            EditOperation::SetTextStyle { start, end: to, style } => {
                self.check_range(*start, *to)?;
                self.text_styles.push((*start, *to, style.clone()));
            }
            EditOperation::SetParagraphStyle {
                start,
                end: to,
                named_style,
            } => {
                self.check_range(*start, *to)?;
                self.paragraph_styles.push((*start, *to, *named_style));
            }
            EditOperation::SetBullet {
                start,
                end: to,
                preset,
            } => {
                self.check_range(*start, *to)?;
                self.bullets.push((*start, *to, *preset));
            }
        }
        Ok(())
    }

    fn check_range(&self, start: usize, end: usize) -> Result<(), BufferError> {
        let buffer_end = self.base + self.text.len();
        if start < self.base || start >= end || end > buffer_end {
            return Err(BufferError::RangeOutOfBounds {
                start,
                end,
                buffer_end,
            });
        }
        Ok(())
    }
}

impl DocumentBuffer for LocalBuffer {
    fn current_end_offset(&self) -> usize {
        self.base + self.text.len()
    }

    fn apply(&mut self, ops: &[EditOperation]) -> Result<ApplyOutcome, BufferError> {
        let mut staged = self.clone();
        for op in ops {
            staged.apply_one(op)?;
        }
        *self = staged;
        Ok(ApplyOutcome {
            new_end_offset: self.current_end_offset(),
            applied: ops.len(),
        })
    }
}

/// Result of one [`push_markdown`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct PushOutcome {
    pub end_offset: usize,
    pub applied: usize,
    pub skipped: Vec<UnsupportedConstruct>,
}

/// Queries the buffer's end offset, compiles the markup against it, and
/// applies the whole stream in one ordered call.
///
/// No retry happens here: on failure the buffer may be partially mutated
/// per its own semantics, so the caller must re-query and recompile.
pub fn push_markdown(
    buffer: &mut dyn DocumentBuffer,
    markdown: &str,
    options: &CompileOptions,
) -> Result<PushOutcome, BufferError> {
    let start = buffer.current_end_offset();
    let compiled = compile(&parse_document(markdown), start, options);
    let outcome = buffer.apply(&compiled.ops)?;
    Ok(PushOutcome {
        end_offset: outcome.new_end_offset,
        applied: outcome.applied,
        skipped: compiled.skipped,
    })
}
