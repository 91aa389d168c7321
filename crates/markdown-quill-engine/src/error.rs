//! Errors that cross the compiler's public boundary.
//!
//! Parse and resolution problems (unknown blocks, spans that fail to
//! resolve, out-of-range heading levels) are absorbed locally with degraded
//! output and never surface here; only caller-contract violations do.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompileError {
    /// The answer-sheet contract requires one answer per problem.
    #[error("answer sheet needs one answer per problem: got {problems} problems, {answers} answers")]
    ListLengthMismatch { problems: usize, answers: usize },
}
