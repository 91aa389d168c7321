//! Worksheet and answer-sheet compilation.
//!
//! Both variants share the compiler's cursor discipline but build their
//! text themselves instead of parsing markup: a TITLE-styled bold title,
//! then numbered problems (worksheet) or tab-separated problem/answer rows
//! (answer sheet).

use crate::error::CompileError;

use super::compiler::{CompiledDocument, Emitter};
use super::ops::{EditOperation, NamedStyle, TextStyle};

/// Compiles a worksheet: a centered title followed by `N. problem`
/// paragraphs, one blank line after each.
pub fn compile_worksheet<S: AsRef<str>>(
    title: &str,
    problems: &[S],
    start_offset: usize,
) -> CompiledDocument {
    let mut emitter = Emitter::new(start_offset);
    emit_title(&mut emitter, title);

    for (number, problem) in problems.iter().enumerate() {
        emitter.insert(&format!("{}. {}\n\n", number + 1, problem.as_ref()));
    }

    CompiledDocument {
        end_offset: emitter.cursor,
        ops: emitter.ops,
        skipped: Vec::new(),
    }
}

/// Compiles an answer sheet: the title, a `Problem\tAnswer` header row, a
/// dashed separator, then one tab-separated row per pair.
///
/// The contract requires one answer per problem; unequal lengths fail with
/// [`CompileError::ListLengthMismatch`] and no operations are produced.
pub fn compile_answer_sheet<S: AsRef<str>, A: AsRef<str>>(
    title: &str,
    problems: &[S],
    answers: &[A],
    start_offset: usize,
) -> Result<CompiledDocument, CompileError> {
    if problems.len() != answers.len() {
        return Err(CompileError::ListLengthMismatch {
            problems: problems.len(),
            answers: answers.len(),
        });
    }

    let mut emitter = Emitter::new(start_offset);
    emit_title(&mut emitter, title);

    emitter.insert("Problem\tAnswer\n");
    emitter.insert("-------\t-------\n");
    for (problem, answer) in problems.iter().zip(answers) {
        emitter.insert(&format!("{}\t{}\n", problem.as_ref(), answer.as_ref()));
    }

    Ok(CompiledDocument {
        end_offset: emitter.cursor,
        ops: emitter.ops,
        skipped: Vec::new(),
    })
}

/// Inserts the title followed by a blank line, bolds the title text, and
/// applies the TITLE paragraph style over it.
fn emit_title(emitter: &mut Emitter, title: &str) {
    let (start, _) = emitter.insert(&format!("{title}\n\n"));
    let title_end = start + title.chars().count();
    if title_end > start {
        emitter.ops.push(EditOperation::SetTextStyle {
            start,
            end: title_end,
            style: TextStyle::bold(),
        });
        emitter.ops.push(EditOperation::SetParagraphStyle {
            start,
            end: title_end,
            named_style: NamedStyle::Title,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn worksheet_numbers_problems_from_one() {
        let compiled = compile_worksheet("Quiz", &["2+2", "3*3"], 1);
        assert_eq!(
            compiled.ops,
            vec![
                EditOperation::InsertText {
                    offset: 1,
                    text: "Quiz\n\n".to_string(),
                },
                EditOperation::SetTextStyle {
                    start: 1,
                    end: 5,
                    style: TextStyle::bold(),
                },
                EditOperation::SetParagraphStyle {
                    start: 1,
                    end: 5,
                    named_style: NamedStyle::Title,
                },
                EditOperation::InsertText {
                    offset: 7,
                    text: "1. 2+2\n\n".to_string(),
                },
                EditOperation::InsertText {
                    offset: 15,
                    text: "2. 3*3\n\n".to_string(),
                },
            ]
        );
        assert_eq!(compiled.end_offset, 23);
    }

    #[test]
    fn worksheet_with_no_problems_is_just_the_title() {
        let compiled = compile_worksheet::<&str>("Empty", &[], 0);
        assert_eq!(compiled.ops.len(), 3);
        assert_eq!(compiled.end_offset, 7);
    }

    #[test]
    fn answer_sheet_rows_follow_the_header() {
        let compiled = compile_answer_sheet("Answers", &["1", "2"], &["4", "9"], 0).unwrap();
        let texts: Vec<&str> = compiled
            .ops
            .iter()
            .filter_map(|op| match op {
                EditOperation::InsertText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            texts,
            vec![
                "Answers\n\n",
                "Problem\tAnswer\n",
                "-------\t-------\n",
                "1\t4\n",
                "2\t9\n",
            ]
        );
    }

    #[test]
    fn length_mismatch_is_fatal_and_emits_nothing() {
        let err = compile_answer_sheet("Answers", &["1", "2", "3"], &["4", "9"], 0).unwrap_err();
        assert_eq!(
            err,
            CompileError::ListLengthMismatch {
                problems: 3,
                answers: 2,
            }
        );
    }

    #[test]
    fn title_styles_cover_characters_not_bytes() {
        let compiled = compile_worksheet::<&str>("Résumé", &[], 3);
        assert_eq!(
            compiled.ops[1],
            EditOperation::SetTextStyle {
                start: 3,
                end: 9,
                style: TextStyle::bold(),
            }
        );
    }
}
