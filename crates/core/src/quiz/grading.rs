//! Positional answer grading.
//!
//! Each grader compares a user-supplied sequence position by position against
//! the expected sequence derived from the question's layout or ground truth.
//! A wrong answer is a normal outcome, reported as a failing [`Verdict`]; the
//! graders never return errors and never mutate their inputs.

use serde::Serialize;

use crate::isa::encode::GroundTruth;
use crate::isa::format::Format;
use crate::quiz::question::Question;

/// Bare slot name accepted for any immediate slot.
const IMM_ALIAS: &str = "imm";

/// Outcome of grading one ordered answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict<T> {
    /// Every position matched and the lengths agree.
    pub passed: bool,
    /// Per-position result; as long as `expected`, missing positions are `false`.
    pub mask: Vec<bool>,
    /// The expected sequence, for feedback.
    pub expected: Vec<T>,
}

impl<T> Verdict<T> {
    /// Number of matching positions.
    pub fn points(&self) -> u32 {
        self.mask.iter().filter(|&&ok| ok).count() as u32
    }

    /// Number of gradable positions.
    pub fn total(&self) -> u32 {
        self.expected.len() as u32
    }
}

/// Grades `input` against `expected` one position at a time.
fn positional<T, U>(expected: Vec<T>, input: &[U], matches: impl Fn(&U, &T) -> bool) -> Verdict<T> {
    let mask: Vec<bool> = expected
        .iter()
        .enumerate()
        .map(|(i, want)| input.get(i).is_some_and(|got| matches(got, want)))
        .collect();
    let passed = input.len() == expected.len() && mask.iter().all(|&ok| ok);
    Verdict {
        passed,
        mask,
        expected,
    }
}

/// Compares one field name, ignoring case and surrounding whitespace.
///
/// The bare name `imm` matches any immediate slot.
fn name_matches(got: &str, want: &str) -> bool {
    let got = got.trim().to_lowercase();
    got == want || (got == IMM_ALIAS && want.starts_with("imm["))
}

/// Grades field names in layout order.
pub fn validate_field_names<S: AsRef<str>>(question: &Question, input: &[S]) -> Verdict<String> {
    let expected = question.instruction.layout().field_names();
    positional(expected, input, |got, want| name_matches(got.as_ref(), want))
}

/// Grades field bit widths in layout order.
///
/// Entries are parsed as integers; an entry that is not a number is simply
/// marked incorrect.
pub fn validate_field_bit_widths<S: AsRef<str>>(question: &Question, input: &[S]) -> Verdict<u32> {
    let expected = question.instruction.layout().bit_widths();
    positional(expected, input, |got, &want| {
        got.as_ref()
            .trim()
            .parse::<i64>()
            .is_ok_and(|n| n == i64::from(want))
    })
}

/// Grades per-field binary strings against the ground truth, exactly.
pub fn validate_field_binaries<S: AsRef<str>>(truth: &GroundTruth, input: &[S]) -> Verdict<String> {
    let expected = truth.fields.iter().map(|f| f.bits.clone()).collect();
    positional(expected, input, |got, want| got.as_ref().trim() == want)
}

/// Checks a final hex answer, with or without a `0x` prefix, ignoring case.
pub fn check_hex_answer(truth: &GroundTruth, answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    let digits = answer.strip_prefix("0x").unwrap_or(&answer);
    digits == truth.hex
}

/// Checks a format-letter answer, ignoring case.
pub fn check_format_answer(question: &Question, answer: &str) -> bool {
    Format::from_letter(answer) == Some(question.format())
}
