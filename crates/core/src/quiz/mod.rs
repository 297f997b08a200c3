//! Quiz rounds and grading.
//!
//! Turns the encoding core into drill material:
//! 1. **Questions:** Random instruction and operand selection within per-format ranges.
//! 2. **Rendering:** Canonical assembly syntax for a question.
//! 3. **Grading:** Positional comparison of field names, bit widths, field binaries, and hex.

/// Positional graders.
pub mod grading;

/// Question generation and rendering.
pub mod question;

pub use grading::{
    Verdict, check_format_answer, check_hex_answer, validate_field_binaries,
    validate_field_bit_widths, validate_field_names,
};
pub use question::{
    Question, compute_ground_truth, format_assembly, generate_question, immediate_range,
};
