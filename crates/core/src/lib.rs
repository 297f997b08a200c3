//! RISC-V instruction encoding drill library.
//!
//! This crate implements the encoding core behind the `rvtutor` drills:
//! 1. **Bits:** Fixed-width binary and hex formatting, binary parsing, and sign extension.
//! 2. **ISA:** Instruction formats, canonical field layouts, the validated instruction registry,
//!    immediate swizzling, ground-truth assembly, and single-word decoding.
//! 3. **Quiz:** Random question generation, assembly-syntax rendering, and positional grading.
//! 4. **Session:** Drill configuration and score keeping.

/// Common types shared across the crate (errors, bit formatting).
pub mod common;
/// Drill configuration (format selection, seeding, display options).
pub mod config;
/// Instruction set (formats, layouts, registry, swizzling, encoding, decoding).
pub mod isa;
/// Question generation and answer grading.
pub mod quiz;
/// Score keeping across graded drill steps.
pub mod stats;

/// Root configuration type; use `DrillConfig::default()` or deserialize from JSON.
pub use crate::config::DrillConfig;
/// Errors surfaced by the core.
pub use crate::common::error::{ConfigError, ValidationError};
/// Instruction catalog and the descriptors it holds.
pub use crate::isa::registry::{InstructionDescriptor, InstructionRegistry};
/// Canonical answer key for a question.
pub use crate::isa::encode::GroundTruth;
/// Instruction format letter.
pub use crate::isa::format::Format;
/// A single quiz round.
pub use crate::quiz::question::Question;
/// Accumulated drill score.
pub use crate::stats::QuizStats;
