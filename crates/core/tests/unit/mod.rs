//! # Unit Components
//!
//! Organizes the unit tests by crate module: bit formatting, the instruction
//! set pieces, quiz generation and grading, configuration, and scoring.
