//! Drill score keeping.
//!
//! Tracks how a session is going across every graded step:
//! 1. **Points:** Matching positions earned versus positions graded.
//! 2. **Steps:** Graded steps attempted and steps answered fully correctly.
//! 3. **Accuracy:** Integer percentage of points earned.

use std::fmt;

use serde::Serialize;

use crate::quiz::grading::Verdict;

/// Accumulated score of a drill session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct QuizStats {
    /// Points earned across all graded steps.
    pub points: u64,
    /// Points available across all graded steps.
    pub total_points: u64,
    /// Number of graded steps.
    pub attempts: u64,
    /// Number of graded steps answered with full marks.
    pub successes: u64,
}

impl QuizStats {
    /// Creates an empty score.
    pub const fn new() -> Self {
        Self {
            points: 0,
            total_points: 0,
            attempts: 0,
            successes: 0,
        }
    }

    /// Records one graded step worth `total` points, of which `points` were earned.
    pub const fn record(&mut self, points: u32, total: u32) {
        self.points += points as u64;
        self.total_points += total as u64;
        self.attempts += 1;
        if points == total {
            self.successes += 1;
        }
    }

    /// Records a single pass/fail step worth one point.
    pub const fn record_check(&mut self, correct: bool) {
        self.record(correct as u32, 1);
    }

    /// Records a positional verdict.
    pub fn record_verdict<T>(&mut self, verdict: &Verdict<T>) {
        self.record(verdict.points(), verdict.total());
    }

    /// Floored percentage of points earned; 0 before anything is recorded.
    pub const fn accuracy_percent(&self) -> u64 {
        if self.total_points == 0 {
            0
        } else {
            self.points * 100 / self.total_points
        }
    }
}

impl fmt::Display for QuizStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} ({}%)",
            self.points,
            self.total_points,
            self.accuracy_percent()
        )
    }
}
