//! Base instruction format letters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::error::ConfigError;

/// One of the six RISC-V base instruction formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Format {
    /// Register-register operations.
    R,
    /// Short immediates and loads.
    I,
    /// Stores.
    S,
    /// Conditional branches.
    B,
    /// Upper immediates.
    U,
    /// Unconditional jumps.
    J,
}

impl Format {
    /// All formats in registry order.
    pub const ALL: [Self; 6] = [Self::R, Self::I, Self::S, Self::B, Self::U, Self::J];

    /// Returns the uppercase format letter.
    pub const fn letter(self) -> char {
        match self {
            Self::R => 'R',
            Self::I => 'I',
            Self::S => 'S',
            Self::B => 'B',
            Self::U => 'U',
            Self::J => 'J',
        }
    }

    /// Parses a single format letter, ignoring case and surrounding whitespace.
    ///
    /// Returns `None` for anything other than one of `RISBUJ`.
    pub fn from_letter(text: &str) -> Option<Self> {
        let mut chars = text.trim().chars();
        let letter = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Self::ALL
            .into_iter()
            .find(|f| f.letter() == letter.to_ascii_uppercase())
    }

    /// Whether the format carries a destination register.
    pub const fn writes_rd(self) -> bool {
        matches!(self, Self::R | Self::I | Self::U | Self::J)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for Format {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_letter(s).ok_or_else(|| ConfigError::InvalidFormat(s.trim().to_owned()))
    }
}
