use bincode::{Decode, Encode};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// Address of the little-endian RESET vector.
pub const RESET_VECTOR: u16 = 0xFFFC;

/// Address of the little-endian vector that BRK jumps through.
pub const BREAK_VECTOR: u16 = 0xFFFE;

/// Where the program counter points after construction or reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResetMode {
    /// PC starts at $0000, which is also the default program load address.
    #[default]
    ZeroPc,
    /// PC is loaded from the word at $FFFC, as on hardware.
    ResetVector,
}

impl ResetMode {
    pub const ALL: [Self; 2] = [Self::ZeroPc, Self::ResetVector];

    fn as_str(self) -> &'static str {
        match self {
            Self::ZeroPc => "zero-pc",
            Self::ResetVector => "reset-vector",
        }
    }
}

impl Display for ResetMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid reset mode '{0}'; expected 'zero-pc' or 'reset-vector'")]
pub struct ParseResetModeError(String);

impl FromStr for ResetMode {
    type Err = ParseResetModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseResetModeError(s.into()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CpuConfig {
    pub reset_mode: ResetMode,
    pub initial_stack_pointer: u8,
    pub break_vector: u16,
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self {
            reset_mode: ResetMode::default(),
            initial_stack_pointer: 0x00,
            break_vector: BREAK_VECTOR,
        }
    }
}
