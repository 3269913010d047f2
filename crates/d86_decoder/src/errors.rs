use std::fmt;

/// The fields of an instruction that are validated while decoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Reg,
    RegisterOrMemory,
    Segment,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Reg => write!(f, "reg"),
            Field::RegisterOrMemory => write!(f, "r/m"),
            Field::Segment => write!(f, "segment"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("Unrecognized op code ({op_code:#04x}) at offset {offset:#06x}")]
    UnrecognizedOpcode { offset: usize, op_code: u8 },

    #[error("Invalid {field} encoding ({encoding:#05b}) at offset {offset:#06x}")]
    InvalidField {
        offset: usize,
        field: Field,
        encoding: u8,
    },

    #[error("Truncated instruction at offset {offset:#06x}, only {available} byte(s) left")]
    TruncatedStream { offset: usize, available: usize },
}

pub type Result<T> = std::result::Result<T, DecodeError>;
