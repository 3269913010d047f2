//! Decodes the MOV family of 8086 instructions from a flat byte buffer.

mod decode;
mod errors;
mod mod_reg_rm;
mod stream;
mod traits;

#[cfg(test)]
mod test;

pub use decode::decode_instruction;
pub use errors::{DecodeError, Field, Result};
pub use stream::{decode_all, InstructionStream};
