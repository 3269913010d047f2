//! This crate holds the structs and tables to represent a decoded MOV-family instruction for the
//! 8086 microprocessor, and renders them as assembly text.

mod display;
mod instruction;
mod register;

pub use display::render;
pub use instruction::{
    AddressingMode, Direction, EffectiveAddress, Instruction, Mode, Opcode, Operand, OperandSize,
};
pub use register::{
    resolve_operand_name, RegisterEncoding, Segment, SizedRegisterEncoding, REGISTER_ENCODINGS,
};
