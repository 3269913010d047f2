use crate::{EffectiveAddress, Instruction, Operand, OperandSize};
use std::fmt::{Display, Formatter};

impl Display for EffectiveAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            EffectiveAddress::Direct(address) => write!(f, "[{}]", address),
            EffectiveAddress::Calculated(base, displacement) => match displacement {
                0 => write!(f, "[{}]", base),
                d if *d < 0 => write!(f, "[{} - {}]", base, d.unsigned_abs()),
                d => write!(f, "[{} + {}]", base, d),
            },
        }
    }
}

impl Display for Operand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Register(register) => register.fmt(f),
            Operand::Segment(segment) => segment.fmt(f),
            Operand::Memory(address) => address.fmt(f),
            Operand::Immediate(value) => write!(f, "{}", value),
            Operand::SizedImmediate(value, operand_size) => match operand_size {
                OperandSize::Byte => write!(f, "byte {}", value),
                OperandSize::Word => write!(f, "word {}", value),
            },
        }
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (destination, source) = self.operands();
        write!(f, "{} {}, {}", self.opcode.mnemonic(), destination, source)
    }
}

/// Renders a single output line for the instruction, including the trailing newline.
pub fn render(instruction: &Instruction) -> String {
    format!("{}\n", instruction)
}
