use crate::{RegisterEncoding, Segment, SizedRegisterEncoding};
use std::fmt::{Display, Formatter};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperandSize {
    Byte = 0,
    Word = 1,
}

/// The `mod` field of a mode byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// `00`: memory without a displacement, except for `r/m = 110` which is a direct address.
    Memory = 0b00,
    /// `01`: memory with a sign extended 8-bit displacement.
    MemoryDisplacementByte = 0b01,
    /// `10`: memory with a 16-bit displacement.
    MemoryDisplacementWord = 0b10,
    /// `11`: `r/m` is a register.
    Register = 0b11,
}

impl Mode {
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => Mode::Memory,
            0b01 => Mode::MemoryDisplacementByte,
            0b10 => Mode::MemoryDisplacementWord,
            _ => Mode::Register,
        }
    }
}

/// The `d` bit: whether the REG field is the destination or the source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    RegIsSource = 0,
    RegIsDestination = 1,
}

/// Base registers of a calculated effective address, selected by `r/m` when `mod != 11`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressingMode {
    BxSi,
    BxDi,
    BpSi,
    BpDi,
    Si,
    Di,
    Bp,
    Bx,
}

const ADDRESSING_MODES: [AddressingMode; 8] = [
    AddressingMode::BxSi,
    AddressingMode::BxDi,
    AddressingMode::BpSi,
    AddressingMode::BpDi,
    AddressingMode::Si,
    AddressingMode::Di,
    AddressingMode::Bp,
    AddressingMode::Bx,
];

impl From<RegisterEncoding> for AddressingMode {
    fn from(encoding: RegisterEncoding) -> Self {
        ADDRESSING_MODES[encoding as usize]
    }
}

impl Display for AddressingMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use AddressingMode::*;

        match self {
            BxSi => write!(f, "bx + si"),
            BxDi => write!(f, "bx + di"),
            BpSi => write!(f, "bp + si"),
            BpDi => write!(f, "bp + di"),
            Si => write!(f, "si"),
            Di => write!(f, "di"),
            Bp => write!(f, "bp"),
            Bx => write!(f, "bx"),
        }
    }
}

/// The instruction classes of the MOV family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Opcode {
    /// `100010dw | mod reg r/m | (disp-lo) | (disp-hi)`
    RegisterMemoryToFromRegister,
    /// `1100011w | mod 000 r/m | (disp-lo) | (disp-hi) | data | (data if w = 1)`
    ImmediateToRegisterMemory,
    /// `1011wreg | data | (data if w = 1)`
    ImmediateToRegister,
    /// `1010000w | addr-lo | addr-hi`
    MemoryToAccumulator,
    /// `1010001w | addr-lo | addr-hi`
    AccumulatorToMemory,
    /// `10001110 | mod 0sr r/m | (disp-lo) | (disp-hi)`
    RegisterMemoryToSegment(Segment),
    /// `10001100 | mod 0sr r/m | (disp-lo) | (disp-hi)`
    SegmentToRegisterMemory(Segment),
}

impl Opcode {
    pub fn mnemonic(&self) -> &'static str {
        "mov"
    }

    pub fn has_immediate(&self) -> bool {
        matches!(
            self,
            Opcode::ImmediateToRegister | Opcode::ImmediateToRegisterMemory
        )
    }
}

/// A single decoded instruction.
///
/// `reg` and `rm` keep the raw (validated) selectors; what they name is only resolved when the
/// operands are asked for, so the direction flag never changes their meaning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub direction: Direction,
    pub width: OperandSize,
    pub mode: Mode,
    pub reg: RegisterEncoding,
    pub rm: RegisterEncoding,
    /// Sign extended displacement, or the address for direct addressing.
    pub displacement: i16,
    /// Sign extended immediate data.
    pub immediate: i16,
    /// Number of bytes the instruction occupies in the stream.
    pub length: u8,
}

/// An effective address, independent of which side of the instruction it ends up on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectiveAddress {
    Direct(u16),
    Calculated(AddressingMode, i16),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    Register(SizedRegisterEncoding),
    Segment(Segment),
    Memory(EffectiveAddress),
    Immediate(i16),
    /// Immediate written to memory, which needs an explicit size.
    SizedImmediate(i16, OperandSize),
}

impl Instruction {
    /// The combined displacement/immediate field: the immediate for immediate classes, the
    /// displacement for everything else.
    pub fn displacement_or_immediate(&self) -> i16 {
        if self.opcode.has_immediate() {
            self.immediate
        } else {
            self.displacement
        }
    }

    pub fn effective_address(&self) -> Option<EffectiveAddress> {
        match self.mode {
            Mode::Register => None,
            Mode::Memory if self.rm == RegisterEncoding::DhSi => {
                Some(EffectiveAddress::Direct(self.displacement as u16))
            }
            _ => Some(EffectiveAddress::Calculated(
                self.rm.into(),
                self.displacement,
            )),
        }
    }

    /// The operand selected by the `r/m` field, register or memory.
    pub fn rm_operand(&self) -> Operand {
        match self.effective_address() {
            Some(address) => Operand::Memory(address),
            None => Operand::Register(SizedRegisterEncoding(self.rm, self.width)),
        }
    }

    /// The operand selected by the REG field.
    pub fn reg_operand(&self) -> Operand {
        match self.opcode {
            Opcode::RegisterMemoryToSegment(segment) | Opcode::SegmentToRegisterMemory(segment) => {
                Operand::Segment(segment)
            }
            _ => Operand::Register(SizedRegisterEncoding(self.reg, self.width)),
        }
    }

    /// Returns `(destination, source)`.
    pub fn operands(&self) -> (Operand, Operand) {
        match self.opcode {
            Opcode::ImmediateToRegister => (self.reg_operand(), Operand::Immediate(self.immediate)),

            Opcode::ImmediateToRegisterMemory => (
                self.rm_operand(),
                match self.rm_operand() {
                    Operand::Memory(_) => Operand::SizedImmediate(self.immediate, self.width),
                    _ => Operand::Immediate(self.immediate),
                },
            ),

            _ => {
                let reg = self.reg_operand();
                let rm = self.rm_operand();
                match self.direction {
                    Direction::RegIsDestination => (reg, rm),
                    Direction::RegIsSource => (rm, reg),
                }
            }
        }
    }
}
