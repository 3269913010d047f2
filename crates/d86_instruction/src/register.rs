use crate::OperandSize;

/// One of the eight 3-bit register encodings. Which physical register it names depends on the
/// [OperandSize] it is used with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegisterEncoding {
    AlAx = 0b000,
    ClCx = 0b001,
    DlDx = 0b010,
    BlBx = 0b011,
    AhSp = 0b100,
    ChBp = 0b101,
    DhSi = 0b110,
    BhDi = 0b111,
}

/// Every encoding, indexed by its 3-bit value.
pub const REGISTER_ENCODINGS: [RegisterEncoding; 8] = [
    RegisterEncoding::AlAx,
    RegisterEncoding::ClCx,
    RegisterEncoding::DlDx,
    RegisterEncoding::BlBx,
    RegisterEncoding::AhSp,
    RegisterEncoding::ChBp,
    RegisterEncoding::DhSi,
    RegisterEncoding::BhDi,
];

const REGISTER_NAMES: [[&str; 8]; 2] = [
    ["al", "cl", "dl", "bl", "ah", "ch", "dh", "bh"],
    ["ax", "cx", "dx", "bx", "sp", "bp", "si", "di"],
];

/// Returns the canonical name of the register selected by `encoding` for an operation of
/// `operand_size`.
pub fn resolve_operand_name(encoding: RegisterEncoding, operand_size: OperandSize) -> &'static str {
    REGISTER_NAMES[operand_size as usize][encoding as usize]
}

impl RegisterEncoding {
    /// Looks up the encoding for the low 3 bits of a field. Returns `None` for anything wider.
    pub fn from_bits(bits: u8) -> Option<Self> {
        REGISTER_ENCODINGS.get(bits as usize).copied()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SizedRegisterEncoding(pub RegisterEncoding, pub OperandSize);

impl std::fmt::Display for SizedRegisterEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(resolve_operand_name(self.0, self.1))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment {
    ES = 0b00,
    CS = 0b01,
    SS = 0b10,
    DS = 0b11,
}

const SEGMENTS: [Segment; 4] = [Segment::ES, Segment::CS, Segment::SS, Segment::DS];

impl Segment {
    /// Looks up the segment register for a 2-bit field. Returns `None` for anything wider.
    pub fn from_bits(bits: u8) -> Option<Self> {
        SEGMENTS.get(bits as usize).copied()
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Segment::*;

        match self {
            ES => write!(f, "es"),
            CS => write!(f, "cs"),
            SS => write!(f, "ss"),
            DS => write!(f, "ds"),
        }
    }
}
