use crate::errors::{Field, Result};
use crate::traits::ReadExt;
use crate::DecodeError;
use d86_instruction::{Mode, RegisterEncoding, Segment};

/// Maps a 3-bit field onto a register encoding. Every 3-bit value is valid, so this only fails
/// when a field was extracted with the wrong mask.
pub(crate) fn register_encoding(bits: u8, field: Field, offset: usize) -> Result<RegisterEncoding> {
    RegisterEncoding::from_bits(bits).ok_or(DecodeError::InvalidField {
        offset,
        field,
        encoding: bits,
    })
}

/// The second byte of most MOV forms: `mod reg r/m`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ModRegRM {
    pub mode: Mode,
    /// Left raw; depending on the op code it is a register, a segment or an extension that must
    /// be zero.
    pub reg: u8,
    pub register_or_memory: RegisterEncoding,
}

impl ModRegRM {
    pub fn try_from_byte(byte: u8, offset: usize) -> Result<Self> {
        let mode = Mode::from_bits(byte >> 6);
        let reg = (byte >> 3) & 0b111;
        let register_or_memory = register_encoding(byte & 0b111, Field::RegisterOrMemory, offset)?;

        Ok(Self {
            mode,
            reg,
            register_or_memory,
        })
    }

    /// `mod = 00, r/m = 110` has no base register, only a 16-bit address.
    pub fn is_direct(&self) -> bool {
        self.mode == Mode::Memory && self.register_or_memory == RegisterEncoding::DhSi
    }

    pub fn register(&self, offset: usize) -> Result<RegisterEncoding> {
        register_encoding(self.reg, Field::Reg, offset)
    }

    /// The segment register in `0 s r`. The top bit must be clear.
    pub fn segment(&self, offset: usize) -> Result<Segment> {
        if self.reg & 0b100 != 0 {
            return Err(DecodeError::InvalidField {
                offset,
                field: Field::Segment,
                encoding: self.reg,
            });
        }

        Segment::from_bits(self.reg).ok_or(DecodeError::InvalidField {
            offset,
            field: Field::Segment,
            encoding: self.reg,
        })
    }

    /// Reads the displacement bytes that belong to this mode byte.
    pub fn read_displacement(&self, it: &mut impl ReadExt) -> Result<i16> {
        it.read_displacement(self.mode, self.is_direct())
    }
}
