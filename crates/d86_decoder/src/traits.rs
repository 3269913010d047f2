use crate::{DecodeError, Result};
use d86_instruction::{Mode, OperandSize};

/// Reads the bytes of a single instruction, starting at `start`.
pub(crate) struct ByteReader<'a> {
    bytes: &'a [u8],
    start: usize,
    position: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8], start: usize) -> Self {
        Self {
            bytes,
            start,
            position: start,
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    /// Number of bytes consumed since `start`.
    pub fn consumed(&self) -> usize {
        self.position - self.start
    }
}

pub(crate) trait ReadExt {
    fn read_u8(&mut self) -> Result<u8>;

    fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes([self.read_u8()?, self.read_u8()?]))
    }

    /// Reads a single byte and sign extends it, or a full little endian word.
    fn read_sized(&mut self, operand_size: OperandSize) -> Result<i16> {
        Ok(match operand_size {
            OperandSize::Byte => self.read_u8()? as i8 as i16,
            OperandSize::Word => self.read_u16()? as i16,
        })
    }

    /// Reads the displacement that follows a mode byte. `direct` selects the 16-bit address of
    /// the `mod = 00, r/m = 110` form.
    fn read_displacement(&mut self, mode: Mode, direct: bool) -> Result<i16> {
        match mode {
            Mode::Memory if direct => self.read_sized(OperandSize::Word),
            Mode::Memory | Mode::Register => Ok(0),
            Mode::MemoryDisplacementByte => self.read_sized(OperandSize::Byte),
            Mode::MemoryDisplacementWord => self.read_sized(OperandSize::Word),
        }
    }
}

impl ReadExt for ByteReader<'_> {
    fn read_u8(&mut self) -> Result<u8> {
        if let Some(byte) = self.bytes.get(self.position) {
            self.position += 1;
            Ok(*byte)
        } else {
            Err(DecodeError::TruncatedStream {
                offset: self.start,
                available: self.bytes.len().saturating_sub(self.start),
            })
        }
    }
}
