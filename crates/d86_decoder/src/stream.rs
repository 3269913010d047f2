use crate::{decode_instruction, Result};
use d86_instruction::Instruction;

/// Walks a buffer one instruction at a time, yielding each instruction with its offset.
///
/// Iteration ends when the cursor reaches the end of the buffer, or right after the first error.
pub struct InstructionStream<'a> {
    bytes: &'a [u8],
    position: usize,
    failed: bool,
}

impl<'a> InstructionStream<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            position: 0,
            failed: false,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

impl Iterator for InstructionStream<'_> {
    type Item = Result<(usize, Instruction)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.position >= self.bytes.len() {
            return None;
        }

        let offset = self.position;
        match decode_instruction(self.bytes, offset) {
            Ok(instruction) => {
                self.position += instruction.length as usize;
                Some(Ok((offset, instruction)))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

/// Decodes the whole buffer, stopping at the first error.
pub fn decode_all(bytes: &[u8]) -> Result<Vec<Instruction>> {
    InstructionStream::new(bytes)
        .map(|result| result.map(|(_, instruction)| instruction))
        .collect()
}
