use crate::errors::{Field, Result};
use crate::mod_reg_rm::{register_encoding, ModRegRM};
use crate::traits::{ByteReader, ReadExt};
use crate::DecodeError;
use d86_instruction::{Direction, Instruction, Mode, Opcode, OperandSize, RegisterEncoding};
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Class {
    RegisterMemoryToFromRegister,
    ImmediateToRegisterMemory,
    ImmediateToRegister,
    MemoryToAccumulator,
    AccumulatorToMemory,
    RegisterMemoryToSegment,
    SegmentToRegisterMemory,
}

/// `(mask, pattern, class)`: an op code belongs to `class` when `op_code & mask == pattern`.
///
/// Ordered from the mask with the most fixed bits to the one with the least, and the first match
/// wins. A shorter pattern covers more of the op code space, so testing it before a longer one
/// could claim an op code that belongs to the longer one.
pub(crate) const OPCODE_TABLE: &[(u8, u8, Class)] = &[
    (0b1111_1111, 0b1000_1110, Class::RegisterMemoryToSegment),
    (0b1111_1111, 0b1000_1100, Class::SegmentToRegisterMemory),
    (0b1111_1110, 0b1100_0110, Class::ImmediateToRegisterMemory),
    (0b1111_1110, 0b1010_0000, Class::MemoryToAccumulator),
    (0b1111_1110, 0b1010_0010, Class::AccumulatorToMemory),
    (0b1111_1100, 0b1000_1000, Class::RegisterMemoryToFromRegister),
    (0b1111_0000, 0b1011_0000, Class::ImmediateToRegister),
];

pub(crate) fn classify(op_code: u8) -> Option<Class> {
    OPCODE_TABLE
        .iter()
        .find(|(mask, pattern, _)| op_code & mask == *pattern)
        .map(|(_, _, class)| *class)
}

#[inline]
fn operand_size(bit: u8) -> OperandSize {
    if bit & 0b1 == 0 {
        OperandSize::Byte
    } else {
        OperandSize::Word
    }
}

#[inline]
fn direction(bit: u8) -> Direction {
    if bit & 0b1 == 0 {
        Direction::RegIsSource
    } else {
        Direction::RegIsDestination
    }
}

/// Decodes the instruction starting at `position`. The returned instruction's `length` is the
/// number of bytes to advance to reach the next instruction.
pub fn decode_instruction(bytes: &[u8], position: usize) -> Result<Instruction> {
    let mut it = ByteReader::new(bytes, position);

    let op_code = it.read_u8()?;

    let Some(class) = classify(op_code) else {
        return Err(DecodeError::UnrecognizedOpcode {
            offset: position,
            op_code,
        });
    };

    let instruction = match class {
        Class::RegisterMemoryToFromRegister => register_memory_to_from_register(op_code, &mut it),
        Class::ImmediateToRegisterMemory => immediate_to_register_memory(op_code, &mut it),
        Class::ImmediateToRegister => immediate_to_register(op_code, &mut it),
        Class::MemoryToAccumulator => accumulator(op_code, Direction::RegIsDestination, &mut it),
        Class::AccumulatorToMemory => accumulator(op_code, Direction::RegIsSource, &mut it),
        Class::RegisterMemoryToSegment => segment(Direction::RegIsDestination, &mut it),
        Class::SegmentToRegisterMemory => segment(Direction::RegIsSource, &mut it),
    }?;

    debug!(
        "{:#06x}: {:?} d={} w={} mod={:02b} reg={:03b} r/m={:03b} disp={} data={} len={}",
        position,
        instruction.opcode,
        instruction.direction as u8,
        instruction.width as u8,
        instruction.mode as u8,
        instruction.reg as u8,
        instruction.rm as u8,
        instruction.displacement,
        instruction.immediate,
        instruction.length,
    );

    Ok(instruction)
}

// 1 0 0 0 1 0 d w | mod reg r/m | (disp-lo) | (disp-hi)
fn register_memory_to_from_register(op_code: u8, it: &mut ByteReader) -> Result<Instruction> {
    let mrrm = ModRegRM::try_from_byte(it.read_u8()?, it.start())?;
    let reg = mrrm.register(it.start())?;
    let displacement = mrrm.read_displacement(it)?;

    Ok(Instruction {
        opcode: Opcode::RegisterMemoryToFromRegister,
        direction: direction(op_code >> 1),
        width: operand_size(op_code),
        mode: mrrm.mode,
        reg,
        rm: mrrm.register_or_memory,
        displacement,
        immediate: 0,
        length: it.consumed() as u8,
    })
}

// 1 1 0 0 0 1 1 w | mod 0 0 0 r/m | (disp-lo) | (disp-hi) | data | (data if w = 1)
fn immediate_to_register_memory(op_code: u8, it: &mut ByteReader) -> Result<Instruction> {
    let width = operand_size(op_code);

    let mrrm = ModRegRM::try_from_byte(it.read_u8()?, it.start())?;
    if mrrm.reg != 0b000 {
        return Err(DecodeError::InvalidField {
            offset: it.start(),
            field: Field::Reg,
            encoding: mrrm.reg,
        });
    }

    let displacement = mrrm.read_displacement(it)?;
    let immediate = it.read_sized(width)?;

    Ok(Instruction {
        opcode: Opcode::ImmediateToRegisterMemory,
        direction: Direction::RegIsSource,
        width,
        mode: mrrm.mode,
        reg: RegisterEncoding::AlAx,
        rm: mrrm.register_or_memory,
        displacement,
        immediate,
        length: it.consumed() as u8,
    })
}

// 1 0 1 1 w reg | data | (data if w = 1)
fn immediate_to_register(op_code: u8, it: &mut ByteReader) -> Result<Instruction> {
    let width = operand_size(op_code >> 3);
    let reg = register_encoding(op_code & 0b111, Field::Reg, it.start())?;
    let immediate = it.read_sized(width)?;

    Ok(Instruction {
        opcode: Opcode::ImmediateToRegister,
        direction: Direction::RegIsDestination,
        width,
        mode: Mode::Register,
        reg,
        rm: reg,
        displacement: 0,
        immediate,
        length: it.consumed() as u8,
    })
}

// 1 0 1 0 0 0 0 w | addr-lo | addr-hi
// 1 0 1 0 0 0 1 w | addr-lo | addr-hi
//
// Encoded as if it was `mod = 00, reg = accumulator, r/m = 110` so it shares the direct address
// handling of the mode byte forms.
fn accumulator(op_code: u8, direction: Direction, it: &mut ByteReader) -> Result<Instruction> {
    let address = it.read_sized(OperandSize::Word)?;

    Ok(Instruction {
        opcode: match direction {
            Direction::RegIsDestination => Opcode::MemoryToAccumulator,
            Direction::RegIsSource => Opcode::AccumulatorToMemory,
        },
        direction,
        width: operand_size(op_code),
        mode: Mode::Memory,
        reg: RegisterEncoding::AlAx,
        rm: RegisterEncoding::DhSi,
        displacement: address,
        immediate: 0,
        length: it.consumed() as u8,
    })
}

// 1 0 0 0 1 1 1 0 | mod 0 sr r/m | (disp-lo) | (disp-hi)
// 1 0 0 0 1 1 0 0 | mod 0 sr r/m | (disp-lo) | (disp-hi)
fn segment(direction: Direction, it: &mut ByteReader) -> Result<Instruction> {
    let mrrm = ModRegRM::try_from_byte(it.read_u8()?, it.start())?;
    let segment = mrrm.segment(it.start())?;
    let displacement = mrrm.read_displacement(it)?;

    Ok(Instruction {
        opcode: match direction {
            Direction::RegIsDestination => Opcode::RegisterMemoryToSegment(segment),
            Direction::RegIsSource => Opcode::SegmentToRegisterMemory(segment),
        },
        direction,
        width: OperandSize::Word,
        mode: mrrm.mode,
        reg: register_encoding(mrrm.reg, Field::Reg, it.start())?,
        rm: mrrm.register_or_memory,
        displacement,
        immediate: 0,
        length: it.consumed() as u8,
    })
}
