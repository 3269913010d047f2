use crate::{decode_all, decode_instruction, DecodeError, InstructionStream};
use d86_instruction::{render, resolve_operand_name, OperandSize, REGISTER_ENCODINGS};

fn disassemble(bytes: &[u8]) -> String {
    decode_all(bytes).unwrap().iter().map(render).collect()
}

macro_rules! test_decode {
    ($expected:expr, $($byte:expr),+) => {{
        let bytes: &[u8] = &[$($byte),+];
        let instruction = decode_instruction(bytes, 0).unwrap();
        assert_eq!(instruction.length as usize, bytes.len());
        assert_eq!($expected, instruction.to_string());
    }};
}

#[test]
fn register_to_register() {
    test_decode!("mov cx, bx", 0x89, 0xD9);
    test_decode!("mov al, ch", 0x88, 0xE8);
    test_decode!("mov ch, al", 0x88, 0xC5);
    test_decode!("mov si, bx", 0x89, 0xDE);
    test_decode!("mov dh, al", 0x88, 0xC6);
    test_decode!("mov bx, di", 0x8B, 0xDF);
}

#[test]
fn every_register_to_register_encoding() {
    for width in [OperandSize::Byte, OperandSize::Word] {
        let names: Vec<_> = REGISTER_ENCODINGS
            .iter()
            .map(|encoding| resolve_operand_name(*encoding, width))
            .collect();

        for reg in 0..8u8 {
            for rm in 0..8u8 {
                let mode_byte = 0b11_000_000 | (reg << 3) | rm;
                let reg_name = names[reg as usize];
                let rm_name = names[rm as usize];

                let to_reg = decode_instruction(&[0x8A | width as u8, mode_byte], 0).unwrap();
                assert_eq!(to_reg.to_string(), format!("mov {}, {}", reg_name, rm_name));

                let from_reg = decode_instruction(&[0x88 | width as u8, mode_byte], 0).unwrap();
                assert_eq!(from_reg.to_string(), format!("mov {}, {}", rm_name, reg_name));
            }
        }
    }
}

#[test]
fn immediate_to_register() {
    test_decode!("mov al, -1", 0xB0, 0xFF);
    test_decode!("mov ax, 4660", 0xB8, 0x34, 0x12);
    test_decode!("mov cl, 12", 0xB1, 0x0C);
    test_decode!("mov ch, -12", 0xB5, 0xF4);
    test_decode!("mov cx, 12", 0xB9, 0x0C, 0x00);
    test_decode!("mov cx, -12", 0xB9, 0xF4, 0xFF);
    test_decode!("mov dx, 3948", 0xBA, 0x6C, 0x0F);
    test_decode!("mov dx, -3948", 0xBA, 0x94, 0xF0);
}

#[test]
fn source_address_calculation() {
    test_decode!("mov al, [bx + si]", 0x8A, 0x00);
    test_decode!("mov bx, [bp + di]", 0x8B, 0x1B);
    test_decode!("mov dx, [bp]", 0x8B, 0x56, 0x00);
    test_decode!("mov ah, [bx + si + 4]", 0x8A, 0x60, 0x04);
    test_decode!("mov al, [bx + si + 4999]", 0x8A, 0x80, 0x87, 0x13);
}

#[test]
fn destination_address_calculation() {
    test_decode!("mov [bx + di], cx", 0x89, 0x09);
    test_decode!("mov [bp + si], cl", 0x88, 0x0A);
    test_decode!("mov [bp], ch", 0x88, 0x6E, 0x00);
}

#[test]
fn zero_displacement_is_suppressed() {
    test_decode!("mov ax, [bx]", 0x8B, 0x47, 0x00);
    test_decode!("mov ax, [bx]", 0x8B, 0x87, 0x00, 0x00);
    test_decode!("mov ax, [bx + 1]", 0x8B, 0x47, 0x01);
}

#[test]
fn signed_displacements() {
    test_decode!("mov ax, [bx + di - 37]", 0x8B, 0x41, 0xDB);
    test_decode!("mov [si - 300], cx", 0x89, 0x8C, 0xD4, 0xFE);
    test_decode!("mov dx, [bx - 32]", 0x8B, 0x57, 0xE0);
}

#[test]
fn direct_address() {
    test_decode!("mov bp, [5]", 0x8B, 0x2E, 0x05, 0x00);
    test_decode!("mov bx, [3458]", 0x8B, 0x1E, 0x82, 0x0D);
}

#[test]
fn accumulator() {
    test_decode!("mov ax, [2555]", 0xA1, 0xFB, 0x09);
    test_decode!("mov ax, [16]", 0xA1, 0x10, 0x00);
    test_decode!("mov [2554], ax", 0xA3, 0xFA, 0x09);
    test_decode!("mov [15], ax", 0xA3, 0x0F, 0x00);
    test_decode!("mov al, [7]", 0xA0, 0x07, 0x00);
}

#[test]
fn immediate_to_memory() {
    test_decode!("mov [bp + di], byte 7", 0xC6, 0x03, 0x07);
    test_decode!("mov [di + 901], word 347", 0xC7, 0x85, 0x85, 0x03, 0x5B, 0x01);
    test_decode!("mov [1000], word -1", 0xC7, 0x06, 0xE8, 0x03, 0xFF, 0xFF);
    test_decode!("mov dl, 5", 0xC6, 0xC2, 0x05);
}

#[test]
fn segment_registers() {
    test_decode!("mov ds, ax", 0x8E, 0xD8);
    test_decode!("mov [bx], es", 0x8C, 0x07);
    test_decode!("mov ds, [bp + 2]", 0x8E, 0x5E, 0x02);
    test_decode!("mov cx, cs", 0x8C, 0xC9);
}

#[test]
fn full_listing() {
    #[rustfmt::skip]
    let bytes: &[u8] = &[
        0x89, 0xDE,
        0x88, 0xC6,
        0xB1, 0x0C,
        0xB9, 0xF4, 0xFF,
        0x8A, 0x00,
        0x8B, 0x56, 0x00,
        0x8A, 0x80, 0x87, 0x13,
        0x89, 0x09,
        0x88, 0x6E, 0x00,
        0x8B, 0x41, 0xDB,
        0xA1, 0xFB, 0x09,
        0xC7, 0x85, 0x85, 0x03, 0x5B, 0x01,
    ];

    assert_eq!(
        disassemble(bytes),
        "mov si, bx\n\
         mov dh, al\n\
         mov cl, 12\n\
         mov cx, -12\n\
         mov al, [bx + si]\n\
         mov dx, [bp]\n\
         mov al, [bx + si + 4999]\n\
         mov [bx + di], cx\n\
         mov [bp], ch\n\
         mov ax, [bx + di - 37]\n\
         mov ax, [2555]\n\
         mov [di + 901], word 347\n"
    );

    let mut stream = InstructionStream::new(bytes);
    assert_eq!(stream.by_ref().count(), 12);
    assert_eq!(stream.position(), bytes.len());
}

#[test]
fn malformed_input_produces_no_line() {
    let bytes: &[u8] = &[0x89, 0xD9, 0xF4, 0x89, 0xD9];
    let lines: Vec<_> = InstructionStream::new(bytes).collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].as_ref().unwrap().1.to_string(), "mov cx, bx");
    assert_eq!(
        lines[1],
        Err(DecodeError::UnrecognizedOpcode {
            offset: 2,
            op_code: 0xF4
        })
    );
}
