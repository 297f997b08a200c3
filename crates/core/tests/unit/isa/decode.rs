//! # Decode Tests
//!
//! Tests for immediate reassembly, operand recovery, and word identification.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rvtutor_core::isa::decode::{decode, decode_immediate, decode_operands};
use rvtutor_core::isa::instruction::{InstructionBits, Operands};
use rvtutor_core::{Format, Question, ValidationError};

use crate::common::{question, registry};

#[test]
fn field_extraction() {
    let word: u32 = 0x4020_d1b3;
    assert_eq!(word.opcode(), 0x33);
    assert_eq!(word.rd(), 3);
    assert_eq!(word.funct3(), 5);
    assert_eq!(word.rs1(), 1);
    assert_eq!(word.rs2(), 2);
    assert_eq!(word.funct7(), 0x20);
}

#[rstest]
#[case(Format::I, 0xfff0_0093, -1)]
#[case(Format::I, 0x7ff0_0093, 2047)]
#[case(Format::I, 0x8000_0093, -2048)]
#[case(Format::S, 0xfe51_2e23, -4)]
#[case(Format::S, 0x0020_a423, 8)]
#[case(Format::B, 0xfe00_0ee3, -4)]
#[case(Format::B, 0x0020_8263, 4)]
#[case(Format::B, 0x8000_0063, -4096)]
#[case(Format::B, 0x7e00_0fe3, 4094)]
#[case(Format::U, 0x1234_52b7, 0x12345)]
#[case(Format::U, 0xffff_f0b7, 0xf_ffff)]
#[case(Format::J, 0x0020_00ef, 2)]
#[case(Format::J, 0xffff_f06f, -2)]
#[case(Format::J, 0x8000_006f, -1_048_576)]
#[case(Format::J, 0x7fff_f06f, 1_048_574)]
#[case(Format::R, 0xffff_ffb3, 0)]
fn decode_immediate_cases(#[case] format: Format, #[case] word: u32, #[case] expected: i32) {
    assert_eq!(decode_immediate(format, word).unwrap(), expected);
}

#[test]
fn decode_operands_clears_unused_fields() {
    let ops = decode_operands(Format::S, 0x0020_a423).unwrap();
    assert_eq!(ops, Operands { rd: 0, rs1: 1, rs2: 2, imm: 8 });

    let ops = decode_operands(Format::J, 0x0020_00ef).unwrap();
    assert_eq!(ops, Operands { rd: 1, rs1: 0, rs2: 0, imm: 2 });

    let ops = decode_operands(Format::I, 0x00a0_8113).unwrap();
    assert_eq!(ops, Operands { rd: 2, rs1: 1, rs2: 0, imm: 10 });
}

#[test]
fn decode_identifies_and_recovers_operands() {
    let (desc, ops) = decode(&registry(), 0x0020_81b3).unwrap();
    assert_eq!(desc.mnemonic(), "add");
    assert_eq!(ops, Operands { rd: 3, rs1: 1, rs2: 2, imm: 0 });
}

#[test]
fn decode_unknown_word() {
    assert_eq!(
        decode(&registry(), 0x0000_0073),
        Err(ValidationError::UnknownEncoding(0x73))
    );
}

#[rstest]
#[case("add", 3, 1, 2, 0, "add x3, x1, x2")]
#[case("lw", 2, 1, 0, -8, "lw x2, -8(x1)")]
#[case("sw", 0, 1, 2, 8, "sw x2, 8(x1)")]
#[case("bne", 0, 4, 5, -98, "bne x4, x5, -98")]
#[case("auipc", 9, 0, 0, 99, "auipc x9, 99")]
#[case("jal", 1, 0, 0, 98, "jal x1, 98")]
fn question_decode_recovers_assembly(
    #[case] mnemonic: &str,
    #[case] rd: u8,
    #[case] rs1: u8,
    #[case] rs2: u8,
    #[case] imm: i32,
    #[case] asm: &str,
) {
    let asked = question(mnemonic, rd, rs1, rs2, imm);
    let truth = asked.ground_truth().unwrap();
    let decoded = Question::decode(&registry(), truth.word).unwrap();
    assert_eq!(decoded, asked);
    assert_eq!(decoded.assembly(), asm);
}
