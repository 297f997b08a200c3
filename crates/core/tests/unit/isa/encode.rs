//! # Ground-Truth Assembly Tests
//!
//! Checks assembled fields, binary, and hex against hand-encoded words.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rvtutor_core::isa::encode::assemble;
use rvtutor_core::isa::instruction::Operands;
use rvtutor_core::{InstructionDescriptor, ValidationError};

use crate::common::question;

#[rstest]
#[case("add", 3, 1, 2, 0, "002081b3")]
#[case("addi", 2, 1, 0, 10, "00a08113")]
#[case("sw", 0, 1, 2, 8, "0020a423")]
#[case("beq", 0, 1, 2, 4, "00208263")]
#[case("lui", 1, 0, 0, 1, "000010b7")]
#[case("jal", 1, 0, 0, 2, "002000ef")]
#[case("sub", 3, 1, 2, 0, "402081b3")]
#[case("addi", 1, 0, 0, -1, "fff00093")]
#[case("lw", 2, 1, 0, 8, "0080a103")]
#[case("beq", 0, 0, 0, -4, "fe000ee3")]
#[case("jal", 0, 0, 0, -2, "fffff06f")]
#[case("sw", 0, 2, 5, -4, "fe512e23")]
fn assembles_known_words(
    #[case] mnemonic: &str,
    #[case] rd: u8,
    #[case] rs1: u8,
    #[case] rs2: u8,
    #[case] imm: i32,
    #[case] hex: &str,
) {
    let truth = question(mnemonic, rd, rs1, rs2, imm).ground_truth().unwrap();
    assert_eq!(truth.hex, hex);
    assert_eq!(truth.word, u32::from_str_radix(hex, 16).unwrap());
    assert_eq!(truth.binary, format!("{:032b}", truth.word));
}

#[test]
fn add_fields_in_layout_order() {
    let truth = question("add", 3, 1, 2, 0).ground_truth().unwrap();
    assert_eq!(
        truth.field_names(),
        ["funct7", "rs2", "rs1", "funct3", "rd", "opcode"]
    );
    assert_eq!(
        truth.field_bits(),
        ["0000000", "00010", "00001", "000", "00011", "0110011"]
    );
    assert_eq!(truth.binary, "00000000001000001000000110110011");
}

#[test]
fn beq_fields_pair_immediate_slots_by_name() {
    let truth = question("beq", 0, 1, 2, 4).ground_truth().unwrap();
    assert_eq!(
        truth.field_names(),
        ["imm[12]", "imm[10:5]", "rs2", "rs1", "funct3", "imm[4:1]", "imm[11]", "opcode"]
    );
    assert_eq!(
        truth.field_bits(),
        ["0", "000000", "00010", "00001", "000", "0010", "0", "1100011"]
    );
}

#[test]
fn jal_fields_pair_immediate_slots_by_name() {
    let truth = question("jal", 1, 0, 0, 2).ground_truth().unwrap();
    assert_eq!(
        truth.field_bits(),
        ["0", "0000000001", "0", "00000000", "00001", "1101111"]
    );
}

#[test]
fn sw_splits_immediate_around_registers() {
    let truth = question("sw", 0, 1, 2, 8).ground_truth().unwrap();
    assert_eq!(
        truth.field_bits(),
        ["0000000", "00010", "00001", "010", "01000", "0100011"]
    );
}

#[test]
fn lui_takes_raw_upper_field() {
    let truth = question("lui", 5, 0, 0, 0x12345).ground_truth().unwrap();
    assert_eq!(truth.hex, "123452b7");
}

#[test]
fn concatenated_fields_equal_binary() {
    let cases = [("add", 0), ("addi", -7), ("sw", 33), ("beq", -98), ("lui", 99), ("jal", 98)];
    for (name, imm) in cases {
        let truth = question(name, 7, 9, 11, imm).ground_truth().unwrap();
        let joined: String = truth.field_bits().concat();
        assert_eq!(joined, truth.binary, "{name}");
        assert_eq!(truth.binary.len(), 32);
    }
}

#[test]
fn missing_funct7_is_reported() {
    let desc = InstructionDescriptor::new("foo", "R", 0x33, Some(0), None).unwrap();
    let err = assemble(&desc, &Operands::default()).unwrap_err();
    assert_eq!(
        err,
        ValidationError::MissingFunct {
            mnemonic: "foo".to_owned(),
            field: "funct7",
        }
    );
}

#[test]
fn missing_funct3_is_reported() {
    let desc = InstructionDescriptor::new("bar", "B", 0x63, None, None).unwrap();
    let err = assemble(&desc, &Operands::default()).unwrap_err();
    assert_eq!(
        err,
        ValidationError::MissingFunct {
            mnemonic: "bar".to_owned(),
            field: "funct3",
        }
    );
}

#[test]
fn funct_fields_ignored_where_layout_has_none() {
    let desc = InstructionDescriptor::new("lui", "U", 0x37, Some(5), Some(9)).unwrap();
    let truth = assemble(&desc, &Operands { rd: 1, imm: 1, ..Operands::default() }).unwrap();
    assert_eq!(truth.hex, "000010b7");
}

#[test]
fn assembly_does_not_mutate_operands() {
    let q = question("jal", 4, 17, 23, -50);
    let before = q.clone();
    let _ = q.ground_truth().unwrap();
    assert_eq!(q, before);
}
