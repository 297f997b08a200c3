//! # Instruction Registry Tests
//!
//! Tests for descriptor validation, lookup, format filtering, and word
//! identification.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rvtutor_core::isa::registry::filter_instructions;
use rvtutor_core::isa::rv32i::{funct3, funct7, opcodes};
use rvtutor_core::{
    ConfigError, Format, InstructionDescriptor, InstructionRegistry, ValidationError,
};

use crate::common::{capture_warnings, registry};

// ══════════════════════════════════════════════════════════
// 1. Descriptor validation
// ══════════════════════════════════════════════════════════

#[test]
fn descriptor_normalizes_mnemonic_and_format() {
    let desc =
        InstructionDescriptor::new(" ADDI ", "i", opcodes::OP_IMM, Some(funct3::ADD_SUB), None)
            .unwrap();
    assert_eq!(desc.mnemonic(), "addi");
    assert_eq!(desc.format(), Format::I);
    assert_eq!(desc.opcode(), 0x13);
    assert_eq!(desc.funct3(), Some(0));
    assert_eq!(desc.funct7(), None);
}

#[rstest]
#[case("", "R", 0x33, Some(0), Some(0), ValidationError::EmptyMnemonic)]
#[case("   ", "R", 0x33, Some(0), Some(0), ValidationError::EmptyMnemonic)]
#[case("foo", "Q", 0x33, None, None, ValidationError::UnknownFormat("Q".to_owned()))]
#[case("foo", "RR", 0x33, None, None, ValidationError::UnknownFormat("RR".to_owned()))]
#[case("foo", "R", 0x80, None, None, ValidationError::OpcodeOutOfRange(0x80))]
#[case("foo", "I", 0x13, Some(8), None, ValidationError::Funct3OutOfRange(8))]
#[case("foo", "R", 0x33, Some(0), Some(0x80), ValidationError::Funct7OutOfRange(0x80))]
fn descriptor_rejects_invalid_fields(
    #[case] mnemonic: &str,
    #[case] format: &str,
    #[case] opcode: u32,
    #[case] f3: Option<u32>,
    #[case] f7: Option<u32>,
    #[case] expected: ValidationError,
) {
    assert_eq!(
        InstructionDescriptor::new(mnemonic, format, opcode, f3, f7),
        Err(expected)
    );
}

#[test]
fn descriptor_accepts_boundary_values() {
    assert!(InstructionDescriptor::new("x", "R", 0x7F, Some(7), Some(0x7F)).is_ok());
    assert!(InstructionDescriptor::new("x", "U", 0, None, None).is_ok());
}

#[test]
fn offset_syntax_is_limited_to_loads_and_jalr() {
    let reg = registry();
    for name in ["lw", "lb", "lh", "lbu", "lhu", "jalr"] {
        assert!(reg.find(name).unwrap().uses_offset_syntax(), "{name}");
    }
    for name in ["addi", "sw", "add", "beq"] {
        assert!(!reg.find(name).unwrap().uses_offset_syntax(), "{name}");
    }
}

// ══════════════════════════════════════════════════════════
// 2. Base table
// ══════════════════════════════════════════════════════════

#[rstest]
#[case("add", Format::R, opcodes::OP_REG, Some(funct3::ADD_SUB), Some(funct7::DEFAULT))]
#[case("sub", Format::R, opcodes::OP_REG, Some(funct3::ADD_SUB), Some(funct7::ALT))]
#[case("sra", Format::R, opcodes::OP_REG, Some(funct3::SRL_SRA), Some(funct7::ALT))]
#[case("sll", Format::R, opcodes::OP_REG, Some(funct3::SLL), Some(funct7::DEFAULT))]
#[case("addi", Format::I, opcodes::OP_IMM, Some(funct3::ADD_SUB), None)]
#[case("lw", Format::I, opcodes::OP_LOAD, Some(funct3::LW), None)]
#[case("sw", Format::S, opcodes::OP_STORE, Some(funct3::SW), None)]
#[case("beq", Format::B, opcodes::OP_BRANCH, Some(funct3::BEQ), None)]
#[case("lui", Format::U, opcodes::OP_LUI, None, None)]
#[case("jal", Format::J, opcodes::OP_JAL, None, None)]
fn base_table_core_entries(
    #[case] mnemonic: &str,
    #[case] format: Format,
    #[case] opcode: u32,
    #[case] f3: Option<u32>,
    #[case] f7: Option<u32>,
) {
    let reg = registry();
    let desc = reg.find(mnemonic).unwrap();
    assert_eq!(desc.format(), format);
    assert_eq!(desc.opcode(), opcode);
    assert_eq!(desc.funct3(), f3);
    assert_eq!(desc.funct7(), f7);
}

#[test]
fn base_table_encoding_constants() {
    assert_eq!(opcodes::OP_REG, 0b011_0011);
    assert_eq!(opcodes::OP_IMM, 0b001_0011);
    assert_eq!(opcodes::OP_LOAD, 0b000_0011);
    assert_eq!(opcodes::OP_STORE, 0b010_0011);
    assert_eq!(opcodes::OP_BRANCH, 0b110_0011);
    assert_eq!(opcodes::OP_LUI, 0b011_0111);
    assert_eq!(opcodes::OP_JAL, 0b110_1111);
    assert_eq!(funct3::SLL, 1);
    assert_eq!(funct3::LW, 2);
    assert_eq!(funct3::SW, 2);
    assert_eq!(funct7::ALT, 0b010_0000);
}

#[test]
fn base_registry_size_and_uniqueness() {
    let reg = registry();
    assert_eq!(reg.len(), 34);
    assert!(!reg.is_empty());
    let mut names: Vec<&str> = reg.instructions().iter().map(|d| d.mnemonic()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), 34);
}

#[test]
fn every_format_is_represented() {
    let reg = registry();
    for format in Format::ALL {
        assert!(
            reg.instructions().iter().any(|d| d.format() == format),
            "no {format}-type instruction"
        );
    }
}

#[test]
fn find_is_case_insensitive() {
    let reg = registry();
    assert_eq!(reg.find("ADD").unwrap().mnemonic(), "add");
    assert!(reg.find("mul").is_none());
}

// ══════════════════════════════════════════════════════════
// 3. Filtering
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(&["R"], 10)]
#[case(&["i"], 12)]
#[case(&["S"], 3)]
#[case(&["B"], 6)]
#[case(&["U"], 2)]
#[case(&["J"], 1)]
#[case(&["r", "B"], 16)]
#[case(&["R", "I", "S", "B", "U", "J"], 34)]
#[case(&["R", "X"], 10)]
#[case(&["R", "r"], 10)]
fn filter_keeps_requested_formats(#[case] formats: &[&str], #[case] expected: usize) {
    let pool = registry().filter(formats).unwrap();
    assert_eq!(pool.len(), expected);
    for desc in &pool {
        assert!(
            formats
                .iter()
                .any(|f| Format::from_letter(f) == Some(desc.format()))
        );
    }
}

#[test]
fn filter_warns_about_unknown_letters() {
    let (pool, logs) = capture_warnings(|| registry().filter(&["R", "X"]));
    assert_eq!(pool.unwrap().len(), 10);
    assert!(logs.contains("WARN"), "{logs}");
    assert!(logs.contains("ignoring unknown instruction format"), "{logs}");
    assert!(logs.contains('X'), "{logs}");
}

#[test]
fn filter_with_known_letters_logs_nothing() {
    let (pool, logs) = capture_warnings(|| registry().filter(&["S", "b"]));
    assert_eq!(pool.unwrap().len(), 9);
    assert_eq!(logs, "");
}

#[test]
fn filter_preserves_registry_order() {
    let pool = registry().filter(&["B", "R"]).unwrap();
    let names: Vec<&str> = pool.iter().take(3).map(|d| d.mnemonic()).collect();
    assert_eq!(names, ["add", "sub", "sll"]);
    assert_eq!(pool[10].mnemonic(), "beq");
}

#[test]
fn filter_with_no_match_is_empty_selection() {
    let err = registry().filter(&["X", "Y"]).unwrap_err();
    match err {
        ConfigError::EmptySelection { requested } => assert_eq!(requested, ["X", "Y"]),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn filter_with_empty_request_is_empty_selection() {
    let none: [&str; 0] = [];
    assert!(matches!(
        registry().filter(&none),
        Err(ConfigError::EmptySelection { .. })
    ));
}

#[test]
fn filter_on_custom_registry_without_matches() {
    let only_add = InstructionDescriptor::new("add", "R", 0x33, Some(0), Some(0)).unwrap();
    let reg = InstructionRegistry::from_descriptors(vec![only_add]);
    assert!(matches!(
        reg.filter(&["I"]),
        Err(ConfigError::EmptySelection { .. })
    ));
    assert_eq!(reg.filter(&["R"]).unwrap().len(), 1);
}

#[test]
fn filter_instructions_uses_base_registry() {
    let pool = filter_instructions(&["u".to_owned()]).unwrap();
    let names: Vec<&str> = pool.iter().map(|d| d.mnemonic()).collect();
    assert_eq!(names, ["lui", "auipc"]);
}

// ══════════════════════════════════════════════════════════
// 4. Identification
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(0x002081b3, "add")]
#[case(0x402081b3, "sub")]
#[case(0x4020d1b3, "sra")]
#[case(0x00a08113, "addi")]
#[case(0x0080a103, "lw")]
#[case(0x0020a423, "sw")]
#[case(0x00208263, "beq")]
#[case(0x000010b7, "lui")]
#[case(0x00001097, "auipc")]
#[case(0x002000ef, "jal")]
#[case(0x000080e7, "jalr")]
fn identify_known_words(#[case] word: u32, #[case] expected: &str) {
    assert_eq!(registry().identify(word).unwrap().mnemonic(), expected);
}

#[rstest]
#[case(0x0000_0000)]
#[case(0xFFFF_FFFF)]
#[case(0x0000_0073)]
#[case(0x022081b3)]
fn identify_unknown_words(#[case] word: u32) {
    assert!(registry().identify(word).is_none());
}
