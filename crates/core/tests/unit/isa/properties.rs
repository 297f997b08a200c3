//! # Encode/Decode Properties
//!
//! Property tests over every registered instruction with random registers
//! and immediates drawn from each format's full encodable range.

use proptest::prelude::*;
use rvtutor_core::common::bits::sign_extend;
use rvtutor_core::isa::instruction::{InstructionBits, Operands};
use rvtutor_core::isa::swizzle::swizzle;
use rvtutor_core::{Format, Question};

use crate::common::registry;

/// Maps an arbitrary seed onto a valid immediate for `format`.
fn encodable_imm(format: Format, seed: i32) -> i32 {
    let seed = i64::from(seed);
    match format {
        Format::R => 0,
        Format::I | Format::S => sign_extend(seed, 12).unwrap(),
        Format::B => sign_extend(seed, 13).unwrap() & !1,
        Format::J => sign_extend(seed, 21).unwrap() & !1,
        Format::U => (seed & 0xF_FFFF) as i32,
    }
}

fn arb_question() -> impl Strategy<Value = Question> {
    let count = registry().len();
    (0..count, 0u8..32, 0u8..32, 0u8..32, any::<i32>()).prop_map(|(index, rd, rs1, rs2, seed)| {
        let desc = registry().instructions()[index].clone();
        let imm = encodable_imm(desc.format(), seed);
        let operands = Operands { rd, rs1, rs2, imm }.normalized(desc.format());
        Question::new(desc, operands)
    })
}

proptest! {
    #[test]
    fn ground_truth_is_well_formed(q in arb_question()) {
        let truth = q.ground_truth().unwrap();
        prop_assert_eq!(truth.binary.len(), 32);
        prop_assert_eq!(truth.hex.len(), 8);
        prop_assert_eq!(&truth.hex, &format!("{:08x}", truth.word));
        prop_assert_eq!(truth.field_bits().concat(), truth.binary);
    }

    #[test]
    fn field_widths_follow_layout(q in arb_question()) {
        let truth = q.ground_truth().unwrap();
        let widths: Vec<u32> = truth.fields.iter().map(|f| f.bits.len() as u32).collect();
        prop_assert_eq!(widths, q.instruction.layout().bit_widths());
        prop_assert_eq!(truth.field_names(), q.instruction.layout().field_names());
    }

    #[test]
    fn fixed_fields_land_in_place(q in arb_question()) {
        let word = q.ground_truth().unwrap().word;
        prop_assert_eq!(word.opcode(), q.instruction.opcode());
        if let Some(f3) = q.instruction.funct3() {
            prop_assert_eq!(word.funct3(), f3);
        }
        if q.format().writes_rd() {
            prop_assert_eq!(word.rd(), q.operands.rd);
        }
    }

    #[test]
    fn decode_inverts_assembly(q in arb_question()) {
        let word = q.ground_truth().unwrap().word;
        let decoded = Question::decode(&registry(), word).unwrap();
        prop_assert_eq!(decoded.operands, q.operands);
        prop_assert_eq!(decoded.instruction.format(), q.format());
        prop_assert_eq!(decoded.ground_truth().unwrap().word, word);
    }

    #[test]
    fn swizzle_covers_every_immediate_slot(q in arb_question()) {
        let groups = swizzle(q.format(), q.operands.imm).unwrap();
        let imm_slots = q.instruction.layout().fields().iter().filter(|f| f.is_immediate()).count();
        prop_assert_eq!(groups.len(), imm_slots);
    }
}
