//! Standard pixel DQ mnemonics.
//!
//! The pixel-flag convention used by the JWST calibration pipeline: one
//! mnemonic per bit of a 32-bit mask. Provided so code arrays from real
//! calibration products decode without the caller restating the standard;
//! any other [`BitDefinitionTable`] can be passed instead.

use crate::structs::bit_table::BitDefinitionTable;

/// Standard pixel mnemonics in bit order.
///
/// `GOOD` (value 0) is deliberately absent: it marks the absence of flags
/// and can never match under AND-nonzero decoding.
const PIXEL: &[(&str, u64)] = &[
    ("DO_NOT_USE", 1),
    ("SATURATED", 1 << 1),
    ("JUMP_DET", 1 << 2),
    ("DROPOUT", 1 << 3),
    ("OUTLIER", 1 << 4),
    ("PERSISTENCE", 1 << 5),
    ("AD_FLOOR", 1 << 6),
    ("CHARGELOSS", 1 << 7),
    ("UNRELIABLE_ERROR", 1 << 8),
    ("NON_SCIENCE", 1 << 9),
    ("DEAD", 1 << 10),
    ("HOT", 1 << 11),
    ("WARM", 1 << 12),
    ("LOW_QE", 1 << 13),
    ("RC", 1 << 14),
    ("TELEGRAPH", 1 << 15),
    ("NONLINEAR", 1 << 16),
    ("BAD_REF_PIXEL", 1 << 17),
    ("NO_FLAT_FIELD", 1 << 18),
    ("NO_GAIN_VALUE", 1 << 19),
    ("NO_LIN_CORR", 1 << 20),
    ("NO_SAT_CHECK", 1 << 21),
    ("UNRELIABLE_BIAS", 1 << 22),
    ("UNRELIABLE_DARK", 1 << 23),
    ("UNRELIABLE_SLOPE", 1 << 24),
    ("UNRELIABLE_FLAT", 1 << 25),
    ("OPEN", 1 << 26),
    ("ADJ_OPEN", 1 << 27),
    ("FLUX_ESTIMATED", 1 << 28),
    ("MSA_FAILED_OPEN", 1 << 29),
    ("OTHER_BAD_PIXEL", 1 << 30),
    ("REFERENCE_PIXEL", 1 << 31),
];

/// Returns the standard pixel DQ flag table.
pub fn pixel() -> BitDefinitionTable {
    BitDefinitionTable::from_entries(PIXEL.iter().copied())
        .expect("standard mnemonics have unique names")
}

#[test]
fn pixel_table_is_well_formed() {
    let table = pixel();

    assert_eq!(table.len(), 32);
    assert!(table.validation_issues().is_empty());
    assert_eq!(table.names().next(), Some("DO_NOT_USE"));
    assert_eq!(table.value_of("REFERENCE_PIXEL"), Some(1 << 31));
}

#[test]
fn pixel_table_decodes_standard_codes() {
    use crate::process::decode::decode;

    let table = pixel();

    // DO_NOT_USE | SATURATED | DEAD
    let names = decode(1 | 2 | 1024, &table);
    assert_eq!(names, ["DO_NOT_USE", "SATURATED", "DEAD"]);
}
