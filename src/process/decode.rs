//! Flag decoding for single bitmask codes.
//!
//! A flag is active when `raw_value & value != 0`. The nonzero test, not
//! equality, is deliberate: definition values may be mnemonic
//! OR-combinations of several bits, and one pixel routinely carries
//! several simultaneously set bits.
//!
//! Both functions are pure and keep the bit table's own ordering, so
//! callers needing a deterministic column layout get it for free.

use crate::structs::bit_table::BitDefinitionTable;

/// Names of the flags active in `raw_value`, in table order.
///
/// A zero code activates nothing.
pub fn decode<'a>(raw_value: u64, bit_table: &'a BitDefinitionTable) -> Vec<&'a str> {
    bit_table
        .entries()
        .iter()
        .filter(|def| raw_value & def.value != 0)
        .map(|def| def.name.as_str())
        .collect()
}

/// Column-aligned form of [`decode`]: one boolean per table entry.
pub fn decode_columns(raw_value: u64, bit_table: &BitDefinitionTable) -> Vec<bool> {
    bit_table
        .entries()
        .iter()
        .map(|def| raw_value & def.value != 0)
        .collect()
}

#[test]
fn matches_set_bits() -> anyhow::Result<()> {
    let bits = BitDefinitionTable::from_entries([("A", 1u64), ("B", 4)])?;

    assert_eq!(decode(5, &bits), ["A", "B"]);
    assert_eq!(decode(4, &bits), ["B"]);
    // bit value 2 is declared by neither flag
    assert!(decode(2, &bits).is_empty());
    assert!(decode(0, &bits).is_empty());

    assert_eq!(decode_columns(5, &bits), [true, true]);
    assert_eq!(decode_columns(2, &bits), [false, false]);
    Ok(())
}

#[test]
fn composite_values_match_any_constituent_bit() -> anyhow::Result<()> {
    // bits 1 and 2 combined; either alone activates the flag
    let bits = BitDefinitionTable::from_entries([("A", 3u64)])?;

    assert_eq!(decode(1, &bits), ["A"]);
    assert_eq!(decode(2, &bits), ["A"]);
    assert!(decode(4, &bits).is_empty());
    Ok(())
}

#[test]
fn decoding_is_repeatable() -> anyhow::Result<()> {
    let bits = BitDefinitionTable::from_entries([("A", 1u64), ("B", 2), ("C", 8)])?;

    for raw in 0..16u64 {
        assert_eq!(decode(raw, &bits), decode(raw, &bits));
    }
    Ok(())
}
