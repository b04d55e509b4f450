//! Named flag bit definitions.
//!
//! A [`BitDefinitionTable`] maps flag names to bitmask values. Insertion
//! order is the canonical column order of every downstream product, so
//! external consumers (color assignment, report layout) stay order-stable
//! across runs.

use serde::Serialize;

use crate::utils::errors::DefinitionError;

/// A single named flag and its bitmask value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BitDefinition {
    pub name: String,
    pub value: u64,
}

/// Insertion-ordered table of flag definitions.
///
/// Flag names are unique; bit values are normally distinct powers of two
/// but may be mnemonic OR-combinations of several bits. Structural
/// problems with the values are reported by
/// [`validation_issues`](BitDefinitionTable::validation_issues) and acted
/// on by the table builder according to its fail level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BitDefinitionTable {
    entries: Vec<BitDefinition>,
}

impl BitDefinitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a flag definition, rejecting duplicate names.
    pub fn insert(&mut self, name: impl Into<String>, value: u64) -> Result<(), DefinitionError> {
        let name = name.into();
        if self.entries.iter().any(|def| def.name == name) {
            return Err(DefinitionError::DuplicateName(name));
        }

        self.entries.push(BitDefinition { name, value });
        Ok(())
    }

    /// Builds a table from `(name, value)` pairs, preserving their order.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, DefinitionError>
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for (name, value) in entries {
            table.insert(name, value)?;
        }
        Ok(table)
    }

    pub fn entries(&self) -> &[BitDefinition] {
        &self.entries
    }

    /// Flag names in column order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|def| def.name.as_str())
    }

    pub fn value_of(&self, name: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|def| def.name == name)
            .map(|def| def.value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reports structural problems with the bit values.
    ///
    /// - a zero value can never match any code;
    /// - a value with several bits set matches whenever any one of them
    ///   is set;
    /// - two flags sharing a bit are both attributed whenever it is set.
    ///
    /// Name uniqueness is already enforced by
    /// [`insert`](BitDefinitionTable::insert), so it is not re-checked here.
    pub fn validation_issues(&self) -> Vec<DefinitionError> {
        let mut issues = Vec::new();

        for (i, def) in self.entries.iter().enumerate() {
            if def.value == 0 {
                issues.push(DefinitionError::ZeroBit(def.name.clone()));
            } else if def.value.count_ones() > 1 {
                issues.push(DefinitionError::NotSingleBit {
                    name: def.name.clone(),
                    value: def.value,
                    bits: def.value.count_ones(),
                });
            }

            for other in &self.entries[..i] {
                let overlap = def.value & other.value;
                if overlap != 0 {
                    issues.push(DefinitionError::SharedBits {
                        first: other.name.clone(),
                        second: def.name.clone(),
                        overlap,
                    });
                }
            }
        }

        issues
    }
}

#[test]
fn insertion_order_is_preserved() -> anyhow::Result<()> {
    let table = BitDefinitionTable::from_entries([("B", 2u64), ("A", 1), ("C", 4)])?;

    assert_eq!(table.names().collect::<Vec<_>>(), ["B", "A", "C"]);
    assert_eq!(table.value_of("A"), Some(1));
    assert_eq!(table.value_of("missing"), None);
    assert_eq!(table.len(), 3);
    Ok(())
}

#[test]
fn duplicate_names_rejected() {
    let mut table = BitDefinitionTable::new();
    table.insert("SATURATED", 2).unwrap();

    assert!(matches!(
        table.insert("SATURATED", 4),
        Err(DefinitionError::DuplicateName(name)) if name == "SATURATED"
    ));
}

#[test]
fn validation_finds_bad_values() -> anyhow::Result<()> {
    let table = BitDefinitionTable::from_entries([("A", 0u64), ("B", 3), ("C", 2)])?;
    let issues = table.validation_issues();

    assert!(matches!(&issues[0], DefinitionError::ZeroBit(name) if name == "A"));
    assert!(matches!(
        &issues[1],
        DefinitionError::NotSingleBit { name, value: 3, bits: 2 } if name == "B"
    ));
    assert!(matches!(
        &issues[2],
        DefinitionError::SharedBits { first, second, overlap: 2 }
            if first == "B" && second == "C"
    ));
    assert_eq!(issues.len(), 3);

    let clean = BitDefinitionTable::from_entries([("A", 1u64), ("B", 4)])?;
    assert!(clean.validation_issues().is_empty());
    Ok(())
}
