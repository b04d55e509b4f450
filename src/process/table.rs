//! Flag table construction from code arrays.

use anyhow::{Result, anyhow};
use log::Level::{Error, Warn};
use log::debug;
use ndarray::ArrayViewD;

use crate::log_or_err;
use crate::process::decode;
use crate::structs::bit_table::BitDefinitionTable;
use crate::structs::flag_table::{FlagRow, FlagTable};
use crate::utils::errors::DefinitionError;
use crate::utils::index;

/// Builds [`FlagTable`]s from N-dimensional code arrays.
///
/// The sweep enumerates elements in row-major order and materializes a
/// row only for nonzero codes. Real detector masks are overwhelmingly
/// zero, so filtering before row construction keeps the table a small
/// fraction of the array size.
///
/// # Example
///
/// ```rust
/// use dqmask::process::table::FlagTableBuilder;
/// use dqmask::structs::bit_table::BitDefinitionTable;
/// use ndarray::array;
///
/// let bits = BitDefinitionTable::from_entries([("A", 1u64), ("B", 4)])?;
/// let codes = array![[0u32, 5], [2, 0]].into_dyn();
///
/// let table = FlagTableBuilder::new().build(codes.view(), &bits)?;
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.rows()[0].coordinate, [0, 1]);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct FlagTableBuilder {
    fail_level: log::Level,
}

impl Default for FlagTableBuilder {
    fn default() -> Self {
        Self { fail_level: Error }
    }
}

impl FlagTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the failure level for bit-definition validation.
    ///
    /// - `log::Level::Error`: fail only on definitions that can never
    ///   match (default); composite or shared bit values are logged and
    ///   decoded by OR-matching
    /// - `log::Level::Warn`: fail on any ambiguous definition
    ///   (strict mode)
    pub fn set_fail_level(&mut self, level: log::Level) {
        self.fail_level = level;
    }

    /// Decodes every flagged element of `codes` into a [`FlagTable`].
    ///
    /// Rows appear in ascending linear-index order, one per nonzero code.
    /// The full column schema is declared even if no element sets a given
    /// flag. The input is read once and never retained.
    pub fn build<T>(
        &self,
        codes: ArrayViewD<'_, T>,
        bit_table: &BitDefinitionTable,
    ) -> Result<FlagTable>
    where
        T: Copy + Into<u64>,
    {
        let shape = codes.shape().to_vec();
        index::check_shape(&shape)?;
        self.check_definitions(bit_table)?;

        let mut rows = Vec::new();
        for (linear_index, &code) in codes.iter().enumerate() {
            let raw_value: u64 = code.into();
            if raw_value == 0 {
                continue;
            }

            rows.push(FlagRow {
                raw_value,
                linear_index,
                coordinate: index::unravel(linear_index, &shape)?,
                flags: decode::decode_columns(raw_value, bit_table),
            });
        }

        debug!("flagged {} of {} elements", rows.len(), codes.len());

        Ok(FlagTable::new(
            bit_table.names().map(str::to_owned).collect(),
            shape,
            rows,
        ))
    }

    fn check_definitions(&self, bit_table: &BitDefinitionTable) -> Result<()> {
        for issue in bit_table.validation_issues() {
            match issue {
                DefinitionError::ZeroBit(_) => log_or_err!(self, Error, anyhow!(issue)),
                _ => log_or_err!(self, Warn, anyhow!(issue)),
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, Array3, arr0, array};

    fn ab_bits() -> BitDefinitionTable {
        BitDefinitionTable::from_entries([("A", 1u64), ("B", 4)]).unwrap()
    }

    #[test]
    fn flags_only_nonzero_elements() -> Result<()> {
        let codes = array![[0u32, 5], [2, 0]].into_dyn();
        let table = FlagTableBuilder::new().build(codes.view(), &ab_bits())?;

        assert_eq!(table.columns(), ["A", "B"]);
        assert_eq!(table.shape(), [2, 2]);
        assert_eq!(table.len(), 2);

        let first = &table.rows()[0];
        assert_eq!(first.raw_value, 5);
        assert_eq!(first.linear_index, 1);
        assert_eq!(first.coordinate, [0, 1]);
        assert_eq!(first.flags, [true, true]);

        // flagged under a bit neither definition declares
        let second = &table.rows()[1];
        assert_eq!(second.raw_value, 2);
        assert_eq!(second.linear_index, 2);
        assert_eq!(second.coordinate, [1, 0]);
        assert_eq!(second.flags, [false, false]);
        Ok(())
    }

    #[test]
    fn all_zero_array_keeps_schema() -> Result<()> {
        let codes = Array2::<u32>::zeros((3, 3)).into_dyn();
        let table = FlagTableBuilder::new().build(codes.view(), &ab_bits())?;

        assert!(table.is_empty());
        assert_eq!(table.columns(), ["A", "B"]);
        Ok(())
    }

    #[test]
    fn empty_bit_table_still_reports_rows() -> Result<()> {
        let codes = array![[0u32, 7], [0, 0]].into_dyn();
        let table = FlagTableBuilder::new().build(codes.view(), &BitDefinitionTable::new())?;

        assert!(table.columns().is_empty());
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].raw_value, 7);
        assert!(table.rows()[0].flags.is_empty());
        Ok(())
    }

    #[test]
    fn completeness_over_a_cube() -> Result<()> {
        let codes = Array3::from_shape_fn((2, 3, 4), |(i, j, k)| {
            if (i + j + k) % 5 == 0 { 2u32 } else { 0 }
        })
        .into_dyn();
        let table = FlagTableBuilder::new().build(codes.view(), &ab_bits())?;

        let expected: Vec<usize> = codes
            .iter()
            .enumerate()
            .filter(|&(_, &code)| code != 0)
            .map(|(i, _)| i)
            .collect();
        let got: Vec<usize> = table.rows().iter().map(|row| row.linear_index).collect();
        assert_eq!(got, expected);

        for row in table.rows() {
            assert_eq!(
                index::ravel(&row.coordinate, table.shape())?,
                row.linear_index
            );
        }
        Ok(())
    }

    #[test]
    fn build_is_idempotent() -> Result<()> {
        let codes = array![[3u32, 0, 6], [0, 1, 0]].into_dyn();
        let builder = FlagTableBuilder::new();

        let first = builder.build(codes.view(), &ab_bits())?;
        let second = builder.build(codes.view(), &ab_bits())?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn extra_bits_never_clear_flags() -> Result<()> {
        let bits = ab_bits();
        let builder = FlagTableBuilder::new();

        let base = builder.build(array![[1u32]].into_dyn().view(), &bits)?;
        let more = builder.build(array![[1u32 | 4 | 8]].into_dyn().view(), &bits)?;

        for (was, is) in base.rows()[0].flags.iter().zip(&more.rows()[0].flags) {
            if *was {
                assert!(*is);
            }
        }
        Ok(())
    }

    #[test]
    fn degenerate_shapes_fail() {
        let builder = FlagTableBuilder::new();
        let bits = ab_bits();

        let zero_d = arr0(5u32).into_dyn();
        assert!(builder.build(zero_d.view(), &bits).is_err());

        let empty_axis = Array2::<u32>::zeros((0, 5)).into_dyn();
        assert!(builder.build(empty_axis.view(), &bits).is_err());
    }

    #[test]
    fn zero_valued_definition_fails_by_default() -> Result<()> {
        let bits = BitDefinitionTable::from_entries([("A", 0u64)])?;
        let codes = array![[1u32]].into_dyn();

        assert!(FlagTableBuilder::new().build(codes.view(), &bits).is_err());
        Ok(())
    }

    #[test]
    fn composite_definition_policy() -> Result<()> {
        // bits 1 and 2 combined into one mnemonic
        let bits = BitDefinitionTable::from_entries([("A", 3u64)])?;
        let codes = array![[1u32, 0]].into_dyn();

        // default: warn and OR-match; only one constituent bit is set,
        // yet the flag is attributed
        let table = FlagTableBuilder::new().build(codes.view(), &bits)?;
        assert_eq!(table.rows()[0].flags, [true]);

        // strict: fail fast instead
        let mut strict = FlagTableBuilder::new();
        strict.set_fail_level(log::Level::Warn);
        assert!(strict.build(codes.view(), &bits).is_err());
        Ok(())
    }
}
