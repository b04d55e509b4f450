//! Decoded flag tables.
//!
//! The output of the pipeline: one [`FlagRow`] per nonzero-coded element,
//! collected into a [`FlagTable`] snapshot of the source array. Rows are
//! never mutated after construction and are ordered by ascending linear
//! index.

use serde::Serialize;

/// One flagged element of a code array.
///
/// `flags` is aligned with the owning table's column order: `flags[i]` is
/// true iff the flag named by `FlagTable::columns()[i]` is set in
/// `raw_value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlagRow {
    /// The element's bitmask code, always nonzero.
    pub raw_value: u64,

    /// 0-based position in the row-major flattening of the source array.
    pub linear_index: usize,

    /// Multi-dimensional position, one component per source axis.
    ///
    /// Raveling this against the source shape reproduces `linear_index`.
    pub coordinate: Vec<usize>,

    /// Column-aligned flag booleans.
    pub flags: Vec<bool>,
}

impl FlagRow {
    /// Whether the flag in the given column is set for this element.
    ///
    /// Out-of-range columns read as unset.
    pub fn is_set(&self, column: usize) -> bool {
        self.flags.get(column).copied().unwrap_or(false)
    }
}

/// Structured table of every flagged element in a code array.
///
/// The full column schema is always declared, even when no row sets a
/// given flag (or the table has no rows at all), so consumers can lay out
/// reports and color maps before looking at the data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlagTable {
    columns: Vec<String>,
    shape: Vec<usize>,
    rows: Vec<FlagRow>,
}

impl FlagTable {
    pub(crate) fn new(columns: Vec<String>, shape: Vec<usize>, rows: Vec<FlagRow>) -> Self {
        Self {
            columns,
            shape,
            rows,
        }
    }

    /// Flag column names, in bit-definition order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Shape of the source code array.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Rows in ascending linear-index order.
    pub fn rows(&self) -> &[FlagRow] {
        &self.rows
    }

    /// Number of flagged elements.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Rows with the named flag set. Unknown names yield nothing.
    pub fn rows_with<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a FlagRow> {
        let column = self.column_index(name);
        self.rows
            .iter()
            .filter(move |row| column.is_some_and(|c| row.is_set(c)))
    }
}

#[test]
fn column_lookup_and_row_selection() {
    let table = FlagTable::new(
        vec!["A".into(), "B".into()],
        vec![2, 2],
        vec![
            FlagRow {
                raw_value: 5,
                linear_index: 1,
                coordinate: vec![0, 1],
                flags: vec![true, true],
            },
            FlagRow {
                raw_value: 2,
                linear_index: 2,
                coordinate: vec![1, 0],
                flags: vec![false, false],
            },
        ],
    );

    assert_eq!(table.column_index("B"), Some(1));
    assert_eq!(table.column_index("missing"), None);

    let with_a: Vec<_> = table.rows_with("A").map(|row| row.linear_index).collect();
    assert_eq!(with_a, [1]);
    assert_eq!(table.rows_with("missing").count(), 0);

    assert!(!table.rows()[1].is_set(0));
    assert!(!table.rows()[1].is_set(99));
}

#[test]
fn serializes_for_external_consumers() -> anyhow::Result<()> {
    let table = FlagTable::new(
        vec!["A".into()],
        vec![3],
        vec![FlagRow {
            raw_value: 1,
            linear_index: 2,
            coordinate: vec![2],
            flags: vec![true],
        }],
    );

    let json = serde_json::to_value(&table)?;
    assert_eq!(json["columns"][0], "A");
    assert_eq!(json["rows"][0]["linear_index"], 2);
    assert_eq!(json["rows"][0]["flags"][0], true);
    Ok(())
}
