//! Spatial and statistical aggregation of flag tables.
//!
//! The data-side preparation a plotting layer needs: how often each flag
//! occurs, which flags are present at all, and where each flag's pixels
//! sit on the detector plane. Color assignment and rendering stay
//! external; both key on the stable column order preserved here.

use std::fmt;

use serde::Serialize;

use crate::structs::flag_table::FlagTable;

/// Occurrence count for one flag column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlagCount {
    pub name: String,
    pub count: usize,
}

/// Per-flag occurrence counts for a [`FlagTable`], in column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlagSummary {
    counts: Vec<FlagCount>,
    total_rows: usize,
}

/// Counts how many rows set each flag column.
pub fn summarize(table: &FlagTable) -> FlagSummary {
    let mut counts: Vec<FlagCount> = table
        .columns()
        .iter()
        .map(|name| FlagCount {
            name: name.clone(),
            count: 0,
        })
        .collect();

    for row in table.rows() {
        for (column, &set) in row.flags.iter().enumerate() {
            if set {
                counts[column].count += 1;
            }
        }
    }

    FlagSummary {
        counts,
        total_rows: table.len(),
    }
}

impl FlagSummary {
    /// Counts for every declared column, set or not.
    pub fn counts(&self) -> &[FlagCount] {
        &self.counts
    }

    /// Number of flagged elements in the source table.
    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    pub fn count_of(&self, name: &str) -> Option<usize> {
        self.counts
            .iter()
            .find(|count| count.name == name)
            .map(|count| count.count)
    }

    /// Names of the flags that actually occur, in column order.
    pub fn present_flags(&self) -> impl Iterator<Item = &str> {
        self.counts
            .iter()
            .filter(|count| count.count > 0)
            .map(|count| count.name.as_str())
    }
}

impl fmt::Display for FlagSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} flagged elements", self.total_rows)?;
        for count in self.counts.iter().filter(|count| count.count > 0) {
            writeln!(f, "  {:<20} {}", count.name, count.count)?;
        }
        Ok(())
    }
}

/// Display-space shift applied to detector-plane positions.
///
/// Supplied by the caller, typically from an instrument aperture's corner
/// coordinates, so plotted pixels line up with externally drawn overlays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PixelOffset {
    pub x: f64,
    pub y: f64,
}

/// Detector-plane positions of one flag's pixels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlagSeries {
    pub name: String,
    pub points: Vec<(f64, f64)>,
}

/// Builds one `(x, y)` point series per present flag, in column order.
///
/// Leading axes collapse onto the detector plane: the last two coordinate
/// components are taken as `(row, col)` and mapped to `(y, x)`, so a cube
/// of exposures projects every flagged pixel onto one 2-D image. For 1-D
/// input the sole coordinate is x and y is 0. Flags with no occurrences
/// produce no series.
pub fn flag_series(table: &FlagTable, offset: PixelOffset) -> Vec<FlagSeries> {
    table
        .columns()
        .iter()
        .enumerate()
        .filter_map(|(column, name)| {
            let points: Vec<(f64, f64)> = table
                .rows()
                .iter()
                .filter(|row| row.is_set(column))
                .map(|row| {
                    let coord = &row.coordinate;
                    let (y, x) = match coord.len() {
                        1 => (0, coord[0]),
                        n => (coord[n - 2], coord[n - 1]),
                    };
                    (x as f64 + offset.x, y as f64 + offset.y)
                })
                .collect();

            (!points.is_empty()).then(|| FlagSeries {
                name: name.clone(),
                points,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::table::FlagTableBuilder;
    use crate::structs::bit_table::BitDefinitionTable;
    use anyhow::Result;
    use ndarray::{Array3, array};

    fn build(codes: ndarray::ArrayViewD<'_, u32>) -> Result<FlagTable> {
        let bits = BitDefinitionTable::from_entries([("A", 1u64), ("B", 2), ("C", 4)])?;
        FlagTableBuilder::new().build(codes, &bits)
    }

    #[test]
    fn counts_match_column_sums() -> Result<()> {
        let codes = array![[1u32, 3], [0, 2]].into_dyn();
        let summary = summarize(&build(codes.view())?);

        assert_eq!(summary.total_rows(), 3);
        assert_eq!(summary.count_of("A"), Some(2));
        assert_eq!(summary.count_of("B"), Some(2));
        assert_eq!(summary.count_of("C"), Some(0));
        assert_eq!(summary.count_of("missing"), None);

        // schema keeps the zero-count column, present_flags drops it
        assert_eq!(summary.counts().len(), 3);
        assert_eq!(summary.present_flags().collect::<Vec<_>>(), ["A", "B"]);

        let text = summary.to_string();
        assert!(text.contains("3 flagged elements"));
        assert!(text.contains('A'));
        assert!(!text.contains('C'));
        Ok(())
    }

    #[test]
    fn series_collapse_onto_detector_plane() -> Result<()> {
        // same pixel flagged in two exposures of a cube
        let mut codes = Array3::<u32>::zeros((2, 3, 4));
        codes[[0, 1, 2]] = 1;
        codes[[1, 1, 2]] = 1;
        codes[[0, 2, 3]] = 2;

        let series = flag_series(&build(codes.into_dyn().view())?, PixelOffset::default());

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].name, "A");
        assert_eq!(series[0].points, [(2.0, 1.0), (2.0, 1.0)]);
        assert_eq!(series[1].name, "B");
        assert_eq!(series[1].points, [(3.0, 2.0)]);
        Ok(())
    }

    #[test]
    fn series_apply_display_offset() -> Result<()> {
        let codes = array![[1u32, 0], [0, 0]].into_dyn();
        let offset = PixelOffset { x: -10.5, y: 4.0 };

        let series = flag_series(&build(codes.view())?, offset);
        assert_eq!(series[0].points, [(-10.5, 4.0)]);
        Ok(())
    }

    #[test]
    fn one_dimensional_series_sit_on_y_zero() -> Result<()> {
        let codes = array![0u32, 1, 0, 1].into_dyn();

        let series = flag_series(&build(codes.view())?, PixelOffset::default());
        assert_eq!(series[0].points, [(1.0, 0.0), (3.0, 0.0)]);
        Ok(())
    }
}
