//! Chart input preparation: turns table columns into plottable series.
//! Rows with a missing or non-finite cell in any used column are skipped,
//! as are aggregates that overflow.

use std::collections::HashMap;

use crate::data::model::{CellValue, Table};
use crate::data::ops::{require_column, require_numeric};
use crate::error::ColumnError;

/// Mean of `value` per distinct `category`, categories in first-seen order.
pub fn category_means(
    table: &Table,
    category: &str,
    value: &str,
) -> Result<Vec<(CellValue, f64)>, ColumnError> {
    let cat = require_column(table, category)?;
    let val = require_numeric(table, value)?;

    let mut slot: HashMap<&CellValue, usize> = HashMap::new();
    let mut sums: Vec<(CellValue, f64, usize)> = Vec::new();
    for (c, v) in cat.values.iter().zip(&val.values) {
        let (false, Some(v)) = (c.is_missing(), v.as_f64().filter(|v| v.is_finite())) else {
            continue;
        };
        let i = *slot.entry(c).or_insert_with(|| {
            sums.push((c.clone(), 0.0, 0));
            sums.len() - 1
        });
        sums[i].1 += v;
        sums[i].2 += 1;
    }

    Ok(sums
        .into_iter()
        .map(|(c, sum, n)| (c, sum / n as f64))
        .filter(|(_, mean)| mean.is_finite())
        .collect())
}

/// `(x, y)` pairs from two numeric columns, in row order.
pub fn points(table: &Table, x: &str, y: &str) -> Result<Vec<(f64, f64)>, ColumnError> {
    let xs = require_numeric(table, x)?;
    let ys = require_numeric(table, y)?;
    Ok(xs
        .values
        .iter()
        .zip(&ys.values)
        .filter_map(|(a, b)| Some((a.as_f64()?, b.as_f64()?)))
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .collect())
}

/// Mean `y` for each distinct `x`, ascending `x`.
pub fn trend(table: &Table, x: &str, y: &str) -> Result<Vec<(f64, f64)>, ColumnError> {
    let mut pts = points(table, x, y)?;
    pts.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut out: Vec<(f64, f64, usize)> = Vec::new();
    for (px, py) in pts {
        match out.last_mut() {
            Some((lx, sum, n)) if *lx == px => {
                *sum += py;
                *n += 1;
            }
            _ => out.push((px, py, 1)),
        }
    }
    Ok(out
        .into_iter()
        .map(|(x, sum, n)| (x, sum / n as f64))
        .filter(|(_, mean)| mean.is_finite())
        .collect())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `bins + 1` ascending bin edges.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Equal-width bins between min and max; the last bin includes max.
    /// `None` when there is no finite value or the range overflows.
    pub fn compute(values: &[f64], bins: usize) -> Option<Histogram> {
        let bins = bins.max(1);
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        let first = *finite.first()?;
        let (mut lo, mut hi) = finite
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        if !width.is_finite() {
            return None;
        }
        let edges = (0..=bins).map(|i| lo + width * i as f64).collect();
        let mut counts = vec![0; bins];
        for v in finite {
            let bin = (((v - lo) / width).floor() as usize).min(bins - 1);
            counts[bin] += 1;
        }
        Some(Histogram { edges, counts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Column;

    fn table() -> Table {
        Table::new(vec![
            Column::text(
                "Region",
                [Some("North"), Some("South"), Some("North"), None, Some("East")],
            ),
            Column::numeric("Year", [Some(2022.0), Some(2021.0), Some(2022.0), Some(2023.0), None]),
            Column::numeric("Sales", [Some(10.0), Some(20.0), Some(30.0), Some(40.0), Some(50.0)]),
        ])
        .unwrap()
    }

    #[test]
    fn bar_means_in_first_seen_order() {
        let means = category_means(&table(), "Region", "Sales").unwrap();
        assert_eq!(
            means,
            vec![
                (CellValue::Text("North".into()), 20.0),
                (CellValue::Text("South".into()), 20.0),
                (CellValue::Text("East".into()), 50.0),
            ]
        );
    }

    #[test]
    fn bar_needs_numeric_values() {
        assert_eq!(
            category_means(&table(), "Sales", "Region"),
            Err(ColumnError::NotNumeric("Region".into()))
        );
    }

    #[test]
    fn trend_averages_duplicate_x() {
        let t = trend(&table(), "Year", "Sales").unwrap();
        assert_eq!(t, vec![(2021.0, 20.0), (2022.0, 20.0), (2023.0, 40.0)]);
    }

    #[test]
    fn histogram_counts_every_value() {
        let values: Vec<f64> = (0..=20).map(f64::from).collect();
        let h = Histogram::compute(&values, 10).unwrap();
        assert_eq!(h.edges.len(), 11);
        assert_eq!(h.counts.iter().sum::<usize>(), 21);
        // 20.0 is the max and lands in the last, right-closed bin.
        assert_eq!(h.counts[9], 3);
    }

    #[test]
    fn non_finite_cells_and_overflowing_means_are_dropped() {
        let t = Table::new(vec![
            Column::text("Region", [Some("N"), Some("S"), Some("S"), Some("E")]),
            Column::numeric("x", [Some(1.0), Some(2.0), Some(2.0), Some(3.0)]),
            Column::numeric("y", [Some(5.0), Some(1e308), Some(1e308), Some(f64::INFINITY)]),
        ])
        .unwrap();
        assert_eq!(points(&t, "x", "y").unwrap(), vec![(1.0, 5.0), (2.0, 1e308), (2.0, 1e308)]);
        // Two 1e308 values sum to inf, so their mean is dropped.
        assert_eq!(trend(&t, "x", "y").unwrap(), vec![(1.0, 5.0)]);
        assert_eq!(
            category_means(&t, "Region", "y").unwrap(),
            vec![(CellValue::Text("N".into()), 5.0)]
        );
        assert_eq!(Histogram::compute(&[-1e308, 1e308], 4), None);
        let h = Histogram::compute(&[1.0, f64::INFINITY, 2.0], 2).unwrap();
        assert_eq!(h.counts, vec![1, 1]);
    }

    #[test]
    fn histogram_of_constant_values() {
        let h = Histogram::compute(&[4.0, 4.0], 10).unwrap();
        assert!((h.edges[0] - 3.5).abs() < 1e-9);
        assert_eq!(h.counts.iter().sum::<usize>(), 2);
        assert_eq!(Histogram::compute(&[], 10), None);
    }
}
