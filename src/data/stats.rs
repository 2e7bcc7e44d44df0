use super::model::Table;

/// Descriptive statistics of one numeric column. `None` marks an undefined
/// value (no data, or a spread from fewer than two values).
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

impl ColumnSummary {
    /// Compute statistics from values, ignoring NaN. Infinities count as
    /// data; a mean or spread they leave undefined is `None`.
    pub fn compute(values: impl IntoIterator<Item = f64>) -> Self {
        let mut vals: Vec<f64> = values.into_iter().filter(|v| !v.is_nan()).collect();
        vals.sort_by(f64::total_cmp);

        let count = vals.len();
        if count == 0 {
            return ColumnSummary {
                count,
                mean: None,
                std: None,
                min: None,
                q25: None,
                median: None,
                q75: None,
                max: None,
            };
        }

        let mean = vals.iter().sum::<f64>() / count as f64;
        let std = (count > 1).then(|| {
            let ss: f64 = vals.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (count - 1) as f64).sqrt()
        });

        ColumnSummary {
            count,
            mean: Some(mean).filter(|m| !m.is_nan()),
            std: std.filter(|s| !s.is_nan()),
            min: vals.first().copied(),
            q25: quantile(&vals, 0.25),
            median: quantile(&vals, 0.5),
            q75: quantile(&vals, 0.75),
            max: vals.last().copied(),
        }
    }

    /// Rows in `describe()` order.
    pub fn rows(&self) -> [(&'static str, Option<f64>); 8] {
        [
            ("count", Some(self.count as f64)),
            ("mean", self.mean),
            ("std", self.std),
            ("min", self.min),
            ("25%", self.q25),
            ("50%", self.median),
            ("75%", self.q75),
            ("max", self.max),
        ]
    }
}

/// Linear interpolation between closest ranks; `sorted` must be ascending.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let pos = q.clamp(0.0, 1.0) * last as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    if lo == hi {
        return Some(sorted[lo]);
    }
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Statistics for every numeric column, in column order.
pub fn summary_statistics(table: &Table) -> Vec<(String, ColumnSummary)> {
    table
        .columns()
        .iter()
        .filter(|c| c.is_numeric())
        .map(|c| (c.name.clone(), ColumnSummary::compute(c.numbers())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Column;

    fn close(a: Option<f64>, b: f64) -> bool {
        a.is_some_and(|a| (a - b).abs() < 1e-6)
    }

    #[test]
    fn describe_one_to_four() {
        let s = ColumnSummary::compute([4.0, 1.0, 3.0, 2.0]);
        assert_eq!(s.count, 4);
        assert!(close(s.mean, 2.5));
        assert!(close(s.std, 1.290_994));
        assert!(close(s.min, 1.0));
        assert!(close(s.q25, 1.75));
        assert!(close(s.median, 2.5));
        assert!(close(s.q75, 3.25));
        assert!(close(s.max, 4.0));
    }

    #[test]
    fn single_value_has_no_spread() {
        let s = ColumnSummary::compute([7.0]);
        assert_eq!(s.count, 1);
        assert_eq!(s.std, None);
        assert!(close(s.q75, 7.0));
    }

    #[test]
    fn empty_column_is_undefined() {
        let s = ColumnSummary::compute(std::iter::empty::<f64>());
        assert_eq!(s.count, 0);
        assert_eq!(s.mean, None);
        assert_eq!(s.max, None);
    }

    #[test]
    fn only_numeric_columns_are_summarised() {
        let t = Table::new(vec![
            Column::text("Region", [Some("N"), Some("S"), None]),
            Column::numeric("Sales", [Some(1.0), None, Some(3.0)]),
            Column::numeric("Units", [Some(5.0), Some(6.0), Some(7.0)]),
        ])
        .unwrap();
        let stats = summary_statistics(&t);
        let names: Vec<&str> = stats.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["Sales", "Units"]);
        assert_eq!(stats[0].1.count, 2);
        assert!(close(stats[0].1.mean, 2.0));
    }
}
