use super::model::{CellValue, Table};

/// Outcome of [`fill_missing_with_mean`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FillReport {
    /// `(column, mean used, cells filled)` for each column that had gaps.
    pub filled: Vec<(String, f64, usize)>,
    /// Numeric columns without a usable mean (no values, or infinities of
    /// both signs); left missing.
    pub skipped: Vec<String>,
}

impl FillReport {
    pub fn cells_filled(&self) -> usize {
        self.filled.iter().map(|(_, _, n)| n).sum()
    }
}

/// Rows where at least one column is missing, labels preserved.
pub fn find_missing(table: &Table) -> Table {
    let rows: Vec<usize> = (0..table.row_count())
        .filter(|&r| table.row_has_missing(r))
        .collect();
    table.take_rows(&rows)
}

/// Replace missing cells of every numeric column with that column's mean.
/// Text columns are never touched.
pub fn fill_missing_with_mean(table: &mut Table) -> FillReport {
    let mut report = FillReport::default();

    for col in table.columns_mut().iter_mut().filter(|c| c.is_numeric()) {
        let gaps = col.missing_count();
        if gaps == 0 {
            continue;
        }
        let (sum, n) = col.numbers().fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
        let mean = sum / n as f64;
        // No values, or infinities of both signs: there is no mean to use.
        if mean.is_nan() {
            log::warn!("column '{}' has no mean, leaving it missing", col.name);
            report.skipped.push(col.name.clone());
            continue;
        }
        for cell in col.values.iter_mut().filter(|v| v.is_missing()) {
            *cell = CellValue::Number(mean);
        }
        log::debug!("filled {gaps} cells of '{}' with {mean}", col.name);
        report.filled.push((col.name.clone(), mean, gaps));
    }

    report
}

/// Remove every row holding a missing cell; returns how many were removed.
pub fn drop_missing_rows(table: &mut Table) -> usize {
    let before = table.row_count();
    let keep: Vec<bool> = (0..before).map(|r| !table.row_has_missing(r)).collect();
    table.retain_rows(|r| keep[r]);
    before - table.row_count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Column;

    fn sample() -> Table {
        Table::new(vec![
            Column::text(
                "Region",
                [Some("North"), Some("South"), None, Some("West"), Some("East")],
            ),
            Column::numeric("Sales", [Some(10.0), None, Some(30.0), Some(40.0), Some(50.0)]),
        ])
        .unwrap()
    }

    #[test]
    fn fill_uses_the_mean_of_present_values() {
        let mut t = Table::new(vec![Column::numeric("v", [Some(1.0), None, Some(3.0)])]).unwrap();
        let report = fill_missing_with_mean(&mut t);
        assert_eq!(
            t.column("v").unwrap().values,
            vec![
                CellValue::Number(1.0),
                CellValue::Number(2.0),
                CellValue::Number(3.0)
            ]
        );
        assert_eq!(report.filled, vec![("v".to_string(), 2.0, 1)]);
    }

    #[test]
    fn fill_leaves_text_and_empty_columns_alone() {
        let mut t = sample();
        t = Table::new(
            t.columns()
                .iter()
                .cloned()
                .chain([Column::numeric("Empty", [None; 5])])
                .collect(),
        )
        .unwrap();
        let report = fill_missing_with_mean(&mut t);
        assert_eq!(report.skipped, vec!["Empty".to_string()]);
        assert_eq!(t.column("Region").unwrap().missing_count(), 1);
        assert_eq!(t.column("Empty").unwrap().missing_count(), 5);
        assert_eq!(t.column("Sales").unwrap().values[1], CellValue::Number(32.5));
        assert_eq!(report.cells_filled(), 1);
    }

    #[test]
    fn nan_spellings_are_cleaned_like_blanks() {
        let mut t = crate::data::loader::read_csv("k,v\na,1\nb,\nc,3\nd,NAN\n".as_bytes()).unwrap();
        assert_eq!(find_missing(&t).index(), &[1, 3]);

        let report = fill_missing_with_mean(&mut t);
        assert_eq!(report.filled, vec![("v".to_string(), 2.0, 2)]);
        assert_eq!(
            t.column("v").unwrap().values,
            vec![
                CellValue::Number(1.0),
                CellValue::Number(2.0),
                CellValue::Number(3.0),
                CellValue::Number(2.0)
            ]
        );

        let mut t = crate::data::loader::read_csv("k,v\na,1\nb,Nan\nc,3\n".as_bytes()).unwrap();
        assert_eq!(drop_missing_rows(&mut t), 1);
        assert_eq!(t.index(), &[0, 2]);
    }

    #[test]
    fn infinite_values_are_data_not_gaps() {
        let mut t = crate::data::loader::read_csv("v\ninf\n\n-inf\n".as_bytes()).unwrap();
        assert_eq!(find_missing(&t).index(), &[1]);
        let report = fill_missing_with_mean(&mut t);
        assert_eq!(report.skipped, vec!["v".to_string()]);
        assert_eq!(t.column("v").unwrap().values[1], CellValue::Missing);

        let mut t = crate::data::loader::read_csv("v\ninf\n\n5\n".as_bytes()).unwrap();
        fill_missing_with_mean(&mut t);
        assert_eq!(t.column("v").unwrap().values[1], CellValue::Number(f64::INFINITY));
    }

    #[test]
    fn drop_keeps_survivor_order() {
        let mut t = sample();
        let removed = drop_missing_rows(&mut t);
        assert_eq!(removed, 2);
        assert_eq!(t.row_count(), 3);
        assert_eq!(t.index(), &[0, 3, 4]);
        assert_eq!(
            t.column("Region").unwrap().values,
            vec![
                CellValue::Text("North".into()),
                CellValue::Text("West".into()),
                CellValue::Text("East".into())
            ]
        );
    }

    #[test]
    fn find_missing_selects_incomplete_rows() {
        let t = sample();
        let missing = find_missing(&t);
        assert_eq!(missing.index(), &[1, 2]);
        assert!(find_missing(&missing.take_rows(&[])).is_empty());
    }
}
