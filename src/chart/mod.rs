//! Chart rendering: table columns → [`Figure`] (an RGB raster plus a
//! title and legend for the terminal).

pub mod canvas;
pub mod series;

use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};

use crate::color;
use crate::data::model::Table;
use crate::data::ops;
use crate::error::RenderError;
use canvas::{Canvas, PlotArea, Span};
use series::Histogram;

/// What to plot, with the columns already chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartRequest {
    Bar { category: String, value: String },
    Line { x: String, y: String },
    Scatter { x: String, y: String },
    Pie { column: String },
    Histogram { column: String, bins: usize },
}

impl ChartRequest {
    pub fn title(&self) -> String {
        match self {
            ChartRequest::Bar { category, value } => format!("{value} by {category}"),
            ChartRequest::Line { x, y } => format!("{y} Trend over {x}"),
            ChartRequest::Scatter { x, y } => format!("{x} vs {y}"),
            ChartRequest::Pie { column } => format!("Pie Chart of {column}"),
            ChartRequest::Histogram { column, .. } => format!("Histogram of {column}"),
        }
    }
}

/// A rendered chart.
#[derive(Debug, Clone)]
pub struct Figure {
    pub title: String,
    /// `(label, colour)` pairs describing the series.
    pub legend: Vec<(String, Rgb<u8>)>,
    pub image: RgbImage,
}

impl Figure {
    /// Write the image; the format follows the file extension.
    pub fn save(&self, path: &Path) -> Result<(), RenderError> {
        let format = ImageFormat::from_path(path)
            .ok()
            .filter(|f| matches!(f, ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Bmp))
            .ok_or_else(|| RenderError::UnsupportedFormat(path.to_path_buf()))?;
        self.image.save_with_format(path, format)?;
        log::info!("saved '{}' to {}", self.title, path.display());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

pub fn render(table: &Table, request: &ChartRequest, width: u32, height: u32) -> Result<Figure, RenderError> {
    let mut canvas = Canvas::new(width, height);
    let title = request.title();

    let legend: Vec<(String, Rgb<u8>)> = match request {
        ChartRequest::Bar { category, value } => {
            let means = series::category_means(table, category, value)?;
            if means.is_empty() {
                return Err(RenderError::NoData(format!("no rows with both {category} and {value}")));
            }
            draw_bars(&mut canvas, &means.iter().map(|(_, m)| *m).collect::<Vec<_>>())
                .into_iter()
                .zip(&means)
                .map(|(c, (label, _))| (label.to_string(), c))
                .collect()
        }
        ChartRequest::Line { x, y } => {
            let pts = series::trend(table, x, y)?;
            if pts.is_empty() {
                return Err(RenderError::NoData(format!("no rows with both {x} and {y}")));
            }
            draw_line(&mut canvas, &pts);
            vec![(y.clone(), color::SERIES)]
        }
        ChartRequest::Scatter { x, y } => {
            let pts = series::points(table, x, y)?;
            if pts.is_empty() {
                return Err(RenderError::NoData(format!("no rows with both {x} and {y}")));
            }
            draw_scatter(&mut canvas, &pts);
            vec![(y.clone(), color::SERIES)]
        }
        ChartRequest::Pie { column } => {
            let counts = ops::value_counts(table, column)?;
            let total: usize = counts.iter().map(|(_, n)| n).sum();
            if total == 0 {
                return Err(RenderError::NoData(format!("{column} has no values")));
            }
            let palette = color::generate_palette(counts.len());
            let slices: Vec<(f64, Rgb<u8>)> = counts
                .iter()
                .zip(&palette)
                .map(|((_, n), &c)| (*n as f64 / total as f64, c))
                .collect();
            let (w, h) = (canvas.width(), canvas.height());
            canvas.pie((w / 2.0, h / 2.0), w.min(h) * 0.4, &slices);
            counts
                .iter()
                .zip(slices)
                .map(|((label, _), (f, c))| (format!("{label}: {:.1}%", f * 100.0), c))
                .collect()
        }
        ChartRequest::Histogram { column, bins } => {
            let col = ops::require_numeric(table, column)?;
            let values: Vec<f64> = col.numbers().collect();
            let hist = Histogram::compute(&values, *bins)
                .ok_or_else(|| RenderError::NoData(format!("{column} has no values")))?;
            draw_histogram(&mut canvas, &hist);
            vec![(column.clone(), color::SERIES)]
        }
    };

    log::debug!("rendered '{title}' at {width}x{height}");
    Ok(Figure {
        title,
        legend,
        image: canvas.into_image(),
    })
}

/// One bar per value from a zero baseline; returns the bar colours.
fn draw_bars(canvas: &mut Canvas, values: &[f64]) -> Vec<Rgb<u8>> {
    let n = values.len() as f64;
    let x = Span { min: 0.0, max: n };
    let y = Span::of(values.iter().copied())
        .map_or(Span { min: 0.0, max: 1.0 }, |s| s.including(0.0).padded(0.05));
    let area = PlotArea::new(canvas, x, y);
    area.draw_axes(canvas);

    let palette = color::generate_palette(values.len());
    for (i, (&v, &c)) in values.iter().zip(&palette).enumerate() {
        let slot = i as f64;
        canvas.fill_rect(
            area.point(slot + 0.1, 0.0),
            area.point(slot + 0.9, v),
            c,
        );
    }
    palette
}

fn draw_line(canvas: &mut Canvas, pts: &[(f64, f64)]) {
    let area = xy_area(canvas, pts);
    area.draw_axes(canvas);
    for pair in pts.windows(2) {
        canvas.line(area.point(pair[0].0, pair[0].1), area.point(pair[1].0, pair[1].1), 3, color::SERIES);
    }
    for &(x, y) in pts {
        canvas.disc(area.point(x, y), 6.0, color::SERIES);
    }
}

fn draw_scatter(canvas: &mut Canvas, pts: &[(f64, f64)]) {
    let area = xy_area(canvas, pts);
    area.draw_axes(canvas);
    for &(x, y) in pts {
        canvas.disc(area.point(x, y), 4.0, color::SERIES);
    }
}

fn draw_histogram(canvas: &mut Canvas, hist: &Histogram) {
    let lo = hist.edges.first().copied().unwrap_or(0.0);
    let hi = hist.edges.last().copied().unwrap_or(1.0);
    let peak = hist.counts.iter().copied().max().unwrap_or(0).max(1) as f64;
    let area = PlotArea::new(
        canvas,
        Span { min: lo, max: hi },
        Span { min: 0.0, max: peak }.padded(0.05).including(0.0),
    );
    area.draw_axes(canvas);
    for (i, &count) in hist.counts.iter().enumerate() {
        if count == 0 {
            continue;
        }
        let (from, to) = (hist.edges[i], hist.edges[i + 1]);
        canvas.fill_rect(area.point(from, 0.0), area.point(to, count as f64), color::SERIES);
        // Bin separators.
        canvas.line(area.point(from, 0.0), area.point(from, count as f64), 1, color::BACKGROUND);
    }
}

fn xy_area(canvas: &Canvas, pts: &[(f64, f64)]) -> PlotArea {
    let fallback = Span { min: 0.0, max: 1.0 };
    let x = Span::of(pts.iter().map(|p| p.0)).map_or(fallback, |s| s.padded(0.05));
    let y = Span::of(pts.iter().map(|p| p.1)).map_or(fallback, |s| s.padded(0.05));
    PlotArea::new(canvas, x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Column;
    use crate::error::ColumnError;

    fn table() -> Table {
        Table::new(vec![
            Column::text("Region", [Some("North"), Some("South"), Some("North"), Some("West")]),
            Column::numeric("Year", [Some(2021.0), Some(2022.0), Some(2023.0), Some(2024.0)]),
            Column::numeric("Sales", [Some(100.0), Some(80.0), Some(120.0), None]),
        ])
        .unwrap()
    }

    fn render_small(request: &ChartRequest) -> Result<Figure, RenderError> {
        render(&table(), request, 200, 120)
    }

    #[test]
    fn every_kind_renders() {
        let requests = [
            ChartRequest::Bar { category: "Region".into(), value: "Sales".into() },
            ChartRequest::Line { x: "Year".into(), y: "Sales".into() },
            ChartRequest::Scatter { x: "Year".into(), y: "Sales".into() },
            ChartRequest::Pie { column: "Region".into() },
            ChartRequest::Histogram { column: "Sales".into(), bins: 10 },
        ];
        for request in &requests {
            let fig = render_small(request).unwrap();
            assert_eq!(fig.image.dimensions(), (200, 120));
            assert!(!fig.legend.is_empty(), "{request:?}");
            assert!(
                fig.image.pixels().any(|p| *p != color::BACKGROUND),
                "blank image for {request:?}"
            );
        }
    }

    #[test]
    fn pie_legend_has_percentages() {
        let fig = render_small(&ChartRequest::Pie { column: "Region".into() }).unwrap();
        let labels: Vec<&str> = fig.legend.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["North: 50.0%", "South: 25.0%", "West: 25.0%"]);
        assert_eq!(fig.title, "Pie Chart of Region");
    }

    #[test]
    fn bar_legend_follows_first_seen_order() {
        let fig = render_small(&ChartRequest::Bar {
            category: "Region".into(),
            value: "Sales".into(),
        })
        .unwrap();
        let labels: Vec<&str> = fig.legend.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["North", "South"]);
        assert_eq!(fig.title, "Sales by Region");
    }

    #[test]
    fn bad_columns_are_render_errors() {
        let err = render_small(&ChartRequest::Scatter { x: "Year".into(), y: "Profit".into() }).unwrap_err();
        assert!(matches!(err, RenderError::Column(ColumnError::NotFound(ref c)) if c == "Profit"));
        let err = render_small(&ChartRequest::Histogram { column: "Region".into(), bins: 10 }).unwrap_err();
        assert!(matches!(err, RenderError::Column(ColumnError::NotNumeric(_))));
    }

    #[test]
    fn empty_series_is_no_data() {
        let t = table().take_rows(&[3]);
        let err = render(&t, &ChartRequest::Line { x: "Year".into(), y: "Sales".into() }, 50, 50).unwrap_err();
        assert!(matches!(err, RenderError::NoData(_)));
    }

    #[test]
    fn infinite_cells_render_without_hanging() {
        let t = crate::data::loader::read_csv(
            "Region,x,y\nN,1,2\nS,2,inf\nN,3,4\nS,inf,-inf\n".as_bytes(),
        )
        .unwrap();
        let requests = [
            ChartRequest::Bar { category: "Region".into(), value: "y".into() },
            ChartRequest::Line { x: "x".into(), y: "y".into() },
            ChartRequest::Scatter { x: "x".into(), y: "y".into() },
            ChartRequest::Pie { column: "y".into() },
            ChartRequest::Histogram { column: "y".into(), bins: 10 },
        ];
        for request in &requests {
            let fig = render(&t, request, 120, 80).unwrap();
            assert_eq!(fig.image.dimensions(), (120, 80), "{request:?}");
        }

        // Only South rows carry the infinities, so its bar is left out.
        let fig = render(&t, &requests[0], 120, 80).unwrap();
        let labels: Vec<&str> = fig.legend.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["N"]);
    }

    #[test]
    fn only_infinite_values_is_no_data() {
        let t = crate::data::loader::read_csv("x,y\n1,inf\n2,-inf\n".as_bytes()).unwrap();
        let err = render(&t, &ChartRequest::Scatter { x: "x".into(), y: "y".into() }, 60, 40).unwrap_err();
        assert!(matches!(err, RenderError::NoData(_)));
        let err = render(&t, &ChartRequest::Histogram { column: "y".into(), bins: 5 }, 60, 40).unwrap_err();
        assert!(matches!(err, RenderError::NoData(_)));
    }

    #[test]
    fn save_infers_format_from_extension() {
        let fig = render_small(&ChartRequest::Pie { column: "Region".into() }).unwrap();
        let dir = tempfile::tempdir().unwrap();

        let png = dir.path().join("plot.png");
        fig.save(&png).unwrap();
        let reloaded = image::open(&png).unwrap();
        assert_eq!(reloaded.width(), 200);

        fig.save(&dir.path().join("plot.bmp")).unwrap();

        let err = fig.save(&dir.path().join("plot.txt")).unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedFormat(_)));
        let err = fig.save(&dir.path().join("noext")).unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedFormat(_)));
    }
}
