//! Exploratory SVG charts over the finished analysis table.
//!
//! The output is a fixed set of histograms and time-trend scatters, some
//! restricted to citizen-initiated or legislature-initiated measures. Charts
//! are a terminal side effect; nothing here feeds back into the pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use plotters::prelude::*;

use crate::types::AnalysisRecord;

/// Bin count for every histogram.
const HIST_BINS: usize = 50;
/// Canvas size of every chart, in pixels.
const CHART_SIZE: (u32, u32) = (1000, 600);
/// Sky blue, the bar fill used throughout.
const BAR_COLOR: RGBColor = RGBColor(135, 206, 235);

/// One selectable numeric column of the analysis table.
type Column = fn(&AnalysisRecord) -> Option<f64>;

fn closeness(r: &AnalysisRecord) -> Option<f64> {
    r.closeness.map(|v| v as f64)
}

fn total_votes(r: &AnalysisRecord) -> Option<f64> {
    r.total_votes.map(|v| v as f64)
}

fn support(r: &AnalysisRecord) -> Option<f64> {
    r.support
}

fn oppose(r: &AnalysisRecord) -> Option<f64> {
    r.oppose
}

fn title_grade(r: &AnalysisRecord) -> Option<f64> {
    r.title_grade
}

/// Render the full chart set into `dir` and return the paths written.
/// Columns with no data log a warning and skip their chart instead of
/// failing the run.
pub fn render_all(records: &[AnalysisRecord], dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("create chart dir {}", dir.display()))?;
    let mut written = Vec::new();

    hist_chart(records, closeness, "Closeness", None, dir.join("closeness_hist.svg"), &mut written)?;
    trend_chart(records, closeness, "Closeness", None, dir.join("closeness_over_time.svg"), &mut written)?;
    hist_chart(records, closeness, "Closeness", Some(1), dir.join("closeness_citizens_hist.svg"), &mut written)?;
    hist_chart(records, closeness, "Closeness", Some(0), dir.join("closeness_legislature_hist.svg"), &mut written)?;

    hist_chart(records, total_votes, "Total Votes", None, dir.join("total_votes_hist.svg"), &mut written)?;
    trend_chart(records, total_votes, "Total Votes", None, dir.join("total_votes_over_time.svg"), &mut written)?;
    hist_chart(records, total_votes, "Total Votes", Some(1), dir.join("total_votes_citizens_hist.svg"), &mut written)?;
    hist_chart(records, total_votes, "Total Votes", Some(0), dir.join("total_votes_legislature_hist.svg"), &mut written)?;

    hist_chart(records, support, "Support", None, dir.join("support_hist.svg"), &mut written)?;
    trend_chart(records, support, "Support", None, dir.join("support_over_time.svg"), &mut written)?;
    hist_chart(records, oppose, "Oppose", None, dir.join("oppose_hist.svg"), &mut written)?;
    trend_chart(records, oppose, "Oppose", None, dir.join("oppose_over_time.svg"), &mut written)?;
    hist_chart(records, support, "Support", Some(1), dir.join("support_citizens_hist.svg"), &mut written)?;
    hist_chart(records, support, "Support", Some(0), dir.join("support_legislature_hist.svg"), &mut written)?;

    hist_chart(records, title_grade, "Title Grade", Some(1), dir.join("title_grade_citizens_hist.svg"), &mut written)?;
    hist_chart(records, title_grade, "Title Grade", Some(0), dir.join("title_grade_legislature_hist.svg"), &mut written)?;
    trend_chart(records, title_grade, "Title Grade", Some(1), dir.join("title_grade_citizens_over_time.svg"), &mut written)?;
    trend_chart(records, title_grade, "Title Grade", Some(0), dir.join("title_grade_legislature_over_time.svg"), &mut written)?;

    Ok(written)
}

fn hist_chart(
    records: &[AnalysisRecord],
    column: Column,
    label: &str,
    group: Option<u8>,
    path: PathBuf,
    written: &mut Vec<PathBuf>,
) -> Result<()> {
    let values = column_values(records, column, group);
    if values.is_empty() {
        log::warn!("no data for {}, skipping", path.display());
        return Ok(());
    }
    let title = match group {
        Some(1) => format!("Distribution of {} for Citizens Initiated Measures", label),
        Some(_) => format!("Distribution of {} for Legislature Initiated Measures", label),
        None => format!("Distribution of {}", label),
    };
    histogram(&values, &title, label, &path)?;
    written.push(path);
    Ok(())
}

fn trend_chart(
    records: &[AnalysisRecord],
    column: Column,
    label: &str,
    group: Option<u8>,
    path: PathBuf,
    written: &mut Vec<PathBuf>,
) -> Result<()> {
    let points = column_points(records, column, group);
    if points.is_empty() {
        log::warn!("no data for {}, skipping", path.display());
        return Ok(());
    }
    time_trend(&points, label, &path)?;
    written.push(path);
    Ok(())
}

fn column_values(records: &[AnalysisRecord], column: Column, group: Option<u8>) -> Vec<f64> {
    records
        .iter()
        .filter(|r| group.map_or(true, |g| r.cit_init == g))
        .filter_map(column)
        .collect()
}

fn column_points(
    records: &[AnalysisRecord],
    column: Column,
    group: Option<u8>,
) -> Vec<(f64, f64)> {
    records
        .iter()
        .filter(|r| group.map_or(true, |g| r.cit_init == g))
        .filter_map(|r| column(r).map(|v| (r.date as f64, v)))
        .collect()
}

/// Draw a 50-bin histogram of `values` into `path`.
pub fn histogram(values: &[f64], title: &str, x_label: &str, path: &Path) -> Result<()> {
    let (min, max) = widen(bounds(values).context("histogram needs at least one value")?);
    let width = (max - min) / HIST_BINS as f64;

    let mut counts = vec![0u64; HIST_BINS];
    for &v in values {
        let bin = (((v - min) / width) as usize).min(HIST_BINS - 1);
        counts[bin] += 1;
    }
    let peak = counts.iter().copied().max().unwrap_or(1).max(1);

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(min..max, 0u64..peak + peak / 10 + 1)?;
    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_desc("Frequency")
        .draw()?;
    chart.draw_series(counts.iter().enumerate().map(|(i, &count)| {
        let x0 = min + width * i as f64;
        Rectangle::new([(x0, 0), (x0 + width, count)], BAR_COLOR.filled())
    }))?;
    root.present()?;
    Ok(())
}

/// Draw a time-trend scatter of `(date, value)` points with a least-squares
/// fit line. The x axis is the digit-collapsed date, an ordinal rather than a
/// calendar axis.
pub fn time_trend(points: &[(f64, f64)], y_label: &str, path: &Path) -> Result<()> {
    let xs: Vec<f64> = points.iter().map(|p| p.0).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.1).collect();
    let (x_min, x_max) = widen(bounds(&xs).context("time trend needs at least one point")?);
    let (y_min, y_max) = widen(bounds(&ys).context("time trend needs at least one point")?);
    let (slope, intercept) = linear_fit(points);

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(format!("{} Over Time", y_label), ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;
    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc(y_label)
        .draw()?;

    chart
        .draw_series(
            points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 3, BLUE.filled())),
        )?
        .label(y_label)
        .legend(|(x, y)| Circle::new((x + 10, y), 3, BLUE.filled()));
    chart
        .draw_series(LineSeries::new(
            [
                (x_min, slope * x_min + intercept),
                (x_max, slope * x_max + intercept),
            ],
            &RED,
        ))?
        .label("Linear fit")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));
    chart.configure_series_labels().border_style(BLACK).draw()?;
    root.present()?;
    Ok(())
}

/// Least-squares slope and intercept for y over x.
fn linear_fit(points: &[(f64, f64)]) -> (f64, f64) {
    let n = points.len() as f64;
    let sum_x: f64 = points.iter().map(|p| p.0).sum();
    let sum_y: f64 = points.iter().map(|p| p.1).sum();
    let sum_xx: f64 = points.iter().map(|p| p.0 * p.0).sum();
    let sum_xy: f64 = points.iter().map(|p| p.0 * p.1).sum();
    let denom = n * sum_xx - sum_x * sum_x;
    if denom == 0.0 {
        // Vertical stack of points; a flat line through the mean is the best
        // we can draw.
        return (0.0, sum_y / n.max(1.0));
    }
    let slope = (n * sum_xy - sum_x * sum_y) / denom;
    (slope, (sum_y - slope * sum_x) / n)
}

fn bounds(values: &[f64]) -> Option<(f64, f64)> {
    let mut it = values.iter().copied();
    let first = it.next()?;
    let mut min = first;
    let mut max = first;
    for v in it {
        min = min.min(v);
        max = max.max(v);
    }
    Some((min, max))
}

/// Pad a degenerate single-value range so the axis still has extent.
fn widen((min, max): (f64, f64)) -> (f64, f64) {
    if min == max {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: u64, cit_init: u8, closeness: i64) -> AnalysisRecord {
        AnalysisRecord {
            kind: if cit_init == 1 { "CICA" } else { "LRCA" }.to_string(),
            title: "t".to_string(),
            link: "https://ballotpedia.org/X".to_string(),
            state: "Texas".to_string(),
            description: "d".to_string(),
            date,
            votes_yes: Some(10),
            votes_no: Some(5),
            title_grade: Some(10.0),
            title_ease: None,
            support: None,
            oppose: None,
            closeness: Some(closeness),
            cit_init,
            total_votes: Some(15),
            year: 2022,
            date_iso: None,
        }
    }

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ballot-measures-{}", name));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn linear_fit_recovers_a_line() {
        let points = [(1.0, 3.0), (2.0, 5.0), (3.0, 7.0)];
        let (slope, intercept) = linear_fit(&points);
        assert!((slope - 2.0).abs() < 1e-9);
        assert!((intercept - 1.0).abs() < 1e-9);
    }

    #[test]
    fn linear_fit_handles_a_vertical_stack() {
        let points = [(5.0, 1.0), (5.0, 3.0)];
        let (slope, intercept) = linear_fit(&points);
        assert_eq!(slope, 0.0);
        assert_eq!(intercept, 2.0);
    }

    #[test]
    fn group_filters_split_by_cit_init() {
        let records = vec![record(82022, 1, 10), record(82022, 0, -10), record(52022, 1, 5)];
        assert_eq!(column_values(&records, closeness, None).len(), 3);
        assert_eq!(column_values(&records, closeness, Some(1)), vec![10.0, 5.0]);
        assert_eq!(column_values(&records, closeness, Some(0)), vec![-10.0]);
    }

    #[test]
    fn histogram_writes_an_svg() {
        let dir = temp_dir("hist");
        let path = dir.join("closeness_hist.svg");
        let values: Vec<f64> = (0..100).map(|i| i as f64).collect();
        histogram(&values, "Distribution of Closeness", "Closeness", &path).unwrap();
        let svg = fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn single_value_histogram_still_renders() {
        let dir = temp_dir("hist-single");
        let path = dir.join("single.svg");
        histogram(&[5.0], "Distribution of X", "X", &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn time_trend_writes_an_svg() {
        let dir = temp_dir("trend");
        let path = dir.join("closeness_over_time.svg");
        let points = [(52018.0, 10.0), (82020.0, 30.0), (82022.0, 50.0)];
        time_trend(&points, "Closeness", &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn render_all_skips_empty_columns_without_failing() {
        let dir = temp_dir("render-all");
        let records = vec![record(82022, 1, 10), record(52022, 0, -5)];
        let written = render_all(&records, &dir).unwrap();
        // Support and Oppose are absent from every record, so their six
        // charts are skipped.
        assert_eq!(written.len(), 12);
        assert!(written.iter().all(|p| p.exists()));
    }
}
