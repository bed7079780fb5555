use anyhow::Result;
use plotters::prelude::*;

use super::{COLOR_GRAY, COLOR_GRID, COLOR_STEEL_BLUE};
use crate::types::WindowResult;

/// `-log10(p)`, with p clamped away from zero.
pub fn neg_log10(p: f64) -> f64 {
    -p.max(1e-300).log10()
}

/// Split windows into runs of consecutive defined p-values as `(start, -log10 p)` points.
///
/// An undefined p-value ends the current run, leaving a gap in the line.
pub fn pvalue_segments(windows: &[&WindowResult]) -> Vec<Vec<(f64, f64)>> {
    let mut segments = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();

    for w in windows {
        match w.p_value {
            Some(p) => current.push((w.start as f64, neg_log10(p))),
            None => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

/// Draw a marker-and-line plot of `-log10(p)` by window start with a dashed reference line.
pub fn draw_pvalue_track<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    chrom: &str,
    windows: &[&WindowResult],
    reference_p: f64,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let segments = pvalue_segments(windows);
    let reference_y = neg_log10(reference_p);

    let x_min = windows.iter().map(|w| w.start).min().unwrap_or(0) as f64;
    let x_max = windows.iter().map(|w| w.start).max().unwrap_or(1) as f64;
    let x_margin = (x_max - x_min).max(1.0) * 0.05;

    let y_max = segments
        .iter()
        .flatten()
        .map(|&(_, y)| y)
        .fold(reference_y, f64::max)
        * 1.1;

    let mut chart = ChartBuilder::on(root)
        .caption(
            format!("Binomial test for high Fst SNP enrichment ({})", chrom),
            ("sans-serif", 36).into_font().color(&BLACK),
        )
        .margin(20)
        .x_label_area_size(80)
        .y_label_area_size(100)
        .build_cartesian_2d((x_min - x_margin)..(x_max + x_margin), 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Genomic Position")
        .y_desc("-log10(P-value)")
        .x_label_formatter(&|x| format!("{:.0}", x))
        .axis_desc_style(("sans-serif", 28))
        .label_style(("sans-serif", 22))
        .light_line_style(COLOR_GRID.mix(0.3))
        .draw()?;

    for segment in &segments {
        chart.draw_series(LineSeries::new(
            segment.iter().copied(),
            COLOR_STEEL_BLUE.stroke_width(2),
        ))?;
        chart.draw_series(
            segment
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 5, COLOR_STEEL_BLUE.filled())),
        )?;
    }

    chart.draw_series(DashedLineSeries::new(
        vec![(x_min - x_margin, reference_y), (x_max + x_margin, reference_y)],
        10,
        6,
        COLOR_GRAY.stroke_width(2),
    ))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn window(start: u64, p: Option<f64>) -> WindowResult {
        WindowResult {
            chrom: "chr1".to_string(),
            start,
            end: start + 100_000,
            n_snps: 1,
            n_top: 0,
            p_value: p,
        }
    }

    #[test]
    fn test_neg_log10() {
        assert_relative_eq!(neg_log10(0.01), 2.0, epsilon = 1e-12);
        assert_relative_eq!(neg_log10(1.0), 0.0);
        assert_relative_eq!(neg_log10(0.0), 300.0, epsilon = 1e-9);
    }

    #[test]
    fn test_segments_break_at_undefined() {
        let ws = vec![
            window(0, Some(0.1)),
            window(10, Some(1.0)),
            window(20, None),
            window(30, Some(0.001)),
            window(40, None),
            window(50, None),
        ];
        let refs: Vec<&WindowResult> = ws.iter().collect();
        let segments = pvalue_segments(&refs);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].len(), 2);
        assert_eq!(segments[1].len(), 1);
        assert_relative_eq!(segments[1][0].0, 30.0);
        assert_relative_eq!(segments[1][0].1, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_segments_all_undefined() {
        let ws = vec![window(0, None)];
        let refs: Vec<&WindowResult> = ws.iter().collect();
        assert!(pvalue_segments(&refs).is_empty());
    }
}
