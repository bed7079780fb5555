use crate::types::WindowResult;
use anyhow::{Context, Result};
use csv::Writer;
use std::path::Path;

pub const WINDOW_HEADER: [&str; 6] = ["chrom", "start", "end", "n_snps", "n_top1pct", "binomial_pval"];

/// Format a p-value with the shortest round-trip digits; an undefined p-value
/// becomes an empty field.
///
/// Magnitudes below 1e-4 (or from 1e16 up) use exponent notation.
pub fn format_p_value(p: Option<f64>) -> String {
    match p {
        Some(v) if v != 0.0 && v.is_finite() && (v.abs() < 1e-4 || v.abs() >= 1e16) => {
            format!("{:e}", v)
        }
        Some(v) => v.to_string(),
        None => String::new(),
    }
}

pub fn write_windows(windows: &[WindowResult], path: &Path) -> Result<()> {
    let mut wtr = Writer::from_path(path)
        .with_context(|| format!("Failed to create output CSV: {}", path.display()))?;

    wtr.write_record(WINDOW_HEADER)?;

    for w in windows {
        wtr.write_record(&[
            w.chrom.clone(),
            w.start.to_string(),
            w.end.to_string(),
            w.n_snps.to_string(),
            w.n_top.to_string(),
            format_p_value(w.p_value),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_windows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("windows.csv");
        let windows = vec![
            WindowResult {
                chrom: "chr1".to_string(),
                start: 100,
                end: 100_100,
                n_snps: 3,
                n_top: 1,
                p_value: Some(0.25),
            },
            WindowResult {
                chrom: "chr1".to_string(),
                start: 100_100,
                end: 200_100,
                n_snps: 0,
                n_top: 0,
                p_value: None,
            },
        ];
        write_windows(&windows, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "chrom,start,end,n_snps,n_top1pct,binomial_pval");
        assert_eq!(lines[1], "chr1,100,100100,3,1,0.25");
        assert_eq!(lines[2], "chr1,100100,200100,0,0,");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_format_p_value() {
        assert_eq!(format_p_value(Some(0.25)), "0.25");
        assert_eq!(format_p_value(Some(1.0)), "1");
        assert_eq!(format_p_value(Some(0.0001)), "0.0001");
        assert_eq!(format_p_value(Some(1.0000000000000009e-120)), "1.0000000000000009e-120");
        assert_eq!(format_p_value(Some(3.5e-7)), "3.5e-7");
        assert_eq!(format_p_value(None), "");
    }

    #[test]
    fn test_tiny_p_value_stays_short() {
        let p = crate::windows::binomial_test_greater(60, 60, 0.01).unwrap();
        let text = format_p_value(Some(p));
        assert!(text.len() < 30, "p-value written as {}", text);
        assert!(text.contains('e'));
        assert_eq!(text.parse::<f64>().unwrap(), p);
    }

    #[test]
    fn test_empty_results_write_header_only() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        write_windows(&[], &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.trim_end(), "chrom,start,end,n_snps,n_top1pct,binomial_pval");
    }
}
