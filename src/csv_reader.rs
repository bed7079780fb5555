use crate::output::WINDOW_HEADER;
use crate::types::WindowResult;
use anyhow::{Context, Result};
use std::path::Path;

/// Read a window results CSV written by [`crate::output::write_windows`].
///
/// The header must match exactly; an empty `binomial_pval` field loads as `None`.
pub fn load_windows_csv(path: &Path) -> Result<Vec<WindowResult>> {
    let mut rdr = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

    let headers = rdr.headers()?.clone();
    if !headers.iter().eq(WINDOW_HEADER.iter().copied()) {
        anyhow::bail!(
            "{} is not a window results file (header: {:?})",
            path.display(),
            headers
        );
    }

    let mut windows = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record.with_context(|| format!("Failed to parse CSV row {}", i + 1))?;
        windows.push(parse_window_record(&record, i + 1)?);
    }
    Ok(windows)
}

fn parse_window_record(record: &csv::StringRecord, row: usize) -> Result<WindowResult> {
    let ctx = || format!("row {}", row);

    let p_field = record.get(5).with_context(ctx)?.trim();
    let p_value = if p_field.is_empty() || p_field.eq_ignore_ascii_case("nan") {
        None
    } else {
        Some(p_field.parse::<f64>().with_context(ctx)?)
    };

    Ok(WindowResult {
        chrom: record.get(0).with_context(ctx)?.to_string(),
        start: record.get(1).with_context(ctx)?.parse().with_context(ctx)?,
        end: record.get(2).with_context(ctx)?.parse().with_context(ctx)?,
        n_snps: record.get(3).with_context(ctx)?.parse().with_context(ctx)?,
        n_top: record.get(4).with_context(ctx)?.parse().with_context(ctx)?,
        p_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::write_windows;
    use tempfile::tempdir;

    #[test]
    fn test_reload_written_windows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("w.csv");
        let windows = vec![
            WindowResult {
                chrom: "chr2".to_string(),
                start: 7,
                end: 100_007,
                n_snps: 12,
                n_top: 2,
                p_value: Some(0.006_174_528_817_193_63),
            },
            WindowResult {
                chrom: "chr2".to_string(),
                start: 100_007,
                end: 200_007,
                n_snps: 0,
                n_top: 0,
                p_value: None,
            },
        ];
        write_windows(&windows, &path).unwrap();
        assert_eq!(load_windows_csv(&path).unwrap(), windows);
    }

    #[test]
    fn test_reload_tiny_p_value() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tiny.csv");
        let windows = vec![WindowResult {
            chrom: "chr1".to_string(),
            start: 1,
            end: 100_001,
            n_snps: 60,
            n_top: 60,
            p_value: Some(1.0000000000000009e-120),
        }];
        write_windows(&windows, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("1.0000000000000009e-120"));
        assert_eq!(load_windows_csv(&path).unwrap(), windows);
    }

    #[test]
    fn test_wrong_header_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("other.csv");
        std::fs::write(&path, "chrom,pos,g_statistic\nchr1,5,1.0\n").unwrap();
        assert!(load_windows_csv(&path).is_err());
    }

    #[test]
    fn test_bad_number_reports_row() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(
            &path,
            "chrom,start,end,n_snps,n_top1pct,binomial_pval\nchr1,1,100001,x,0,1.0\n",
        )
        .unwrap();
        let err = load_windows_csv(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("row 1"));
    }
}
