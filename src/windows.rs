use crate::chrom;
use crate::types::{CleanedSites, WindowResult};
use anyhow::{anyhow, ensure, Result};
use statrs::distribution::{Binomial, DiscreteCDF};

/// Window layout and the fraction of sites counted as "top".
#[derive(Debug, Clone, Copy)]
pub struct WindowConfig {
    pub window_size: u64,
    /// Percentile cutoff for a top site, also the binomial null proportion
    pub top_fraction: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            window_size: 100_000,
            top_fraction: 0.01,
        }
    }
}

/// One-sided exact binomial test: P(X >= successes) for X ~ Binomial(trials, p).
pub fn binomial_test_greater(successes: u64, trials: u64, p: f64) -> Result<f64> {
    ensure!(
        successes <= trials,
        "{} successes exceed {} trials",
        successes,
        trials
    );
    if successes == 0 {
        return Ok(1.0);
    }
    let dist = Binomial::new(p, trials)
        .map_err(|e| anyhow!("Invalid binomial parameters (n={}, p={}): {:?}", trials, p, e))?;
    // sf(k) = P(X > k)
    Ok(dist.sf(successes - 1))
}

/// Count SNPs and top SNPs in fixed windows along each chromosome and test
/// each window for enrichment of top SNPs.
///
/// Windows start at the chromosome's smallest position and step by
/// `window_size` while the start stays below the largest position, so a
/// chromosome with a single observed position yields no windows.
/// Chromosomes are visited in lexicographic label order.
pub fn scan_windows(
    sites: &CleanedSites,
    percentiles: &[f64],
    config: &WindowConfig,
) -> Result<Vec<WindowResult>> {
    ensure!(
        percentiles.len() == sites.len(),
        "Array length mismatch: {} percentiles for {} sites",
        percentiles.len(),
        sites.len()
    );
    ensure!(config.window_size > 0, "Window size must be positive");

    let mut results = Vec::new();

    for (chrom, indices) in chrom::group_by_chrom(&sites.chroms) {
        let mut chrom_sites: Vec<(u64, f64)> = indices
            .iter()
            .map(|&i| (sites.positions[i], percentiles[i]))
            .collect();
        chrom_sites.sort_by_key(|&(pos, _)| pos);

        let (min_pos, max_pos) = match (chrom_sites.first(), chrom_sites.last()) {
            (Some(&(lo, _)), Some(&(hi, _))) => (lo, hi),
            _ => continue,
        };

        for start in (min_pos..max_pos).step_by(config.window_size as usize) {
            let end = start + config.window_size;
            let lo = chrom_sites.partition_point(|&(pos, _)| pos < start);
            let hi = chrom_sites.partition_point(|&(pos, _)| pos < end);
            let in_window = &chrom_sites[lo..hi];

            let n_snps = in_window.len() as u64;
            let n_top = in_window
                .iter()
                .filter(|&&(_, perc)| perc < config.top_fraction)
                .count() as u64;

            let p_value = if n_snps == 0 {
                None
            } else {
                Some(binomial_test_greater(n_top, n_snps, config.top_fraction)?)
            };

            results.push(WindowResult {
                chrom: chrom.to_string(),
                start,
                end,
                n_snps,
                n_top,
                p_value,
            });
        }
    }

    Ok(results)
}
