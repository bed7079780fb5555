use crate::types::{Genotype, GenotypeArray, PopulationPartition};
use indicatif::ProgressBar;
use rayon::prelude::*;

/// Count (ref, alt) alleles over the non-missing calls of the given samples.
pub fn count_alleles(calls: &[Genotype], sample_indices: &[usize]) -> [u32; 2] {
    let mut ac = [0u32; 2];
    for &s in sample_indices {
        for allele in calls[s].iter().flatten() {
            ac[(*allele).min(1) as usize] += 1;
        }
    }
    ac
}

/// Mean number of differences between two distinct alleles drawn from one population.
///
/// NaN when fewer than two alleles were called.
pub fn mean_pairwise_difference(ac: &[u32]) -> f64 {
    let n: f64 = ac.iter().map(|&c| c as f64).sum();
    let n_pairs = n * (n - 1.0) / 2.0;
    if n_pairs <= 0.0 {
        return f64::NAN;
    }
    let n_same: f64 = ac
        .iter()
        .map(|&c| {
            let c = c as f64;
            c * (c - 1.0) / 2.0
        })
        .sum();
    (n_pairs - n_same) / n_pairs
}

/// Mean number of differences between one allele from each population.
///
/// NaN when either population has no called alleles.
pub fn mean_pairwise_difference_between(ac1: &[u32], ac2: &[u32]) -> f64 {
    let n1: f64 = ac1.iter().map(|&c| c as f64).sum();
    let n2: f64 = ac2.iter().map(|&c| c as f64).sum();
    let n_pairs = n1 * n2;
    if n_pairs <= 0.0 {
        return f64::NAN;
    }
    let n_same: f64 = ac1
        .iter()
        .zip(ac2.iter())
        .map(|(&a, &b)| a as f64 * b as f64)
        .sum();
    (n_pairs - n_same) / n_pairs
}

/// Hudson's Fst estimator (Hudson, Slatkin & Maddison 1992; Bhatia et al. 2013).
///
/// Returns the `(numerator, denominator)` pair so callers can either take
/// the per-site ratio or sum components over a region:
///
/// ```text
/// within  = (mpd(ac1) + mpd(ac2)) / 2
/// between = mpd_between(ac1, ac2)
/// num     = between - within
/// den     = between
/// ```
pub fn hudson_fst(ac1: &[u32], ac2: &[u32]) -> (f64, f64) {
    let within = (mean_pairwise_difference(ac1) + mean_pairwise_difference(ac2)) / 2.0;
    let between = mean_pairwise_difference_between(ac1, ac2);
    (between - within, between)
}

/// Per-site Fst ratio; NaN unless the denominator is strictly positive.
pub fn fst_ratio(num: f64, den: f64) -> f64 {
    if den > 0.0 {
        num / den
    } else {
        f64::NAN
    }
}

/// Hudson Fst for every variant, in input order.
///
/// Variants are independent, so they are evaluated in parallel; `collect`
/// keeps the output aligned with the genotype rows.
pub fn per_snp_fst(
    genotypes: &GenotypeArray,
    partition: &PopulationPartition,
    progress: Option<&ProgressBar>,
) -> Vec<f64> {
    (0..genotypes.n_variants())
        .into_par_iter()
        .map(|v| {
            let calls = genotypes.variant(v);
            let ac1 = count_alleles(calls, &partition.pop1);
            let ac2 = count_alleles(calls, &partition.pop2);
            let (num, den) = hudson_fst(&ac1, &ac2);
            if let Some(pb) = progress {
                pb.inc(1);
            }
            fst_ratio(num, den)
        })
        .collect()
}
