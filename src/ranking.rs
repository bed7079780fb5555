/// Empirical percentile of each value: `1 - rank / n`, where `rank` is the
/// 0-based position in ascending order.
///
/// The largest value gets `1/n` and the smallest gets `1.0`, so small
/// percentiles mark the most extreme sites. Equal values are ranked by
/// their original index.
pub fn empirical_percentiles(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    // sort_by is stable, which pins the tie order to input order
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut percentiles = vec![0.0; n];
    let n_f64 = n as f64;
    for (rank, &idx) in order.iter().enumerate() {
        percentiles[idx] = 1.0 - rank as f64 / n_f64;
    }
    percentiles
}

/// Summary of the cleaned Fst distribution for the console report.
#[derive(Debug, Clone, PartialEq)]
pub struct FstSummary {
    pub n: usize,
    pub mean: f64,
    pub median: f64,
    pub max: f64,
}

pub fn summarize(values: &[f64]) -> Option<FstSummary> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };

    Some(FstSummary {
        n,
        mean: sorted.iter().sum::<f64>() / n as f64,
        median,
        max: sorted[n - 1],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_percentiles_simple() {
        let p = empirical_percentiles(&[0.3, 0.1, 0.9, 0.5]);
        // ranks: 0.1 -> 0, 0.3 -> 1, 0.5 -> 2, 0.9 -> 3
        assert_relative_eq!(p[1], 1.0);
        assert_relative_eq!(p[0], 0.75);
        assert_relative_eq!(p[3], 0.5);
        assert_relative_eq!(p[2], 0.25);
    }

    #[test]
    fn test_percentiles_in_unit_interval_and_max_is_smallest() {
        let values: Vec<f64> = (0..200).map(|i| ((i * 37) % 101) as f64 / 100.0 - 0.2).collect();
        let p = empirical_percentiles(&values);
        assert!(p.iter().all(|&x| x > 0.0 && x <= 1.0));

        let max_idx = values
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .unwrap()
            .0;
        let min_p = p.iter().copied().fold(f64::INFINITY, f64::min);
        assert_eq!(p[max_idx], min_p);
        assert_relative_eq!(min_p, 1.0 / values.len() as f64);
    }

    #[test]
    fn test_percentiles_monotonic() {
        let values = vec![0.05, 0.8, -0.1, 0.33, 0.6, 0.01];
        let p = empirical_percentiles(&values);
        for i in 0..values.len() {
            for j in 0..values.len() {
                if values[i] > values[j] {
                    assert!(p[i] < p[j]);
                }
            }
        }
    }

    #[test]
    fn test_ties_follow_input_order() {
        let p = empirical_percentiles(&[0.5, 0.5, 0.5]);
        assert_relative_eq!(p[0], 1.0);
        assert_relative_eq!(p[1], 2.0 / 3.0);
        assert_relative_eq!(p[2], 1.0 / 3.0);
    }

    #[test]
    fn test_single_value() {
        assert_eq!(empirical_percentiles(&[0.2]), vec![1.0]);
        assert!(empirical_percentiles(&[]).is_empty());
    }

    #[test]
    fn test_summarize() {
        let s = summarize(&[0.4, 0.1, 0.3, 0.2]).unwrap();
        assert_eq!(s.n, 4);
        assert_relative_eq!(s.mean, 0.25);
        assert_relative_eq!(s.median, 0.25);
        assert_relative_eq!(s.max, 0.4);
        assert!(summarize(&[]).is_none());
    }
}
