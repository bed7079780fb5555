use crate::types::PopulationPartition;
use std::collections::HashMap;

/// Split VCF sample columns into the two populations being compared.
///
/// Samples missing from `sample_to_pop`, or mapped to any other label, land
/// in neither population. Index order follows the VCF sample order.
pub fn partition_samples(
    samples: &[String],
    sample_to_pop: &HashMap<String, String>,
    pop1_label: &str,
    pop2_label: &str,
) -> PopulationPartition {
    let mut partition = PopulationPartition::default();

    for (i, sample) in samples.iter().enumerate() {
        match sample_to_pop.get(sample).map(String::as_str) {
            Some(label) if label == pop1_label => partition.pop1.push(i),
            Some(label) if label == pop2_label => partition.pop2.push(i),
            Some(_) => partition.other_label.push(sample.clone()),
            None => partition.unmatched.push(sample.clone()),
        }
    }

    partition
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(s, p)| (s.to_string(), p.to_string()))
            .collect()
    }

    #[test]
    fn test_partition_by_label() {
        let samples = names(&["A", "B", "C", "D"]);
        let m = map(&[("A", "Negrito"), ("B", "Malay"), ("C", "Negrito"), ("D", "Malay")]);
        let p = partition_samples(&samples, &m, "Negrito", "Malay");
        assert_eq!(p.pop1, vec![0, 2]);
        assert_eq!(p.pop2, vec![1, 3]);
        assert!(p.unmatched.is_empty());
        assert!(p.other_label.is_empty());
    }

    #[test]
    fn test_unmatched_sample_is_excluded_and_reported() {
        let samples = names(&["A", "X", "B"]);
        let m = map(&[("A", "Negrito"), ("B", "Malay")]);
        let p = partition_samples(&samples, &m, "Negrito", "Malay");
        assert_eq!(p.pop1, vec![0]);
        assert_eq!(p.pop2, vec![2]);
        assert_eq!(p.unmatched, vec!["X".to_string()]);
        assert!(!p.pop1.contains(&1) && !p.pop2.contains(&1));
    }

    #[test]
    fn test_other_label_is_excluded() {
        let samples = names(&["A", "B", "C"]);
        let m = map(&[("A", "Negrito"), ("B", "Malay"), ("C", "Orang Asli")]);
        let p = partition_samples(&samples, &m, "Negrito", "Malay");
        assert_eq!(p.other_label, vec!["C".to_string()]);
        assert!(p.unmatched.is_empty());
    }

    #[test]
    fn test_populations_are_disjoint() {
        let samples = names(&["A", "B", "C", "D", "E"]);
        let m = map(&[("A", "P1"), ("B", "P2"), ("C", "P1"), ("E", "P2")]);
        let p = partition_samples(&samples, &m, "P1", "P2");
        assert!(p.pop1.iter().all(|i| !p.pop2.contains(i)));
    }
}
