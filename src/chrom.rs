use std::collections::{BTreeMap, HashSet};

/// Group site indices by chromosome label in one pass.
///
/// Labels iterate in plain lexicographic order (`chr1 < chr10 < chr2`);
/// indices within a label keep input order.
pub fn group_by_chrom<'a, I>(chroms: I) -> BTreeMap<&'a str, Vec<usize>>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut groups: BTreeMap<&'a str, Vec<usize>> = BTreeMap::new();
    for (i, c) in chroms.into_iter().enumerate() {
        groups.entry(c.as_str()).or_default().push(i);
    }
    groups
}

/// Distinct labels in order of first appearance.
pub fn first_appearance<'a, I>(chroms: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: HashSet<&'a str> = HashSet::new();
    let mut order = Vec::new();
    for c in chroms {
        if seen.insert(c) {
            order.push(c.to_string());
        }
    }
    order
}
