use crate::types::CleanedSites;
use anyhow::{ensure, Result};

/// Drop sites with an undefined Fst, keeping the three arrays aligned.
///
/// The arrays must have equal length on entry; a mismatch means an upstream
/// stage lost or duplicated a site and is reported as an error.
pub fn clean_sites(fst: &[f64], positions: &[u64], chroms: &[String]) -> Result<CleanedSites> {
    ensure!(
        fst.len() == positions.len() && positions.len() == chroms.len(),
        "Array length mismatch: {} Fst values, {} positions, {} chromosomes",
        fst.len(),
        positions.len(),
        chroms.len()
    );

    let mut cleaned = CleanedSites::default();
    for ((&value, &pos), chrom) in fst.iter().zip(positions).zip(chroms) {
        if value.is_nan() {
            continue;
        }
        cleaned.fst.push(value);
        cleaned.positions.push(pos);
        cleaned.chroms.push(chrom.clone());
    }

    Ok(cleaned)
}
