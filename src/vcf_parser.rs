use crate::types::{AlleleCall, Genotype, GenotypeArray, VariantCallSet};
use anyhow::{Context, Result};
use indicatif::ProgressBar;
use rust_htslib::bcf::record::GenotypeAllele;
use rust_htslib::{bcf, bcf::Read};
use std::path::Path;

/// Collapse an allele to the biallelic ref/alt encoding.
///
/// Index 0 stays reference; every alternate index maps to the first alternate (1).
fn collapse_allele(allele: &GenotypeAllele) -> AlleleCall {
    allele.index().map(|idx| if idx == 0 { 0 } else { 1 })
}

/// Reduce an htslib genotype to a diploid call, padding haploid calls with a missing allele.
fn to_diploid(gt: &rust_htslib::bcf::record::Genotype) -> Genotype {
    let mut call: Genotype = [None, None];
    for (slot, allele) in call.iter_mut().zip(gt.iter()) {
        *slot = collapse_allele(allele);
    }
    call
}

/// Read sample names, chromosome, 1-based position and GT calls from a VCF/BCF file.
///
/// Plain, bgzipped and BCF inputs are all handled by htslib. Every record
/// must carry a GT field.
pub fn read_vcf(path: &Path, spinner: Option<&ProgressBar>) -> Result<VariantCallSet> {
    let mut reader = bcf::Reader::from_path(path)
        .with_context(|| format!("Failed to open VCF file: {}", path.display()))?;

    let header = reader.header().clone();
    let samples: Vec<String> = header
        .samples()
        .iter()
        .map(|s| String::from_utf8_lossy(s).to_string())
        .collect();
    let n_samples = samples.len();

    let mut chroms = Vec::new();
    let mut positions = Vec::new();
    let mut genotypes = GenotypeArray::new(n_samples);

    for (i, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read VCF record {}", i + 1))?;

        let rid = record
            .rid()
            .with_context(|| format!("VCF record {} has no reference ID", i + 1))?;
        let chrom = String::from_utf8_lossy(header.rid2name(rid)?).to_string();
        let pos = record.pos() as u64 + 1; // BCF is 0-based

        let gts = record
            .genotypes()
            .with_context(|| format!("No GT field at {}:{}", chrom, pos))?;
        let row: Vec<Genotype> = (0..n_samples).map(|s| to_diploid(&gts.get(s))).collect();
        genotypes
            .push_variant(row)
            .with_context(|| format!("Malformed genotypes at {}:{}", chrom, pos))?;

        chroms.push(chrom);
        positions.push(pos);

        if let Some(pb) = spinner {
            pb.inc(1);
        }
    }

    Ok(VariantCallSet {
        samples,
        chroms,
        positions,
        genotypes,
    })
}
