/// A single allele call; `None` is a missing call (`.` in the VCF).
pub type AlleleCall = Option<u8>;

/// Diploid genotype call for one sample at one variant.
pub type Genotype = [AlleleCall; 2];

/// Genotype calls for every variant and sample, stored variant-major.
#[derive(Debug, Clone, Default)]
pub struct GenotypeArray {
    n_samples: usize,
    n_variants: usize,
    calls: Vec<Genotype>,
}

impl GenotypeArray {
    pub fn new(n_samples: usize) -> Self {
        Self {
            n_samples,
            n_variants: 0,
            calls: Vec::new(),
        }
    }

    /// Append the calls for one variant. `row` must hold exactly one genotype per sample.
    pub fn push_variant(&mut self, row: Vec<Genotype>) -> anyhow::Result<()> {
        anyhow::ensure!(
            row.len() == self.n_samples,
            "Genotype row has {} calls, expected {}",
            row.len(),
            self.n_samples
        );
        self.calls.extend(row);
        self.n_variants += 1;
        Ok(())
    }

    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    pub fn n_variants(&self) -> usize {
        self.n_variants
    }

    /// All sample calls for variant `idx`.
    pub fn variant(&self, idx: usize) -> &[Genotype] {
        let start = idx * self.n_samples;
        &self.calls[start..start + self.n_samples]
    }
}

/// Everything read from the VCF: sample names plus parallel per-variant arrays.
#[derive(Debug, Clone, Default)]
pub struct VariantCallSet {
    pub samples: Vec<String>,
    pub chroms: Vec<String>,
    pub positions: Vec<u64>,
    pub genotypes: GenotypeArray,
}

impl VariantCallSet {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Sample column indices for the two populations being compared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopulationPartition {
    pub pop1: Vec<usize>,
    pub pop2: Vec<usize>,
    /// VCF samples with no entry in the population map
    pub unmatched: Vec<String>,
    /// VCF samples mapped to a label other than the two being compared
    pub other_label: Vec<String>,
}

/// Sites with a defined Fst value, as parallel arrays in VCF order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanedSites {
    pub fst: Vec<f64>,
    pub positions: Vec<u64>,
    pub chroms: Vec<String>,
}

impl CleanedSites {
    pub fn len(&self) -> usize {
        self.fst.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fst.is_empty()
    }
}

/// Binomial enrichment result for one genomic window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowResult {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    pub n_snps: u64,
    pub n_top: u64,
    /// `None` when the window holds no SNPs
    pub p_value: Option<f64>,
}
