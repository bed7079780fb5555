use crate::types::{CleanedSites, PopulationPartition, WindowResult};
use crate::windows::WindowConfig;
use crate::{filter, fst, output, populations, ranking, sample_map, vcf_parser, windows};
use anyhow::{ensure, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

/// Inputs, population labels and window settings for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub sample_map: PathBuf,
    pub vcf: PathBuf,
    pub pop1: String,
    pub pop2: String,
    pub window_size: u64,
    pub top_fraction: f64,
    pub output_csv: PathBuf,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_map: PathBuf::from("sample_info_v3"),
            vcf: PathBuf::from("Malay_Negrito_200s.vcf"),
            pop1: "Negrito".to_string(),
            pop2: "Malay".to_string(),
            window_size: 100_000,
            top_fraction: 0.01,
            output_csv: PathBuf::from("fst_enrichment_binomial_windows.csv"),
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.window_size > 0, "Window size must be positive");
        ensure!(
            self.top_fraction > 0.0 && self.top_fraction < 1.0,
            "Top fraction must lie strictly between 0 and 1, got {}",
            self.top_fraction
        );
        ensure!(
            self.pop1 != self.pop2,
            "The two population labels must differ (both are '{}')",
            self.pop1
        );
        Ok(())
    }

    pub fn window_config(&self) -> WindowConfig {
        WindowConfig {
            window_size: self.window_size,
            top_fraction: self.top_fraction,
        }
    }
}

/// What a run produced, for reporting and plotting.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub partition: PopulationPartition,
    pub n_variants: usize,
    pub sites: CleanedSites,
    pub percentiles: Vec<f64>,
    pub windows: Vec<WindowResult>,
}

impl AnalysisOutcome {
    pub fn n_undefined(&self) -> usize {
        self.n_variants - self.sites.len()
    }
}

fn make_spinner(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("  {spinner} [{elapsed_precise}] {pos} {msg}") {
        pb.set_style(style);
    }
    pb
}

fn make_progress_bar(quiet: bool, len: u64) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len);
    if let Ok(style) =
        ProgressStyle::with_template("  [{elapsed_precise}/{eta_precise}] {bar:40} {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("=> "));
    }
    pb
}

/// Load, compute per-SNP Fst, rank, window, test and write the results CSV.
pub fn run_analysis(config: &AnalysisConfig, quiet: bool) -> Result<AnalysisOutcome> {
    config.validate()?;

    progress!(quiet, "Step 1: Loading population map...");
    let sample_to_pop = sample_map::load_population_map(&config.sample_map)?;
    progress!(quiet, "  {} samples in {}", sample_to_pop.len(), config.sample_map.display());

    progress!(quiet, "Step 2: Reading VCF...");
    let spinner = make_spinner(quiet);
    spinner.set_message("variants read");
    let callset = vcf_parser::read_vcf(&config.vcf, Some(&spinner))?;
    spinner.finish_and_clear();
    progress!(
        quiet,
        "  {} samples, {} variants",
        callset.samples.len(),
        callset.len()
    );

    let partition =
        populations::partition_samples(&callset.samples, &sample_to_pop, &config.pop1, &config.pop2);
    progress!(quiet, "{} samples: {}", config.pop1, partition.pop1.len());
    progress!(quiet, "{} samples: {}", config.pop2, partition.pop2.len());
    if !partition.unmatched.is_empty() {
        eprintln!(
            "Warning: some VCF samples not found in {}: {:?}",
            config.sample_map.display(),
            partition.unmatched
        );
    }
    if !partition.other_label.is_empty() {
        progress!(
            quiet,
            "  {} samples belong to neither population and are ignored",
            partition.other_label.len()
        );
    }

    progress!(quiet, "Step 3: Calculating per-SNP Hudson Fst...");
    let pb = make_progress_bar(quiet, callset.len() as u64);
    let fst_all = fst::per_snp_fst(&callset.genotypes, &partition, Some(&pb));
    pb.finish_and_clear();

    let sites = filter::clean_sites(&fst_all, &callset.positions, &callset.chroms)?;
    progress!(
        quiet,
        "  Defined Fst: {} / {} ({} undefined dropped)",
        sites.len(),
        fst_all.len(),
        fst_all.len() - sites.len()
    );
    if let Some(summary) = ranking::summarize(&sites.fst) {
        progress!(quiet, "  Mean Fst: {:.4}", summary.mean);
        progress!(quiet, "  Median Fst: {:.4}", summary.median);
        progress!(quiet, "  Max Fst: {:.4}", summary.max);
    }

    progress!(quiet, "Step 4: Ranking SNPs by empirical percentile...");
    let percentiles = ranking::empirical_percentiles(&sites.fst);
    let n_top = percentiles
        .iter()
        .filter(|&&p| p < config.top_fraction)
        .count();
    progress!(quiet, "  Top {} SNPs: {}", config.top_fraction, n_top);

    progress!(
        quiet,
        "Step 5: Testing {} bp windows for enrichment...",
        config.window_size
    );
    let window_results = windows::scan_windows(&sites, &percentiles, &config.window_config())?;
    let n_nominal = window_results
        .iter()
        .filter(|w| w.p_value.map_or(false, |p| p < 0.05))
        .count();
    progress!(
        quiet,
        "  Windows: {} ({} with p < 0.05)",
        window_results.len(),
        n_nominal
    );

    progress!(quiet, "Step 6: Writing results to CSV...");
    output::write_windows(&window_results, &config.output_csv)?;
    progress!(quiet, "Results saved to: {}", config.output_csv.display());

    Ok(AnalysisOutcome {
        partition,
        n_variants: fst_all.len(),
        sites,
        percentiles,
        windows: window_results,
    })
}
