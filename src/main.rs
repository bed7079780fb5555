use anyhow::Result;
use clap::Parser;
use fst_enrichment::pipeline::{self, AnalysisConfig};
use fst_enrichment::types::WindowResult;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "fst-enrichment")]
#[command(version)]
#[command(
    about = "Test genomic windows for enrichment of highly differentiated SNPs (Hudson Fst)",
    long_about = None
)]
struct Args {
    /// Headerless tab-separated file: sample ID, population label
    #[arg(short, long, default_value = "sample_info_v3")]
    samples: PathBuf,

    /// Input VCF/BCF file (can be bgzipped)
    #[arg(short, long, default_value = "Malay_Negrito_200s.vcf")]
    input: PathBuf,

    /// Label of the first population
    #[arg(long, default_value = "Negrito")]
    pop1: String,

    /// Label of the second population
    #[arg(long, default_value = "Malay")]
    pop2: String,

    /// Window size in base pairs
    #[arg(long, default_value = "100000")]
    window_size: u64,

    /// Percentile cutoff for top SNPs, also the binomial null proportion
    #[arg(long, default_value = "0.01")]
    top_fraction: f64,

    /// Output CSV file path
    #[arg(short, long, default_value = "fst_enrichment_binomial_windows.csv")]
    output: PathBuf,

    /// Output directory for per-chromosome plots
    #[arg(long, default_value = "fst_binomial_plots")]
    plot_dir: PathBuf,

    /// Plot output format: "png" (default) or "svg"
    #[arg(long, default_value = "png")]
    plot_format: String,

    /// Skip plot generation
    #[arg(long)]
    no_plots: bool,

    /// Generate plots from an existing results CSV (skips VCF analysis)
    #[arg(long)]
    plot_from: Option<PathBuf>,

    /// Number of threads for parallel processing
    #[arg(long, default_value_t = num_cpus())]
    threads: usize,

    /// Suppress progress output
    #[arg(short, long)]
    quiet: bool,
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

macro_rules! progress {
    ($quiet:expr) => {
        if !$quiet {
            eprintln!();
        }
    };
    ($quiet:expr, $($arg:tt)*) => {
        if !$quiet {
            eprintln!($($arg)*);
        }
    };
}

#[cfg(feature = "plotting")]
fn parse_plot_format(s: &str) -> Result<fst_enrichment::plotting::PlotFormat> {
    match s.to_lowercase().as_str() {
        "png" => Ok(fst_enrichment::plotting::PlotFormat::Png),
        "svg" => Ok(fst_enrichment::plotting::PlotFormat::Svg),
        other => anyhow::bail!("Invalid --plot-format '{}'. Must be 'png' or 'svg'", other),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads)
        .build_global()?;

    // ─── Plot-from-CSV mode ───
    if let Some(ref csv_path) = args.plot_from {
        let windows = fst_enrichment::csv_reader::load_windows_csv(csv_path)?;
        progress!(args.quiet, "Loaded {} windows from {}", windows.len(), csv_path.display());
        run_plots(&args, &windows)?;
        progress!(args.quiet, "Done!");
        return Ok(());
    }

    let config = AnalysisConfig {
        sample_map: args.samples.clone(),
        vcf: args.input.clone(),
        pop1: args.pop1.clone(),
        pop2: args.pop2.clone(),
        window_size: args.window_size,
        top_fraction: args.top_fraction,
        output_csv: args.output.clone(),
    };

    if !Path::new(&config.vcf).exists() {
        anyhow::bail!("Input file not found: {}", config.vcf.display());
    }

    progress!(args.quiet, "Fst Window Enrichment");
    progress!(args.quiet, "=========================================");
    progress!(args.quiet, "Input VCF: {}", config.vcf.display());
    progress!(args.quiet, "Sample map: {}", config.sample_map.display());
    progress!(args.quiet, "Populations: {} vs {}", config.pop1, config.pop2);
    progress!(args.quiet, "Window size: {} bp", config.window_size);
    progress!(args.quiet, "Top fraction: {}", config.top_fraction);
    progress!(args.quiet, "Threads: {}", args.threads);
    progress!(args.quiet);

    let outcome = pipeline::run_analysis(&config, args.quiet)?;

    if !args.no_plots {
        progress!(args.quiet);
        run_plots(&args, &outcome.windows)?;
    }

    progress!(args.quiet);
    progress!(args.quiet, "Analysis complete.");

    Ok(())
}

#[cfg(feature = "plotting")]
fn run_plots(args: &Args, windows: &[WindowResult]) -> Result<()> {
    use fst_enrichment::plotting;

    let config = plotting::PlotConfig {
        format: parse_plot_format(&args.plot_format)?,
        ..Default::default()
    };

    progress!(args.quiet, "Generating plots...");
    let paths = plotting::plot_all_chromosomes(windows, &args.plot_dir, &config)?;
    for path in &paths {
        progress!(args.quiet, "  Plot saved to: {}", path.display());
    }
    progress!(args.quiet, "Plots saved in: {}/", args.plot_dir.display());
    Ok(())
}

#[cfg(not(feature = "plotting"))]
fn run_plots(_args: &Args, _windows: &[WindowResult]) -> Result<()> {
    eprintln!("Warning: plotting feature not enabled. Rebuild with default features to enable plots.");
    Ok(())
}
