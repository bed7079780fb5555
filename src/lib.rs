//! Per-SNP Hudson Fst between two populations, empirical percentile ranking,
//! and binomial enrichment tests for top-ranked SNPs in fixed genomic windows.

macro_rules! progress {
    ($quiet:expr, $($arg:tt)*) => {
        if !$quiet {
            eprintln!($($arg)*);
        }
    };
}

pub mod chrom;
pub mod csv_reader;
pub mod filter;
pub mod fst;
pub mod output;
pub mod pipeline;
#[cfg(feature = "plotting")]
pub mod plotting;
pub mod populations;
pub mod ranking;
pub mod sample_map;
pub mod types;
pub mod vcf_parser;
pub mod windows;
