mod pvalue;

use anyhow::{Context, Result};
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::chrom;
use crate::types::WindowResult;

pub use pvalue::{neg_log10, pvalue_segments};

static FONT_STATE: OnceLock<std::result::Result<(), String>> = OnceLock::new();

const FONT_CANDIDATES: [&str; 4] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/Library/Fonts/Arial.ttf",
];

/// Register a system font for the ab_glyph backend (no-op after first call).
fn ensure_fonts() -> Result<()> {
    FONT_STATE
        .get_or_init(register_system_font)
        .clone()
        .map_err(anyhow::Error::msg)
}

fn register_system_font() -> std::result::Result<(), String> {
    let path = FONT_CANDIDATES
        .iter()
        .map(Path::new)
        .find(|p| p.exists())
        .ok_or_else(|| format!("No usable font found; looked in {:?}", FONT_CANDIDATES))?;
    let data = std::fs::read(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    // plotters keeps a reference for the lifetime of the process
    let data: &'static [u8] = Box::leak(data.into_boxed_slice());
    for style in [FontStyle::Normal, FontStyle::Bold] {
        plotters::style::register_font("sans-serif", style, data)
            .map_err(|e| format!("failed to register {}: {:?}", path.display(), e))?;
    }
    Ok(())
}

/// Output format for plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotFormat {
    Png,
    Svg,
}

impl PlotFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            PlotFormat::Png => "png",
            PlotFormat::Svg => "svg",
        }
    }
}

/// Configuration for plot generation.
#[derive(Debug, Clone)]
pub struct PlotConfig {
    pub width: u32,
    pub height: u32,
    pub format: PlotFormat,
    /// p-value drawn as the dashed reference line
    pub reference_p: f64,
}

impl Default for PlotConfig {
    fn default() -> Self {
        // 6.4 x 4.8 inches at 300 dpi
        Self {
            width: 1920,
            height: 1440,
            format: PlotFormat::Png,
            reference_p: 0.05,
        }
    }
}

pub const COLOR_STEEL_BLUE: RGBColor = RGBColor(46, 134, 171); // #2E86AB
pub const COLOR_GRAY: RGBColor = RGBColor(128, 128, 128);
pub const COLOR_GRID: RGBColor = RGBColor(200, 200, 200);

/// Plot `-log10(p)` against window start for one chromosome's windows.
pub fn plot_chromosome(
    chrom: &str,
    windows: &[&WindowResult],
    path: &Path,
    config: &PlotConfig,
) -> Result<()> {
    ensure_fonts()?;
    let size = (config.width, config.height);

    match config.format {
        PlotFormat::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            pvalue::draw_pvalue_track(&root, chrom, windows, config.reference_p)?;
            root.present()?;
        }
        PlotFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            pvalue::draw_pvalue_track(&root, chrom, windows, config.reference_p)?;
            root.present()?;
        }
    }

    Ok(())
}

/// Write one plot per chromosome into `dir`, in order of first appearance in `windows`.
///
/// Returns the written paths.
pub fn plot_all_chromosomes(
    windows: &[WindowResult],
    dir: &Path,
    config: &PlotConfig,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create plot directory: {}", dir.display()))?;

    let ext = config.format.extension();
    let mut written = Vec::new();

    for chrom in chrom::first_appearance(windows.iter().map(|w| w.chrom.as_str())) {
        let chrom_windows: Vec<&WindowResult> = windows.iter().filter(|w| w.chrom == chrom).collect();
        let path = dir.join(format!("fst_binomial_{}.{}", chrom, ext));
        plot_chromosome(&chrom, &chrom_windows, &path, config)
            .with_context(|| format!("Failed to plot {}", chrom))?;
        written.push(path);
    }

    Ok(written)
}
