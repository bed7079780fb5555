use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;

/// Load a headerless, tab-separated `sample<TAB>population` file.
///
/// Extra columns are ignored. Duplicate sample IDs are not rejected; the
/// last occurrence wins.
pub fn load_population_map(path: &Path) -> Result<HashMap<String, String>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open sample file: {}", path.display()))?;

    let mut map = HashMap::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record.with_context(|| format!("Failed to parse sample file row {}", i + 1))?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        let ctx = || format!("{}: row {} needs a sample and a population column", path.display(), i + 1);
        let sample = record.get(0).with_context(ctx)?.trim();
        let population = record.get(1).with_context(ctx)?.trim();
        map.insert(sample.to_string(), population.to_string());
    }

    Ok(map)
}
