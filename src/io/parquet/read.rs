//! Parquet reading operations: conformed provider frames into `Vec<Feature>`.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::{DataFrame, ParquetReader, SerReader};

use crate::io::wkb::geometry_from_wkb;
use crate::types::{sanitize_height, sanitize_levels, Feature, ForeignKey, Provider};

fn read_parquet_file(path: &Path) -> Result<DataFrame> {
    let file = File::open(path).with_context(|| format!("[io::parquet::read] Failed to open {}", path.display()))?;
    ParquetReader::new(file)
        .finish()
        .with_context(|| format!("[io::parquet::read] Failed to read Parquet file {}", path.display()))
}

/// Convert one provider's conformed `DataFrame` into `Vec<Feature>`, decoding
/// the WKB `geometry` column and clamping out-of-range `height`/`levels`.
fn frame_to_features(df: &DataFrame, provider: Provider) -> Result<Vec<Feature>> {
    let height = df.column("height").ok().and_then(|c| c.f64().ok().cloned());
    let levels = df.column("levels").ok().and_then(|c| c.i32().ok().cloned());
    let classification = df.column("classification").ok().and_then(|c| c.str().ok().cloned());
    let address = df.column("address").ok().and_then(|c| c.str().ok().cloned());

    let id = df
        .column("id")
        .context("[io::parquet::read] conformed frame missing required column `id`")?
        .str()
        .context("[io::parquet::read] column `id` is not string-typed")?;

    let geometry = df
        .column("geometry")
        .context("[io::parquet::read] conformed frame missing required column `geometry`")?
        .binary()
        .context("[io::parquet::read] column `geometry` is not binary-typed")?;

    let mut out = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let id = id
            .get(i)
            .ok_or_else(|| anyhow::anyhow!("[io::parquet::read] row {i} has a null `id`"))?;
        let wkb = geometry
            .get(i)
            .ok_or_else(|| anyhow::anyhow!("[io::parquet::read] row {i} has a null `geometry`"))?;
        let geometry_value = geometry_from_wkb(wkb)
            .with_context(|| format!("[io::parquet::read] row {i} has an unreadable geometry"))?;

        out.push(Feature {
            id: id.to_string(),
            provider,
            classification: classification.as_ref().and_then(|c| c.get(i)).map(str::to_string),
            address: address.as_ref().and_then(|c| c.get(i)).map(str::to_string),
            height: sanitize_height(height.as_ref().and_then(|c| c.get(i))),
            levels: sanitize_levels(levels.as_ref().and_then(|c| c.get(i))),
            geometry: geometry_value,
            foreign: Vec::<ForeignKey>::new(),
        });
    }
    Ok(out)
}

/// Read one provider's conformed frame for a county, given the path to its
/// `data.parquet` file.
pub fn read_conformed_provider(path: &Path, provider: Provider) -> Result<Vec<Feature>> {
    let df = read_parquet_file(path)?;
    frame_to_features(&df, provider)
}
