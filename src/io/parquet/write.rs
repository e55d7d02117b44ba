//! Parquet writing operations: output projections into Parquet files.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::{DataFrame, ParquetWriter, Series};

use crate::common::fs::ensure_dir_exists;
use crate::io::wkb::geometry_to_wkb;
use crate::types::{CrossrefRow, Entity, FootprintRecord};

fn write_dataframe(mut df: DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir_exists(parent)?;
    }
    let file = File::create(path).with_context(|| format!("[io::parquet::write] Failed to create {}", path.display()))?;
    ParquetWriter::new(file)
        .finish(&mut df)
        .with_context(|| format!("[io::parquet::write] Failed to write Parquet file {}", path.display()))?;
    Ok(())
}

pub fn write_entities(entities: &[Entity], path: &Path) -> Result<()> {
    let ids: Vec<&str> = entities.iter().map(|e| e.id.as_str()).collect();
    let classifications: Vec<Option<&str>> = entities.iter().map(|e| e.classification.as_deref()).collect();
    let addresses: Vec<Option<&str>> = entities.iter().map(|e| e.address.as_deref()).collect();
    let heights: Vec<Option<f64>> = entities.iter().map(|e| e.height).collect();
    let levels: Vec<Option<i32>> = entities.iter().map(|e| e.levels).collect();
    let xs: Vec<f64> = entities.iter().map(|e| e.x).collect();
    let ys: Vec<f64> = entities.iter().map(|e| e.y).collect();

    let df = DataFrame::new(vec![
        Series::new("id".into(), ids).into(),
        Series::new("classification".into(), classifications).into(),
        Series::new("address".into(), addresses).into(),
        Series::new("height".into(), heights).into(),
        Series::new("levels".into(), levels).into(),
        Series::new("x".into(), xs).into(),
        Series::new("y".into(), ys).into(),
    ])
    .context("[io::parquet::write] Failed to build entities DataFrame")?;

    write_dataframe(df, path)
}

pub fn write_crossref(rows: &[CrossrefRow], path: &Path) -> Result<()> {
    let entity_ids: Vec<&str> = rows.iter().map(|r| r.entity_id.as_str()).collect();
    let providers: Vec<String> = rows.iter().map(|r| r.provider.to_string()).collect();
    let providers: Vec<&str> = providers.iter().map(|s| s.as_str()).collect();
    let provider_ids: Vec<&str> = rows.iter().map(|r| r.provider_id.as_str()).collect();

    let df = DataFrame::new(vec![
        Series::new("entity_id".into(), entity_ids).into(),
        Series::new("provider".into(), providers).into(),
        Series::new("provider_id".into(), provider_ids).into(),
    ])
    .context("[io::parquet::write] Failed to build crossref DataFrame")?;

    write_dataframe(df, path)
}

pub fn write_footprints(records: &[FootprintRecord], path: &Path) -> Result<()> {
    use bear_geom::GeometryValue;

    let providers: Vec<String> = records.iter().map(|r| r.provider.to_string()).collect();
    let providers: Vec<&str> = providers.iter().map(|s| s.as_str()).collect();
    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    let geometries: Result<Vec<Vec<u8>>> = records
        .iter()
        .map(|r| geometry_to_wkb(&GeometryValue::Polygon(r.geometry.clone())))
        .collect();
    let geometries = geometries.context("[io::parquet::write] Failed to encode footprint geometry")?;

    let df = DataFrame::new(vec![
        Series::new("provider".into(), providers).into(),
        Series::new("id".into(), ids).into(),
        Series::new("geometry".into(), geometries).into(),
    ])
    .context("[io::parquet::write] Failed to build footprints DataFrame")?;

    write_dataframe(df, path)
}
