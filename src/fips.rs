//! FIPS/County collaborator: loads a bundled GeoJSON of U.S. counties
//! (already reprojected to EPSG:5070 by whatever produced the bundle) and
//! answers `lookup`/`query` against it. Loading the dataset itself is a
//! conform-stage/ingestion concern out of this crate's scope; `Fips` only
//! indexes whatever has been handed to it via [`Fips::load_from_geojson`].

use std::path::Path;

use anyhow::{Context, Result};
use geo::{BoundingRect, Contains, MultiPolygon, Point, Polygon};
use rstar::{RTreeObject, AABB};
use serde_json::Value;

use crate::types::County;

/// 5-digit FIPS string syntax: 2-digit state + 3-digit county, both numeric.
pub fn validate_code(fips: &str) -> Result<()> {
    if fips.len() == 5 && fips.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        anyhow::bail!("[fips] invalid FIPS code `{fips}`, expected a 5-digit numeric string")
    }
}

struct Indexed {
    idx: usize,
    bbox: geo::Rect<f64>,
}

impl RTreeObject for Indexed {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.bbox.min().into(), self.bbox.max().into())
    }
}

/// In-memory FIPS/county collaborator. Empty until [`Fips::load_from_geojson`]
/// succeeds; `lookup`/`query` fail/return `None` until then, per spec.
#[derive(Default)]
pub struct Fips {
    counties: Vec<County>,
    rtree: Option<rstar::RTree<Indexed>>,
}

impl Fips {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a GeoJSON `FeatureCollection` of counties. Each feature's
    /// `properties.FIPS` carries the 5-digit code and its `geometry` is a
    /// `Polygon` or `MultiPolygon` already in EPSG:5070.
    pub fn load_from_geojson(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("[fips] Failed to read counties dataset {}", path.display()))?;
        let value: Value = serde_json::from_slice(&bytes)
            .with_context(|| format!("[fips] Failed to parse GeoJSON {}", path.display()))?;

        let features = value["features"]
            .as_array()
            .ok_or_else(|| anyhow::anyhow!("[fips] GeoJSON has no `features` array"))?;

        let mut counties = Vec::with_capacity(features.len());
        for feature in features {
            let fips = feature["properties"]["FIPS"]
                .as_str()
                .ok_or_else(|| anyhow::anyhow!("[fips] feature missing `properties.FIPS`"))?
                .to_string();
            validate_code(&fips)?;

            let geometry = parse_multipolygon(&feature["geometry"])
                .with_context(|| format!("[fips] Failed to parse geometry for county {fips}"))?;
            let bounds = geometry.bounding_rect();

            counties.push(County {
                fips,
                geometry: Some(geometry),
                bounds,
            });
        }

        let rtree = rstar::RTree::bulk_load(
            counties
                .iter()
                .enumerate()
                .filter_map(|(idx, c)| c.bounds.map(|bbox| Indexed { idx, bbox }))
                .collect(),
        );

        Ok(Self { counties, rtree: Some(rtree) })
    }

    /// Look up a county by its FIPS code. Errors if no dataset is loaded or
    /// the code is not present.
    pub fn lookup(&self, fips: &str) -> Result<County> {
        validate_code(fips)?;
        if self.counties.is_empty() {
            anyhow::bail!("[fips] no counties dataset loaded");
        }
        self.counties
            .iter()
            .find(|c| c.fips == fips)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("[fips] unknown FIPS code `{fips}`"))
    }

    /// Find the county containing `point`, if any. Returns `None` (not an
    /// error) when no dataset is loaded or the point falls in no county.
    pub fn query(&self, point: Point<f64>) -> Option<County> {
        let rtree = self.rtree.as_ref()?;
        let query_point = [point.x(), point.y()];
        rtree
            .locate_all_at_point(&query_point)
            .filter_map(|candidate| {
                let county = &self.counties[candidate.idx];
                let geometry = county.geometry.as_ref()?;
                geometry.contains(&point).then(|| county.clone())
            })
            .next()
    }
}

fn parse_multipolygon(geometry: &Value) -> Result<MultiPolygon<f64>> {
    let kind = geometry["type"].as_str().unwrap_or_default();
    match kind {
        "Polygon" => {
            let coords = geometry["coordinates"]
                .as_array()
                .ok_or_else(|| anyhow::anyhow!("[fips] Polygon missing coordinates"))?;
            Ok(MultiPolygon(vec![parse_polygon_coords(coords)?]))
        }
        "MultiPolygon" => {
            let coords = geometry["coordinates"]
                .as_array()
                .ok_or_else(|| anyhow::anyhow!("[fips] MultiPolygon missing coordinates"))?;
            let polygons = coords
                .iter()
                .map(|poly| {
                    poly.as_array()
                        .ok_or_else(|| anyhow::anyhow!("[fips] malformed MultiPolygon entry"))
                        .and_then(|rings| parse_polygon_coords(rings))
                })
                .collect::<Result<Vec<Polygon<f64>>>>()?;
            Ok(MultiPolygon(polygons))
        }
        other => anyhow::bail!("[fips] unsupported geometry type `{other}`, expected Polygon or MultiPolygon"),
    }
}

fn parse_polygon_coords(rings: &[Value]) -> Result<Polygon<f64>> {
    let exterior = rings
        .first()
        .and_then(|v| v.as_array())
        .ok_or_else(|| anyhow::anyhow!("[fips] polygon missing exterior ring"))?;
    let exterior = parse_ring_coords(exterior)?;

    let interiors = rings[1..]
        .iter()
        .map(|v| {
            v.as_array()
                .ok_or_else(|| anyhow::anyhow!("[fips] malformed interior ring"))
                .and_then(|r| parse_ring_coords(r))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Polygon::new(exterior, interiors))
}

fn parse_ring_coords(coords: &[Value]) -> Result<geo::LineString<f64>> {
    let points = coords
        .iter()
        .map(|point| {
            let xy = point.as_array().ok_or_else(|| anyhow::anyhow!("[fips] malformed coordinate"))?;
            let x = xy.first().and_then(Value::as_f64).ok_or_else(|| anyhow::anyhow!("[fips] coordinate missing x"))?;
            let y = xy.get(1).and_then(Value::as_f64).ok_or_else(|| anyhow::anyhow!("[fips] coordinate missing y"))?;
            Ok(geo::Coord { x, y })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(geo::LineString::from(points))
}
