//! Reprojection from the working projection (EPSG:5070, NAD83 / Conus
//! Albers) to WGS84 lon/lat, needed only for Plus Code encoding (Open
//! Location Code is inherently a lat/lon hash).

use anyhow::{anyhow, Context, Result};
use proj4rs::{proj::Proj as Proj4, transform::transform};

const ALBERS_CONUS_PROJ4: &str =
    "+proj=aea +lat_1=29.5 +lat_2=45.5 +lat_0=23 +lon_0=-96 +x_0=0 +y_0=0 +datum=NAD83 +units=m +no_defs +type=crs";
const WGS84_LONGLAT_PROJ4: &str = "+proj=longlat +datum=WGS84 +no_defs +type=crs";

/// Reproject a point from EPSG:5070 meters to WGS84 (lon, lat) degrees.
pub fn to_wgs84_lon_lat(x: f64, y: f64) -> Result<(f64, f64)> {
    let from = Proj4::from_proj_string(ALBERS_CONUS_PROJ4)
        .with_context(|| anyhow!("failed to build source PROJ.4 (EPSG:5070)"))?;
    let to = Proj4::from_proj_string(WGS84_LONGLAT_PROJ4)
        .with_context(|| anyhow!("failed to build target PROJ.4 (WGS84)"))?;

    let mut point = (x, y, 0.0);
    transform(&from, &to, &mut point)
        .map_err(|e| anyhow!("EPSG:5070 -> WGS84 transform failed: {e}"))?;
    Ok((point.0.to_degrees(), point.1.to_degrees()))
}
