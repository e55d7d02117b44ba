//! WKB writing operations.

use anyhow::Result;
use std::io::Write;

use bear_geom::GeometryValue;

/// WKB geometry type for Point
const WKB_POINT: u32 = 1;
/// WKB geometry type for Polygon
const WKB_POLYGON: u32 = 3;
/// WKB byte order: little endian
const WKB_LE: u8 = 1;

/// Write a [`GeometryValue`] to WKB bytes. Byte order is always
/// little-endian (minimal implementation: 2D, no Z/M, no multi-geometries).
pub fn geometry_to_wkb(geometry: &GeometryValue) -> Result<Vec<u8>> {
    let mut wkb = Vec::new();
    wkb.write_all(&[WKB_LE])?;

    match geometry {
        GeometryValue::Point(p) => {
            wkb.write_all(&WKB_POINT.to_le_bytes())?;
            wkb.write_all(&p.x().to_le_bytes())?;
            wkb.write_all(&p.y().to_le_bytes())?;
        }
        GeometryValue::Polygon(poly) => {
            wkb.write_all(&WKB_POLYGON.to_le_bytes())?;

            let num_rings = (1 + poly.interiors().len()) as u32;
            wkb.write_all(&num_rings.to_le_bytes())?;

            write_ring(&mut wkb, poly.exterior())?;
            for interior in poly.interiors() {
                write_ring(&mut wkb, interior)?;
            }
        }
    }

    Ok(wkb)
}

fn write_ring(out: &mut Vec<u8>, ring: &geo::LineString<f64>) -> Result<()> {
    out.write_all(&(ring.0.len() as u32).to_le_bytes())?;
    for coord in ring.coords() {
        out.write_all(&coord.x.to_le_bytes())?;
        out.write_all(&coord.y.to_le_bytes())?;
    }
    Ok(())
}
