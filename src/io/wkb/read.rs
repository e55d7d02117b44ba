//! WKB reading operations.

use anyhow::{Context, Result};
use geo::{LineString, Point, Polygon};
use std::io::Read;

use bear_geom::GeometryValue;

/// WKB geometry type for Point
const WKB_POINT: u32 = 1;
/// WKB geometry type for Polygon
const WKB_POLYGON: u32 = 3;
/// WKB byte order: little endian
const WKB_LE: u8 = 1;

struct Order(bool); // true = little-endian

impl Order {
    fn read_u32(&self, cursor: &mut std::io::Cursor<&[u8]>) -> Result<u32> {
        let mut bytes = [0u8; 4];
        cursor
            .read_exact(&mut bytes)
            .context("[io::wkb::read] Failed to read u32")?;
        Ok(if self.0 { u32::from_le_bytes(bytes) } else { u32::from_be_bytes(bytes) })
    }

    fn read_f64(&self, cursor: &mut std::io::Cursor<&[u8]>) -> Result<f64> {
        let mut bytes = [0u8; 8];
        cursor
            .read_exact(&mut bytes)
            .context("[io::wkb::read] Failed to read f64")?;
        Ok(if self.0 { f64::from_le_bytes(bytes) } else { f64::from_be_bytes(bytes) })
    }

    fn read_ring(&self, cursor: &mut std::io::Cursor<&[u8]>) -> Result<LineString<f64>> {
        let len = self.read_u32(cursor)?;
        let mut coords = Vec::with_capacity(len as usize);
        for _ in 0..len {
            let x = self.read_f64(cursor)?;
            let y = self.read_f64(cursor)?;
            coords.push(geo::Coord { x, y });
        }
        Ok(LineString::from(coords))
    }
}

/// Read a [`GeometryValue`] (POINT or POLYGON) from a WKB byte buffer
/// (minimal implementation: 2D, no Z/M, no multi-geometries).
pub fn geometry_from_wkb(bytes: &[u8]) -> Result<GeometryValue> {
    let mut cursor = std::io::Cursor::new(bytes);

    let mut byte_order = [0u8; 1];
    cursor
        .read_exact(&mut byte_order)
        .context("[io::wkb::read] Failed to read byte order")?;
    let order = Order(byte_order[0] == WKB_LE);

    let geom_type = order.read_u32(&mut cursor)?;

    match geom_type {
        WKB_POINT => {
            let x = order.read_f64(&mut cursor)?;
            let y = order.read_f64(&mut cursor)?;
            Ok(GeometryValue::Point(Point::new(x, y)))
        }
        WKB_POLYGON => {
            let num_rings = order.read_u32(&mut cursor)?;
            if num_rings == 0 {
                anyhow::bail!("[io::wkb::read] Polygon must have at least one ring");
            }
            let exterior = order.read_ring(&mut cursor)?;
            let mut interiors = Vec::with_capacity((num_rings - 1) as usize);
            for _ in 1..num_rings {
                interiors.push(order.read_ring(&mut cursor)?);
            }
            Ok(GeometryValue::Polygon(Polygon::new(exterior, interiors)))
        }
        other => anyhow::bail!("[io::wkb::read] Unsupported WKB geometry type {other}, expected Point or Polygon"),
    }
}
