//! IO module for format-specific reading and writing operations.
//!
//! - `wkb` - Well-Known Binary format for point/polygon geometry
//! - `parquet` - Parquet format for conformed input and output projections

pub(crate) mod parquet;
pub(crate) mod wkb;
