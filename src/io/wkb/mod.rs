mod read;
mod write;

pub use read::geometry_from_wkb;
pub use write::geometry_to_wkb;
