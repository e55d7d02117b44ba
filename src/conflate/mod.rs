pub mod address_normalize;
pub mod addresses;
pub mod footprints;
pub mod merge;
pub mod output;

pub use addresses::conflate_addresses;
pub use footprints::conflate_footprints;
pub use merge::merge_footprints_and_addresses;
pub use output::{project_crossref, project_entities, project_footprints};
