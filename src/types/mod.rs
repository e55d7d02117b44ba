mod county;
mod entity;
mod feature;
mod provider;

pub use county::County;
pub use entity::{CrossrefRow, Entity, FootprintRecord};
pub use feature::{sanitize_height, sanitize_levels, Feature};
pub use provider::{ForeignKey, Provider};
