#![doc = "BEAR: conflation pipeline reconciling U.S. building footprint and address datasets into a unified entity registry"]

mod commands;
mod common;
mod conflate;
mod correspond;
mod fips;
mod frame;
mod io;
mod types;

pub mod cli;

#[doc(inline)]
pub use commands::{conflate as conflate_command, conform as conform_command};

#[doc(inline)]
pub use conflate::{conflate_addresses, conflate_footprints, merge_footprints_and_addresses};

#[doc(inline)]
pub use correspond::{correspond, CorrespondMode};

#[doc(inline)]
pub use fips::Fips;

#[doc(inline)]
pub use types::{County, CrossrefRow, Entity, Feature, FootprintRecord, ForeignKey, Provider};
