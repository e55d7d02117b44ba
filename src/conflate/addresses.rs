//! Address Conflation (spec §4.4): optional correspondence between NAD and
//! OpenAddresses, falling back to whichever single source is available.

use anyhow::Result;

use crate::correspond::{correspond, CorrespondMode};
use crate::types::Feature;

pub fn conflate_addresses(nad: &[Feature], open_addresses: &[Feature]) -> Result<Vec<Feature>> {
    match (nad.is_empty(), open_addresses.is_empty()) {
        (false, false) => correspond(nad, open_addresses, CorrespondMode::Distance),
        (false, true) => Ok(nad.to_vec()),
        (true, false) => Ok(open_addresses.to_vec()),
        (true, true) => Ok(Vec::new()),
    }
}
