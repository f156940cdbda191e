//! Common Types for 5G GNodeB
//!
//! Defines fundamental types used throughout the control channel chain

use serde::{Deserialize, Serialize};

/// Largest number of resource blocks an NR carrier may span
pub const MAX_NRB: u16 = 275;

/// PDCCH search space set in which a DCI is monitored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchSpaceSet {
    /// Common search space (CSS)
    Common,
    /// UE-specific search space (USS)
    UeSpecific,
}

impl SearchSpaceSet {
    /// True for the common search space
    pub fn is_common(&self) -> bool {
        matches!(self, SearchSpaceSet::Common)
    }
}
