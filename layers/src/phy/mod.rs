//! Physical Layer (PHY) Submodules
//!
//! This module contains the downlink control information processing of the
//! 5G NR physical layer according to 3GPP TS 38.212.

pub mod dci;

// Re-export commonly used types
pub use dci::{DciConfig, DciPayload, DciSizeCache, DciSizes};
