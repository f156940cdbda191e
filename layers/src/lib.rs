//! Protocol Stack Layers Library
//!
//! This crate implements the PDCCH control information packing core of the
//! 5G NR physical layer according to 3GPP TS 38.212.

pub mod phy;

use thiserror::Error;

/// Common errors for protocol layers
#[derive(Error, Debug)]
pub enum LayerError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}
