//! Downlink Control Information (DCI) packing
//!
//! Implements the PDCCH payload construction of 3GPP TS 38.212 Section 7.3.1:
//! the size alignment procedure that harmonizes the fallback formats 0_0 and
//! 1_0 across search spaces, and one bit-exact packer per (format, RNTI)
//! variant. The RAR UL grant of TS 38.213 Table 8.2-1 shares the same
//! bit-packing substrate.
//!
//! Packers are pure functions of their descriptor. The scheduler selects the
//! variant from the RNTI scrambling scope and the monitored search space, so
//! there is one entry point per variant rather than a central dispatch.

pub mod cache;
pub mod format0_0;
pub mod format1_0;
pub mod payload;
pub mod rar;
pub mod sizing;

pub use cache::{DciSizeCache, SizeSnapshot};
pub use format0_0::{DciFormat00CRnti, DciFormat00TcRnti};
pub use format1_0::{
    DciFormat10CRnti, DciFormat10PRnti, DciFormat10RaRnti, DciFormat10SiRnti, DciFormat10TcRnti,
    ShortMessagesIndicator, SystemInformationIndicator,
};
pub use payload::{DciPayload, MAX_DCI_PAYLOAD_SIZE};
pub use rar::{RarUlGrant, RAR_UL_GRANT_SIZE};
pub use sizing::{coreset0_bandwidth, freq_resource_bits, DciConfig, DciSizes};

/// Aborts when a DCI field value does not fit its standardized bit width.
///
/// A field out of range indicates a miswired scheduler; a silently truncated
/// value would corrupt every UE decode of the payload.
pub(crate) fn check_field(format: &'static str, field: &'static str, value: u32, width: usize) {
    assert!(
        width >= 32 || u64::from(value) < (1u64 << width),
        "DCI format {}: field '{}' value {} does not fit in {} bits",
        format,
        field,
        value,
        width
    );
}
