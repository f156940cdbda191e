//! Random Access Response UL grant packer
//!
//! Not a PDCCH DCI: the grant rides inside the RAR MAC payload. It shares
//! the bit-packing substrate and the fixed 27 bit layout of TS 38.213
//! Table 8.2-1.

use tracing::trace;

use super::check_field;
use super::payload::DciPayload;

/// Total size of a RAR UL grant in bits
pub const RAR_UL_GRANT_SIZE: usize = 27;

/// UL grant carried in a Random Access Response
#[derive(Debug, Clone)]
pub struct RarUlGrant {
    /// Frequency hopping flag (1 bit)
    pub frequency_hopping_flag: u8,
    /// PUSCH frequency resource allocation (14 bits)
    pub frequency_resource: u16,
    /// PUSCH time resource allocation (4 bits)
    pub time_resource: u8,
    /// Modulation and coding scheme (4 bits)
    pub modulation_coding_scheme: u8,
    /// TPC command for the Msg3 PUSCH (3 bits)
    pub tpc: u8,
    /// CSI request (1 bit)
    pub csi_request: u8,
}

impl RarUlGrant {
    /// Pack into the fixed 27 bit grant layout
    pub fn pack(&self) -> DciPayload {
        const FORMAT: &str = "RAR UL grant";
        let mut payload = DciPayload::new();

        check_field(
            FORMAT,
            "frequency_hopping_flag",
            self.frequency_hopping_flag.into(),
            1,
        );
        payload.push(self.frequency_hopping_flag.into(), 1);
        check_field(
            FORMAT,
            "frequency_resource",
            self.frequency_resource.into(),
            14,
        );
        payload.push(self.frequency_resource.into(), 14);
        check_field(FORMAT, "time_resource", self.time_resource.into(), 4);
        payload.push(self.time_resource.into(), 4);
        check_field(
            FORMAT,
            "modulation_coding_scheme",
            self.modulation_coding_scheme.into(),
            4,
        );
        payload.push(self.modulation_coding_scheme.into(), 4);
        check_field(FORMAT, "tpc", self.tpc.into(), 3);
        payload.push(self.tpc.into(), 3);
        check_field(FORMAT, "csi_request", self.csi_request.into(), 1);
        payload.push(self.csi_request.into(), 1);

        trace!("packed {}: {} bits", FORMAT, payload.len());
        payload
    }
}
