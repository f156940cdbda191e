//! DCI format 0_0 packers (uplink grants)
//!
//! Field order and widths follow 3GPP TS 38.212 Section 7.3.1.1.1. The two
//! variants differ by CRC scrambling scope: C-RNTI/CS-RNTI/MCS-C-RNTI grants
//! carry NDI, HARQ number and (when a SUL is configured) the UL/SUL
//! indicator; TC-RNTI Msg3 retransmission grants keep those bit positions
//! reserved and never carry the UL/SUL indicator.

use tracing::trace;

use super::check_field;
use super::payload::DciPayload;
use super::sizing::freq_resource_bits;

/// Threshold on the UL BWP size that switches the TC-RNTI hopping offset
/// field from 1 to 2 bits (TS 38.213 Table 8.3-1)
const TC_RNTI_WIDE_BWP_RB: u16 = 50;

/// Append the frequency domain resource assignment of a format 0_0 grant
///
/// When frequency hopping is enabled the top `n_ul_hop` bits of the field
/// carry the hopping offset index and the remaining bits the assignment
/// proper; the assignment must fit the reduced width.
fn push_frequency_resource(
    payload: &mut DciPayload,
    format: &'static str,
    n_rb_ul_bwp: u16,
    hopping_enabled: bool,
    n_ul_hop: u8,
    hopping_offset: u8,
    frequency_resource: u16,
) {
    let width = freq_resource_bits(n_rb_ul_bwp);
    if hopping_enabled {
        let n_ul_hop = usize::from(n_ul_hop);
        assert!(
            n_ul_hop == 1 || n_ul_hop == 2,
            "DCI format {}: N_ul_hop must be 1 or 2, got {}",
            format,
            n_ul_hop
        );
        assert!(
            n_ul_hop <= width,
            "DCI format {}: N_ul_hop {} exceeds the {} bit frequency resource field",
            format,
            n_ul_hop,
            width
        );
        check_field(format, "hopping_offset", hopping_offset.into(), n_ul_hop);
        check_field(
            format,
            "frequency_resource",
            frequency_resource.into(),
            width - n_ul_hop,
        );
        payload.push(hopping_offset.into(), n_ul_hop);
        payload.push(frequency_resource.into(), width - n_ul_hop);
    } else {
        let states = u32::from(n_rb_ul_bwp) * (u32::from(n_rb_ul_bwp) + 1) / 2;
        assert!(
            u32::from(frequency_resource) < states,
            "DCI format {}: frequency_resource {} out of range for a {} RB BWP",
            format,
            frequency_resource,
            n_rb_ul_bwp
        );
        payload.push(frequency_resource.into(), width);
    }
}

/// DCI format 0_0 scrambled by C-RNTI, CS-RNTI or MCS-C-RNTI
///
/// `payload_size` comes from the size alignment procedure, see
/// [`super::sizing::DciConfig::compute_sizes`].
#[derive(Debug, Clone)]
pub struct DciFormat00CRnti {
    /// Aligned payload size in bits
    pub payload_size: usize,
    /// UL BWP size governing the frequency resource field width
    pub n_rb_ul_bwp: u16,
    /// Hopping offset field width: 1 bit when frequencyHoppingOffsetLists
    /// holds 2 offsets, 2 bits when it holds 4
    pub n_ul_hop: u8,
    /// Index into frequencyHoppingOffsetLists, used when hopping is enabled
    pub hopping_offset: u8,
    /// Frequency domain resource assignment
    pub frequency_resource: u16,
    /// Time domain resource assignment (4 bits)
    pub time_resource: u8,
    /// Frequency hopping flag (1 bit)
    pub frequency_hopping_flag: u8,
    /// Modulation and coding scheme (5 bits)
    pub modulation_coding_scheme: u8,
    /// New data indicator (1 bit)
    pub new_data_indicator: u8,
    /// Redundancy version (2 bits)
    pub redundancy_version: u8,
    /// HARQ process number (4 bits)
    pub harq_process_number: u8,
    /// TPC command for the scheduled PUSCH (2 bits)
    pub tpc_command: u8,
    /// UL/SUL indicator, present iff the cell is configured with a SUL;
    /// occupies the last bit position, after the padding
    pub ul_sul_indicator: Option<bool>,
}

impl DciFormat00CRnti {
    /// Pack into a payload of exactly `payload_size` bits
    pub fn pack(&self) -> DciPayload {
        const FORMAT: &str = "0_0 C-RNTI";
        let mut payload = DciPayload::new();

        // Identifier for DCI formats: 0 indicates an UL DCI format
        payload.push(0, 1);
        push_frequency_resource(
            &mut payload,
            FORMAT,
            self.n_rb_ul_bwp,
            self.frequency_hopping_flag != 0,
            self.n_ul_hop,
            self.hopping_offset,
            self.frequency_resource,
        );
        check_field(FORMAT, "time_resource", self.time_resource.into(), 4);
        payload.push(self.time_resource.into(), 4);
        check_field(
            FORMAT,
            "frequency_hopping_flag",
            self.frequency_hopping_flag.into(),
            1,
        );
        payload.push(self.frequency_hopping_flag.into(), 1);
        check_field(
            FORMAT,
            "modulation_coding_scheme",
            self.modulation_coding_scheme.into(),
            5,
        );
        payload.push(self.modulation_coding_scheme.into(), 5);
        check_field(
            FORMAT,
            "new_data_indicator",
            self.new_data_indicator.into(),
            1,
        );
        payload.push(self.new_data_indicator.into(), 1);
        check_field(
            FORMAT,
            "redundancy_version",
            self.redundancy_version.into(),
            2,
        );
        payload.push(self.redundancy_version.into(), 2);
        check_field(
            FORMAT,
            "harq_process_number",
            self.harq_process_number.into(),
            4,
        );
        payload.push(self.harq_process_number.into(), 4);
        check_field(FORMAT, "tpc_command", self.tpc_command.into(), 2);
        payload.push(self.tpc_command.into(), 2);

        // Zero padding up to the aligned size; the UL/SUL indicator, when
        // present, takes the last bit position after the padding
        let packed = payload.len() + usize::from(self.ul_sul_indicator.is_some());
        assert!(
            self.payload_size >= packed,
            "DCI format {}: payload size {} smaller than the {} packed bits",
            FORMAT,
            self.payload_size,
            packed
        );
        payload.push_zeros(self.payload_size - packed);
        if let Some(ul_sul) = self.ul_sul_indicator {
            payload.push(ul_sul.into(), 1);
        }

        trace!("packed DCI format {}: {} bits", FORMAT, payload.len());
        payload
    }
}

/// DCI format 0_0 scrambled by TC-RNTI (Msg3 retransmission grant)
///
/// The NDI and HARQ process number bit positions are reserved and the UL/SUL
/// indicator is never present. The hopping offset width is derived from the
/// BWP size rather than from frequencyHoppingOffsetLists.
#[derive(Debug, Clone)]
pub struct DciFormat00TcRnti {
    /// Aligned payload size in bits
    pub payload_size: usize,
    /// Initial UL BWP size governing the frequency resource field width
    pub n_rb_ul_bwp: u16,
    /// Index of the frequency hopping offset, used when hopping is enabled
    pub hopping_offset: u8,
    /// Frequency domain resource assignment
    pub frequency_resource: u16,
    /// Time domain resource assignment (4 bits)
    pub time_resource: u8,
    /// Frequency hopping flag (1 bit)
    pub frequency_hopping_flag: u8,
    /// Modulation and coding scheme (5 bits)
    pub modulation_coding_scheme: u8,
    /// Redundancy version (2 bits)
    pub redundancy_version: u8,
    /// TPC command for the scheduled PUSCH (2 bits)
    pub tpc_command: u8,
}

impl DciFormat00TcRnti {
    /// Hopping offset field width for this BWP size
    pub fn n_ul_hop(&self) -> u8 {
        if self.n_rb_ul_bwp < TC_RNTI_WIDE_BWP_RB {
            1
        } else {
            2
        }
    }

    /// Pack into a payload of exactly `payload_size` bits
    pub fn pack(&self) -> DciPayload {
        const FORMAT: &str = "0_0 TC-RNTI";
        let mut payload = DciPayload::new();

        // Identifier for DCI formats: 0 indicates an UL DCI format
        payload.push(0, 1);
        push_frequency_resource(
            &mut payload,
            FORMAT,
            self.n_rb_ul_bwp,
            self.frequency_hopping_flag != 0,
            self.n_ul_hop(),
            self.hopping_offset,
            self.frequency_resource,
        );
        check_field(FORMAT, "time_resource", self.time_resource.into(), 4);
        payload.push(self.time_resource.into(), 4);
        check_field(
            FORMAT,
            "frequency_hopping_flag",
            self.frequency_hopping_flag.into(),
            1,
        );
        payload.push(self.frequency_hopping_flag.into(), 1);
        check_field(
            FORMAT,
            "modulation_coding_scheme",
            self.modulation_coding_scheme.into(),
            5,
        );
        payload.push(self.modulation_coding_scheme.into(), 5);
        // New data indicator: 1 bit, reserved
        payload.push_zeros(1);
        check_field(
            FORMAT,
            "redundancy_version",
            self.redundancy_version.into(),
            2,
        );
        payload.push(self.redundancy_version.into(), 2);
        // HARQ process number: 4 bits, reserved
        payload.push_zeros(4);
        check_field(FORMAT, "tpc_command", self.tpc_command.into(), 2);
        payload.push(self.tpc_command.into(), 2);

        assert!(
            self.payload_size >= payload.len(),
            "DCI format {}: payload size {} smaller than the {} packed bits",
            FORMAT,
            self.payload_size,
            payload.len()
        );
        payload.push_zeros(self.payload_size - payload.len());

        trace!("packed DCI format {}: {} bits", FORMAT, payload.len());
        payload
    }
}
