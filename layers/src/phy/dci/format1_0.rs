//! DCI format 1_0 packers (downlink assignments)
//!
//! Field order and widths follow 3GPP TS 38.212 Section 7.3.1.2.1. Five
//! variants are distinguished by CRC scrambling scope: C-RNTI/CS-RNTI/
//! MCS-C-RNTI assignments in the UE-specific search space, and the P-RNTI
//! (paging), SI-RNTI (system information), RA-RNTI (random access response)
//! and TC-RNTI (Msg4) assignments in the common search space.

use num_derive::{FromPrimitive, ToPrimitive};
use tracing::trace;

use super::check_field;
use super::payload::DciPayload;
use super::sizing::freq_resource_bits;

/// Append the frequency domain resource assignment of a format 1_0 DCI
fn push_frequency_resource(
    payload: &mut DciPayload,
    format: &'static str,
    n_rb_dl_bwp: u16,
    frequency_resource: u16,
) {
    let states = u32::from(n_rb_dl_bwp) * (u32::from(n_rb_dl_bwp) + 1) / 2;
    assert!(
        u32::from(frequency_resource) < states,
        "DCI format {}: frequency_resource {} out of range for a {} RB BWP",
        format,
        frequency_resource,
        n_rb_dl_bwp
    );
    payload.push(frequency_resource.into(), freq_resource_bits(n_rb_dl_bwp));
}

/// Reject the reserved TB scaling value 0b11 along with over-wide values
fn check_tb_scaling(format: &'static str, tb_scaling: u8) {
    check_field(format, "tb_scaling", tb_scaling.into(), 2);
    assert!(
        tb_scaling != 0b11,
        "DCI format {}: tb_scaling value 0b11 is reserved",
        format
    );
}

/// Zero-pad to the aligned payload size
fn pad_to_size(payload: &mut DciPayload, format: &'static str, payload_size: usize) {
    assert!(
        payload_size >= payload.len(),
        "DCI format {}: payload size {} smaller than the {} packed bits",
        format,
        payload_size,
        payload.len()
    );
    payload.push_zeros(payload_size - payload.len());
}

/// DCI format 1_0 scrambled by C-RNTI, CS-RNTI or MCS-C-RNTI
#[derive(Debug, Clone)]
pub struct DciFormat10CRnti {
    /// Aligned payload size in bits
    pub payload_size: usize,
    /// DL BWP size governing the frequency resource field width
    pub n_rb_dl_bwp: u16,
    /// Frequency domain resource assignment
    pub frequency_resource: u16,
    /// Time domain resource assignment (4 bits)
    pub time_resource: u8,
    /// VRB-to-PRB mapping (1 bit)
    pub vrb_to_prb_mapping: u8,
    /// Modulation and coding scheme (5 bits)
    pub modulation_coding_scheme: u8,
    /// New data indicator (1 bit)
    pub new_data_indicator: u8,
    /// Redundancy version (2 bits)
    pub redundancy_version: u8,
    /// HARQ process number (4 bits)
    pub harq_process_number: u8,
    /// Downlink assignment index (2 bits)
    pub dl_assignment_index: u8,
    /// TPC command for the scheduled PUCCH (2 bits)
    pub tpc_command: u8,
    /// PUCCH resource indicator (3 bits)
    pub pucch_resource_indicator: u8,
    /// PDSCH-to-HARQ feedback timing indicator (3 bits)
    pub pdsch_harq_fb_timing_indicator: u8,
}

impl DciFormat10CRnti {
    /// Pack into a payload of exactly `payload_size` bits
    pub fn pack(&self) -> DciPayload {
        const FORMAT: &str = "1_0 C-RNTI";
        let mut payload = DciPayload::new();

        // Identifier for DCI formats: 1 indicates a DL DCI format
        payload.push(1, 1);
        push_frequency_resource(
            &mut payload,
            FORMAT,
            self.n_rb_dl_bwp,
            self.frequency_resource,
        );
        check_field(FORMAT, "time_resource", self.time_resource.into(), 4);
        payload.push(self.time_resource.into(), 4);
        check_field(
            FORMAT,
            "vrb_to_prb_mapping",
            self.vrb_to_prb_mapping.into(),
            1,
        );
        payload.push(self.vrb_to_prb_mapping.into(), 1);
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
        check_field(
            FORMAT,
            "dl_assignment_index",
            self.dl_assignment_index.into(),
            2,
        );
        payload.push(self.dl_assignment_index.into(), 2);
        check_field(FORMAT, "tpc_command", self.tpc_command.into(), 2);
        payload.push(self.tpc_command.into(), 2);
        check_field(
            FORMAT,
            "pucch_resource_indicator",
            self.pucch_resource_indicator.into(),
            3,
        );
        payload.push(self.pucch_resource_indicator.into(), 3);
        check_field(
            FORMAT,
            "pdsch_harq_fb_timing_indicator",
            self.pdsch_harq_fb_timing_indicator.into(),
            3,
        );
        payload.push(self.pdsch_harq_fb_timing_indicator.into(), 3);
        pad_to_size(&mut payload, FORMAT, self.payload_size);

        trace!("packed DCI format {}: {} bits", FORMAT, payload.len());
        payload
    }
}

/// DCI format 1_0 scrambled by TC-RNTI (Msg4 assignment)
///
/// Same field set as the C-RNTI variant except that the downlink assignment
/// index positions are reserved. The governing BWP is the CORESET#0 size.
#[derive(Debug, Clone)]
pub struct DciFormat10TcRnti {
    /// Aligned payload size in bits
    pub payload_size: usize,
    /// CORESET#0 size governing the frequency resource field width
    pub n_rb_dl_bwp: u16,
    /// Frequency domain resource assignment
    pub frequency_resource: u16,
    /// Time domain resource assignment (4 bits)
    pub time_resource: u8,
    /// VRB-to-PRB mapping (1 bit)
    pub vrb_to_prb_mapping: u8,
    /// Modulation and coding scheme (5 bits)
    pub modulation_coding_scheme: u8,
    /// New data indicator (1 bit)
    pub new_data_indicator: u8,
    /// Redundancy version (2 bits)
    pub redundancy_version: u8,
    /// HARQ process number (4 bits)
    pub harq_process_number: u8,
    /// TPC command for the scheduled PUCCH (2 bits)
    pub tpc_command: u8,
    /// PUCCH resource indicator (3 bits)
    pub pucch_resource_indicator: u8,
    /// PDSCH-to-HARQ feedback timing indicator (3 bits)
    pub pdsch_harq_fb_timing_indicator: u8,
}

impl DciFormat10TcRnti {
    /// Pack into a payload of exactly `payload_size` bits
    pub fn pack(&self) -> DciPayload {
        const FORMAT: &str = "1_0 TC-RNTI";
        let mut payload = DciPayload::new();

        // Identifier for DCI formats: 1 indicates a DL DCI format
        payload.push(1, 1);
        push_frequency_resource(
            &mut payload,
            FORMAT,
            self.n_rb_dl_bwp,
            self.frequency_resource,
        );
        check_field(FORMAT, "time_resource", self.time_resource.into(), 4);
        payload.push(self.time_resource.into(), 4);
        check_field(
            FORMAT,
            "vrb_to_prb_mapping",
            self.vrb_to_prb_mapping.into(),
            1,
        );
        payload.push(self.vrb_to_prb_mapping.into(), 1);
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
        // Downlink assignment index: 2 bits, reserved
        payload.push_zeros(2);
        check_field(FORMAT, "tpc_command", self.tpc_command.into(), 2);
        payload.push(self.tpc_command.into(), 2);
        check_field(
            FORMAT,
            "pucch_resource_indicator",
            self.pucch_resource_indicator.into(),
            3,
        );
        payload.push(self.pucch_resource_indicator.into(), 3);
        check_field(
            FORMAT,
            "pdsch_harq_fb_timing_indicator",
            self.pdsch_harq_fb_timing_indicator.into(),
            3,
        );
        payload.push(self.pdsch_harq_fb_timing_indicator.into(), 3);
        pad_to_size(&mut payload, FORMAT, self.payload_size);

        trace!("packed DCI format {}: {} bits", FORMAT, payload.len());
        payload
    }
}

/// Content selector of a P-RNTI scrambled DCI format 1_0
///
/// The discriminants are the on-air values of the 2 bit short messages
/// indicator (TS 38.212 Table 7.3.1.2.1-1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum ShortMessagesIndicator {
    /// Only scheduling information for paging is present
    SchedulingInformation = 1,
    /// Only a short message is present
    ShortMessages = 2,
    /// Both scheduling information for paging and a short message are present
    Both = 3,
}

impl ShortMessagesIndicator {
    /// True when the DCI carries scheduling information for paging
    pub fn has_scheduling_information(self) -> bool {
        matches!(self, Self::SchedulingInformation | Self::Both)
    }

    /// True when the DCI carries a short message
    pub fn has_short_messages(self) -> bool {
        matches!(self, Self::ShortMessages | Self::Both)
    }
}

/// DCI format 1_0 scrambled by P-RNTI (paging)
///
/// The short messages indicator gates which fields are meaningful; fields
/// outside the indicated content are packed as reserved zeros regardless of
/// the descriptor values.
#[derive(Debug, Clone)]
pub struct DciFormat10PRnti {
    /// Aligned payload size in bits
    pub payload_size: usize,
    /// CORESET#0 size governing the frequency resource field width
    pub n_rb_dl_bwp: u16,
    /// Short messages indicator (2 bits)
    pub short_messages_indicator: ShortMessagesIndicator,
    /// Short messages (8 bits), reserved unless the indicator includes them
    pub short_messages: u8,
    /// Frequency domain resource assignment, reserved unless scheduling
    /// information is indicated
    pub frequency_resource: u16,
    /// Time domain resource assignment (4 bits)
    pub time_resource: u8,
    /// VRB-to-PRB mapping (1 bit)
    pub vrb_to_prb_mapping: u8,
    /// Modulation and coding scheme (5 bits)
    pub modulation_coding_scheme: u8,
    /// Transport block scaling (2 bits); the value 0b11 is reserved
    pub tb_scaling: u8,
}

impl DciFormat10PRnti {
    /// Pack into a payload of exactly `payload_size` bits
    pub fn pack(&self) -> DciPayload {
        const FORMAT: &str = "1_0 P-RNTI";
        check_tb_scaling(FORMAT, self.tb_scaling);
        let mut payload = DciPayload::new();

        payload.push(self.short_messages_indicator as u32, 2);

        if self.short_messages_indicator.has_short_messages() {
            payload.push(self.short_messages.into(), 8);
        } else {
            // Short messages: 8 bits, reserved
            payload.push_zeros(8);
        }

        if self.short_messages_indicator.has_scheduling_information() {
            push_frequency_resource(
                &mut payload,
                FORMAT,
                self.n_rb_dl_bwp,
                self.frequency_resource,
            );
            check_field(FORMAT, "time_resource", self.time_resource.into(), 4);
            payload.push(self.time_resource.into(), 4);
            check_field(
                FORMAT,
                "vrb_to_prb_mapping",
                self.vrb_to_prb_mapping.into(),
                1,
            );
            payload.push(self.vrb_to_prb_mapping.into(), 1);
            check_field(
                FORMAT,
                "modulation_coding_scheme",
                self.modulation_coding_scheme.into(),
                5,
            );
            payload.push(self.modulation_coding_scheme.into(), 5);
            payload.push(self.tb_scaling.into(), 2);
        } else {
            // Scheduling information fields, reserved
            payload.push_zeros(freq_resource_bits(self.n_rb_dl_bwp) + 4 + 1 + 5 + 2);
        }

        // Reserved bits: 6 bits
        payload.push_zeros(6);
        pad_to_size(&mut payload, FORMAT, self.payload_size);

        trace!("packed DCI format {}: {} bits", FORMAT, payload.len());
        payload
    }
}

/// System information indicator of an SI-RNTI scrambled DCI format 1_0
/// (TS 38.212 Table 7.3.1.2.1-2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum SystemInformationIndicator {
    /// SIB1 scheduling
    Sib1 = 0,
    /// Scheduling of other system information messages
    OtherSi = 1,
}

/// DCI format 1_0 scrambled by SI-RNTI (system information broadcast)
#[derive(Debug, Clone)]
pub struct DciFormat10SiRnti {
    /// Aligned payload size in bits
    pub payload_size: usize,
    /// CORESET#0 size governing the frequency resource field width
    pub n_rb_dl_bwp: u16,
    /// Frequency domain resource assignment
    pub frequency_resource: u16,
    /// Time domain resource assignment (4 bits)
    pub time_resource: u8,
    /// VRB-to-PRB mapping (1 bit)
    pub vrb_to_prb_mapping: u8,
    /// Modulation and coding scheme (5 bits)
    pub modulation_coding_scheme: u8,
    /// Redundancy version (2 bits)
    pub redundancy_version: u8,
    /// System information indicator (1 bit)
    pub system_information_indicator: SystemInformationIndicator,
}

impl DciFormat10SiRnti {
    /// Pack into a payload of exactly `payload_size` bits
    pub fn pack(&self) -> DciPayload {
        const FORMAT: &str = "1_0 SI-RNTI";
        let mut payload = DciPayload::new();

        push_frequency_resource(
            &mut payload,
            FORMAT,
            self.n_rb_dl_bwp,
            self.frequency_resource,
        );
        check_field(FORMAT, "time_resource", self.time_resource.into(), 4);
        payload.push(self.time_resource.into(), 4);
        check_field(
            FORMAT,
            "vrb_to_prb_mapping",
            self.vrb_to_prb_mapping.into(),
            1,
        );
        payload.push(self.vrb_to_prb_mapping.into(), 1);
        check_field(
            FORMAT,
            "modulation_coding_scheme",
            self.modulation_coding_scheme.into(),
            5,
        );
        payload.push(self.modulation_coding_scheme.into(), 5);
        check_field(
            FORMAT,
            "redundancy_version",
            self.redundancy_version.into(),
            2,
        );
        payload.push(self.redundancy_version.into(), 2);
        payload.push(self.system_information_indicator as u32, 1);

        // Reserved bits: 15 bits
        payload.push_zeros(15);
        pad_to_size(&mut payload, FORMAT, self.payload_size);

        trace!("packed DCI format {}: {} bits", FORMAT, payload.len());
        payload
    }
}

/// DCI format 1_0 scrambled by RA-RNTI (random access response assignment)
#[derive(Debug, Clone)]
pub struct DciFormat10RaRnti {
    /// Aligned payload size in bits
    pub payload_size: usize,
    /// Governing BWP size: CORESET#0 when configured, the initial DL BWP
    /// otherwise
    pub n_rb_dl_bwp: u16,
    /// Frequency domain resource assignment
    pub frequency_resource: u16,
    /// Time domain resource assignment (4 bits)
    pub time_resource: u8,
    /// VRB-to-PRB mapping (1 bit)
    pub vrb_to_prb_mapping: u8,
    /// Modulation and coding scheme (5 bits)
    pub modulation_coding_scheme: u8,
    /// Transport block scaling (2 bits); the value 0b11 is reserved
    pub tb_scaling: u8,
}

impl DciFormat10RaRnti {
    /// Pack into a payload of exactly `payload_size` bits
    pub fn pack(&self) -> DciPayload {
        const FORMAT: &str = "1_0 RA-RNTI";
        check_tb_scaling(FORMAT, self.tb_scaling);
        let mut payload = DciPayload::new();

        push_frequency_resource(
            &mut payload,
            FORMAT,
            self.n_rb_dl_bwp,
            self.frequency_resource,
        );
        check_field(FORMAT, "time_resource", self.time_resource.into(), 4);
        payload.push(self.time_resource.into(), 4);
        check_field(
            FORMAT,
            "vrb_to_prb_mapping",
            self.vrb_to_prb_mapping.into(),
            1,
        );
        payload.push(self.vrb_to_prb_mapping.into(), 1);
        check_field(
            FORMAT,
            "modulation_coding_scheme",
            self.modulation_coding_scheme.into(),
            5,
        );
        payload.push(self.modulation_coding_scheme.into(), 5);
        payload.push(self.tb_scaling.into(), 2);

        // Reserved bits: 16 bits
        payload.push_zeros(16);
        pad_to_size(&mut payload, FORMAT, self.payload_size);

        trace!("packed DCI format {}: {} bits", FORMAT, payload.len());
        payload
    }
}
