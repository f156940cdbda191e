//! DCI size alignment
//!
//! Implements the size alignment procedure of 3GPP TS 38.212 Section 7.3.1.0
//! for the fallback formats: within each monitored search space the format
//! 0_0 and 1_0 payloads must come out the same length, so a UE runs a single
//! blind decode size per search space.

use crate::LayerError;
use common::types::{SearchSpaceSet, MAX_NRB};
use tracing::debug;

/// Fixed-width bits of DCI format 0_0: format identifier (1), time resource
/// (4), hopping flag (1), MCS (5), NDI (1), RV (2), HARQ number (4), TPC (2).
const DCI_0_0_FIXED_BITS: usize = 20;

/// Fixed-width bits of DCI format 1_0: format identifier (1), time resource
/// (4), VRB-to-PRB (1), MCS (5), NDI (1), RV (2), HARQ number (4), DAI (2),
/// TPC (2), PUCCH resource (3), PDSCH-to-HARQ timing (3).
const DCI_1_0_FIXED_BITS: usize = 28;

/// Width in bits of the frequency domain resource assignment field,
/// `ceil(log2(N_rb * (N_rb + 1) / 2))`, for a BWP of `n_rb` resource blocks
///
/// A single-RB BWP has exactly one assignable resource, so the field
/// collapses to zero bits.
pub fn freq_resource_bits(n_rb: u16) -> usize {
    let states = u32::from(n_rb) * (u32::from(n_rb) + 1) / 2;
    if states <= 1 {
        0
    } else {
        (u32::BITS - (states - 1).leading_zeros()) as usize
    }
}

/// CORESET#0 bandwidth in resource blocks for a MIB configuration index
///
/// Covers the {15, 15} kHz SSB/PDCCH subcarrier spacing column of TS 38.213
/// Table 13-1, which is the slice the size aligner consumes through
/// [`DciConfig::coreset0_bw`].
pub fn coreset0_bandwidth(index: u8) -> Result<u16, LayerError> {
    match index {
        0..=5 => Ok(24),
        6..=11 => Ok(48),
        12..=14 => Ok(96),
        _ => Err(LayerError::InvalidConfiguration(format!(
            "Invalid CORESET#0 index: {}",
            index
        ))),
    }
}

/// BWP configuration snapshot driving the DCI size alignment
///
/// Recomputed by the RRC/reconfiguration path whenever a BWP changes and
/// otherwise cached, see [`super::cache::DciSizeCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DciConfig {
    /// Initial DL BWP size in resource blocks
    pub n_rb_dl_bwp_initial: u16,
    /// Active DL BWP size in resource blocks
    pub n_rb_dl_bwp_active: u16,
    /// Initial UL BWP size in resource blocks
    pub n_rb_ul_bwp_initial: u16,
    /// Active UL BWP size in resource blocks
    pub n_rb_ul_bwp_active: u16,
    /// CORESET#0 size in resource blocks, 0 when CORESET#0 is not configured
    pub coreset0_bw: u16,
    /// Whether a Supplementary Uplink carrier is configured for the cell
    pub enable_sul: bool,
}

impl DciConfig {
    /// Check the configuration against the NR resource block limits
    ///
    /// Intended for the reconfiguration path, where a rejected update leaves
    /// the previous configuration in place.
    pub fn validate(&self) -> Result<(), LayerError> {
        let bwps = [
            ("initial DL BWP", self.n_rb_dl_bwp_initial),
            ("active DL BWP", self.n_rb_dl_bwp_active),
            ("initial UL BWP", self.n_rb_ul_bwp_initial),
            ("active UL BWP", self.n_rb_ul_bwp_active),
        ];
        for (name, n_rb) in bwps {
            if n_rb == 0 {
                return Err(LayerError::InvalidConfiguration(format!(
                    "{} has zero resource blocks",
                    name
                )));
            }
            if n_rb > MAX_NRB {
                return Err(LayerError::InvalidConfiguration(format!(
                    "{} spans {} resource blocks, above the {} maximum",
                    name, n_rb, MAX_NRB
                )));
            }
        }
        if self.coreset0_bw > MAX_NRB {
            return Err(LayerError::InvalidConfiguration(format!(
                "CORESET#0 spans {} resource blocks, above the {} maximum",
                self.coreset0_bw, MAX_NRB
            )));
        }
        Ok(())
    }

    /// Compute the aligned payload sizes for the four CSS/USS fallback DCIs
    ///
    /// Total over well-formed configurations; an invalid configuration is a
    /// caller bug and aborts.
    pub fn compute_sizes(&self) -> DciSizes {
        if let Err(error) = self.validate() {
            panic!("DCI size alignment: {}", error);
        }

        // Step 1: unpadded sizes. CSS format 1_0 is governed by CORESET#0
        // when configured, the initial DL BWP otherwise.
        let css_0_0 = DCI_0_0_FIXED_BITS + freq_resource_bits(self.n_rb_ul_bwp_initial);
        let n_rb_css_dl = if self.coreset0_bw > 0 {
            self.coreset0_bw
        } else {
            self.n_rb_dl_bwp_initial
        };
        let css_1_0 = DCI_1_0_FIXED_BITS + freq_resource_bits(n_rb_css_dl);

        let mut uss_0_0 = DCI_0_0_FIXED_BITS + freq_resource_bits(self.n_rb_ul_bwp_active);
        if self.enable_sul {
            // UL/SUL indicator, carried in the last bit position
            uss_0_0 += 1;
        }
        let uss_1_0 = DCI_1_0_FIXED_BITS + freq_resource_bits(self.n_rb_dl_bwp_active);

        // Steps 2 and 3: equalize each pair by zero-padding the shorter
        // format up to the longer one. The standard orders a truncation of
        // format 0_0 after padding, but with a single 0_0/1_0 pair per search
        // space the padding step already equalizes the sizes and the
        // truncation step never applies.
        let common = css_0_0.max(css_1_0);
        let ue_specific = uss_0_0.max(uss_1_0);

        debug!(
            "Aligned DCI sizes: common={} (0_0 raw {}, 1_0 raw {}), ue_specific={} (0_0 raw {}, 1_0 raw {})",
            common, css_0_0, css_1_0, ue_specific, uss_0_0, uss_1_0
        );

        DciSizes {
            format0_0_common: common,
            format1_0_common: common,
            format0_0_ue_specific: ue_specific,
            format1_0_ue_specific: ue_specific,
        }
    }
}

/// Aligned DCI payload sizes in bits, one per (format, search space) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DciSizes {
    /// DCI format 0_0 monitored in a common search space
    pub format0_0_common: usize,
    /// DCI format 1_0 monitored in a common search space
    pub format1_0_common: usize,
    /// DCI format 0_0 monitored in a UE-specific search space
    pub format0_0_ue_specific: usize,
    /// DCI format 1_0 monitored in a UE-specific search space
    pub format1_0_ue_specific: usize,
}

impl DciSizes {
    /// Aligned (format 0_0, format 1_0) payload sizes for a search space set
    pub fn aligned(&self, set: SearchSpaceSet) -> (usize, usize) {
        match set {
            SearchSpaceSet::Common => (self.format0_0_common, self.format1_0_common),
            SearchSpaceSet::UeSpecific => (self.format0_0_ue_specific, self.format1_0_ue_specific),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn config(
        dl_initial: u16,
        dl_active: u16,
        ul_initial: u16,
        ul_active: u16,
        coreset0_bw: u16,
        enable_sul: bool,
    ) -> DciConfig {
        DciConfig {
            n_rb_dl_bwp_initial: dl_initial,
            n_rb_dl_bwp_active: dl_active,
            n_rb_ul_bwp_initial: ul_initial,
            n_rb_ul_bwp_active: ul_active,
            coreset0_bw,
            enable_sul,
        }
    }

    #[test]
    fn test_freq_resource_bits() {
        assert_eq!(freq_resource_bits(1), 0);
        assert_eq!(freq_resource_bits(2), 2);
        assert_eq!(freq_resource_bits(24), 9);
        assert_eq!(freq_resource_bits(48), 11);
        assert_eq!(freq_resource_bits(49), 11);
        assert_eq!(freq_resource_bits(50), 11);
        assert_eq!(freq_resource_bits(106), 13);
        assert_eq!(freq_resource_bits(275), 16);
    }

    #[test]
    fn test_coreset0_bandwidth_table() {
        assert_eq!(coreset0_bandwidth(0).unwrap(), 24);
        assert_eq!(coreset0_bandwidth(5).unwrap(), 24);
        assert_eq!(coreset0_bandwidth(6).unwrap(), 48);
        assert_eq!(coreset0_bandwidth(11).unwrap(), 48);
        assert_eq!(coreset0_bandwidth(12).unwrap(), 96);
        assert_eq!(coreset0_bandwidth(14).unwrap(), 96);
        assert!(coreset0_bandwidth(15).is_err());
    }

    #[test]
    fn test_alignment_pads_each_pair_to_the_longer_format() {
        // Initial UL = 24, active UL = 48, initial DL = 24, active DL = 48,
        // CORESET#0 = 24. All four raw sizes differ before alignment.
        let sizes = config(24, 48, 24, 48, 24, false).compute_sizes();

        // CSS: 0_0 raw 20 + 9 = 29, 1_0 raw 28 + 9 = 37
        assert_eq!(sizes.format0_0_common, 37);
        assert_eq!(sizes.format1_0_common, 37);
        // USS: 0_0 raw 20 + 11 = 31, 1_0 raw 28 + 11 = 39
        assert_eq!(sizes.format0_0_ue_specific, 39);
        assert_eq!(sizes.format1_0_ue_specific, 39);
    }

    #[test]
    fn test_coreset0_governs_common_format1_0() {
        let with_coreset0 = config(106, 106, 106, 106, 48, false).compute_sizes();
        assert_eq!(with_coreset0.format1_0_common, 28 + 11);

        let without_coreset0 = config(106, 106, 106, 106, 0, false).compute_sizes();
        assert_eq!(without_coreset0.format1_0_common, 28 + 13);
    }

    #[test]
    fn test_format0_0_can_govern_the_ue_specific_pair() {
        // A wide active UL BWP against a single-RB DL BWP makes 0_0 the
        // longer format: 20 + 16 = 36 against 28 + 0 = 28.
        let sizes = config(24, 1, 24, 275, 24, false).compute_sizes();
        assert_eq!(sizes.format0_0_ue_specific, 36);
        assert_eq!(sizes.format1_0_ue_specific, 36);
    }

    #[test]
    fn test_sul_bit_does_not_break_alignment() {
        let without_sul = config(24, 48, 24, 48, 24, false).compute_sizes();
        let with_sul = config(24, 48, 24, 48, 24, true).compute_sizes();

        // 0_0 raw grows by one bit but 1_0 still dominates the pair
        assert_eq!(without_sul.format0_0_ue_specific, 39);
        assert_eq!(with_sul.format0_0_ue_specific, 39);
        assert_eq!(
            with_sul.format0_0_ue_specific,
            with_sul.format1_0_ue_specific
        );
    }

    #[test]
    fn test_single_rb_bwp_drops_the_frequency_field() {
        let sizes = config(1, 1, 1, 1, 0, false).compute_sizes();
        assert_eq!(sizes.format0_0_common, 28);
        assert_eq!(sizes.format1_0_ue_specific, 28);
    }

    #[test]
    fn test_aligned_accessor() {
        let sizes = config(24, 48, 24, 48, 24, false).compute_sizes();
        assert_eq!(sizes.aligned(SearchSpaceSet::Common), (37, 37));
        assert_eq!(sizes.aligned(SearchSpaceSet::UeSpecific), (39, 39));
    }

    #[test]
    fn test_validate_rejects_out_of_range_bwps() {
        assert!(config(0, 48, 24, 48, 24, false).validate().is_err());
        assert!(config(24, 48, 24, 276, 24, false).validate().is_err());
        assert!(config(24, 48, 24, 48, 276, false).validate().is_err());
        assert!(config(24, 48, 24, 48, 0, false).validate().is_ok());
    }

    #[test]
    #[should_panic(expected = "DCI size alignment")]
    fn test_compute_sizes_aborts_on_invalid_configuration() {
        config(24, 0, 24, 48, 24, false).compute_sizes();
    }

    proptest! {
        #[test]
        fn prop_freq_resource_bits_monotonic(n_rb in 1u16..275) {
            prop_assert!(freq_resource_bits(n_rb) <= freq_resource_bits(n_rb + 1));
        }

        #[test]
        fn prop_each_search_space_pair_is_equalized(
            dl_initial in 1u16..=275,
            dl_active in 1u16..=275,
            ul_initial in 1u16..=275,
            ul_active in 1u16..=275,
            coreset0_bw in 0u16..=275,
            enable_sul in any::<bool>(),
        ) {
            let sizes = config(dl_initial, dl_active, ul_initial, ul_active, coreset0_bw, enable_sul)
                .compute_sizes();
            prop_assert_eq!(sizes.format0_0_common, sizes.format1_0_common);
            prop_assert_eq!(sizes.format0_0_ue_specific, sizes.format1_0_ue_specific);
        }

        #[test]
        fn prop_aligned_sizes_cover_the_raw_sizes(
            dl_active in 1u16..=275,
            ul_active in 1u16..=275,
            enable_sul in any::<bool>(),
        ) {
            let sizes = config(24, dl_active, 24, ul_active, 24, enable_sul).compute_sizes();
            let raw_0_0 = DCI_0_0_FIXED_BITS
                + freq_resource_bits(ul_active)
                + usize::from(enable_sul);
            let raw_1_0 = DCI_1_0_FIXED_BITS + freq_resource_bits(dl_active);
            prop_assert!(sizes.format0_0_ue_specific >= raw_0_0);
            prop_assert!(sizes.format1_0_ue_specific >= raw_1_0);
        }
    }
}
