//! Version and capacity estimation
//!
//! Finds the smallest tabulated version whose byte capacity holds the
//! payload. Past version 20 the version is extrapolated with a coarse
//! heuristic and the capacity re-reports the version-20 figure.

use serde::Serialize;
use tracing::debug;

use qrlab_config::EcLevel;

use crate::tables::{
    capacity_table, module_dimension, EXTRAPOLATION_BYTES_PER_VERSION, MAX_VERSION,
    TABULATED_VERSIONS,
};

/// Derived version/capacity figures for a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapacityEstimate {
    /// Estimated QR version, 1-40
    pub version: u8,
    /// Module grid side length, `17 + 4 * version`
    pub module_dimension: u32,
    /// Byte capacity at this version and EC level
    pub byte_capacity: u32,
    /// True when the version came from extrapolation (above 20) and is approximate
    pub extrapolated: bool,
}

/// Estimate the QR version for a payload of `payload_len` bytes
pub fn estimate(payload_len: usize, level: EcLevel) -> CapacityEstimate {
    let table = capacity_table(level);
    let last = table[TABULATED_VERSIONS - 1];

    let (version, extrapolated) = match table.iter().position(|&cap| cap as usize >= payload_len) {
        // Index is below TABULATED_VERSIONS
        Some(index) => (index as u8 + 1, false),
        None => {
            let overflow = payload_len - last as usize;
            let extra = overflow.div_ceil(EXTRAPOLATION_BYTES_PER_VERSION);
            let version = (TABULATED_VERSIONS + extra).min(usize::from(MAX_VERSION));
            (version as u8, true)
        }
    };

    let byte_capacity = if extrapolated {
        last
    } else {
        table[usize::from(version) - 1]
    };

    debug!(
        "capacity::estimate: {} bytes at EC {} -> version {} ({} bytes, extrapolated={})",
        payload_len, level, version, byte_capacity, extrapolated
    );

    CapacityEstimate {
        version,
        module_dimension: module_dimension(version),
        byte_capacity,
        extrapolated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::{CAPACITY_H, CAPACITY_M};

    #[test]
    fn test_empty_payload_is_version_one() {
        for level in EcLevel::ALL {
            let est = estimate(0, level);
            assert_eq!(est.version, 1);
            assert_eq!(est.module_dimension, 21);
            assert!(!est.extrapolated);
        }
    }

    #[test]
    fn test_smallest_fitting_version_for_every_tabulated_length() {
        for level in EcLevel::ALL {
            let table = capacity_table(level);
            for len in 0..=table[TABULATED_VERSIONS - 1] as usize {
                let est = estimate(len, level);
                let v = usize::from(est.version);
                assert!(table[v - 1] as usize >= len, "version {v} too small for {len}");
                if v > 1 {
                    assert!((table[v - 2] as usize) < len, "version {v} not minimal for {len}");
                }
                assert_eq!(est.byte_capacity, table[v - 1]);
            }
        }
    }

    #[test]
    fn test_exact_capacity_boundary() {
        // 14 bytes fit version 1 at M, 15 do not
        assert_eq!(estimate(14, EcLevel::M).version, 1);
        assert_eq!(estimate(15, EcLevel::M).version, 2);
        assert_eq!(estimate(15, EcLevel::M).byte_capacity, 26);
    }

    #[test]
    fn test_extrapolation_just_past_table() {
        let est = estimate(CAPACITY_M[19] as usize + 1, EcLevel::M);
        assert_eq!(est.version, 21);
        assert_eq!(est.module_dimension, 101);
        assert_eq!(est.byte_capacity, CAPACITY_M[19]);
        assert!(est.extrapolated);
    }

    #[test]
    fn test_extrapolation_steps_per_hundred_bytes() {
        let base = CAPACITY_H[19] as usize;
        assert_eq!(estimate(base + 100, EcLevel::H).version, 21);
        assert_eq!(estimate(base + 101, EcLevel::H).version, 22);
    }

    #[test]
    fn test_extrapolation_caps_at_forty() {
        let est = estimate(100_000, EcLevel::L);
        assert_eq!(est.version, 40);
        assert_eq!(est.module_dimension, 177);
    }
}
