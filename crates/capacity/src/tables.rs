use qrlab_config::EcLevel;

/// Number of versions with tabulated capacities.
pub const TABULATED_VERSIONS: usize = 20;

/// Highest QR version.
pub const MAX_VERSION: u8 = 40;

/// Bytes per extra version when extrapolating past the tables.
/// Heuristic, not from the QR standard.
pub const EXTRAPOLATION_BYTES_PER_VERSION: usize = 100;

/// Byte-mode capacity for versions 1-20 at EC level L.
pub const CAPACITY_L: [u32; TABULATED_VERSIONS] = [
    17, 32, 53, 78, 106, 134, 154, 192, 230, 271, 321, 367, 425, 458, 520, 586, 644, 718, 792, 858,
];

/// Byte-mode capacity for versions 1-20 at EC level M.
pub const CAPACITY_M: [u32; TABULATED_VERSIONS] = [
    14, 26, 42, 62, 84, 106, 122, 152, 180, 213, 251, 287, 331, 362, 412, 450, 504, 560, 624, 666,
];

/// Byte-mode capacity for versions 1-20 at EC level Q.
pub const CAPACITY_Q: [u32; TABULATED_VERSIONS] = [
    11, 20, 32, 46, 60, 74, 86, 108, 130, 151, 177, 203, 241, 258, 292, 322, 364, 394, 442, 482,
];

/// Byte-mode capacity for versions 1-20 at EC level H.
pub const CAPACITY_H: [u32; TABULATED_VERSIONS] = [
    7, 14, 24, 34, 44, 58, 64, 84, 98, 119, 137, 155, 177, 194, 220, 250, 280, 310, 338, 382,
];

/// Capacity table for an EC level
pub fn capacity_table(level: EcLevel) -> &'static [u32; TABULATED_VERSIONS] {
    match level {
        EcLevel::L => &CAPACITY_L,
        EcLevel::M => &CAPACITY_M,
        EcLevel::Q => &CAPACITY_Q,
        EcLevel::H => &CAPACITY_H,
    }
}

/// Module grid side length for a version
pub fn module_dimension(version: u8) -> u32 {
    17 + 4 * u32::from(version)
}
