use crate::core::engine::CorrectionPolicy;

pub const DEFAULT_POLICY: CorrectionPolicy = CorrectionPolicy::FlipThenSkip;
pub const DEFAULT_WRITE_INDEX: bool = false;

// CHROM, POS, ID, REF, ALT
pub const MIN_DATA_FIELDS: usize = 5;
pub const CHROM_FIELD: usize = 0;
pub const POS_FIELD: usize = 1;
pub const REF_FIELD: usize = 3;
pub const ALT_FIELD: usize = 4;

pub const HEADER_PREFIX: u8 = b'#';
pub const ALT_ALLELE_SEPARATOR: &str = ",";

pub const PROGRESS_INTERVAL: u64 = 100_000;
