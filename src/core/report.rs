use super::engine::CorrectionPolicy;
use crate::utils::util::format_number_with_commas;
use std::fmt;

/// Per-run accounting of the data lines seen by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingReport {
    pub policy: CorrectionPolicy,
    pub record_count: u64,
    pub skip_count: u64,
    pub flip_count: u64,
}

impl ProcessingReport {
    pub fn new(policy: CorrectionPolicy) -> Self {
        Self {
            policy,
            record_count: 0,
            skip_count: 0,
            flip_count: 0,
        }
    }

    /// Records that matched the reference as declared.
    pub fn matched(&self) -> u64 {
        self.record_count - self.skip_count - self.flip_count
    }
}

impl fmt::Display for ProcessingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.policy {
            CorrectionPolicy::SkipOnly => write!(
                f,
                "Skipped {} out of {} records",
                format_number_with_commas(self.skip_count),
                format_number_with_commas(self.record_count)
            ),
            CorrectionPolicy::FlipThenSkip => write!(
                f,
                "Skipped {} and flipped {} out of {} records",
                format_number_with_commas(self.skip_count),
                format_number_with_commas(self.flip_count),
                format_number_with_commas(self.record_count)
            ),
        }
    }
}
