use std::{num::ParseIntError, path::PathBuf};
use thiserror::Error;

pub type VcfCleanResult<T> = std::result::Result<T, VcfCleanError>;

#[derive(Debug, Error)]
pub enum VcfCleanError {
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Htslib(#[from] rust_htslib::errors::Error),
    #[error(transparent)]
    ParseInt(#[from] ParseIntError),
    #[error("Reference must contain exactly one sequence, found {found}")]
    MultipleOrMissingSequence { found: usize },
    #[error("Malformed FASTA record {record}: {message}")]
    MalformedFasta { record: usize, message: String },
    #[error("VCF line {line}: expected at least {expected} whitespace-separated fields, found {found}")]
    TooFewFields {
        line: u64,
        expected: usize,
        found: usize,
    },
    #[error(
        "VCF line {line}: CHROM '{found}' does not match reference sequence '{expected}'"
    )]
    ContigMismatch {
        line: u64,
        expected: String,
        found: String,
    },
    #[error("VCF line {line}: invalid POS '{value}', expected a 1-based integer")]
    InvalidPosition { line: u64, value: String },
    #[error("Cannot reverse complement allele '{allele}': unrecognized nucleotide '{base}'")]
    UnrecognizedBase { allele: String, base: char },
    #[error("Error reading VCF line {line}: {source}")]
    LineRead {
        line: u64,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid gzip header: {}", path.display())]
    InvalidGzipHeader { path: PathBuf },
}

impl VcfCleanError {
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

#[macro_export]
macro_rules! vcfclean_error {
    ($($arg:tt)*) => {
        $crate::error::VcfCleanError::message(format!($($arg)*))
    };
}
