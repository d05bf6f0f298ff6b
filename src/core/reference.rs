use crate::{error::VcfCleanError, utils::util::Result};
use noodles::fasta;
use std::io::BufRead;

/// A single named reference sequence held fully in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSequence {
    name: String,
    bases: Vec<u8>,
}

impl ReferenceSequence {
    pub fn new(name: impl Into<String>, bases: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bases: bases.into(),
        }
    }

    /// Reads FASTA text that must hold exactly one record.
    ///
    /// The record name is the first whitespace-delimited token of the definition line and the
    /// bases keep the case they are written in. Every record is read so that the error for a
    /// multi-record file reports the real record count.
    pub fn from_fasta_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut fasta_reader = fasta::io::Reader::new(reader);
        let mut first: Option<Self> = None;
        let mut n_records = 0usize;

        for result in fasta_reader.records() {
            n_records += 1;
            let record = result.map_err(|error| VcfCleanError::MalformedFasta {
                record: n_records,
                message: error.to_string(),
            })?;
            if first.is_some() {
                continue;
            }

            let name = std::str::from_utf8(record.name()).map_err(|error| {
                VcfCleanError::MalformedFasta {
                    record: n_records,
                    message: format!("sequence name is not valid UTF-8: {error}"),
                }
            })?;
            if name.is_empty() {
                return Err(VcfCleanError::MalformedFasta {
                    record: n_records,
                    message: "sequence header has no name".to_string(),
                });
            }
            let bases: &[u8] = record.sequence().as_ref();
            first = Some(Self::new(name, bases));
        }

        match (n_records, first) {
            (1, Some(reference)) => Ok(reference),
            (found, _) => Err(VcfCleanError::MultipleOrMissingSequence { found }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bases(&self) -> &[u8] {
        &self.bases
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// Returns `bases[start..start + len]`, truncated at the end of the sequence.
    pub fn window(&self, start: usize, len: usize) -> &[u8] {
        let start = start.min(self.bases.len());
        let end = start.saturating_add(len).min(self.bases.len());
        &self.bases[start..end]
    }
}
