use super::{
    dna::{reverse_complement, reverse_complement_alleles},
    record::{is_header_line, split_terminator, DataRecord},
    reference::ReferenceSequence,
    report::ProcessingReport,
};
use crate::{
    constants::{ALT_ALLELE_SEPARATOR, PROGRESS_INTERVAL},
    error::VcfCleanError,
    utils::util::{format_number_with_commas, Result},
};
use clap::ValueEnum;

/// What to do with a record whose REF disagrees with the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CorrectionPolicy {
    /// Drop every mismatching record
    SkipOnly,
    /// Try reverse complementing REF and ALT first, drop the record if that does not match either
    FlipThenSkip,
}

/// Outcome of checking one data record against the reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Match,
    Flipped {
        ref_allele: String,
        alt_alleles: String,
    },
    Skipped {
        actual: String,
        flipped_ref: Option<String>,
    },
}

fn matches_reference(reference: &ReferenceSequence, start: usize, allele: &str) -> bool {
    reference
        .window(start, allele.len())
        .eq_ignore_ascii_case(allele.as_bytes())
}

/// Compares a record's REF to the reference, attempting a strand flip when the policy allows it.
///
/// A flip attempt reverse complements REF and every ALT allele up front, so an allele that has
/// no complement is fatal even when the flipped REF would not have matched.
///
/// POS is never adjusted when flipping, so an indel whose reverse complement would start at a
/// different coordinate is not recovered.
pub fn classify(
    reference: &ReferenceSequence,
    record: &DataRecord<'_>,
    policy: CorrectionPolicy,
) -> Result<Classification> {
    let start = record.start();
    let ref_allele = record.ref_allele();
    if matches_reference(reference, start, ref_allele) {
        return Ok(Classification::Match);
    }

    let actual = String::from_utf8_lossy(reference.window(start, ref_allele.len())).into_owned();
    match policy {
        CorrectionPolicy::SkipOnly => Ok(Classification::Skipped {
            actual,
            flipped_ref: None,
        }),
        CorrectionPolicy::FlipThenSkip => {
            let fixed_ref = reverse_complement(ref_allele)?;
            let fixed_alt =
                reverse_complement_alleles(record.alt_alleles(), ALT_ALLELE_SEPARATOR)?;
            if !matches_reference(reference, start, &fixed_ref) {
                return Ok(Classification::Skipped {
                    actual,
                    flipped_ref: Some(fixed_ref),
                });
            }
            Ok(Classification::Flipped {
                ref_allele: fixed_ref,
                alt_alleles: fixed_alt,
            })
        }
    }
}

/// Single-pass REF consistency checker over a VCF line stream.
///
/// Header lines pass through untouched, data lines are emitted as-is, emitted with flipped
/// alleles, or dropped. Counters live in the engine's own [`ProcessingReport`].
pub struct ConsistencyEngine<'r> {
    reference: &'r ReferenceSequence,
    report: ProcessingReport,
    line_number: u64,
}

impl<'r> ConsistencyEngine<'r> {
    pub fn new(reference: &'r ReferenceSequence, policy: CorrectionPolicy) -> Self {
        Self {
            reference,
            report: ProcessingReport::new(policy),
            line_number: 0,
        }
    }

    pub fn policy(&self) -> CorrectionPolicy {
        self.report.policy
    }

    pub fn report(&self) -> &ProcessingReport {
        &self.report
    }

    pub fn into_report(self) -> ProcessingReport {
        self.report
    }

    /// Handles one raw input line (terminator included) and returns the line to emit, if any.
    pub fn process_line(&mut self, line: String) -> Result<Option<String>> {
        self.line_number += 1;
        if is_header_line(&line) {
            return Ok(Some(line));
        }

        let (body, terminator) = split_terminator(&line);
        let record = DataRecord::parse(body, self.line_number)?;
        if record.chrom() != self.reference.name() {
            return Err(VcfCleanError::ContigMismatch {
                line: self.line_number,
                expected: self.reference.name().to_string(),
                found: record.chrom().to_string(),
            });
        }

        self.report.record_count += 1;
        if self.report.record_count % PROGRESS_INTERVAL == 0 {
            log::debug!(
                "Processed {} records (pos {})",
                format_number_with_commas(self.report.record_count),
                record.pos()
            );
        }

        match classify(self.reference, &record, self.report.policy)? {
            Classification::Match => Ok(Some(line)),
            Classification::Flipped {
                ref_allele,
                alt_alleles,
            } => {
                self.report.flip_count += 1;
                log::info!(
                    "Flipping VCF variant at {} with ref {} alt {} to reverse complement ref {} alt {}",
                    record.pos(),
                    record.ref_allele(),
                    record.alt_alleles(),
                    ref_allele,
                    alt_alleles
                );
                let mut fixed = record.with_alleles(&ref_allele, &alt_alleles);
                fixed.push_str(terminator);
                Ok(Some(fixed))
            }
            Classification::Skipped {
                actual,
                flipped_ref,
            } => {
                self.report.skip_count += 1;
                match flipped_ref {
                    None => log::warn!(
                        "Skipping VCF variant at {} with ref {} because it does not match fasta {}",
                        record.pos(),
                        record.ref_allele(),
                        actual
                    ),
                    Some(flipped_ref) => log::warn!(
                        "Skipping VCF variant at {} with ref {} because it does not match fasta {}, even after reversing to {}",
                        record.pos(),
                        record.ref_allele(),
                        actual,
                        flipped_ref
                    ),
                }
                Ok(None)
            }
        }
    }

    /// Wraps a line source into a lazy iterator of output lines.
    pub fn process<I>(self, lines: I) -> Reconcile<'r, I>
    where
        I: Iterator<Item = Result<String>>,
    {
        Reconcile {
            engine: self,
            lines,
            done: false,
        }
    }
}

/// Lazy output stream of a [`ConsistencyEngine`]. Stops after the first error.
pub struct Reconcile<'r, I> {
    engine: ConsistencyEngine<'r>,
    lines: I,
    done: bool,
}

impl<'r, I> Reconcile<'r, I> {
    pub fn report(&self) -> &ProcessingReport {
        self.engine.report()
    }

    pub fn into_report(self) -> ProcessingReport {
        self.engine.into_report()
    }
}

impl<I> Iterator for Reconcile<'_, I>
where
    I: Iterator<Item = Result<String>>,
{
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let result = match self.lines.next()? {
                Ok(line) => self.engine.process_line(line),
                Err(e) => Err(e),
            };
            match result {
                Ok(Some(line)) => return Some(Ok(line)),
                Ok(None) => continue,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}
