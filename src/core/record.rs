use crate::{
    constants::{
        ALT_FIELD, CHROM_FIELD, HEADER_PREFIX, MIN_DATA_FIELDS, POS_FIELD, REF_FIELD,
    },
    error::VcfCleanError,
    utils::util::Result,
};

pub fn is_header_line(line: &str) -> bool {
    line.as_bytes().first() == Some(&HEADER_PREFIX)
}

/// Splits a raw line into its body and its line terminator (`\n`, `\r\n` or nothing).
pub fn split_terminator(line: &str) -> (&str, &str) {
    let body = line.strip_suffix('\n').unwrap_or(line);
    let body = body.strip_suffix('\r').unwrap_or(body);
    line.split_at(body.len())
}

/// Byte ranges of the whitespace-delimited fields of a line body.
fn field_spans(body: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut field_start = None;
    for (offset, c) in body.char_indices() {
        match (c.is_whitespace(), field_start) {
            (true, Some(start)) => {
                spans.push((start, offset));
                field_start = None;
            }
            (false, None) => field_start = Some(offset),
            _ => {}
        }
    }
    if let Some(start) = field_start {
        spans.push((start, body.len()));
    }
    spans
}

/// Borrowed view of a VCF data line split on runs of whitespace.
///
/// The separators themselves are kept so that a line can be rebuilt byte for byte with only
/// REF and ALT swapped out.
#[derive(Debug, Clone)]
pub struct DataRecord<'a> {
    body: &'a str,
    spans: Vec<(usize, usize)>,
    pos: u64,
}

impl<'a> DataRecord<'a> {
    /// Parses a data line body (without terminator). `line_number` is only used for errors.
    pub fn parse(body: &'a str, line_number: u64) -> Result<Self> {
        let spans = field_spans(body);
        if spans.len() < MIN_DATA_FIELDS {
            return Err(VcfCleanError::TooFewFields {
                line: line_number,
                expected: MIN_DATA_FIELDS,
                found: spans.len(),
            });
        }

        let (pos_start, pos_end) = spans[POS_FIELD];
        let raw_pos = &body[pos_start..pos_end];
        // Positions beyond u64 saturate; they lie past any reference and never match.
        let pos = if raw_pos.bytes().all(|b| b.is_ascii_digit()) {
            raw_pos.parse::<u64>().unwrap_or(u64::MAX)
        } else {
            0
        };
        if pos == 0 {
            return Err(VcfCleanError::InvalidPosition {
                line: line_number,
                value: raw_pos.to_string(),
            });
        }

        Ok(Self { body, spans, pos })
    }

    fn field(&self, index: usize) -> &'a str {
        let (start, end) = self.spans[index];
        &self.body[start..end]
    }

    pub fn chrom(&self) -> &'a str {
        self.field(CHROM_FIELD)
    }

    /// 1-based position of the first REF base.
    pub fn pos(&self) -> u64 {
        self.pos
    }

    /// 0-based offset of the first REF base, saturated to `usize::MAX`.
    pub fn start(&self) -> usize {
        usize::try_from(self.pos - 1).unwrap_or(usize::MAX)
    }

    pub fn ref_allele(&self) -> &'a str {
        self.field(REF_FIELD)
    }

    pub fn alt_alleles(&self) -> &'a str {
        self.field(ALT_FIELD)
    }

    /// Rebuilds the line body with REF and ALT replaced; everything else is kept verbatim.
    pub fn with_alleles(&self, ref_allele: &str, alt_alleles: &str) -> String {
        let (ref_start, ref_end) = self.spans[REF_FIELD];
        let (alt_start, alt_end) = self.spans[ALT_FIELD];
        let mut fixed =
            String::with_capacity(self.body.len() + ref_allele.len() + alt_alleles.len());
        fixed.push_str(&self.body[..ref_start]);
        fixed.push_str(ref_allele);
        fixed.push_str(&self.body[ref_end..alt_start]);
        fixed.push_str(alt_alleles);
        fixed.push_str(&self.body[alt_end..]);
        fixed
    }
}
