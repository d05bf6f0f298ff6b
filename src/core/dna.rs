//! Nucleotide complement helpers used when repairing strand-flipped alleles.

use crate::{error::VcfCleanError, utils::util::Result};

/// Returns the Watson-Crick complement of an IUPAC nucleotide code, preserving case.
///
/// Returns `None` for anything outside the IUPAC nucleotide alphabet (e.g. `*`, `.`,
/// symbolic allele brackets, digits).
#[inline]
#[must_use]
pub const fn complement_base(base: u8) -> Option<u8> {
    let complement = match base {
        b'A' => b'T',
        b'T' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        b'a' => b't',
        b't' => b'a',
        b'c' => b'g',
        b'g' => b'c',
        b'N' | b'S' | b'W' | b'n' | b's' | b'w' => base,
        b'R' => b'Y',
        b'Y' => b'R',
        b'K' => b'M',
        b'M' => b'K',
        b'B' => b'V',
        b'V' => b'B',
        b'D' => b'H',
        b'H' => b'D',
        b'r' => b'y',
        b'y' => b'r',
        b'k' => b'm',
        b'm' => b'k',
        b'b' => b'v',
        b'v' => b'b',
        b'd' => b'h',
        b'h' => b'd',
        _ => return None,
    };
    Some(complement)
}

/// Reverse complements a single allele, preserving case.
///
/// Fails on the first character that has no complement rather than passing it through.
pub fn reverse_complement(allele: &str) -> Result<String> {
    allele
        .bytes()
        .rev()
        .map(|base| {
            complement_base(base).map(char::from).ok_or_else(|| {
                VcfCleanError::UnrecognizedBase {
                    allele: allele.to_string(),
                    base: char::from(base),
                }
            })
        })
        .collect()
}

/// Reverse complements every allele of a comma-separated ALT field, keeping allele order.
pub fn reverse_complement_alleles(alleles: &str, separator: &str) -> Result<String> {
    let flipped = alleles
        .split(separator)
        .map(reverse_complement)
        .collect::<Result<Vec<_>>>()?;
    Ok(flipped.join(separator))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complement_base() {
        assert_eq!(complement_base(b'A'), Some(b'T'));
        assert_eq!(complement_base(b'T'), Some(b'A'));
        assert_eq!(complement_base(b'C'), Some(b'G'));
        assert_eq!(complement_base(b'G'), Some(b'C'));

        // Case preserved
        assert_eq!(complement_base(b'a'), Some(b't'));
        assert_eq!(complement_base(b'g'), Some(b'c'));

        assert_eq!(complement_base(b'N'), Some(b'N'));
        assert_eq!(complement_base(b'R'), Some(b'Y'));
        assert_eq!(complement_base(b'k'), Some(b'm'));
        assert_eq!(complement_base(b'B'), Some(b'V'));
        assert_eq!(complement_base(b'D'), Some(b'H'));

        for code in [b'*', b'.', b'<', b'>', b'0', b'U', b'-'] {
            assert_eq!(complement_base(code), None);
        }
    }

    #[test]
    fn test_complement_base_is_an_involution() {
        for base in b"ACGTNRYKMSWBDHVacgtnrykmswbdhv" {
            let complement = complement_base(*base).unwrap();
            assert_eq!(complement_base(complement), Some(*base));
        }
    }

    #[test]
    fn test_reverse_complement() {
        assert_eq!(reverse_complement("AC").unwrap(), "GT");
        assert_eq!(reverse_complement("GG").unwrap(), "CC");
        assert_eq!(reverse_complement("ACGTN").unwrap(), "NACGT");
        assert_eq!(reverse_complement("aCgT").unwrap(), "AcGt");
        assert_eq!(reverse_complement("").unwrap(), "");
    }

    #[test]
    fn test_reverse_complement_rejects_unknown_base() {
        let err = reverse_complement("A*").unwrap_err();
        assert!(matches!(
            err,
            VcfCleanError::UnrecognizedBase { ref allele, base: '*' } if allele == "A*"
        ));
        assert!(reverse_complement("<DEL>").is_err());
    }

    #[test]
    fn test_reverse_complement_alleles() {
        assert_eq!(reverse_complement_alleles("GG", ",").unwrap(), "CC");
        assert_eq!(
            reverse_complement_alleles("A,CT,GGA", ",").unwrap(),
            "T,AG,TCC"
        );
        assert!(reverse_complement_alleles("A,.", ",").is_err());
    }
}
