//! IUPAC nucleotide complements.

use crate::errors::UnknownBaseError;

const IUPAC: &[u8; 15] = b"ACGTMKRYWSVBHDN";
const IUPAC_COMP: &[u8; 15] = b"TGCAKMYRWSBVDHN";
// bit sets over A=1, C=2, G=4, T=8
const IUPAC_BITS: [u8; 15] = [1, 2, 4, 8, 3, 12, 5, 10, 9, 6, 7, 14, 11, 13, 15];

/// Complement of each byte, or 0 if the byte is not an IUPAC code.
///
/// Lower case codes map to upper case complements.
pub const COMPLEMENT: [u8; 256] = {
    let mut comp = [0u8; 256];
    let mut i = 0;

    while i < IUPAC.len() {
        comp[IUPAC[i] as usize] = IUPAC_COMP[i];
        comp[IUPAC[i].to_ascii_lowercase() as usize] = IUPAC_COMP[i];
        i += 1;
    }

    comp
};

/// Set of concrete bases represented by each upper case IUPAC code, or 0.
pub const BASE_SET: [u8; 256] = {
    let mut bits = [0u8; 256];
    let mut i = 0;

    while i < IUPAC.len() {
        bits[IUPAC[i] as usize] = IUPAC_BITS[i];
        i += 1;
    }

    bits
};

pub fn complement(base: u8) -> Result<u8, UnknownBaseError> {
    match COMPLEMENT[base as usize] {
        0 => Err(UnknownBaseError(base)),
        c => Ok(c),
    }
}

/// Upper case, complement, and reverse a sequence.
pub fn revcomp(seq: &[u8]) -> Result<Vec<u8>, UnknownBaseError> {
    seq.iter().rev().map(|&b| complement(b)).collect()
}

/// Whether a read base is covered by a (possibly degenerate) primer code.
///
/// A degenerate read base only matches if every base it stands for is allowed
/// by the primer code, so `N` in a read only matches `N` in a primer.
#[inline]
pub fn iupac_covers(primer: u8, read: u8) -> bool {
    let r = BASE_SET[read as usize];
    r != 0 && (r & !BASE_SET[primer as usize]) == 0
}

/// All upper case IUPAC codes covered by `primer`, in a fixed order.
pub fn covered_codes(primer: u8) -> impl Iterator<Item = u8> {
    IUPAC.iter().copied().filter(move |&c| iupac_covers(primer, c))
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoshiro256PlusPlus;

    use super::*;

    #[test]
    fn test_complement_pairs() {
        for (&a, &b) in b"ACMRWSVHN".iter().zip(b"TGKYWSBDN") {
            assert_eq!(complement(a), Ok(b));
            assert_eq!(complement(b), Ok(a));
        }
        assert_eq!(complement(b'g'), Ok(b'C'));
    }

    #[test]
    fn test_revcomp() {
        assert_eq!(revcomp(b"AACGTN").unwrap(), b"NACGTT");
        assert_eq!(revcomp(b"acgR").unwrap(), b"YCGT");
        assert_eq!(revcomp(b"").unwrap(), b"");
        assert_eq!(revcomp(b"ACXT"), Err(UnknownBaseError(b'X')));
        assert_eq!(revcomp(b"AC-T"), Err(UnknownBaseError(b'-')));
    }

    #[test]
    fn test_revcomp_involution() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(0);
        let alphabet = b"ACGTMKRYWSVBHDNacgtmkrywsvbhdn";

        for _ in 0..100 {
            let len = rng.gen_range(0..64);
            let seq = (0..len)
                .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
                .collect::<Vec<_>>();

            let twice = revcomp(&revcomp(&seq).unwrap()).unwrap();
            assert_eq!(twice, seq.to_ascii_uppercase());
        }
    }

    #[test]
    fn test_iupac_covers() {
        assert!(iupac_covers(b'N', b'A'));
        assert!(iupac_covers(b'R', b'G'));
        assert!(!iupac_covers(b'R', b'C'));
        assert!(iupac_covers(b'R', b'R'));
        assert!(!iupac_covers(b'A', b'N'));
        assert!(!iupac_covers(b'N', b'X'));

        let codes = covered_codes(b'Y').collect::<Vec<_>>();
        assert_eq!(codes, b"CTY");
    }
}
