//! Variable-length output hash H′ (spec.md §4.3), built on top of BLAKE2b.

use crate::error::{Error, Result};
use blake2::{
    digest::{Update, VariableOutput},
    Blake2b512, Blake2bVar, Digest,
};

const BLAKE2B_OUT_BYTES: usize = 64;

/// Computes H′ over the concatenation of `inputs`, writing exactly
/// `out.len()` bytes to `out`.
///
/// Matches the Argon2 reference byte-for-byte: the 4-byte little-endian
/// output length is absorbed before any of `inputs`, and for outputs over
/// 64 bytes the digest is produced in 32-byte halves of successive
/// BLAKE2b-512 hashes, with a final short hash for the remainder.
pub(crate) fn blake2b_long(inputs: &[&[u8]], out: &mut [u8]) -> Result<()> {
    if out.is_empty() {
        return Err(Error::OutputAbsent);
    }

    let out_len_bytes = (out.len() as u32).to_le_bytes();

    if out.len() <= BLAKE2B_OUT_BYTES {
        let mut hasher = Blake2bVar::new(out.len()).map_err(|_| Error::OutputTooLong)?;
        hasher.update(&out_len_bytes);
        for input in inputs {
            hasher.update(input);
        }
        hasher
            .finalize_variable(out)
            .map_err(|_| Error::OutputTooLong)?;
        return Ok(());
    }

    let mut hasher = Blake2b512::new();
    Digest::update(&mut hasher, out_len_bytes);
    for input in inputs {
        Digest::update(&mut hasher, input);
    }
    let mut v = hasher.finalize();

    let (head, mut rest) = out.split_at_mut(BLAKE2B_OUT_BYTES / 2);
    head.copy_from_slice(&v[..BLAKE2B_OUT_BYTES / 2]);

    while rest.len() > BLAKE2B_OUT_BYTES {
        v = Blake2b512::digest(v);
        let (h, r) = rest.split_at_mut(BLAKE2B_OUT_BYTES / 2);
        h.copy_from_slice(&v[..BLAKE2B_OUT_BYTES / 2]);
        rest = r;
    }

    let mut hasher = Blake2bVar::new(rest.len()).map_err(|_| Error::OutputTooLong)?;
    hasher.update(&v);
    hasher
        .finalize_variable(rest)
        .map_err(|_| Error::OutputTooLong)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_output_matches_length() {
        let mut out = [0u8; 32];
        blake2b_long(&[b"hello"], &mut out).unwrap();
        assert_ne!(out, [0u8; 32]);
    }

    #[test]
    fn long_output_is_deterministic() {
        let mut out1 = [0u8; 256];
        let mut out2 = [0u8; 256];
        blake2b_long(&[b"a input", b"b input"], &mut out1).unwrap();
        blake2b_long(&[b"a input", b"b input"], &mut out2).unwrap();
        assert_eq!(out1, out2);
    }

    #[test]
    fn differing_inputs_differ() {
        let mut out1 = [0u8; 256];
        let mut out2 = [0u8; 256];
        blake2b_long(&[b"a"], &mut out1).unwrap();
        blake2b_long(&[b"b"], &mut out2).unwrap();
        assert_ne!(out1, out2);
    }

    #[test]
    fn rejects_empty_output() {
        let mut out = [0u8; 0];
        assert_eq!(blake2b_long(&[b"x"], &mut out), Err(Error::OutputAbsent));
    }
}
