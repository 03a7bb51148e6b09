use core::ops::BitXorAssign;

/// Size of a block in bytes.
pub const BLOCK_SIZE: usize = 1024;

/// Size of a block in 64-bit words.
pub const QWORDS_IN_BLOCK: usize = BLOCK_SIZE / 8;

/// A fixed-size 1024-byte value: the unit the memory matrix is built from
/// (spec.md §3 "Block").
///
/// Stored as 128 native 64-bit words rather than raw bytes so the
/// compression function (§4.2) can operate on it directly; [`Block::as_bytes`]
/// / [`Block::load`] cross to the little-endian byte representation used
/// everywhere else (pre-hash seed, finalizer output, H′ input).
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct Block([u64; QWORDS_IN_BLOCK]);

impl Default for Block {
    fn default() -> Self {
        Block([0u64; QWORDS_IN_BLOCK])
    }
}

impl Block {
    /// View the block as its 128 constituent 64-bit words.
    pub(crate) fn as_words(&self) -> &[u64; QWORDS_IN_BLOCK] {
        &self.0
    }

    /// Mutable view of the block's 128 constituent 64-bit words.
    pub(crate) fn as_words_mut(&mut self) -> &mut [u64; QWORDS_IN_BLOCK] {
        &mut self.0
    }

    /// Load a block from a little-endian 1024-byte serialization.
    pub(crate) fn load(bytes: &[u8]) -> Self {
        debug_assert_eq!(bytes.len(), BLOCK_SIZE);
        let mut words = [0u64; QWORDS_IN_BLOCK];
        for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(8)) {
            *word = u64::from_le_bytes(chunk.try_into().unwrap());
        }
        Block(words)
    }

    /// Serialize the block to little-endian bytes (spec.md glossary:
    /// "Block — ... little-endian serialized").
    pub(crate) fn as_bytes(&self) -> [u8; BLOCK_SIZE] {
        let mut out = [0u8; BLOCK_SIZE];
        for (word, chunk) in self.0.iter().zip(out.chunks_exact_mut(8)) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        out
    }

    /// `compress(prev, ref) -> next` — the block compression function
    /// (spec.md §4.2).
    pub(crate) fn compress(prev: &Block, reference: &Block) -> Block {
        let mut r = *reference;
        for (word, p) in r.0.iter_mut().zip(prev.0.iter()) {
            *word ^= p;
        }
        let t = r;

        // Columns pass: P over each group of 16 consecutive words.
        for chunk in r.0.chunks_exact_mut(16) {
            let c: &mut [u64; 16] = chunk.try_into().unwrap();
            round(c);
        }

        // Rows pass: P over each "row" of 16 words strided by 16.
        for i in 0..8 {
            let base = 2 * i;
            let mut row = [
                r.0[base],
                r.0[base + 1],
                r.0[base + 16],
                r.0[base + 17],
                r.0[base + 32],
                r.0[base + 33],
                r.0[base + 48],
                r.0[base + 49],
                r.0[base + 64],
                r.0[base + 65],
                r.0[base + 80],
                r.0[base + 81],
                r.0[base + 96],
                r.0[base + 97],
                r.0[base + 112],
                r.0[base + 113],
            ];
            round(&mut row);
            let idx = [
                base,
                base + 1,
                base + 16,
                base + 17,
                base + 32,
                base + 33,
                base + 48,
                base + 49,
                base + 64,
                base + 65,
                base + 80,
                base + 81,
                base + 96,
                base + 97,
                base + 112,
                base + 113,
            ];
            for (slot, value) in idx.iter().zip(row.iter()) {
                r.0[*slot] = *value;
            }
        }

        let mut next = t;
        next ^= &r;
        next
    }

    /// Overwrite every word with zero using a write the optimizer cannot
    /// elide (spec.md §5/§9 "memory hygiene").
    pub(crate) fn wipe(&mut self) {
        for word in self.0.iter_mut() {
            // SAFETY: `word` is a valid, aligned, writable `u64` reference.
            unsafe { core::ptr::write_volatile(word, 0) };
        }
        core::sync::atomic::compiler_fence(core::sync::atomic::Ordering::SeqCst);
    }
}

impl BitXorAssign<&Block> for Block {
    fn bitxor_assign(&mut self, rhs: &Block) {
        for (word, rhs) in self.0.iter_mut().zip(rhs.0.iter()) {
            *word ^= rhs;
        }
    }
}

/// `fBlaMka(x, y) = x + y + 2 * (x mod 2^32) * (y mod 2^32)` (spec.md §4.1).
#[inline(always)]
fn f_bla_mka(x: u64, y: u64) -> u64 {
    let xy = (x & 0xFFFF_FFFF).wrapping_mul(y & 0xFFFF_FFFF);
    x.wrapping_add(y).wrapping_add(2u64.wrapping_mul(xy))
}

/// `G(a, b, c, d)` bitwise mix (spec.md §4.1).
#[inline(always)]
fn g(a: &mut u64, b: &mut u64, c: &mut u64, d: &mut u64) {
    *a = f_bla_mka(*a, *b);
    *d = (*d ^ *a).rotate_right(32);
    *c = f_bla_mka(*c, *d);
    *b = (*b ^ *c).rotate_right(24);
    *a = f_bla_mka(*a, *b);
    *d = (*d ^ *a).rotate_right(16);
    *c = f_bla_mka(*c, *d);
    *b = (*b ^ *c).rotate_right(63);
}

/// `P(v0..v15)`: `G` over the four columns, then the four diagonals
/// (spec.md §4.1).
#[inline(always)]
fn round(v: &mut [u64; 16]) {
    g16(v, 0, 4, 8, 12);
    g16(v, 1, 5, 9, 13);
    g16(v, 2, 6, 10, 14);
    g16(v, 3, 7, 11, 15);
    g16(v, 0, 5, 10, 15);
    g16(v, 1, 6, 11, 12);
    g16(v, 2, 7, 8, 13);
    g16(v, 3, 4, 9, 14);
}

#[inline(always)]
fn g16(v: &mut [u64; 16], a: usize, b: usize, c: usize, d: usize) {
    // Indices a, b, c, d are always pairwise distinct, so splitting the
    // array four ways is sound; done via raw pointers since the borrow
    // checker can't see that.
    let ptr = v.as_mut_ptr();
    unsafe {
        g(
            &mut *ptr.add(a),
            &mut *ptr.add(b),
            &mut *ptr.add(c),
            &mut *ptr.add(d),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compress_is_deterministic() {
        let a = Block::default();
        let mut b = Block::default();
        b.as_words_mut()[0] = 1;

        let out1 = Block::compress(&a, &b);
        let out2 = Block::compress(&a, &b);
        assert_eq!(out1.as_bytes(), out2.as_bytes());
    }

    #[test]
    fn compress_all_zero_is_zero() {
        let z = Block::default();
        let out = Block::compress(&z, &z);
        assert_eq!(out.as_bytes(), [0u8; BLOCK_SIZE]);
    }

    #[test]
    fn compress_is_sensitive_to_input() {
        let a = Block::default();
        let mut b = Block::default();
        b.as_words_mut()[0] = 1;
        let mut c = Block::default();
        c.as_words_mut()[0] = 2;

        let out_b = Block::compress(&a, &b);
        let out_c = Block::compress(&a, &c);
        assert_ne!(out_b.as_bytes(), out_c.as_bytes());
    }

    #[test]
    fn load_store_roundtrip() {
        let mut words = [0u64; QWORDS_IN_BLOCK];
        for (i, w) in words.iter_mut().enumerate() {
            *w = i as u64 * 0x0101_0101_0101_0101;
        }
        let block = Block(words);
        let bytes = block.as_bytes();
        let reloaded = Block::load(&bytes);
        assert_eq!(reloaded.as_bytes(), bytes);
    }
}
