#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/media/8f1a9894/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/media/8f1a9894/logo.svg"
)]
#![warn(rust_2018_idioms, missing_docs)]

#[cfg(feature = "alloc")]
#[macro_use]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod algorithm;
mod block;
mod error;
mod flags;
mod params;
mod segment_view;
mod util;
mod variable_hash;
mod version;

pub use crate::{
    algorithm::Algorithm,
    block::{Block, BLOCK_SIZE},
    error::{Error, Result},
    flags::Flags,
    params::{Params, ParamsBuilder},
    version::Version,
};

use crate::{block::QWORDS_IN_BLOCK, segment_view::SegmentView, util::secure_wipe, variable_hash::blake2b_long};
use blake2::{digest::Output, Blake2b512, Digest};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Maximum password length in bytes (spec.md §7; no documented minimum).
pub const MAX_PWD_LEN: usize = 0xFFFF_FFFF;

/// Minimum salt length in bytes (spec.md §4.10).
pub const MIN_SALT_LEN: usize = 8;

/// Maximum salt length in bytes.
pub const MAX_SALT_LEN: usize = 0xFFFF_FFFF;

/// Recommended salt length for password hashing in bytes.
pub const RECOMMENDED_SALT_LEN: usize = 16;

/// Maximum secret ("pepper") length in bytes.
pub const MAX_SECRET_LEN: usize = 0xFFFF_FFFF;

/// Maximum associated-data length in bytes.
pub const MAX_AD_LEN: usize = 0xFFFF_FFFF;

/// Number of synchronization points ("slices") between lanes per pass
/// (spec.md glossary).
pub(crate) const SYNC_POINTS: usize = 4;

/// Number of pseudo-random addresses produced by a single address-block
/// compression in data-independent mode (spec.md §4.7 step 2).
const ADDRESSES_IN_BLOCK: usize = 128;

/// The memory-hard key derivation context (spec.md §3 "Context" /
/// §6 "External interfaces").
///
/// Configures the [`Algorithm`] variant (D or I), the [`Version`], the cost
/// [`Params`], an optional secret ("pepper"), optional associated data, and
/// the [`Flags`] governing zeroization of sensitive buffers. Call one of
/// [`Argon2::hash_password_into`] / [`Argon2::hash_password_into_with_memory`]
/// to derive a key, or [`Argon2::fill_memory`] to run the engine without
/// paying for the finalization hash.
#[derive(Clone)]
pub struct Argon2<'key> {
    algorithm: Algorithm,
    version: Version,
    params: Params,
    secret: Option<&'key [u8]>,
    ad: Option<&'key [u8]>,
    flags: Flags,
}

impl Default for Argon2<'_> {
    fn default() -> Self {
        Self::new(Algorithm::default(), Version::default(), Params::default())
    }
}

impl<'key> Argon2<'key> {
    /// Create a new context with no secret and no associated data.
    pub fn new(algorithm: Algorithm, version: Version, params: Params) -> Self {
        Self {
            algorithm,
            version,
            params,
            secret: None,
            ad: None,
            flags: Flags::default(),
        }
    }

    /// Create a new context carrying a secret ("pepper"), absorbed into the
    /// pre-hash after the salt (spec.md §4.4).
    pub fn new_with_secret(
        secret: &'key [u8],
        algorithm: Algorithm,
        version: Version,
        params: Params,
    ) -> Result<Self> {
        if secret.len() > MAX_SECRET_LEN {
            return Err(Error::SecretTooLong);
        }

        Ok(Self {
            secret: Some(secret),
            ..Self::new(algorithm, version, params)
        })
    }

    /// Attach associated data, absorbed into the pre-hash last (spec.md
    /// §4.4).
    pub fn with_associated_data(mut self, ad: &'key [u8]) -> Result<Self> {
        if ad.len() > MAX_AD_LEN {
            return Err(Error::AdTooLong);
        }
        self.ad = Some(ad);
        Ok(self)
    }

    /// Override the default [`Flags`] (spec.md §9 "Configuration").
    pub fn with_flags(mut self, flags: Flags) -> Self {
        self.flags = flags;
        self
    }

    /// The configured addressing [`Algorithm`].
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// The configured [`Version`].
    pub fn version(&self) -> Version {
        self.version
    }

    /// The configured [`Flags`].
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Get the configured [`Params`].
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Hash a password and associated parameters into the provided output
    /// buffer, allocating the memory matrix on the heap.
    #[cfg(feature = "alloc")]
    #[cfg_attr(docsrs, doc(cfg(feature = "alloc")))]
    pub fn hash_password_into(&self, pwd: &mut [u8], salt: &[u8], out: &mut [u8]) -> Result<()> {
        let mut blocks = vec![Block::default(); self.params.block_count()];
        self.hash_password_into_with_memory(pwd, salt, out, &mut blocks)
    }

    /// Hash a password and associated parameters into the provided output
    /// buffer.
    ///
    /// This method takes an explicit `memory_blocks` parameter which allows
    /// the caller to provide the backing storage for the algorithm's state:
    ///
    /// - Users with the `alloc` feature enabled can use
    ///   [`Argon2::hash_password_into`] to have it allocated for them.
    /// - `no_std` users on "heapless" targets can use an array of the
    ///   [`Block`] type to stack-allocate this buffer.
    ///
    /// `pwd` is taken mutably so that [`Flags::clear_password`] can zero it
    /// in place immediately after it is absorbed into the pre-hash
    /// (spec.md §4.4).
    pub fn hash_password_into_with_memory(
        &self,
        pwd: &mut [u8],
        salt: &[u8],
        out: &mut [u8],
        mut memory_blocks: impl AsMut<[Block]>,
    ) -> Result<()> {
        self.verify_output(out)?;
        Self::verify_inputs(pwd, salt, self.secret, self.ad)?;

        let initial_hash = self.initial_hash(pwd, salt, out.len());
        self.clear_password_if_requested(pwd);

        self.fill_blocks(memory_blocks.as_mut(), initial_hash)?;
        let result = self.finalize(memory_blocks.as_mut(), out);

        if self.flags.clear_memory {
            for block in memory_blocks.as_mut() {
                block.wipe();
            }
        }

        result
    }

    /// Use a password and associated parameters only to fill the given
    /// memory blocks.
    ///
    /// This method omits the calculation of the finalization hash and can be
    /// used when only the filled memory is required (e.g. for testing or
    /// benchmarking the engine in isolation). It is not necessary to call
    /// this method before calling any of the hashing functions.
    pub fn fill_memory(
        &self,
        pwd: &mut [u8],
        salt: &[u8],
        mut memory_blocks: impl AsMut<[Block]>,
    ) -> Result<()> {
        Self::verify_inputs(pwd, salt, self.secret, self.ad)?;

        let initial_hash = self.initial_hash(pwd, salt, 0);
        self.clear_password_if_requested(pwd);

        self.fill_blocks(memory_blocks.as_mut(), initial_hash)
    }

    fn clear_password_if_requested(&self, pwd: &mut [u8]) {
        if self.flags.clear_password {
            secure_wipe(pwd);
        }
    }

    fn fill_blocks(&self, memory_blocks: &mut [Block], mut initial_hash: Output<Blake2b512>) -> Result<()> {
        let block_count = self.params.block_count();
        let memory_blocks = memory_blocks
            .get_mut(..block_count)
            .ok_or(Error::MemoryTooLittleForParams)?;

        let lanes = self.params.lanes();

        // Initialize the first two blocks in each lane (spec.md §4.5).
        for (l, lane) in memory_blocks
            .chunks_exact_mut(self.params.lane_length())
            .enumerate()
        {
            for (i, block) in lane[..2].iter_mut().enumerate() {
                let i = i as u32;
                let l = l as u32;

                let mut buf = [0u8; BLOCK_SIZE];
                blake2b_long(
                    &[&initial_hash[..], &i.to_le_bytes(), &l.to_le_bytes()],
                    &mut buf,
                )?;
                *block = Block::load(&buf);
            }
        }

        secure_wipe(&mut initial_hash);

        // Needed because raw pointer types do not implement Send + Sync.
        let memory_ptr = memory_blocks.as_mut_ptr() as usize;

        let fill_segment = |pass: usize, slice: usize, lane: usize| {
            let data_independent_addressing = self.algorithm.is_data_independent();

            let mut address_block = Block::default();
            let mut input_block = Block::default();
            let zero_block = Block::default();

            if data_independent_addressing {
                let words = input_block.as_words_mut();
                words[0] = pass as u64;
                words[1] = lane as u64;
                words[2] = slice as u64;
                words[3] = self.params.block_count() as u64;
                words[4] = self.params.iterations() as u64;
                words[5] = self.algorithm as u64;

                if pass == 0 && slice == 0 {
                    // Prime the address block so indices starting at 2
                    // (blocks 0 and 1 are already initialized) are covered.
                    Self::update_address_block(&mut address_block, &mut input_block, &zero_block);
                }
            }

            let rng = |b: usize, prev_block: &Block| {
                if data_independent_addressing {
                    let address_index = b % ADDRESSES_IN_BLOCK;

                    if address_index == 0 {
                        Self::update_address_block(
                            &mut address_block,
                            &mut input_block,
                            &zero_block,
                        );
                    }

                    address_block.as_words()[address_index]
                } else {
                    prev_block.as_words()[0]
                }
            };

            // SAFETY:
            // - `memory_ptr` is valid, and we have checked the slice contains
            //   enough blocks.
            // - `pass` and `slice` are valid because of the for-loop ranges
            //   below.
            // - Each invocation of the closure is guaranteed to be called
            //   with a different value for `lane`, and the [`SegmentView`]
            //   does not outlive the closure body.
            let seg = unsafe {
                SegmentView::new(memory_ptr as *mut _, pass, slice, lane, &self.params, rng)
            };

            // Fill blocks in the segment (spec.md §4.7); this engine always
            // overwrites rather than XOR-accumulating on pass > 0 (spec.md
            // §3, §9 "Overwrite vs XOR-accumulate").
            for (cur_block, prev_block, ref_block) in seg {
                *cur_block = Block::compress(prev_block, ref_block);
            }
        };

        // Run passes over the memory matrix, synchronizing at each of the
        // four slices per pass (spec.md §4.8).
        for pass in 0..self.params.iterations() as usize {
            for slice in 0..SYNC_POINTS {
                #[cfg(feature = "parallel")]
                {
                    let threads = self.params.threads().max(1);
                    match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
                        Ok(pool) => pool.install(|| {
                            (0..lanes)
                                .into_par_iter()
                                .for_each(|lane| fill_segment(pass, slice, lane))
                        }),
                        Err(_) => return Err(Error::WorkerFailure),
                    }
                }

                #[cfg(not(feature = "parallel"))]
                {
                    for lane in 0..lanes {
                        fill_segment(pass, slice, lane);
                    }
                }
            }
        }

        Ok(())
    }

    fn finalize(&self, memory_blocks: &[Block], out: &mut [u8]) -> Result<()> {
        let lane_length = self.params.lane_length();

        let mut blockhash = memory_blocks[lane_length - 1];

        // XOR in the last block of every other lane (spec.md §4.9).
        for l in 1..self.params.lanes() {
            let last_block_in_lane = l * lane_length + (lane_length - 1);
            blockhash ^= &memory_blocks[last_block_in_lane];
        }

        let bytes = blockhash.as_bytes();
        let result = blake2b_long(&[&bytes[..]], out);

        blockhash.wipe();
        result
    }

    /// Compute the next address block: `compress(zero, input)` then
    /// `compress(zero, address)`, after incrementing the counter word
    /// (spec.md §4.7 step 2).
    fn update_address_block(address_block: &mut Block, input_block: &mut Block, zero_block: &Block) {
        input_block.as_words_mut()[6] += 1;
        *address_block = Block::compress(zero_block, input_block);
        *address_block = Block::compress(zero_block, address_block);
    }

    /// Hash all the inputs into the 64-byte pre-hash seed H₀ (spec.md §4.4).
    fn initial_hash(&self, pwd: &[u8], salt: &[u8], out_len: usize) -> Output<Blake2b512> {
        let mut digest = Blake2b512::new();
        digest.update((self.params.lanes() as u32).to_le_bytes());
        digest.update((out_len as u32).to_le_bytes());
        digest.update(self.params.m_cost().to_le_bytes());
        digest.update(self.params.t_cost().to_le_bytes());
        digest.update(self.version.to_le_bytes());
        digest.update(self.algorithm.to_le_bytes());

        digest.update((pwd.len() as u32).to_le_bytes());
        digest.update(pwd);

        digest.update((salt.len() as u32).to_le_bytes());
        digest.update(salt);

        match self.secret {
            Some(secret) => {
                digest.update((secret.len() as u32).to_le_bytes());
                digest.update(secret);
            }
            None => digest.update(0u32.to_le_bytes()),
        }

        match self.ad {
            Some(ad) => {
                digest.update((ad.len() as u32).to_le_bytes());
                digest.update(ad);
            }
            None => digest.update(0u32.to_le_bytes()),
        }

        digest.finalize()
    }

    fn verify_output(&self, out: &[u8]) -> Result<()> {
        if out.is_empty() {
            return Err(Error::OutputAbsent);
        }
        if out.len() < self.params.output_len().unwrap_or(Params::MIN_OUTPUT_LEN) {
            return Err(Error::OutputTooShort);
        }
        if out.len() > self.params.output_len().unwrap_or(Params::MAX_OUTPUT_LEN) {
            return Err(Error::OutputTooLong);
        }
        Ok(())
    }

    /// Validate password, salt, secret and associated-data bounds (spec.md
    /// §4.10). Password, secret and AD have no documented minimum, so their
    /// "too short" error kinds are currently unreachable; they remain part
    /// of [`Error`] for parity with spec.md §7.
    fn verify_inputs(pwd: &[u8], salt: &[u8], secret: Option<&[u8]>, ad: Option<&[u8]>) -> Result<()> {
        if pwd.len() > MAX_PWD_LEN {
            return Err(Error::PwdTooLong);
        }

        if salt.len() < MIN_SALT_LEN {
            return Err(Error::SaltTooShort);
        }
        if salt.len() > MAX_SALT_LEN {
            return Err(Error::SaltTooLong);
        }

        if let Some(secret) = secret {
            if secret.len() > MAX_SECRET_LEN {
                return Err(Error::SecretTooLong);
            }
        }

        if let Some(ad) = ad {
            if ad.len() > MAX_AD_LEN {
                return Err(Error::AdTooLong);
            }
        }

        Ok(())
    }
}

impl<'key> From<Params> for Argon2<'key> {
    fn from(params: Params) -> Self {
        Self::new(Algorithm::default(), Version::default(), params)
    }
}

impl<'key> From<&Params> for Argon2<'key> {
    fn from(params: &Params) -> Self {
        Self::from(*params)
    }
}
