//! Cost parameters (spec.md §4.10, §6).

use crate::error::{Error, Result};

/// Number of synchronization points ("slices") per pass (spec.md glossary).
pub(crate) const SYNC_POINTS: usize = 4;

/// Parameters controlling the shape and cost of the memory matrix.
///
/// Built via [`Params::new`] or [`ParamsBuilder`]. Validation happens at
/// construction time so that a `Params` value is always internally
/// consistent; [`Params::block_count`] reflects the *aligned* memory cost
/// (spec.md §4.10's "after alignment" step), not the raw `m_cost` passed
/// in.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Params {
    m_cost: u32,
    t_cost: u32,
    lanes: u32,
    threads: u32,
    output_len: Option<usize>,
}

impl Params {
    /// Minimum output digest size in bytes.
    pub const MIN_OUTPUT_LEN: usize = 4;

    /// Maximum output digest size in bytes.
    pub const MAX_OUTPUT_LEN: usize = 0xFFFF_FFFF;

    /// Default output digest size in bytes, used when `output_len` is unset.
    pub const DEFAULT_OUTPUT_LEN: usize = 32;

    /// Maximum password length in bytes.
    pub const MAX_PWD_LEN: usize = 0xFFFF_FFFF;

    /// Minimum salt length in bytes.
    pub const MIN_SALT_LEN: usize = 8;

    /// Maximum salt length in bytes.
    pub const MAX_SALT_LEN: usize = 0xFFFF_FFFF;

    /// Maximum secret ("pepper") length in bytes.
    pub const MAX_SECRET_LEN: usize = 0xFFFF_FFFF;

    /// Maximum associated data length in bytes.
    pub const MAX_AD_LEN: usize = 0xFFFF_FFFF;

    /// Maximum number of lanes.
    pub const MAX_LANES: u32 = 0xFF_FFFF;

    /// Maximum number of threads.
    pub const MAX_THREADS: u32 = 0xFF_FFFF;

    /// Build validated parameters: `m_cost` in 1024-byte blocks, `t_cost`
    /// in passes, `p_cost` lanes (also the default thread count), and an
    /// optional fixed output length.
    pub fn new(
        m_cost: u32,
        t_cost: u32,
        p_cost: u32,
        output_len: Option<usize>,
    ) -> Result<Self> {
        ParamsBuilder::new()
            .m_cost(m_cost)
            .t_cost(t_cost)
            .lanes(p_cost)
            .threads(p_cost)
            .output_len_opt(output_len)
            .build()
    }

    /// Memory cost in 1024-byte blocks, *before* alignment.
    pub fn m_cost(&self) -> u32 {
        self.m_cost
    }

    /// Number of passes over the memory matrix.
    pub fn t_cost(&self) -> u32 {
        self.t_cost
    }

    /// Alias for [`Params::t_cost`].
    pub fn iterations(&self) -> u32 {
        self.t_cost
    }

    /// Number of parallel lanes.
    pub fn lanes(&self) -> usize {
        self.lanes as usize
    }

    /// Number of worker threads used to process the `lanes` segments of
    /// each slice. Always `<= lanes`.
    pub fn threads(&self) -> usize {
        self.threads as usize
    }

    /// Requested output length, if fixed.
    pub fn output_len(&self) -> Option<usize> {
        self.output_len
    }

    /// Segment length: `floor(aligned_memory_cost / (4 * lanes))`.
    pub fn segment_length(&self) -> usize {
        self.aligned_m_cost() as usize / (SYNC_POINTS * self.lanes())
    }

    /// Lane length: `4 * segment_length`.
    pub fn lane_length(&self) -> usize {
        self.segment_length() * SYNC_POINTS
    }

    /// Total number of blocks in the memory matrix after alignment
    /// (spec.md §3: `memory_blocks = 4 * lanes * segment_length`).
    pub fn block_count(&self) -> usize {
        self.lane_length() * self.lanes()
    }

    /// `m_cost` raised to `max(8, 8 * lanes)` and truncated to the nearest
    /// multiple of `4 * lanes` (spec.md §4.10).
    fn aligned_m_cost(&self) -> u32 {
        align_m_cost(self.m_cost, self.lanes)
    }
}

impl Default for Params {
    /// RustCrypto's recommended defaults: `m_cost = 4096`, `t_cost = 3`,
    /// `p_cost = 1`.
    fn default() -> Self {
        ParamsBuilder::new().build().expect("default params are valid")
    }
}

pub(crate) fn align_m_cost(m_cost: u32, lanes: u32) -> u32 {
    let sync_points = SYNC_POINTS as u32;
    let floor = core::cmp::max(8, sync_points * lanes);
    let raised = core::cmp::max(m_cost, floor);
    raised - (raised % (sync_points * lanes))
}

/// Incremental builder for [`Params`], mirroring the teacher crate's
/// `ParamsBuilder`.
#[derive(Copy, Clone, Debug, Default)]
pub struct ParamsBuilder {
    m_cost: u32,
    t_cost: u32,
    lanes: u32,
    threads: u32,
    output_len: Option<usize>,
}

impl ParamsBuilder {
    /// Default memory cost in blocks (4 MiB worth of 1 KiB blocks).
    pub const DEFAULT_M_COST: u32 = 4096;

    /// Default number of passes.
    pub const DEFAULT_T_COST: u32 = 3;

    /// Default parallelism.
    pub const DEFAULT_P_COST: u32 = 1;

    /// Start a new builder with RustCrypto's recommended defaults.
    pub fn new() -> Self {
        Self {
            m_cost: Self::DEFAULT_M_COST,
            t_cost: Self::DEFAULT_T_COST,
            lanes: Self::DEFAULT_P_COST,
            threads: Self::DEFAULT_P_COST,
            output_len: None,
        }
    }

    /// Set the memory cost in 1024-byte blocks.
    pub fn m_cost(mut self, m_cost: u32) -> Self {
        self.m_cost = m_cost;
        self
    }

    /// Set the number of passes.
    pub fn t_cost(mut self, t_cost: u32) -> Self {
        self.t_cost = t_cost;
        self
    }

    /// Set the number of lanes. Also becomes the thread count unless
    /// [`ParamsBuilder::threads`] is called afterwards.
    pub fn lanes(mut self, lanes: u32) -> Self {
        self.lanes = lanes;
        self.threads = lanes;
        self
    }

    /// Cap the number of worker threads below the lane count (spec.md §4.8).
    pub fn threads(mut self, threads: u32) -> Self {
        self.threads = threads;
        self
    }

    /// Fix the output length produced by [`crate::Argon2::hash_password_into`]
    /// when no explicit buffer-derived length applies.
    pub fn output_len(mut self, output_len: usize) -> Self {
        self.output_len = Some(output_len);
        self
    }

    fn output_len_opt(mut self, output_len: Option<usize>) -> Self {
        self.output_len = output_len;
        self
    }

    /// Validate and construct [`Params`] (spec.md §4.10).
    pub fn build(self) -> Result<Params> {
        if let Some(len) = self.output_len {
            if len < Params::MIN_OUTPUT_LEN {
                return Err(Error::OutputTooShort);
            }
            if len > Params::MAX_OUTPUT_LEN {
                return Err(Error::OutputTooLong);
            }
        }

        // spec.md §4.10 checks memory_cost before lanes/threads, so the
        // floor uses whatever `lanes` was given even if it will later turn
        // out to be out of range itself.
        let memory_floor = core::cmp::max(8, SYNC_POINTS as u32 * self.lanes);
        if self.m_cost < memory_floor {
            return Err(Error::MemoryTooLittle);
        }
        // m_cost is a u32, so it can never exceed 2^32 - 1; the comparison
        // below is kept to mirror spec.md §4.10's explicit check in case
        // that type ever widens.
        if u64::from(self.m_cost) > u64::from(u32::MAX) {
            return Err(Error::MemoryTooMuch);
        }

        if self.t_cost < 1 {
            return Err(Error::TimeTooSmall);
        }

        if self.lanes == 0 {
            return Err(Error::LanesTooFew);
        }
        if self.lanes > Params::MAX_LANES {
            return Err(Error::LanesTooMany);
        }

        if self.threads == 0 {
            return Err(Error::ThreadsTooFew);
        }
        if self.threads > Params::MAX_THREADS {
            return Err(Error::ThreadsTooMany);
        }

        Ok(Params {
            m_cost: self.m_cost,
            t_cost: self.t_cost,
            lanes: self.lanes,
            threads: self.threads,
            output_len: self.output_len,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligns_memory_up_to_lane_floor() {
        let p = Params::new(1, 1, 4, None).unwrap();
        // floor is max(8, 8*4) = 32, truncated to a multiple of 16 -> 32
        assert_eq!(p.block_count(), 32);
        assert_eq!(p.segment_length(), 2);
        assert_eq!(p.lane_length(), 8);
    }

    #[test]
    fn truncates_to_multiple_of_4_lanes() {
        // lanes = 1: multiple of 4 at or below 20 -> 20
        let p = Params::new(20, 1, 1, None).unwrap();
        assert_eq!(p.block_count(), 20);
    }

    #[test]
    fn rejects_memory_below_8_lanes() {
        let lanes = 4;
        let err = Params::new(8 * lanes - 1, 1, lanes, None).unwrap_err();
        assert_eq!(err, Error::MemoryTooLittle);
    }

    #[test]
    fn rejects_zero_lanes() {
        assert_eq!(Params::new(8, 1, 0, None).unwrap_err(), Error::LanesTooFew);
    }

    #[test]
    fn rejects_too_many_lanes() {
        assert_eq!(
            Params::new(8, 1, Params::MAX_LANES + 1, None).unwrap_err(),
            Error::LanesTooMany
        );
    }

    #[test]
    fn threads_defaults_to_lanes_but_can_be_capped() {
        let p = ParamsBuilder::new().lanes(4).threads(2).m_cost(64).build().unwrap();
        assert_eq!(p.lanes(), 4);
        assert_eq!(p.threads(), 2);
    }

    /// spec.md §4.10 checks `memory_cost` before `lanes`/`threads`; when
    /// both are invalid the memory error must win.
    #[test]
    fn memory_floor_checked_before_lanes() {
        assert_eq!(Params::new(0, 1, 0, None).unwrap_err(), Error::MemoryTooLittle);
    }
}
