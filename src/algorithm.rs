/// Addressing variant: where the pseudo-random reference-block selector
/// comes from (spec.md §4.7).
///
/// Argon2id (the hybrid that uses data-independent addressing for the
/// first half of pass 0 and data-dependent addressing afterwards) is
/// explicitly out of scope for this engine.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
#[repr(u32)]
pub enum Algorithm {
    /// Data-dependent addressing: `J` comes from the previous block.
    #[default]
    Argon2d = 0,

    /// Data-independent addressing: `J` comes from a pre-generated
    /// per-segment buffer produced by compressing an address-input block.
    Argon2i = 1,
}

impl Algorithm {
    /// Little-endian encoding absorbed into the pre-hash.
    pub(crate) fn to_le_bytes(self) -> [u8; 4] {
        (self as u32).to_le_bytes()
    }

    /// Whether reference-block addressing is data-independent for every
    /// segment of every pass under this variant.
    pub(crate) fn is_data_independent(self) -> bool {
        matches!(self, Algorithm::Argon2i)
    }
}
