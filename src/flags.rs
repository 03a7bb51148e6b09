/// Context flags controlling zeroization of sensitive buffers (spec.md
/// §4.10's validator notes and §9 "Configuration").
///
/// The engine itself always uses a write the optimizer cannot elide when a
/// flag requests zeroing (spec.md §5 "Memory hygiene"); these flags only
/// control *whether* a given buffer is cleared, not how.
///
/// spec.md §9 also documents a `clear_secret` option. It is intentionally
/// not present here: `Argon2::secret` is an immutable `&[u8]` borrow that
/// typically outlives a single hash call (the same [`Argon2`] context, and
/// the same secret/pepper, is normally reused across many
/// [`Argon2::hash_password_into`] calls for different passwords), so there
/// is no buffer owned by the engine that it could zero without either
/// corrupting the next call's pre-hash or requiring the context to be
/// single-use. Callers who want the secret zeroed after use should hold it
/// in a buffer they control (e.g. `zeroize`'s `Zeroizing` wrapper) and
/// drop/zeroize it themselves once the [`Argon2`] context is no longer
/// needed; see DESIGN.md's Flags entry for the full rationale.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Flags {
    /// Zero the caller's password buffer immediately after it is absorbed
    /// into the pre-hash.
    pub clear_password: bool,

    /// Zero the memory matrix before it is released at the end of `Key`.
    pub clear_memory: bool,
}

impl Default for Flags {
    /// `clear_memory` is set; `clear_password` is not (spec.md §9:
    /// "Default: `clear_memory` set, others unset").
    fn default() -> Self {
        Flags {
            clear_password: false,
            clear_memory: true,
        }
    }
}
