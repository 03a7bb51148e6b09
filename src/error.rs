use core::fmt;

/// Result type with this crate's [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Errors produced validating parameters or running the engine
/// (spec.md §7).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// A required context or instance was missing.
    IncorrectParameter,

    /// `Algorithm` was neither `Argon2d` nor `Argon2i`.
    IncorrectVariant,

    /// Output buffer has zero length.
    OutputAbsent,

    /// Output buffer is shorter than [`crate::params::Params::MIN_OUTPUT_LEN`].
    OutputTooShort,

    /// Output buffer is longer than [`crate::params::Params::MAX_OUTPUT_LEN`].
    OutputTooLong,

    /// Password is shorter than the documented minimum.
    PwdTooShort,

    /// Password is longer than the documented maximum.
    PwdTooLong,

    /// Salt is shorter than 8 bytes.
    SaltTooShort,

    /// Salt is longer than the documented maximum.
    SaltTooLong,

    /// Secret ("pepper") is shorter than the documented minimum (currently
    /// unreachable: the documented minimum is zero).
    SecretTooShort,

    /// Secret ("pepper") is longer than the documented maximum.
    SecretTooLong,

    /// Associated data is shorter than the documented minimum (currently
    /// unreachable: the documented minimum is zero).
    AdTooShort,

    /// Associated data is longer than the documented maximum.
    AdTooLong,

    /// `memory_cost` is smaller than `max(8, 8 * lanes)`.
    MemoryTooLittle,

    /// `memory_cost` exceeds `2^32 - 1`.
    MemoryTooMuch,

    /// `time_cost` is zero.
    TimeTooSmall,

    /// `time_cost` exceeds `2^32 - 1`.
    TimeTooLarge,

    /// `lanes` is zero.
    LanesTooFew,

    /// `lanes` exceeds `0xFFFFFF`.
    LanesTooMany,

    /// `threads` is zero.
    ThreadsTooFew,

    /// `threads` exceeds `0xFFFFFF`.
    ThreadsTooMany,

    /// A worker thread could not be scheduled or panicked.
    WorkerFailure,

    /// Provided memory buffer is smaller than `Params::block_count()`.
    MemoryTooLittleForParams,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Error::IncorrectParameter => "incorrect parameter: required context absent",
            Error::IncorrectVariant => "algorithm variant must be Argon2d or Argon2i",
            Error::OutputAbsent => "output buffer absent",
            Error::OutputTooShort => "output is too short",
            Error::OutputTooLong => "output is too long",
            Error::PwdTooShort => "password is too short",
            Error::PwdTooLong => "password is too long",
            Error::SaltTooShort => "salt is too short",
            Error::SaltTooLong => "salt is too long",
            Error::SecretTooShort => "secret is too short",
            Error::SecretTooLong => "secret is too long",
            Error::AdTooShort => "associated data is too short",
            Error::AdTooLong => "associated data is too long",
            Error::MemoryTooLittle => "memory cost is too small",
            Error::MemoryTooMuch => "memory cost is too large",
            Error::TimeTooSmall => "time cost is too small",
            Error::TimeTooLarge => "time cost is too large",
            Error::LanesTooFew => "too few lanes",
            Error::LanesTooMany => "too many lanes",
            Error::ThreadsTooFew => "too few threads",
            Error::ThreadsTooMany => "too many threads",
            Error::WorkerFailure => "a worker could not be scheduled",
            Error::MemoryTooLittleForParams => "provided memory buffer is smaller than required",
        };
        f.write_str(s)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
