//! Zeroization of sensitive intermediate buffers (spec.md §5, §9).

/// Zero a byte buffer with a write the optimizer cannot remove.
///
/// Delegates to [`zeroize::Zeroize`] when the `zeroize` feature is enabled;
/// otherwise falls back to a volatile-write loop so dead-store elimination
/// can't turn this into a no-op.
pub(crate) fn secure_wipe(buf: &mut [u8]) {
    #[cfg(feature = "zeroize")]
    {
        use zeroize::Zeroize;
        buf.zeroize();
    }

    #[cfg(not(feature = "zeroize"))]
    {
        for byte in buf.iter_mut() {
            // SAFETY: `byte` is a valid, aligned, writable `u8` reference.
            unsafe { core::ptr::write_volatile(byte, 0) };
        }
        core::sync::atomic::compiler_fence(core::sync::atomic::Ordering::SeqCst);
    }
}
