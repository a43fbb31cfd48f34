//! Hardware true-random number generator trait

/// Non-blocking hardware entropy source
///
/// A hardware TRNG produces entropy at a limited rate; `fill` returns
/// immediately with however many bytes were available. The caller owns the
/// timeout policy (see [`crate::entropy::true_random`]).
pub trait TrngInterface {
    /// Fill `buf` with as many hardware-random bytes as are available now.
    ///
    /// Returns the number of bytes written, which may be zero.
    fn fill(&mut self, buf: &mut [u8]) -> usize;
}
