/*++

Licensed under the Apache-2.0 license.

File Name:

    word.rs

Abstract:

    File contains the word type abstraction shared by the 32-bit and 64-bit
    engines, and the boolean primitives used by the compression rounds.

--*/

use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Not, Shr};

/// A hash word: `u32` for SHA-1/SHA-256, `u64` for SHA-512.
pub trait ShaWord:
    Copy
    + Default
    + Eq
    + fmt::Debug
    + fmt::LowerHex
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + Not<Output = Self>
    + Shr<u32, Output = Self>
{
    /// Size of the word in bytes
    const BYTES: usize;

    /// Addition modulo 2^bits
    fn add_mod(self, rhs: Self) -> Self;

    /// Rotate right by `n` bits
    fn rotr(self, n: u32) -> Self;

    /// Rotate left by `n` bits
    fn rotl(self, n: u32) -> Self;

    /// Build a word from the first `BYTES` bytes of `bytes`, big-endian.
    /// Missing bytes are treated as zero.
    fn from_be_slice(bytes: &[u8]) -> Self;

    /// Write the leading big-endian bytes of the word into `out`.
    /// At most `BYTES` bytes are written.
    fn write_be(self, out: &mut [u8]);
}

macro_rules! impl_sha_word {
    ($t:ty) => {
        impl ShaWord for $t {
            const BYTES: usize = std::mem::size_of::<$t>();

            #[inline]
            fn add_mod(self, rhs: Self) -> Self {
                self.wrapping_add(rhs)
            }

            #[inline]
            fn rotr(self, n: u32) -> Self {
                self.rotate_right(n)
            }

            #[inline]
            fn rotl(self, n: u32) -> Self {
                self.rotate_left(n)
            }

            fn from_be_slice(bytes: &[u8]) -> Self {
                let mut buf = [0u8; std::mem::size_of::<$t>()];
                for (dest, src) in buf.iter_mut().zip(bytes) {
                    *dest = *src;
                }
                <$t>::from_be_bytes(buf)
            }

            fn write_be(self, out: &mut [u8]) {
                for (dest, src) in out.iter_mut().zip(self.to_be_bytes()) {
                    *dest = src;
                }
            }
        }
    };
}

impl_sha_word!(u32);
impl_sha_word!(u64);

/// Choose function: bits of `y` where `x` is set, bits of `z` elsewhere
#[inline]
pub(crate) fn ch<W: ShaWord>(x: W, y: W, z: W) -> W {
    (x & y) ^ (!x & z)
}

/// Majority function
#[inline]
pub(crate) fn maj<W: ShaWord>(x: W, y: W, z: W) -> W {
    (x & y) ^ (x & z) ^ (y & z)
}

/// Parity function
#[inline]
pub(crate) fn parity<W: ShaWord>(x: W, y: W, z: W) -> W {
    x ^ y ^ z
}
