/*++

Licensed under the Apache-2.0 license.

File Name:

    register.rs

Abstract:

    File contains the bit-vector register storage used for block and digest
    regions.

--*/

use sha_emu_types::{BusData, BusStrobe};

/// Fixed width bit vector seen through bus-width words.
///
/// The vector is stored as big-endian bytes: `as_bytes()[0]` holds the most
/// significant bits. Data word 0 covers the least significant `8 * data_bytes`
/// bits, word 1 the next ones, and so on. Bits past the most significant end
/// read as zero, which zero-extends a vector whose width is not a multiple of
/// the data width.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BitVector {
    bytes: Vec<u8>,
}

impl BitVector {
    /// Create a zeroed vector of `len` bytes
    pub fn new(len: usize) -> Self {
        Self {
            bytes: vec![0u8; len],
        }
    }

    /// Create a vector holding `bytes`, most significant byte first
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Overwrite the vector with `bytes`, right aligned; missing leading
    /// bytes are zero and excess leading bytes of `bytes` are dropped.
    pub fn load_be_bytes(&mut self, bytes: &[u8]) {
        self.bytes.fill(0);
        for (dest, src) in self.bytes.iter_mut().rev().zip(bytes.iter().rev()) {
            *dest = *src;
        }
    }

    /// Number of `data_bytes` wide words needed to cover the vector
    pub fn word_count(&self, data_bytes: usize) -> usize {
        (self.bytes.len() + data_bytes - 1) / data_bytes
    }

    /// Read data word `index`
    ///
    /// # Arguments
    ///
    /// * `index` - Word index, 0 is the least significant word
    /// * `data_bytes` - Width of a word in bytes
    pub fn word(&self, index: usize, data_bytes: usize) -> BusData {
        (0..data_bytes)
            .filter_map(|byte| {
                self.byte_pos(index * data_bytes + byte)
                    .map(|pos| (self.bytes[pos] as BusData) << (8 * byte))
            })
            .fold(0, |acc, val| acc | val)
    }

    /// Merge `val` into data word `index`, updating only the bytes whose
    /// strobe bit is set.
    ///
    /// # Arguments
    ///
    /// * `index` - Word index, 0 is the least significant word
    /// * `data_bytes` - Width of a word in bytes
    /// * `val` - Data to write
    /// * `strobe` - Byte enables
    pub fn write_word(&mut self, index: usize, data_bytes: usize, val: BusData, strobe: BusStrobe) {
        for byte in 0..data_bytes {
            if strobe & (1 << byte) == 0 {
                continue;
            }
            if let Some(pos) = self.byte_pos(index * data_bytes + byte) {
                self.bytes[pos] = (val >> (8 * byte)) as u8;
            }
        }
    }

    /// Position in `bytes` of the byte carrying bits `8*n..8*n+8`.
    fn byte_pos(&self, n: usize) -> Option<usize> {
        self.bytes.len().checked_sub(n + 1)
    }
}
