/*++

Licensed under the Apache-2.0 license.

File Name:

    padding.rs

Abstract:

    File contains Merkle-Damgard message padding, splitting a message into
    the blocks software writes to the block register.

--*/

use crate::algorithm::ShaAlgorithm;

/// Pad `message` and split it into blocks of `A::BLOCK_BYTES` bytes.
///
/// The message is followed by a single `0x80` byte, zero bytes, and the
/// message length in bits as a big-endian integer of `A::LENGTH_BYTES` bytes.
pub fn pad<A: ShaAlgorithm>(message: &[u8]) -> Vec<Vec<u8>> {
    let mut padded = message.to_vec();
    padded.push(0x80);
    while (padded.len() + A::LENGTH_BYTES) % A::BLOCK_BYTES != 0 {
        padded.push(0);
    }

    let bits = (message.len() as u128) * 8;
    padded.extend_from_slice(&bits.to_be_bytes()[16 - A::LENGTH_BYTES..]);

    padded.chunks(A::BLOCK_BYTES).map(<[u8]>::to_vec).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Sha1, Sha256, Sha512};

    #[test]
    fn test_pad_abc() {
        let blocks = pad::<Sha256>(b"abc");
        assert_eq!(blocks.len(), 1);
        assert_eq!(&blocks[0][..4], &[0x61, 0x62, 0x63, 0x80]);
        assert!(blocks[0][4..63].iter().all(|b| *b == 0));
        assert_eq!(blocks[0][63], 0x18);
    }

    #[test]
    fn test_pad_block_counts() {
        assert_eq!(pad::<Sha1>(b"").len(), 1);
        assert_eq!(pad::<Sha1>(&[0; 55]).len(), 1);
        assert_eq!(pad::<Sha1>(&[0; 56]).len(), 2);
        assert_eq!(pad::<Sha256>(&[0; 64]).len(), 2);
        assert_eq!(pad::<Sha512>(&[0; 111]).len(), 1);
        assert_eq!(pad::<Sha512>(&[0; 112]).len(), 2);
    }

    #[test]
    fn test_pad_length_field() {
        let blocks = pad::<Sha512>(&[0xaa; 300]);
        assert_eq!(blocks.len(), 3);
        assert!(blocks.iter().all(|b| b.len() == 128));

        let last = &blocks[2];
        assert_eq!(&last[112..126], &[0u8; 14]);
        assert_eq!(&last[126..], &(300u16 * 8).to_be_bytes());
        assert_eq!(blocks[2][300 - 256], 0x80);
    }
}
