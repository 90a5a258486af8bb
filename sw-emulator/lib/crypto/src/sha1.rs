/*++

Licensed under the Apache-2.0 license.

File Name:

    sha1.rs

Abstract:

    File contains the round functions of Secure Hash Algorithm 1 (SHA-1)

--*/

use crate::algorithm::{schedule_word, ShaAlgorithm, SCHEDULE_WORDS};
use crate::consts::{SHA1_IV, SHA1_K};
use crate::word::{ch, maj, parity, ShaWord};

/// SHA-1 Mode
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Sha1Mode {
    #[default]
    Sha1,
}

/// SHA-1
#[derive(Debug)]
pub enum Sha1 {}

impl ShaAlgorithm for Sha1 {
    type Word = u32;
    type State = [u32; 5];
    type Mode = Sha1Mode;

    const NAME: &'static str = "SHA-1";
    const BLOCK_BYTES: usize = 64;
    const ROUNDS: u32 = 80;
    const LENGTH_BYTES: usize = 8;

    fn initial_state(_mode: Sha1Mode) -> [u32; 5] {
        SHA1_IV
    }

    fn hash_len(_mode: Sha1Mode) -> usize {
        20
    }

    fn mode_from_bits(bits: usize) -> Option<Sha1Mode> {
        match bits {
            160 => Some(Sha1Mode::Sha1),
            _ => None,
        }
    }

    fn expand(memory: &[u32; SCHEDULE_WORDS], round: usize) -> u32 {
        let w = |back| schedule_word(memory, round, back);
        (w(3) ^ w(8) ^ w(14) ^ w(16)).rotl(1)
    }

    fn compress(state: &mut [u32; 5], w: u32, round: usize) {
        let [a, b, c, d, e] = *state;

        let (f, k) = match round {
            0..=19 => (ch(b, c, d), SHA1_K[0]),
            20..=39 => (parity(b, c, d), SHA1_K[1]),
            40..=59 => (maj(b, c, d), SHA1_K[2]),
            _ => (parity(b, c, d), SHA1_K[3]),
        };

        let temp = a.rotl(5).add_mod(f).add_mod(e).add_mod(k).add_mod(w);
        *state = [temp, a, b.rotl(30), c, d];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::test_util::{compress_block, digest};

    const SHA1_ABC_BLOCK: [u8; 64] = {
        let mut block = [0u8; 64];
        block[0] = 0x61;
        block[1] = 0x62;
        block[2] = 0x63;
        block[3] = 0x80;
        block[63] = 0x18;
        block
    };

    #[test]
    fn test_sha1_block() {
        let state = compress_block::<Sha1>(&Sha1::initial_state(Sha1Mode::Sha1), &SHA1_ABC_BLOCK);
        assert_eq!(
            hex::encode(digest::<Sha1>(&state, 20)),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
    }

    #[test]
    fn test_sha1_modes() {
        assert_eq!(Sha1::mode_from_bits(160), Some(Sha1Mode::Sha1));
        assert_eq!(Sha1::mode_from_bits(256), None);
        assert_eq!(Sha1::hash_len(Sha1Mode::Sha1), 20);
        assert_eq!(Sha1::block_words(), 16);
    }
}
