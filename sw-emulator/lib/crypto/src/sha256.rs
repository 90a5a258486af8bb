/*++

Licensed under the Apache-2.0 license.

File Name:

    sha256.rs

Abstract:

    File contains the round functions of Secure Hash 256 Algorithm (SHA-256)

--*/

use crate::algorithm::{schedule_word, ShaAlgorithm, SCHEDULE_WORDS};
use crate::consts::{SHA224_IV, SHA256_IV, SHA256_K};
use crate::word::{ch, maj, ShaWord};

/// SHA-256 Mode
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Sha256Mode {
    Sha224,
    #[default]
    Sha256,
}

/// SHA-256
#[derive(Debug)]
pub enum Sha256 {}

impl ShaAlgorithm for Sha256 {
    type Word = u32;
    type State = [u32; 8];
    type Mode = Sha256Mode;

    const NAME: &'static str = "SHA-256";
    const BLOCK_BYTES: usize = 64;
    const ROUNDS: u32 = 64;
    const LENGTH_BYTES: usize = 8;

    fn initial_state(mode: Sha256Mode) -> [u32; 8] {
        match mode {
            Sha256Mode::Sha224 => SHA224_IV,
            Sha256Mode::Sha256 => SHA256_IV,
        }
    }

    fn hash_len(mode: Sha256Mode) -> usize {
        match mode {
            Sha256Mode::Sha224 => 28,
            Sha256Mode::Sha256 => 32,
        }
    }

    fn mode_from_bits(bits: usize) -> Option<Sha256Mode> {
        match bits {
            224 => Some(Sha256Mode::Sha224),
            256 => Some(Sha256Mode::Sha256),
            _ => None,
        }
    }

    fn expand(memory: &[u32; SCHEDULE_WORDS], round: usize) -> u32 {
        let w = |back| schedule_word(memory, round, back);
        let (w2, w15) = (w(2), w(15));
        let s0 = w15.rotr(7) ^ w15.rotr(18) ^ (w15 >> 3);
        let s1 = w2.rotr(17) ^ w2.rotr(19) ^ (w2 >> 10);
        w(16).add_mod(s0).add_mod(w(7)).add_mod(s1)
    }

    fn compress(state: &mut [u32; 8], w: u32, round: usize) {
        let [a, b, c, d, e, f, g, h] = *state;

        let s1 = e.rotr(6) ^ e.rotr(11) ^ e.rotr(25);
        let t1 = h
            .add_mod(s1)
            .add_mod(ch(e, f, g))
            .add_mod(SHA256_K[round])
            .add_mod(w);
        let s0 = a.rotr(2) ^ a.rotr(13) ^ a.rotr(22);
        let t2 = s0.add_mod(maj(a, b, c));

        *state = [t1.add_mod(t2), a, b, c, d.add_mod(t1), e, f, g];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::test_util::{compress_block, digest};

    const SHA_256_TEST_BLOCK: [u8; 64] = [
        0x61, 0x62, 0x63, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x18,
    ];

    #[test]
    fn test_sha256_224() {
        let mode = Sha256Mode::Sha224;
        let state = compress_block::<Sha256>(&Sha256::initial_state(mode), &SHA_256_TEST_BLOCK);

        let expected: [u8; 28] = [
            0x23, 0x09, 0x7D, 0x22, 0x34, 0x05, 0xD8, 0x22, 0x86, 0x42, 0xA4, 0x77, 0xBD, 0xA2,
            0x55, 0xB3, 0x2A, 0xAD, 0xBC, 0xE4, 0xBD, 0xA0, 0xB3, 0xF7, 0xE3, 0x6C, 0x9D, 0xA7,
        ];

        assert_eq!(digest::<Sha256>(&state, Sha256::hash_len(mode)), expected);
    }

    #[test]
    fn test_sha256_256() {
        let mode = Sha256Mode::Sha256;
        let state = compress_block::<Sha256>(&Sha256::initial_state(mode), &SHA_256_TEST_BLOCK);

        let expected: [u8; 32] = [
            0xBA, 0x78, 0x16, 0xBF, 0x8F, 0x01, 0xCF, 0xEA, 0x41, 0x41, 0x40, 0xDE, 0x5D, 0xAE,
            0x22, 0x23, 0xB0, 0x03, 0x61, 0xA3, 0x96, 0x17, 0x7A, 0x9C, 0xB4, 0x10, 0xFF, 0x61,
            0xF2, 0x00, 0x15, 0xAD,
        ];

        assert_eq!(digest::<Sha256>(&state, Sha256::hash_len(mode)), expected);
    }

    #[test]
    fn test_sha256_modes() {
        assert_eq!(Sha256::mode_from_bits(224), Some(Sha256Mode::Sha224));
        assert_eq!(Sha256::mode_from_bits(256), Some(Sha256Mode::Sha256));
        assert_eq!(Sha256::mode_from_bits(384), None);
        assert_eq!(Sha256Mode::default(), Sha256Mode::Sha256);
    }
}
