/*++

Licensed under the Apache-2.0 license.

File Name:

    sha512.rs

Abstract:

    File contains the round functions of Secure Hash 512 Algorithm (SHA-512)

--*/

use crate::algorithm::{schedule_word, ShaAlgorithm, SCHEDULE_WORDS};
use crate::consts::{SHA384_IV, SHA512_224_IV, SHA512_256_IV, SHA512_IV, SHA512_K};
use crate::word::{ch, maj, ShaWord};

/// SHA-512 Mode
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Sha512Mode {
    Sha224,
    Sha256,
    Sha384,
    #[default]
    Sha512,
}

/// SHA-512
#[derive(Debug)]
pub enum Sha512 {}

impl ShaAlgorithm for Sha512 {
    type Word = u64;
    type State = [u64; 8];
    type Mode = Sha512Mode;

    const NAME: &'static str = "SHA-512";
    const BLOCK_BYTES: usize = 128;
    const ROUNDS: u32 = 80;
    const LENGTH_BYTES: usize = 16;

    fn initial_state(mode: Sha512Mode) -> [u64; 8] {
        match mode {
            Sha512Mode::Sha224 => SHA512_224_IV,
            Sha512Mode::Sha256 => SHA512_256_IV,
            Sha512Mode::Sha384 => SHA384_IV,
            Sha512Mode::Sha512 => SHA512_IV,
        }
    }

    fn hash_len(mode: Sha512Mode) -> usize {
        match mode {
            Sha512Mode::Sha224 => 28,
            Sha512Mode::Sha256 => 32,
            Sha512Mode::Sha384 => 48,
            Sha512Mode::Sha512 => 64,
        }
    }

    fn mode_from_bits(bits: usize) -> Option<Sha512Mode> {
        match bits {
            224 => Some(Sha512Mode::Sha224),
            256 => Some(Sha512Mode::Sha256),
            384 => Some(Sha512Mode::Sha384),
            512 => Some(Sha512Mode::Sha512),
            _ => None,
        }
    }

    fn expand(memory: &[u64; SCHEDULE_WORDS], round: usize) -> u64 {
        let w = |back| schedule_word(memory, round, back);
        let (w2, w15) = (w(2), w(15));
        let s0 = w15.rotr(1) ^ w15.rotr(8) ^ (w15 >> 7);
        let s1 = w2.rotr(19) ^ w2.rotr(61) ^ (w2 >> 6);
        w(16).add_mod(s0).add_mod(w(7)).add_mod(s1)
    }

    fn compress(state: &mut [u64; 8], w: u64, round: usize) {
        let [a, b, c, d, e, f, g, h] = *state;

        let s1 = e.rotr(14) ^ e.rotr(18) ^ e.rotr(41);
        let t1 = h
            .add_mod(s1)
            .add_mod(ch(e, f, g))
            .add_mod(SHA512_K[round])
            .add_mod(w);
        let s0 = a.rotr(28) ^ a.rotr(34) ^ a.rotr(39);
        let t2 = s0.add_mod(maj(a, b, c));

        *state = [t1.add_mod(t2), a, b, c, d.add_mod(t1), e, f, g];
    }
}
