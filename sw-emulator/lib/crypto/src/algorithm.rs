/*++

Licensed under the Apache-2.0 license.

File Name:

    algorithm.rs

Abstract:

    File contains the trait describing one SHA algorithm family as seen by the
    multi-cycle engine: word type, state shape, modes, message schedule
    expansion and a single compression round.

--*/

use crate::word::ShaWord;
use std::fmt;

/// Number of words kept in the circular message schedule memory
pub const SCHEDULE_WORDS: usize = 16;

/// SHA algorithm family
pub trait ShaAlgorithm {
    /// Word type (`u32` or `u64`)
    type Word: ShaWord;

    /// Working state and chaining value (five or eight words)
    type State: Copy + Eq + fmt::Debug + AsRef<[Self::Word]> + AsMut<[Self::Word]>;

    /// Digest variant selected by the initial hash value
    type Mode: Copy + Eq + fmt::Debug + Default;

    /// Display name used in logs
    const NAME: &'static str;

    /// Block size in bytes
    const BLOCK_BYTES: usize;

    /// Number of compression rounds per block
    const ROUNDS: u32;

    /// Size in bytes of the message length field appended by padding
    const LENGTH_BYTES: usize;

    /// Initial hash value for `mode`
    fn initial_state(mode: Self::Mode) -> Self::State;

    /// Digest length in bytes for `mode`
    fn hash_len(mode: Self::Mode) -> usize;

    /// Select the mode producing a digest of `bits` bits
    fn mode_from_bits(bits: usize) -> Option<Self::Mode>;

    /// Compute schedule word `round` (`round >= 16`) from the circular memory,
    /// where word `t` lives in slot `t % 16`.
    fn expand(memory: &[Self::Word; SCHEDULE_WORDS], round: usize) -> Self::Word;

    /// Apply compression round `round` with schedule word `w`
    fn compress(state: &mut Self::State, w: Self::Word, round: usize);

    /// Number of words in one block
    fn block_words() -> usize {
        Self::BLOCK_BYTES / Self::Word::BYTES
    }
}

/// Word `round - back` of the schedule held in circular memory
#[inline]
pub(crate) fn schedule_word<W: ShaWord>(memory: &[W; SCHEDULE_WORDS], round: usize, back: usize) -> W {
    memory[(round + SCHEDULE_WORDS - back) % SCHEDULE_WORDS]
}
