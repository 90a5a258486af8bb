/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the SHA Emulator Crypto library: the
    multi-cycle SHA-1 and SHA-2 compute engines.

--*/

mod algorithm;
mod consts;
mod engine;
pub mod padding;
mod sha1;
mod sha256;
mod sha512;
mod word;

pub use algorithm::{ShaAlgorithm, SCHEDULE_WORDS};
pub use engine::{Engine, EngineInputs, EngineState, EngineStatus, Termination};
pub use word::ShaWord;

pub use sha1::{Sha1, Sha1Mode};
pub use sha256::{Sha256, Sha256Mode};
pub use sha512::{Sha512, Sha512Mode};

/// SHA-1 compute engine
pub type Sha1Engine = Engine<Sha1>;

/// SHA-256/224 compute engine
pub type Sha256Engine = Engine<Sha256>;

/// SHA-512/384/256/224 compute engine
pub type Sha512Engine = Engine<Sha512>;
