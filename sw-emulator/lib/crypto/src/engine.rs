/*++

Licensed under the Apache-2.0 license.

File Name:

    engine.rs

Abstract:

    File contains the cycle-level SHA compute engine. One call to `tick`
    models one clock edge: the engine performs at most one compression round
    per cycle and walks the IDLE/HASHING/HOLD/DONE state machine.

--*/

use crate::algorithm::{ShaAlgorithm, SCHEDULE_WORDS};
use crate::word::ShaWord;
use std::fmt;

mod fsm {
    use smlang::statemachine;

    statemachine! {
        transitions: {
            // CurrentState Event = NextState

            *Idle + Start = Hashing,

            Hashing + Pause = Hold,
            Hashing + BlockDone = Hold,
            Hashing + MessageDone = Done,
            Hashing + Reset = Idle,

            Hold + Resume = Hashing,
            Hold + Reset = Idle,

            Done + Reset = Idle
        }
    }

    /// State machine extended variables.
    pub struct Context;

    impl StateMachineContext for Context {}
}

use fsm::{Context, Events, StateMachine, States};

/// Engine state
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EngineState {
    /// Waiting for a message; chaining value held at the initial hash value
    Idle,

    /// Running compression rounds
    Hashing,

    /// Paused, either mid-block or between blocks
    Hold,

    /// Message complete; digest valid
    Done,
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EngineState::Idle => "IDLE",
            EngineState::Hashing => "HASHING",
            EngineState::Hold => "HOLD",
            EngineState::Done => "DONE",
        };
        f.write_str(name)
    }
}

/// How the engine decides that the block it just folded ends the message
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Termination {
    /// Software marks the final block through the `last_block` input
    #[default]
    LastBlock,

    /// Infer the final block from the padding marker byte (0x80). Messages
    /// whose payload contains a word ending in `80 00..` finish early.
    ByteScan,
}

/// Inputs sampled by the engine on every clock edge
#[derive(Debug, Copy, Clone)]
pub struct EngineInputs<'a> {
    /// Block register contents, message order (first byte is the most
    /// significant byte of schedule word 0)
    pub block: &'a [u8],

    /// Enable strobe
    pub enable: bool,

    /// Synchronous reset
    pub reset: bool,

    /// Block being hashed is the final block of the message
    pub last_block: bool,
}

/// Status outputs of the engine
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct EngineStatus {
    pub idle: bool,
    pub hold: bool,
    pub digest_valid: bool,
}

/// Padding marker observations for the current block
#[derive(Debug, Default, Copy, Clone)]
struct MarkerScan {
    end_of_message: bool,
    continuation: bool,
    final_pending: bool,
}

impl MarkerScan {
    /// Record schedule word `index` (`index < 16`) of the current block.
    fn observe<W: ShaWord>(&mut self, word: W, index: usize, length_words: usize) {
        let mut buf = [0u8; 8];
        let bytes = &mut buf[..W::BYTES];
        word.write_be(bytes);

        let marker = bytes
            .iter()
            .enumerate()
            .any(|(i, b)| *b == 0x80 && bytes[i + 1..].iter().all(|b| *b == 0));
        if !marker {
            return;
        }

        if index < SCHEDULE_WORDS - length_words {
            self.end_of_message = true;
        } else {
            // No room left for the length field; it lands in the next block
            self.continuation = true;
        }
    }

    /// Decide at the fold whether the message is complete, and forget the
    /// block-local observations.
    fn fold(&mut self) -> bool {
        let done = if self.continuation {
            self.final_pending = true;
            false
        } else {
            self.end_of_message || self.final_pending
        };

        self.end_of_message = false;
        self.continuation = false;
        if done {
            self.final_pending = false;
        }
        done
    }

    fn new_block(&mut self) {
        self.end_of_message = false;
        self.continuation = false;
    }
}

/// Multi-cycle SHA engine
pub struct Engine<A: ShaAlgorithm> {
    /// Digest variant
    mode: A::Mode,

    /// Final block detection
    termination: Termination,

    /// IDLE/HASHING/HOLD/DONE
    state_machine: StateMachine<Context>,

    /// Circular message schedule
    memory: [A::Word; SCHEDULE_WORDS],

    /// Working variables
    working: A::State,

    /// Chaining value (intermediate and final hash)
    chaining: A::State,

    /// Round counter, `0..=ROUNDS`; `ROUNDS` is the fold cycle
    round: u32,

    /// Digest valid flag
    digest_valid: bool,

    /// Padding marker tracking for `Termination::ByteScan`
    scan: MarkerScan,
}

impl<A: ShaAlgorithm> Engine<A> {
    /// Create a new engine in the IDLE state
    ///
    /// # Arguments
    ///
    /// * `mode` - Digest variant
    /// * `termination` - Final block detection
    pub fn new(mode: A::Mode, termination: Termination) -> Self {
        let iv = A::initial_state(mode);
        Self {
            mode,
            termination,
            state_machine: StateMachine::new(Context),
            memory: [A::Word::default(); SCHEDULE_WORDS],
            working: iv,
            chaining: iv,
            round: 0,
            digest_valid: false,
            scan: MarkerScan::default(),
        }
    }

    /// Advance the engine by one clock cycle
    ///
    /// # Arguments
    ///
    /// * `inputs` - Signals sampled at this clock edge
    pub fn tick(&mut self, inputs: &EngineInputs) {
        match self.state() {
            EngineState::Idle => self.tick_idle(inputs),
            EngineState::Hashing => self.tick_hashing(inputs),
            EngineState::Hold => self.tick_hold(inputs),
            EngineState::Done => self.tick_done(inputs),
        }
    }

    fn tick_idle(&mut self, inputs: &EngineInputs) {
        // Track the initial hash value and the block register while idle
        self.chaining = A::initial_state(self.mode);
        self.working = self.chaining;
        self.round = 0;
        self.digest_valid = false;
        self.scan = MarkerScan::default();
        self.load_memory(inputs.block);

        if inputs.enable && !inputs.reset {
            self.fire(Events::Start);
        }
    }

    fn tick_hashing(&mut self, inputs: &EngineInputs) {
        if inputs.reset {
            self.fire(Events::Reset);
        } else if !inputs.enable {
            self.fire(Events::Pause);
        } else if self.round == A::ROUNDS {
            self.fold();
            let finished = match self.termination {
                Termination::LastBlock => inputs.last_block,
                Termination::ByteScan => self.scan.fold(),
            };
            if finished {
                self.digest_valid = true;
                self.fire(Events::MessageDone);
            } else {
                self.fire(Events::BlockDone);
            }
        } else {
            self.step();
        }
    }

    fn tick_hold(&mut self, inputs: &EngineInputs) {
        if inputs.reset {
            self.fire(Events::Reset);
        } else if inputs.enable {
            // A resume at a block boundary picks up the next block
            if self.round == 0 {
                self.load_memory(inputs.block);
                self.scan.new_block();
            }
            self.fire(Events::Resume);
        }
    }

    fn tick_done(&mut self, inputs: &EngineInputs) {
        if inputs.reset {
            self.digest_valid = false;
            self.fire(Events::Reset);
        }
    }

    /// Perform one compression round
    fn step(&mut self) {
        let t = self.round as usize;
        let w = if t < SCHEDULE_WORDS {
            let w = self.memory[t];
            if self.termination == Termination::ByteScan {
                let length_words = A::LENGTH_BYTES / A::Word::BYTES;
                self.scan.observe(w, t, length_words);
            }
            w
        } else {
            let w = A::expand(&self.memory, t);
            self.memory[t % SCHEDULE_WORDS] = w;
            w
        };

        A::compress(&mut self.working, w, t);
        self.round += 1;
        log::trace!("{} round {:2}: w={:x} {:x?}", A::NAME, t, w, self.working);
    }

    /// Add the working variables into the chaining value
    fn fold(&mut self) {
        for (h, v) in self.chaining.as_mut().iter_mut().zip(self.working.as_ref()) {
            *h = h.add_mod(*v);
        }
        self.working = self.chaining;
        self.round = 0;
    }

    fn load_memory(&mut self, block: &[u8]) {
        self.memory = [A::Word::default(); SCHEDULE_WORDS];
        for (slot, chunk) in self.memory.iter_mut().zip(block.chunks(A::Word::BYTES)) {
            *slot = A::Word::from_be_slice(chunk);
        }
    }

    fn fire(&mut self, event: Events) {
        let from = self.state();
        if self.state_machine.process_event(event).is_err() {
            log::warn!("{}: invalid transition from {}, forcing IDLE", A::NAME, from);
            self.state_machine = StateMachine::new(Context);
        }
        log::debug!("{}: {} -> {}", A::NAME, from, self.state());
    }

    /// Current state
    pub fn state(&self) -> EngineState {
        match self.state_machine.state() {
            States::Idle => EngineState::Idle,
            States::Hashing => EngineState::Hashing,
            States::Hold => EngineState::Hold,
            States::Done => EngineState::Done,
        }
    }

    /// Status outputs
    pub fn status(&self) -> EngineStatus {
        EngineStatus {
            idle: self.idle(),
            hold: self.hold(),
            digest_valid: self.digest_valid,
        }
    }

    pub fn idle(&self) -> bool {
        self.state() == EngineState::Idle
    }

    pub fn hold(&self) -> bool {
        self.state() == EngineState::Hold
    }

    pub fn digest_valid(&self) -> bool {
        self.digest_valid
    }

    /// Round counter
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn mode(&self) -> A::Mode {
        self.mode
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    /// Working variables
    pub fn working_state(&self) -> &A::State {
        &self.working
    }

    /// Chaining value
    pub fn chaining_value(&self) -> &A::State {
        &self.chaining
    }

    /// Retrieve the hash
    ///
    /// # Arguments
    ///
    /// * `hash` - Hash to copy, at most `hash_len()` bytes are written
    pub fn hash(&self, hash: &mut [u8]) {
        let len = hash.len().min(self.hash_len());
        for (word, dest) in self
            .chaining
            .as_ref()
            .iter()
            .zip(hash[..len].chunks_mut(A::Word::BYTES))
        {
            word.write_be(dest);
        }
    }

    /// Hash bytes, truncated to the digest length of the mode
    pub fn digest(&self) -> Vec<u8> {
        let mut bytes = vec![0; self.hash_len()];
        self.hash(&mut bytes);
        bytes
    }

    /// Get the length of the hash
    pub fn hash_len(&self) -> usize {
        A::hash_len(self.mode)
    }
}

impl<A: ShaAlgorithm> Default for Engine<A> {
    fn default() -> Self {
        Self::new(A::Mode::default(), Termination::default())
    }
}
