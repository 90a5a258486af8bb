/*++

Licensed under the Apache-2.0 license.

File Name:

    driver.rs

Abstract:

    File contains the caller-side driver of a SHA accelerator: block and
    digest transfers, control bit helpers, and block-by-block message
    orchestration with a cycle timeout.

--*/

use crate::reg_interface::{Control, ControlRegister, BLOCK_OFFSET, CTRL_OFFSET, DIGEST_OFFSET};
use sha_emu_bus::{BitVector, Bus, BusConfig, BusError};
use sha_emu_crypto::{padding, ShaAlgorithm};
use sha_emu_types::BusAddr;
use std::fmt;

/// Driver errors
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DriverError {
    /// A register access failed
    Bus(BusError),

    /// The accelerator made no progress within the allowed cycles
    Timeout { cycles: u64 },
}

impl From<BusError> for DriverError {
    fn from(err: BusError) -> Self {
        DriverError::Bus(err)
    }
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::Bus(err) => write!(f, "bus error: {err}"),
            DriverError::Timeout { cycles } => {
                write!(f, "accelerator timed out after {cycles} cycles")
            }
        }
    }
}

impl std::error::Error for DriverError {}

/// Drives one SHA accelerator mapped at `base` on a bus
pub struct ShaDriver<A: ShaAlgorithm, B: Bus> {
    /// Bus the accelerator sits on
    bus: B,

    /// Bus parameters the accelerator was built with
    config: BusConfig,

    /// Base address of the accelerator
    base: BusAddr,

    /// Digest variant the accelerator computes
    mode: A::Mode,

    /// Cycles to wait for a block before giving up
    timeout: u64,
}

impl<A: ShaAlgorithm, B: Bus> ShaDriver<A, B> {
    /// Default number of cycles `hash_message` waits for each block
    pub const DEFAULT_TIMEOUT: u64 = 10_000;

    /// Create a new driver
    ///
    /// # Arguments
    ///
    /// * `bus` - Bus to issue register accesses on
    /// * `config` - Bus parameters of the accelerator
    /// * `base` - Base address of the accelerator
    /// * `mode` - Digest variant the accelerator was built for
    pub fn new(bus: B, config: BusConfig, base: BusAddr, mode: A::Mode) -> Self {
        Self {
            bus,
            config,
            base,
            mode,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn set_timeout(&mut self, cycles: u64) {
        self.timeout = cycles;
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    fn digest_bytes(&self) -> usize {
        let data_bytes = self.config.data_bytes();
        let words = (A::hash_len(self.mode) + data_bytes - 1) / data_bytes;
        words * data_bytes
    }

    /// Write a block to the block registers
    ///
    /// # Arguments
    ///
    /// * `block` - Block in message order; missing trailing bytes are zero
    pub fn write_block(&mut self, block: &[u8]) -> Result<(), DriverError> {
        let mut bytes = vec![0u8; A::BLOCK_BYTES];
        bytes.iter_mut().zip(block).for_each(|(dest, src)| *dest = *src);
        let block = BitVector::from_be_bytes(&bytes);

        let data_bytes = self.config.data_bytes();
        for index in 0..block.word_count(data_bytes) {
            let addr = self.config.word_addr(self.base + BLOCK_OFFSET, index);
            self.bus.write(
                addr,
                block.word(index, data_bytes),
                self.config.strobe_mask(),
            )?;
        }
        Ok(())
    }

    /// Read the block registers back, in message order
    pub fn read_block(&mut self) -> Result<Vec<u8>, DriverError> {
        self.read_region(BLOCK_OFFSET, A::BLOCK_BYTES)
    }

    /// Read the digest registers, truncated to the digest length
    pub fn read_digest(&mut self) -> Result<Vec<u8>, DriverError> {
        let bytes = self.read_region(DIGEST_OFFSET, self.digest_bytes())?;
        Ok(bytes[bytes.len() - A::hash_len(self.mode)..].to_vec())
    }

    fn read_region(&mut self, offset: BusAddr, len: usize) -> Result<Vec<u8>, DriverError> {
        let data_bytes = self.config.data_bytes();
        let mut region = BitVector::new(len);
        for index in 0..region.word_count(data_bytes) {
            let addr = self.config.word_addr(self.base + offset, index);
            let val = self.bus.read(addr)?;
            region.write_word(index, data_bytes, val, self.config.strobe_mask());
        }
        Ok(region.as_bytes().to_vec())
    }

    /// Read the control register
    pub fn read_control(&mut self) -> Result<ControlRegister, DriverError> {
        let val = self.bus.read(self.base + CTRL_OFFSET)?;
        Ok(ControlRegister::new(val as u32))
    }

    fn write_control(&mut self, ctrl: ControlRegister) -> Result<(), DriverError> {
        self.bus.write(
            self.base + CTRL_OFFSET,
            ctrl.get().into(),
            self.config.strobe_mask(),
        )?;
        Ok(())
    }

    /// Start or resume hashing of the staged block
    ///
    /// # Arguments
    ///
    /// * `last_block` - The staged block ends the message
    pub fn enable(&mut self, last_block: bool) -> Result<(), DriverError> {
        let mut ctrl = ControlRegister::new(0);
        ctrl.modify(Control::ENABLE::SET + Control::LAST_BLOCK.val(last_block as u32));
        self.write_control(ctrl)
    }

    /// Clear enable, pausing a running block
    pub fn disable(&mut self) -> Result<(), DriverError> {
        self.write_control(ControlRegister::new(0))
    }

    /// Pulse reset
    pub fn reset(&mut self) -> Result<(), DriverError> {
        let mut ctrl = ControlRegister::new(0);
        ctrl.modify(Control::RESET::SET);
        self.write_control(ctrl)
    }

    pub fn read_hold(&mut self) -> Result<bool, DriverError> {
        Ok(self.read_control()?.is_set(Control::HOLD))
    }

    pub fn read_valid(&mut self) -> Result<bool, DriverError> {
        Ok(self.read_control()?.is_set(Control::VALID))
    }

    pub fn read_idle(&mut self) -> Result<bool, DriverError> {
        Ok(self.read_control()?.is_set(Control::IDLE))
    }

    /// Poll until the accelerator parks in HOLD or finishes
    ///
    /// # Error
    ///
    /// * `DriverError::Timeout` - Neither happened within `timeout` cycles
    pub fn wait_for_block(&mut self, timeout: u64) -> Result<(), DriverError> {
        self.wait_until(timeout, |ctrl| {
            ctrl.is_set(Control::HOLD) || ctrl.is_set(Control::VALID)
        })
    }

    /// Poll until the digest is valid
    ///
    /// # Error
    ///
    /// * `DriverError::Timeout` - The digest did not become valid within `timeout` cycles
    pub fn wait_for_valid(&mut self, timeout: u64) -> Result<(), DriverError> {
        self.wait_until(timeout, |ctrl| ctrl.is_set(Control::VALID))
    }

    fn wait_until(
        &mut self,
        timeout: u64,
        done: impl Fn(&ControlRegister) -> bool,
    ) -> Result<(), DriverError> {
        let start = self.bus.now();
        loop {
            if done(&self.read_control()?) {
                return Ok(());
            }
            let cycles = self.bus.now() - start;
            if cycles >= timeout {
                log::warn!("{} accelerator stalled for {} cycles", A::NAME, cycles);
                Err(DriverError::Timeout { cycles })?
            }
        }
    }

    /// Hash a complete message: pad it, feed the blocks one by one, read the
    /// digest and reset the accelerator.
    ///
    /// # Arguments
    ///
    /// * `message` - Message to hash
    pub fn hash_message(&mut self, message: &[u8]) -> Result<Vec<u8>, DriverError> {
        let blocks = padding::pad::<A>(message);
        log::debug!(
            "{}: hashing {} bytes in {} blocks",
            A::NAME,
            message.len(),
            blocks.len()
        );

        for (index, block) in blocks.iter().enumerate() {
            let last_block = index + 1 == blocks.len();
            self.write_block(block)?;
            self.enable(last_block)?;
            if last_block {
                self.wait_for_valid(self.timeout)?;
            } else {
                self.wait_for_block(self.timeout)?;
            }
        }

        let digest = self.read_digest()?;
        self.reset()?;
        Ok(digest)
    }
}
