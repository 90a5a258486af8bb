/*++

Licensed under the Apache-2.0 license.

File Name:

    reg_interface.rs

Abstract:

    File contains the byte-addressable register interface placed in front of
    a SHA compute engine: control register, block registers and digest
    registers behind a valid/ready request/response channel.

--*/

use sha_emu_bus::{BitVector, BusConfig, BusError, Request, Response};
use sha_emu_crypto::EngineStatus;
use sha_emu_types::{BusAddr, BusData, BusStrobe};
use tock_registers::{register_bitfields, LocalRegisterCopy};

register_bitfields! [
    u32,

    /// Control Register Fields
    pub Control [
        ENABLE OFFSET(0) NUMBITS(1) [],
        RESET OFFSET(1) NUMBITS(1) [],
        IDLE OFFSET(2) NUMBITS(1) [],
        HOLD OFFSET(3) NUMBITS(1) [],
        VALID OFFSET(4) NUMBITS(1) [],
        LAST_BLOCK OFFSET(5) NUMBITS(1) [],
    ],
];

/// Control register value
pub type ControlRegister = LocalRegisterCopy<u32, Control::Register>;

/// Control register offset
pub const CTRL_OFFSET: BusAddr = 0x000;

/// Block region offset
pub const BLOCK_OFFSET: BusAddr = 0x100;

/// Digest region offset
pub const DIGEST_OFFSET: BusAddr = 0x200;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Region {
    Control,
    Block(usize),
    Digest(usize),
}

/// Register map of one SHA instance
pub struct RegInterface {
    /// Bus parameters
    config: BusConfig,

    /// Committed ENABLE, RESET and LAST_BLOCK bits
    control: ControlRegister,

    /// Engine status mirrored at the last clock edge
    status: EngineStatus,

    /// Staged block
    block: BitVector,

    /// Digest, zero-extended to whole data words
    digest: BitVector,

    /// Response channel
    response: Response,
}

impl RegInterface {
    /// Create a new register interface
    ///
    /// # Arguments
    ///
    /// * `config` - Bus parameters
    /// * `block_bytes` - Size of the block region contents
    /// * `digest_bytes` - Size of the digest
    pub fn new(config: BusConfig, block_bytes: usize, digest_bytes: usize) -> Self {
        let data_bytes = config.data_bytes();
        let digest_words = (digest_bytes + data_bytes - 1) / data_bytes;
        Self {
            config,
            control: ControlRegister::new(0),
            status: EngineStatus {
                idle: true,
                ..EngineStatus::default()
            },
            block: BitVector::new(block_bytes),
            digest: BitVector::new(digest_words * data_bytes),
            response: Response::NONE,
        }
    }

    pub fn config(&self) -> &BusConfig {
        &self.config
    }

    /// Staged block, message order
    pub fn block(&self) -> &[u8] {
        self.block.as_bytes()
    }

    pub fn enable(&self) -> bool {
        self.control.is_set(Control::ENABLE)
    }

    pub fn reset(&self) -> bool {
        self.control.is_set(Control::RESET)
    }

    pub fn last_block(&self) -> bool {
        self.control.is_set(Control::LAST_BLOCK)
    }

    /// Control register as seen by a read
    pub fn control(&self) -> ControlRegister {
        let mut view = self.control;
        view.modify(
            Control::IDLE.val(self.status.idle as u32)
                + Control::HOLD.val(self.status.hold as u32)
                + Control::VALID.val(self.status.digest_valid as u32),
        );
        view
    }

    /// Number of data words in the block region
    pub fn block_words(&self) -> usize {
        self.block.word_count(self.config.data_bytes())
    }

    /// Number of data words in the digest region
    pub fn digest_words(&self) -> usize {
        self.digest.word_count(self.config.data_bytes())
    }

    pub fn req_ready(&self) -> bool {
        !self.response.is_pending()
    }

    pub fn response(&self) -> Response {
        self.response
    }

    /// Advance one clock cycle
    ///
    /// # Arguments
    ///
    /// * `req` - Request channel
    /// * `rsp_ready` - The master takes the pending response this cycle
    /// * `status` - Engine status after this clock edge
    /// * `digest` - Engine digest after this clock edge
    pub fn tick(&mut self, req: &Request, rsp_ready: bool, status: EngineStatus, digest: &[u8]) {
        let accepted = req.valid && self.req_ready();
        if self.response.is_pending() && rsp_ready {
            self.response = Response::NONE;
        }

        let mut written = None;
        if accepted {
            let result = if req.write {
                self.write(req.addr, req.data, req.strobe)
                    .map(|ctrl| {
                        written = ctrl;
                        0
                    })
            } else {
                self.read(req.addr)
            };
            self.response = match result {
                Ok(data) => Response::ok(data),
                Err(err) => {
                    log::debug!("register access at {:#x} failed: {}", req.addr, err);
                    Response::error()
                }
            };
        }

        self.commit_control(written, status);
        self.status = status;
        self.digest.load_be_bytes(digest);
    }

    /// Compute the next ENABLE, RESET and LAST_BLOCK bits
    fn commit_control(&mut self, written: Option<ControlRegister>, status: EngineStatus) {
        let (enable, reset, last_block) = match written {
            Some(val) => (
                val.is_set(Control::ENABLE),
                val.is_set(Control::RESET),
                val.is_set(Control::LAST_BLOCK),
            ),
            None => {
                let reset = self.reset();
                let clear = status.idle || status.hold || status.digest_valid || reset;
                (self.enable() && !clear, false, self.last_block() && !reset)
            }
        };

        self.control = ControlRegister::new(0);
        self.control.modify(
            Control::ENABLE.val(enable as u32)
                + Control::RESET.val(reset as u32)
                + Control::LAST_BLOCK.val(last_block as u32),
        );
    }

    fn decode(&self, addr: BusAddr) -> Option<Region> {
        if !self.config.addr_in_range(addr) {
            return None;
        }
        if addr == CTRL_OFFSET {
            return Some(Region::Control);
        }
        if let Some(index) = self.config.word_index(BLOCK_OFFSET, self.block_words(), addr) {
            return Some(Region::Block(index));
        }
        self.config
            .word_index(DIGEST_OFFSET, self.digest_words(), addr)
            .map(Region::Digest)
    }

    /// Read a register
    ///
    /// # Arguments
    ///
    /// * `addr` - Address to read from
    ///
    /// # Error
    ///
    /// * `BusError::LoadAccessFault` - Address outside the register map
    pub fn read(&self, addr: BusAddr) -> Result<BusData, BusError> {
        let data_bytes = self.config.data_bytes();
        let val = match self.decode(addr) {
            Some(Region::Control) => self.control().get() as BusData,
            Some(Region::Block(index)) => self.block.word(index, data_bytes),
            Some(Region::Digest(index)) => self.digest.word(index, data_bytes),
            None => Err(BusError::LoadAccessFault)?,
        };
        Ok(val & self.config.data_mask())
    }

    /// Write a register. Returns the new control value for a control write
    /// that has to be committed.
    ///
    /// # Arguments
    ///
    /// * `addr` - Address to write to
    /// * `val` - Data to write
    /// * `strobe` - Byte enables
    ///
    /// # Error
    ///
    /// * `BusError::StoreAccessFault` - Address outside the register map, or
    ///   a read-only control bit set
    pub fn write(
        &mut self,
        addr: BusAddr,
        val: BusData,
        strobe: BusStrobe,
    ) -> Result<Option<ControlRegister>, BusError> {
        let val = val & self.config.data_mask();
        let strobe = strobe & self.config.strobe_mask();
        match self.decode(addr) {
            Some(Region::Control) => {
                if strobe & 1 == 0 {
                    return Ok(None);
                }
                let ctrl = ControlRegister::new(val as u32);
                if ctrl.is_set(Control::IDLE)
                    || ctrl.is_set(Control::HOLD)
                    || ctrl.is_set(Control::VALID)
                {
                    Err(BusError::StoreAccessFault)?
                }
                Ok(Some(ctrl))
            }
            Some(Region::Block(index)) => {
                let data_bytes = self.config.data_bytes();
                self.block.write_word(index, data_bytes, val, strobe);
                Ok(None)
            }
            Some(Region::Digest(_)) => Ok(None),
            None => Err(BusError::StoreAccessFault)?,
        }
    }
}
