/*++

Licensed under the Apache-2.0 license.

File Name:

    root_bus.rs

Abstract:

    File contains the root bus placing one SHA-1, one SHA-256 and one
    SHA-512 accelerator in 4 KiB windows on a shared clock.

--*/

use crate::sha_ip::IpConfig;
use crate::{HashSha1, HashSha256, HashSha512};
use sha_emu_bus::{BusConfig, Device, Request, Response};
use sha_emu_crypto::{Sha1Mode, Sha256Mode, Sha512Mode, Termination};
use sha_emu_types::BusAddr;

/// Root bus construction arguments
#[derive(Debug, Copy, Clone, Default)]
pub struct ShaRootBusArgs {
    pub bus: BusConfig,
    pub sha256_mode: Sha256Mode,
    pub sha512_mode: Sha512Mode,
    pub termination: Termination,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Target {
    Sha1,
    Sha256,
    Sha512,
}

/// Root bus
pub struct ShaRootBus {
    config: BusConfig,

    pub sha1: HashSha1,

    pub sha256: HashSha256,

    pub sha512: HashSha512,

    /// Error responses for unmapped addresses
    response: Response,
}

impl ShaRootBus {
    pub const SHA1_OFFSET: BusAddr = 0x0000;
    pub const SHA256_OFFSET: BusAddr = 0x1000;
    pub const SHA512_OFFSET: BusAddr = 0x2000;

    const WINDOW_SIZE: BusAddr = 0x1000;

    pub fn new(args: ShaRootBusArgs) -> Self {
        Self {
            config: args.bus,
            sha1: HashSha1::new(IpConfig {
                bus: args.bus,
                mode: Sha1Mode::Sha1,
                termination: args.termination,
            }),
            sha256: HashSha256::new(IpConfig {
                bus: args.bus,
                mode: args.sha256_mode,
                termination: args.termination,
            }),
            sha512: HashSha512::new(IpConfig {
                bus: args.bus,
                mode: args.sha512_mode,
                termination: args.termination,
            }),
            response: Response::NONE,
        }
    }

    pub fn config(&self) -> &BusConfig {
        &self.config
    }

    fn decode(&self, addr: BusAddr) -> Option<(Target, BusAddr)> {
        if !self.config.addr_in_range(addr) {
            return None;
        }
        let offset = addr % Self::WINDOW_SIZE;
        let target = match addr - offset {
            Self::SHA1_OFFSET => Target::Sha1,
            Self::SHA256_OFFSET => Target::Sha256,
            Self::SHA512_OFFSET => Target::Sha512,
            _ => return None,
        };
        Some((target, offset))
    }
}

impl Default for ShaRootBus {
    fn default() -> Self {
        Self::new(ShaRootBusArgs::default())
    }
}

impl Device for ShaRootBus {
    fn name(&self) -> &str {
        "root"
    }

    fn req_ready(&self) -> bool {
        !self.response.is_pending()
            && self.sha1.req_ready()
            && self.sha256.req_ready()
            && self.sha512.req_ready()
    }

    fn response(&self) -> Response {
        [
            self.response,
            self.sha1.response(),
            self.sha256.response(),
            self.sha512.response(),
        ]
        .into_iter()
        .find(Response::is_pending)
        .unwrap_or(Response::NONE)
    }

    fn tick(&mut self, req: &Request, rsp_ready: bool) {
        let accepted = req.valid && self.req_ready();
        if self.response.is_pending() && rsp_ready {
            self.response = Response::NONE;
        }

        let mut routed = (Request::IDLE, Request::IDLE, Request::IDLE);
        if accepted {
            match self.decode(req.addr) {
                Some((target, offset)) => {
                    let req = Request { addr: offset, ..*req };
                    match target {
                        Target::Sha1 => routed.0 = req,
                        Target::Sha256 => routed.1 = req,
                        Target::Sha512 => routed.2 = req,
                    }
                }
                None => {
                    log::debug!("root: no device at {:#x}", req.addr);
                    self.response = Response::error();
                }
            }
        }

        // All accelerators run every cycle
        self.sha1.tick(&routed.0, rsp_ready);
        self.sha256.tick(&routed.1, rsp_ready);
        self.sha512.tick(&routed.2, rsp_ready);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::ShaDriver;
    use crate::reg_interface::{BLOCK_OFFSET, CTRL_OFFSET};
    use sha_emu_bus::{Bus, BusError, Clock, Master};
    use sha_emu_crypto::{padding, EngineState, Sha1, Sha256, Sha512};
    use sha_emu_types::{AddrWidth, DataWidth};

    #[test]
    fn test_windows() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut master = Master::new(ShaRootBus::default(), &Clock::new());
        let bus = BusConfig::default();

        let mut sha1 = ShaDriver::<Sha1, _>::new(
            &mut master,
            bus,
            ShaRootBus::SHA1_OFFSET,
            Sha1Mode::Sha1,
        );
        assert_eq!(
            hex::encode(sha1.hash_message(b"abc").unwrap()),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );

        let mut sha256 = ShaDriver::<Sha256, _>::new(
            &mut master,
            bus,
            ShaRootBus::SHA256_OFFSET,
            Sha256Mode::Sha256,
        );
        assert_eq!(
            hex::encode(sha256.hash_message(b"abc").unwrap()),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );

        let mut sha512 = ShaDriver::<Sha512, _>::new(
            &mut master,
            bus,
            ShaRootBus::SHA512_OFFSET,
            Sha512Mode::Sha512,
        );
        assert_eq!(
            hex::encode(sha512.hash_message(b"").unwrap()),
            "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce\
             47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e"
        );
    }

    #[test]
    fn test_unmapped_window() {
        let bus = BusConfig::new(DataWidth::Bits32, AddrWidth::Bits16, true).unwrap();
        let root = ShaRootBus::new(ShaRootBusArgs {
            bus,
            ..ShaRootBusArgs::default()
        });
        let mut master = Master::new(root, &Clock::new());

        assert_eq!(master.read(0x3000), Err(BusError::LoadAccessFault));
        assert_eq!(master.write(0xf100, 0, 0xf), Err(BusError::StoreAccessFault));
        assert_eq!(master.read(0x1_0000), Err(BusError::LoadAccessFault));
        assert_eq!(master.read(0x1004), Err(BusError::LoadAccessFault));

        // Mapped windows still answer
        assert_eq!(master.read(ShaRootBus::SHA256_OFFSET + CTRL_OFFSET), Ok(0x4));
    }

    #[test]
    fn test_engines_run_concurrently() {
        let mut master = Master::new(ShaRootBus::default(), &Clock::new());
        let bus = BusConfig::default();

        let block = &padding::pad::<Sha512>(b"abc")[0];
        ShaDriver::<Sha512, _>::new(&mut master, bus, ShaRootBus::SHA512_OFFSET, Sha512Mode::Sha512)
            .write_block(block)
            .unwrap();
        let block = &padding::pad::<Sha256>(b"abc")[0];
        ShaDriver::<Sha256, _>::new(&mut master, bus, ShaRootBus::SHA256_OFFSET, Sha256Mode::Sha256)
            .write_block(block)
            .unwrap();

        let start = master.now();
        master
            .write(ShaRootBus::SHA512_OFFSET + CTRL_OFFSET, 0x21, 0xf)
            .unwrap();
        master
            .write(ShaRootBus::SHA256_OFFSET + CTRL_OFFSET, 0x21, 0xf)
            .unwrap();
        master.idle(90);

        let root = master.device();
        assert_eq!(root.sha256.engine().state(), EngineState::Done);
        assert_eq!(root.sha512.engine().state(), EngineState::Done);
        assert_eq!(root.sha1.engine().state(), EngineState::Idle);
        assert!(master.now() - start < 66 + 82);

        // The SHA-1 block registers were never touched
        assert_eq!(master.read(ShaRootBus::SHA1_OFFSET + BLOCK_OFFSET), Ok(0));
    }
}
