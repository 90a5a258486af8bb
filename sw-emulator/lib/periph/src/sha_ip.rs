/*++

Licensed under the Apache-2.0 license.

File Name:

    sha_ip.rs

Abstract:

    File contains the SHA accelerator top: a register interface wired to a
    multi-cycle compute engine, clocked as one bus device.

--*/

use crate::reg_interface::RegInterface;
use sha_emu_bus::{BusConfig, ConfigError, Device, Request, Response};
use sha_emu_crypto::{Engine, EngineInputs, ShaAlgorithm, Termination};

/// Largest digest of any supported algorithm (SHA-512)
const MAX_DIGEST_BYTES: usize = 64;

/// Per-instance configuration
pub struct IpConfig<A: ShaAlgorithm> {
    /// Bus parameters
    pub bus: BusConfig,

    /// Digest variant
    pub mode: A::Mode,

    /// Final block detection
    pub termination: Termination,
}

impl<A: ShaAlgorithm> IpConfig<A> {
    /// Create a configuration producing `digest_bits` bit digests
    ///
    /// # Error
    ///
    /// * `ConfigError::UnsupportedDigestWidth` - No mode of the algorithm has this digest width
    pub fn with_digest_bits(
        bus: BusConfig,
        digest_bits: usize,
        termination: Termination,
    ) -> Result<Self, ConfigError> {
        let mode = A::mode_from_bits(digest_bits).ok_or(ConfigError::UnsupportedDigestWidth {
            algorithm: A::NAME,
            bits: digest_bits,
        })?;
        Ok(Self {
            bus,
            mode,
            termination,
        })
    }
}

impl<A: ShaAlgorithm> Clone for IpConfig<A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A: ShaAlgorithm> Copy for IpConfig<A> {}

impl<A: ShaAlgorithm> Default for IpConfig<A> {
    fn default() -> Self {
        Self {
            bus: BusConfig::default(),
            mode: A::Mode::default(),
            termination: Termination::default(),
        }
    }
}

/// SHA accelerator
pub struct ShaIp<A: ShaAlgorithm> {
    /// Register interface
    regs: RegInterface,

    /// Compute engine
    engine: Engine<A>,
}

impl<A: ShaAlgorithm> ShaIp<A> {
    /// Create a new accelerator
    ///
    /// # Arguments
    ///
    /// * `config` - Instance configuration
    pub fn new(config: IpConfig<A>) -> Self {
        Self {
            regs: RegInterface::new(config.bus, A::BLOCK_BYTES, A::hash_len(config.mode)),
            engine: Engine::new(config.mode, config.termination),
        }
    }

    pub fn regs(&self) -> &RegInterface {
        &self.regs
    }

    pub fn engine(&self) -> &Engine<A> {
        &self.engine
    }
}

impl<A: ShaAlgorithm> Default for ShaIp<A> {
    fn default() -> Self {
        Self::new(IpConfig::default())
    }
}

impl<A: ShaAlgorithm> Device for ShaIp<A> {
    fn name(&self) -> &str {
        A::NAME
    }

    fn req_ready(&self) -> bool {
        self.regs.req_ready()
    }

    fn response(&self) -> Response {
        self.regs.response()
    }

    fn tick(&mut self, req: &Request, rsp_ready: bool) {
        // The engine samples the control bits committed at the previous edge
        let inputs = EngineInputs {
            block: self.regs.block(),
            enable: self.regs.enable(),
            reset: self.regs.reset(),
            last_block: self.regs.last_block(),
        };
        self.engine.tick(&inputs);

        let mut digest = [0u8; MAX_DIGEST_BYTES];
        let len = self.engine.hash_len();
        self.engine.hash(&mut digest[..len]);
        self.regs
            .tick(req, rsp_ready, self.engine.status(), &digest[..len]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha_emu_crypto::{EngineState, Sha1, Sha512, Sha512Mode};

    #[test]
    fn test_digest_bits() {
        let config =
            IpConfig::<Sha512>::with_digest_bits(BusConfig::default(), 384, Termination::LastBlock)
                .unwrap();
        assert_eq!(config.mode, Sha512Mode::Sha384);

        let ip = ShaIp::new(config);
        assert_eq!(ip.regs().digest_words(), 12);
        assert_eq!(ip.engine().hash_len(), 48);

        assert_eq!(
            IpConfig::<Sha1>::with_digest_bits(BusConfig::default(), 256, Termination::LastBlock)
                .err(),
            Some(ConfigError::UnsupportedDigestWidth {
                algorithm: "SHA-1",
                bits: 256
            })
        );
    }

    #[test]
    fn test_engine_samples_committed_control() {
        let mut ip = ShaIp::<Sha1>::default();
        ip.tick(&Request::write(0, 0x1, 0xf), true);

        // The write commits at this edge; the engine sees it on the next one
        assert_eq!(ip.engine().state(), EngineState::Idle);
        assert!(ip.regs().enable());

        ip.tick(&Request::IDLE, true);
        assert_eq!(ip.engine().state(), EngineState::Hashing);
        assert!(ip.regs().enable());
        assert!(ip.req_ready());
    }
}
