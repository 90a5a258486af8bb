/*++

Licensed under the Apache-2.0 license.

File Name:

    hash_sha512.rs

Abstract:

    File contains SHA-512 peripheral implementation.

--*/

use crate::sha_ip::ShaIp;
use sha_emu_crypto::Sha512;

/// SHA-512/384/256/224 Peripheral
pub type HashSha512 = ShaIp<Sha512>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::ShaDriver;
    use crate::sha_ip::IpConfig;
    use rand::Rng;
    use sha_emu_bus::{BusConfig, Clock, Master};
    use sha_emu_crypto::{Sha512Mode, Termination};
    use sha_emu_types::{AddrWidth, DataWidth};
    use sha2::Digest;

    fn hash(bus: BusConfig, mode: Sha512Mode, message: &[u8]) -> Vec<u8> {
        let ip = HashSha512::new(IpConfig {
            bus,
            mode,
            termination: Termination::LastBlock,
        });
        let mut driver = ShaDriver::<Sha512, _>::new(Master::new(ip, &Clock::new()), bus, 0, mode);
        driver.hash_message(message).unwrap()
    }

    #[test]
    fn test_sha512_modes() {
        let bus = BusConfig::new(DataWidth::Bits64, AddrWidth::Bits32, true).unwrap();
        let message = b"abc";
        assert_eq!(
            hash(bus, Sha512Mode::Sha224, message),
            sha2::Sha512_224::digest(message).to_vec()
        );
        assert_eq!(
            hash(bus, Sha512Mode::Sha256, message),
            sha2::Sha512_256::digest(message).to_vec()
        );
        assert_eq!(
            hash(bus, Sha512Mode::Sha384, message),
            sha2::Sha384::digest(message).to_vec()
        );
        assert_eq!(
            hash(bus, Sha512Mode::Sha512, message),
            sha2::Sha512::digest(message).to_vec()
        );
    }

    #[test]
    fn test_sha512_random_multi_block() {
        let mut rng = rand::thread_rng();
        let bus = BusConfig::default();
        for _ in 0..4 {
            let len = rng.gen_range(112..400);
            let message: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
            assert_eq!(
                hash(bus, Sha512Mode::Sha512, &message),
                sha2::Sha512::digest(&message).to_vec()
            );
        }
    }

    #[test]
    fn test_sha384_narrow_bus() {
        let bus = BusConfig::new(DataWidth::Bits16, AddrWidth::Bits16, true).unwrap();
        let message = [0xc3u8; 130];
        assert_eq!(
            hash(bus, Sha512Mode::Sha384, &message),
            sha2::Sha384::digest(message).to_vec()
        );
    }
}
