/*++

Licensed under the Apache-2.0 license.

File Name:

    hash_sha1.rs

Abstract:

    File contains SHA-1 peripheral implementation.

--*/

use crate::sha_ip::ShaIp;
use sha_emu_crypto::Sha1;

/// SHA-1 Peripheral
pub type HashSha1 = ShaIp<Sha1>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::ShaDriver;
    use crate::reg_interface::{BLOCK_OFFSET, CTRL_OFFSET, DIGEST_OFFSET};
    use crate::sha_ip::IpConfig;
    use sha_emu_bus::{Bus, BusConfig, Clock, Master};
    use sha_emu_crypto::{padding, Sha1Mode, Termination};
    use sha_emu_types::{AddrWidth, DataWidth};

    fn master(config: IpConfig<Sha1>) -> Master<HashSha1> {
        Master::new(HashSha1::new(config), &Clock::new())
    }

    #[test]
    fn test_sha1_abc_raw_registers() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut bus = master(IpConfig::default());

        // Block words are written least significant first
        let block = &padding::pad::<Sha1>(b"abc")[0];
        for (index, chunk) in block.rchunks(4).enumerate() {
            let val = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            bus.write(BLOCK_OFFSET + 4 * index as u64, val.into(), 0xf)
                .unwrap();
        }
        bus.write(CTRL_OFFSET, 0x21, 0xf).unwrap();

        let mut ctrl = 0;
        for _ in 0..100 {
            ctrl = bus.read(CTRL_OFFSET).unwrap();
            if ctrl & 0x10 != 0 {
                break;
            }
        }
        assert_eq!(ctrl & 0x1d, 0x10, "valid set, enable cleared");

        let mut digest = vec![];
        for index in (0..5).rev() {
            let word = bus.read(DIGEST_OFFSET + 4 * index).unwrap() as u32;
            digest.extend_from_slice(&word.to_be_bytes());
        }
        assert_eq!(hex::encode(digest), "a9993e364706816aba3e25717850c26c9cd0d89d");
    }

    #[test]
    fn test_sha1_two_blocks_wide_bus() {
        let bus_config = BusConfig::new(DataWidth::Bits128, AddrWidth::Bits16, false).unwrap();
        let config = IpConfig {
            bus: bus_config,
            mode: Sha1Mode::Sha1,
            termination: Termination::LastBlock,
        };
        let mut driver = ShaDriver::<Sha1, _>::new(master(config), bus_config, 0, Sha1Mode::Sha1);
        let digest = driver
            .hash_message(b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq")
            .unwrap();
        assert_eq!(hex::encode(digest), "84983e441c3bd26ebaae4aa1f95129e5e54670f1");
    }

    #[test]
    fn test_sha1_byte_scan() {
        let config = IpConfig {
            termination: Termination::ByteScan,
            ..IpConfig::default()
        };
        let bus_config = config.bus;
        let mut driver = ShaDriver::<Sha1, _>::new(master(config), bus_config, 0, Sha1Mode::Sha1);
        assert_eq!(
            hex::encode(driver.hash_message(b"").unwrap()),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
    }
}
