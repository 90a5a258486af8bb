// Licensed under the Apache-2.0 license

use rand::Rng;
use sha2::Digest;
use sha_emu_bus::testing::BusTrace;
use sha_emu_bus::{Bus, BusConfig, Clock, Master};
use sha_emu_crypto::{Sha1, Sha1Mode, Sha256, Sha256Mode, Sha512, Sha512Mode, Termination};
use sha_emu_periph::{ShaDriver, ShaRootBus, ShaRootBusArgs};
use sha_emu_types::{AddrWidth, DataWidth};

fn root_master(args: ShaRootBusArgs) -> Master<ShaRootBus> {
    let _ = env_logger::builder().is_test(true).try_init();
    Master::new(ShaRootBus::new(args), &Clock::new())
}

#[test]
fn test_random_messages_all_engines() {
    let mut rng = rand::thread_rng();
    let bus = BusConfig::new(DataWidth::Bits64, AddrWidth::Bits32, false).unwrap();
    let mut master = root_master(ShaRootBusArgs {
        bus,
        sha256_mode: Sha256Mode::Sha224,
        sha512_mode: Sha512Mode::Sha384,
        termination: Termination::LastBlock,
    });

    for _ in 0..4 {
        let len = rng.gen_range(0..400);
        let message: Vec<u8> = (0..len).map(|_| rng.gen()).collect();

        let digest = ShaDriver::<Sha256, _>::new(
            &mut master,
            bus,
            ShaRootBus::SHA256_OFFSET,
            Sha256Mode::Sha224,
        )
        .hash_message(&message)
        .unwrap();
        assert_eq!(digest, sha2::Sha224::digest(&message).to_vec());

        let digest = ShaDriver::<Sha512, _>::new(
            &mut master,
            bus,
            ShaRootBus::SHA512_OFFSET,
            Sha512Mode::Sha384,
        )
        .hash_message(&message)
        .unwrap();
        assert_eq!(digest, sha2::Sha384::digest(&message).to_vec());

        let digest = ShaDriver::<Sha1, _>::new(
            &mut master,
            bus,
            ShaRootBus::SHA1_OFFSET,
            Sha1Mode::Sha1,
        )
        .hash_message(&message)
        .unwrap();
        assert_eq!(digest, sha1::Sha1::digest(&message).to_vec());
    }
}

#[test]
fn test_byte_scan_root_bus() {
    let bus = BusConfig::default();
    let mut master = root_master(ShaRootBusArgs {
        termination: Termination::ByteScan,
        ..ShaRootBusArgs::default()
    });

    for len in [0, 3, 55, 56, 64, 119] {
        let message = vec![0x61u8; len];
        let digest = ShaDriver::<Sha256, _>::new(
            &mut master,
            bus,
            ShaRootBus::SHA256_OFFSET,
            Sha256Mode::Sha256,
        )
        .hash_message(&message)
        .unwrap();
        assert_eq!(digest, sha2::Sha256::digest(&message).to_vec(), "{len} bytes");
    }
}

#[test]
fn test_block_register_round_trip() {
    let mut rng = rand::thread_rng();
    let bus = BusConfig::default();
    let trace = BusTrace::new();
    let mut master = root_master(ShaRootBusArgs::default()).with_trace(trace.clone());

    for index in 0..32 {
        let addr = ShaRootBus::SHA512_OFFSET + 0x100 + 4 * index;
        let val: u32 = rng.gen();
        master.write(addr, val.into(), 0xf).unwrap();
        let before = master.now();
        assert_eq!(master.read(addr), Ok(val.into()));
        assert_eq!(master.now() - before, 2);
    }

    let entries = trace.entries();
    assert_eq!(entries.len(), 64);
    assert!(entries.iter().all(|entry| !entry.error));
}
