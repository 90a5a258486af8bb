/*++

Licensed under the Apache-2.0 license.

File Name:

    main.rs

Abstract:

    File contains main entrypoint for SHA Emulator.

--*/

use anyhow::{bail, Context};
use clap::builder::PossibleValuesParser;
use clap::{arg, value_parser, ArgAction, ArgMatches};
use sha_emu_bus::testing::BusTrace;
use sha_emu_bus::{Bus, BusConfig, Clock, ConfigError, Master};
use sha_emu_crypto::{Sha1, Sha256, Sha512, ShaAlgorithm, Termination};
use sha_emu_periph::{IpConfig, ShaDriver, ShaRootBus, ShaRootBusArgs};
use std::io::Read;
use std::path::PathBuf;

/// Everything one hashing run needs besides the accelerator selection
struct Run<'a> {
    root: ShaRootBusArgs,
    message: &'a [u8],
    timeout: u64,
    clock: Clock,
    trace: BusTrace,
}

fn ip_config<A: ShaAlgorithm>(
    bus: BusConfig,
    digest_bits: Option<u64>,
    termination: Termination,
) -> Result<IpConfig<A>, ConfigError> {
    match digest_bits {
        Some(bits) => IpConfig::with_digest_bits(bus, bits as usize, termination),
        None => Ok(IpConfig {
            bus,
            mode: A::Mode::default(),
            termination,
        }),
    }
}

fn hash<A: ShaAlgorithm>(run: &Run, base: u64, mode: A::Mode) -> anyhow::Result<Vec<u8>> {
    let master =
        Master::new(ShaRootBus::new(run.root), &run.clock).with_trace(run.trace.clone());
    let mut driver = ShaDriver::<A, _>::new(master, run.root.bus, base, mode);
    driver.set_timeout(run.timeout);

    let digest = driver
        .hash_message(run.message)
        .with_context(|| format!("{} accelerator failed", A::NAME))?;
    log::info!(
        "{}: {} byte message hashed at cycle {}",
        A::NAME,
        run.message.len(),
        driver.bus().now()
    );
    Ok(digest)
}

fn read_message(args: &ArgMatches) -> anyhow::Result<Vec<u8>> {
    if let Some(message) = args.get_one::<String>("message") {
        return Ok(message.as_bytes().to_vec());
    }
    let mut message = Vec::new();
    match args.get_one::<PathBuf>("file") {
        Some(path) => {
            std::fs::File::open(path)
                .and_then(|mut file| file.read_to_end(&mut message))
                .with_context(|| format!("cannot read {}", path.display()))?;
        }
        None => {
            std::io::stdin()
                .read_to_end(&mut message)
                .context("cannot read stdin")?;
        }
    }
    Ok(message)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = clap::Command::new("sha-emu")
        .about("Cycle-level SHA accelerator emulator")
        .arg(
            arg!(--algo <ALGO> "Hash algorithm")
                .required(false)
                .default_value("sha256")
                .value_parser(PossibleValuesParser::new(["sha1", "sha256", "sha512"])),
        )
        .arg(
            arg!(--digest-width <BITS> "Digest width in bits")
                .required(false)
                .value_parser(value_parser!(u64)),
        )
        .arg(
            arg!(--data-width <BITS> "Bus data width in bits")
                .required(false)
                .default_value("32")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            arg!(--addr-width <BITS> "Bus address width in bits")
                .required(false)
                .default_value("32")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            arg!(--word-align "Addresses count 32-bit words instead of bytes")
                .action(ArgAction::SetTrue),
        )
        .arg(
            arg!(--termination <MODE> "Final block detection")
                .required(false)
                .default_value("last-block")
                .value_parser(PossibleValuesParser::new(["last-block", "byte-scan"])),
        )
        .arg(
            arg!(--timeout <CYCLES> "Cycles to wait for each block")
                .required(false)
                .default_value("10000")
                .value_parser(value_parser!(u64)),
        )
        .arg(arg!(--message <TEXT> "Message to hash").required(false))
        .arg(
            arg!(--file <FILE> "File to hash")
                .required(false)
                .conflicts_with("message")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            arg!(--trace <FILE> "Bus transaction trace file")
                .required(false)
                .value_parser(value_parser!(PathBuf)),
        )
        .get_matches();

    let number = |name: &str| {
        args.get_one::<u64>(name)
            .copied()
            .with_context(|| format!("missing --{name}"))
    };
    let bus = BusConfig::from_bits(
        number("data-width")? as usize,
        number("addr-width")? as usize,
        !matches!(args.get_one::<bool>("word-align"), Some(true)),
    )?;
    let termination = match args.get_one::<String>("termination").map(String::as_str) {
        Some("byte-scan") => Termination::ByteScan,
        _ => Termination::LastBlock,
    };
    let digest_bits = args.get_one::<u64>("digest-width").copied();
    let message = read_message(&args)?;

    let mut run = Run {
        root: ShaRootBusArgs {
            bus,
            termination,
            ..ShaRootBusArgs::default()
        },
        message: &message,
        timeout: number("timeout")?,
        clock: Clock::new(),
        trace: BusTrace::new(),
    };

    let digest = match args.get_one::<String>("algo").map(String::as_str) {
        Some("sha1") => {
            let config = ip_config::<Sha1>(bus, digest_bits, termination)?;
            hash::<Sha1>(&run, ShaRootBus::SHA1_OFFSET, config.mode)?
        }
        Some("sha256") => {
            let config = ip_config::<Sha256>(bus, digest_bits, termination)?;
            run.root.sha256_mode = config.mode;
            hash::<Sha256>(&run, ShaRootBus::SHA256_OFFSET, config.mode)?
        }
        Some("sha512") => {
            let config = ip_config::<Sha512>(bus, digest_bits, termination)?;
            run.root.sha512_mode = config.mode;
            hash::<Sha512>(&run, ShaRootBus::SHA512_OFFSET, config.mode)?
        }
        other => bail!("unsupported algorithm {:?}", other),
    };

    println!("{}", hex::encode(digest));
    println!("cycles: {}", run.clock.now());

    if let Some(path) = args.get_one::<PathBuf>("trace") {
        std::fs::write(path, run.trace.render())
            .with_context(|| format!("cannot write trace to {}", path.display()))?;
    }

    Ok(())
}
