/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for for SHA Emulator Peripheral library.

--*/
mod driver;
mod hash_sha1;
mod hash_sha256;
mod hash_sha512;
pub mod reg_interface;
mod root_bus;
mod sha_ip;

pub use driver::{DriverError, ShaDriver};
pub use hash_sha1::HashSha1;
pub use hash_sha256::HashSha256;
pub use hash_sha512::HashSha512;
pub use reg_interface::{Control, ControlRegister, RegInterface};
pub use root_bus::{ShaRootBus, ShaRootBusArgs};
pub use sha_ip::{IpConfig, ShaIp};
