/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the SHA Emulator Bus library.

--*/
mod bus;
mod clock;
mod config;
mod device;
mod master;
mod register;
mod signals;
pub mod testing;

pub use crate::bus::{Bus, BusError};
pub use crate::clock::{Clock, Deadline, Timer};
pub use crate::config::{BusConfig, ConfigError};
pub use crate::device::Device;
pub use crate::master::Master;
pub use crate::register::BitVector;
pub use crate::signals::{Request, Response};
