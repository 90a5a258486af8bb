/*++

Licensed under the Apache-2.0 license.

File Name:

    bus.rs

Abstract:

    File contains definition of the Bus trait.

--*/

use sha_emu_types::{BusAddr, BusData, BusStrobe};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BusError {
    /// The device answered a read with an error response
    LoadAccessFault,

    /// The device answered a write with an error response
    StoreAccessFault,

    /// The device did not accept the request or did not answer in time
    NoResponse,
}

impl std::fmt::Display for BusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BusError::LoadAccessFault => write!(f, "load access fault"),
            BusError::StoreAccessFault => write!(f, "store access fault"),
            BusError::NoResponse => write!(f, "no response from device"),
        }
    }
}

impl std::error::Error for BusError {}

/// Represents a transaction-level view of the request/response bus. Each
/// call blocks (in simulated time) until the addressed device has answered.
pub trait Bus {
    /// Read one data word from given address
    ///
    /// # Arguments
    ///
    /// * `addr` - Address to read from
    ///
    /// # Error
    ///
    /// * `BusError` - `BusError::LoadAccessFault` or `BusError::NoResponse`
    fn read(&mut self, addr: BusAddr) -> Result<BusData, BusError>;

    /// Write one data word to given address
    ///
    /// # Arguments
    ///
    /// * `addr` - Address to write
    /// * `val` - Data to write
    /// * `strobe` - Byte enables; only strobed bytes are updated
    ///
    /// # Error
    ///
    /// * `BusError` - `BusError::StoreAccessFault` or `BusError::NoResponse`
    fn write(&mut self, addr: BusAddr, val: BusData, strobe: BusStrobe) -> Result<(), BusError>;

    /// Let `cycles` clock cycles elapse without issuing a request.
    fn idle(&mut self, cycles: u64);

    /// Number of clock cycles elapsed since simulation start.
    fn now(&self) -> u64;
}

impl<T: Bus + ?Sized> Bus for &mut T {
    fn read(&mut self, addr: BusAddr) -> Result<BusData, BusError> {
        T::read(self, addr)
    }

    fn write(&mut self, addr: BusAddr, val: BusData, strobe: BusStrobe) -> Result<(), BusError> {
        T::write(self, addr, val, strobe)
    }

    fn idle(&mut self, cycles: u64) {
        T::idle(self, cycles)
    }

    fn now(&self) -> u64 {
        T::now(self)
    }
}
