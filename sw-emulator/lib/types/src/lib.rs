/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the SHA Emulator Types library.

--*/

mod macros;
mod width;

pub use crate::width::{AddrWidth, DataWidth};

/// Bus data word. Wide enough for the largest supported data width (128 bits).
pub type BusData = u128;

/// Bus address. Wide enough for the largest supported address width (64 bits).
pub type BusAddr = u64;

/// Per-byte write strobe. Bit `n` enables byte `n` of a [`BusData`] word.
pub type BusStrobe = u16;
