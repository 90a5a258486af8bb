/*++

Licensed under the Apache-2.0 license.

File Name:

    width.rs

Abstract:

    File contains the bus width parameters fixed at instantiation time.

--*/

use crate::bus_enum;

bus_enum! {
    /// Width of the bus data channel in bits
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    pub DataWidth;
    usize;
    {
        Bits8 = 8,
        Bits16 = 16,
        Bits32 = 32,
        Bits64 = 64,
        Bits128 = 128,
    }
}

bus_enum! {
    /// Width of the bus address channel in bits
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    pub AddrWidth;
    usize;
    {
        Bits16 = 16,
        Bits32 = 32,
        Bits64 = 64,
    }
}

impl DataWidth {
    /// Number of bits in a data word.
    pub fn bits(self) -> usize {
        usize::from(self)
    }

    /// Number of bytes in a data word, which is also the number of strobe bits.
    pub fn bytes(self) -> usize {
        self.bits() / 8
    }
}

impl AddrWidth {
    /// Number of bits in an address.
    pub fn bits(self) -> usize {
        usize::from(self)
    }
}
