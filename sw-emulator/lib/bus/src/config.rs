/*++

Licensed under the Apache-2.0 license.

File Name:

    config.rs

Abstract:

    File contains the bus protocol parameters fixed at instantiation.

--*/

use sha_emu_types::{AddrWidth, BusAddr, BusData, BusStrobe, DataWidth};

/// Errors raised while building a bus or accelerator configuration.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ConfigError {
    /// Data width is not one of 8, 16, 32, 64, 128
    UnsupportedDataWidth(usize),

    /// Address width is not one of 16, 32, 64
    UnsupportedAddrWidth(usize),

    /// Word addressing needs a data width of at least 32 bits
    WordAlignedDataWidth(DataWidth),

    /// The algorithm has no digest of this width
    UnsupportedDigestWidth {
        algorithm: &'static str,
        bits: usize,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::UnsupportedDataWidth(bits) => {
                write!(f, "unsupported data width: {bits} bits")
            }
            ConfigError::UnsupportedAddrWidth(bits) => {
                write!(f, "unsupported address width: {bits} bits")
            }
            ConfigError::WordAlignedDataWidth(width) => write!(
                f,
                "word addressing requires a data width of at least 32 bits, got {width}"
            ),
            ConfigError::UnsupportedDigestWidth { algorithm, bits } => {
                write!(f, "{algorithm} has no {bits}-bit digest")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Bus protocol parameters. These only affect addressing granularity, never
/// the hashing itself.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BusConfig {
    data_width: DataWidth,
    addr_width: AddrWidth,
    byte_align: bool,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            data_width: DataWidth::Bits32,
            addr_width: AddrWidth::Bits32,
            byte_align: true,
        }
    }
}

impl BusConfig {
    /// Create a validated bus configuration
    ///
    /// # Arguments
    ///
    /// * `data_width` - Width of a data word
    /// * `addr_width` - Width of an address
    /// * `byte_align` - Addresses count bytes when set, 32-bit words otherwise
    ///
    /// # Error
    ///
    /// * `ConfigError::WordAlignedDataWidth` - Word addressing with a data width below 32
    pub fn new(
        data_width: DataWidth,
        addr_width: AddrWidth,
        byte_align: bool,
    ) -> Result<Self, ConfigError> {
        if !byte_align && data_width.bits() < 32 {
            Err(ConfigError::WordAlignedDataWidth(data_width))?
        }
        Ok(Self {
            data_width,
            addr_width,
            byte_align,
        })
    }

    /// Create a configuration from raw bit counts.
    pub fn from_bits(
        data_bits: usize,
        addr_bits: usize,
        byte_align: bool,
    ) -> Result<Self, ConfigError> {
        let data_width =
            DataWidth::try_from(data_bits).map_err(ConfigError::UnsupportedDataWidth)?;
        let addr_width =
            AddrWidth::try_from(addr_bits).map_err(ConfigError::UnsupportedAddrWidth)?;
        Self::new(data_width, addr_width, byte_align)
    }

    pub fn data_width(&self) -> DataWidth {
        self.data_width
    }

    pub fn addr_width(&self) -> AddrWidth {
        self.addr_width
    }

    pub fn byte_align(&self) -> bool {
        self.byte_align
    }

    /// Bytes per data word.
    pub fn data_bytes(&self) -> usize {
        self.data_width.bytes()
    }

    /// Mask of the valid bits of a data word.
    pub fn data_mask(&self) -> BusData {
        match self.data_width.bits() {
            128 => BusData::MAX,
            bits => (1 << bits) - 1,
        }
    }

    /// Strobe with every byte of a data word enabled.
    pub fn strobe_mask(&self) -> BusStrobe {
        match self.data_bytes() {
            16 => BusStrobe::MAX,
            bytes => (1 << bytes) - 1,
        }
    }

    /// Address distance between two consecutive data words.
    pub fn stride(&self) -> BusAddr {
        let step = if self.byte_align { 8 } else { 32 };
        (self.data_width.bits() / step) as BusAddr
    }

    /// Returns true if `addr` can be driven on an address bus of this width.
    pub fn addr_in_range(&self, addr: BusAddr) -> bool {
        match self.addr_width.bits() {
            64 => true,
            bits => addr >> bits == 0,
        }
    }

    /// Address of data word `index` of a region starting at `base`.
    pub fn word_addr(&self, base: BusAddr, index: usize) -> BusAddr {
        base + index as BusAddr * self.stride()
    }

    /// Index of the data word addressed by `addr` within a region of `count`
    /// words starting at `base`, if `addr` falls exactly on one of them.
    pub fn word_index(&self, base: BusAddr, count: usize, addr: BusAddr) -> Option<usize> {
        let offset = addr.checked_sub(base)?;
        if offset % self.stride() != 0 {
            return None;
        }
        let index = usize::try_from(offset / self.stride()).ok()?;
        (index < count).then_some(index)
    }
}
