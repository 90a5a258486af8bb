/*++

Licensed under the Apache-2.0 license.

File Name:

    signals.rs

Abstract:

    File contains the request and response channels of the register bus.

--*/

use sha_emu_types::{BusAddr, BusData, BusStrobe};

/// Request channel, driven by the bus master.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct Request {
    /// A request is presented this cycle
    pub valid: bool,

    /// Write when set, read otherwise
    pub write: bool,

    /// Target address
    pub addr: BusAddr,

    /// Write data
    pub data: BusData,

    /// Byte enables for `data`
    pub strobe: BusStrobe,
}

impl Request {
    /// No request this cycle.
    pub const IDLE: Request = Request {
        valid: false,
        write: false,
        addr: 0,
        data: 0,
        strobe: 0,
    };

    pub fn read(addr: BusAddr) -> Self {
        Self {
            valid: true,
            write: false,
            addr,
            data: 0,
            strobe: BusStrobe::MAX,
        }
    }

    pub fn write(addr: BusAddr, data: BusData, strobe: BusStrobe) -> Self {
        Self {
            valid: true,
            write: true,
            addr,
            data,
            strobe,
        }
    }
}

/// Response channel, driven by the device. `valid` and `error` are never
/// asserted together.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct Response {
    /// The access succeeded; `data` carries read data
    pub valid: bool,

    /// The access was rejected
    pub error: bool,

    /// Read data, zero for writes and errors
    pub data: BusData,
}

impl Response {
    /// Nothing is driven on the response channel.
    pub const NONE: Response = Response {
        valid: false,
        error: false,
        data: 0,
    };

    pub fn ok(data: BusData) -> Self {
        Self {
            valid: true,
            error: false,
            data,
        }
    }

    pub fn error() -> Self {
        Self {
            valid: false,
            error: true,
            data: 0,
        }
    }

    /// Returns true if a response (successful or not) is waiting to be taken.
    pub fn is_pending(&self) -> bool {
        self.valid || self.error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_is_exclusive() {
        let ok = Response::ok(0x55);
        assert!(ok.valid && !ok.error);
        let err = Response::error();
        assert!(err.error && !err.valid);
        assert!(ok.is_pending() && err.is_pending());
        assert!(!Response::NONE.is_pending());
    }

    #[test]
    fn test_request_constructors() {
        let rd = Request::read(0x100);
        assert!(rd.valid && !rd.write);
        assert_eq!(rd.strobe, BusStrobe::MAX);
        let wr = Request::write(0x104, 0xdead_beef, 0x3);
        assert!(wr.valid && wr.write);
        assert_eq!(wr.strobe, 0x3);
        assert!(!Request::IDLE.valid);
    }
}
