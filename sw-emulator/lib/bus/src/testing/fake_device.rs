/*++

Licensed under the Apache-2.0 license.

File Name:

    fake_device.rs

Abstract:

    File contains a fake Device used to exercise bus masters.

--*/
use crate::{Device, Request, Response};
use sha_emu_types::BusData;

/// A Device that records every accepted request and answers after a
/// configurable number of cycles.
///
/// # Example
///
/// ```
/// use sha_emu_bus::{testing::FakeDevice, Bus, Clock, Master};
///
/// let clock = Clock::new();
/// let mut fake = FakeDevice::new();
/// fake.read_data = 35;
/// let mut master = Master::new(fake, &clock);
/// assert_eq!(master.read(0xcafe), Ok(35));
/// assert_eq!(master.device().accepted().len(), 1);
/// ```
pub struct FakeDevice {
    /// Data returned for reads
    pub read_data: BusData,

    /// Answer every request with an error
    pub error: bool,

    /// Cycles between acceptance and response (at least 1)
    pub latency: u64,

    /// Drive `req_ready`
    pub ready: bool,

    accepted: Vec<Request>,
    pending: Option<(u64, Response)>,
}

impl Default for FakeDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeDevice {
    pub fn new() -> Self {
        Self {
            read_data: 0,
            error: false,
            latency: 1,
            ready: true,
            accepted: Vec::new(),
            pending: None,
        }
    }

    /// Requests accepted so far, in order.
    pub fn accepted(&self) -> &[Request] {
        &self.accepted
    }
}

impl Device for FakeDevice {
    fn name(&self) -> &str {
        "fake"
    }

    fn req_ready(&self) -> bool {
        self.ready && self.pending.is_none()
    }

    fn response(&self) -> Response {
        match self.pending {
            Some((0, rsp)) => rsp,
            _ => Response::NONE,
        }
    }

    fn tick(&mut self, req: &Request, rsp_ready: bool) {
        let ready = self.req_ready();
        self.pending = match self.pending.take() {
            Some((0, _)) if rsp_ready => None,
            Some((0, rsp)) => Some((0, rsp)),
            Some((delay, rsp)) => Some((delay - 1, rsp)),
            None => None,
        };
        if req.valid && ready {
            self.accepted.push(*req);
            let rsp = if self.error {
                Response::error()
            } else if req.write {
                Response::ok(0)
            } else {
                Response::ok(self.read_data)
            };
            self.pending = Some((self.latency.max(1) - 1, rsp));
        }
    }
}
