/*++

Licensed under the Apache-2.0 license.

File Name:

    master.rs

Abstract:

    File contains the bus master that turns the cycle level request/response
    handshake into blocking read and write transactions.

--*/

use crate::testing::{BusTrace, TraceEntry};
use crate::{Bus, BusError, Clock, Device, Request, Response, Timer};
use sha_emu_types::{BusAddr, BusData, BusStrobe};

/// Drives a [`Device`] one clock cycle at a time.
///
/// A transaction waits for `req_ready`, presents the request for exactly one
/// cycle, then waits for the response and takes it in the cycle it becomes
/// visible (`rsp_ready` is always high). The master gives up with
/// [`BusError::NoResponse`] after `max_wait` cycles in either phase.
pub struct Master<D: Device> {
    device: D,
    clock: Clock,
    timer: Timer,
    max_wait: u64,
    trace: Option<BusTrace>,
}

impl<D: Device> Master<D> {
    /// Default number of cycles to wait in each handshake phase.
    pub const DEFAULT_MAX_WAIT: u64 = 16;

    /// Create a master driving `device` from `clock`
    pub fn new(device: D, clock: &Clock) -> Self {
        Self {
            device,
            clock: clock.clone(),
            timer: clock.timer(),
            max_wait: Self::DEFAULT_MAX_WAIT,
            trace: None,
        }
    }

    /// Record every transaction in `trace`.
    pub fn with_trace(mut self, trace: BusTrace) -> Self {
        self.trace = Some(trace);
        self
    }

    pub fn set_max_wait(&mut self, cycles: u64) {
        self.max_wait = cycles;
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    /// Advance one cycle with `req` on the request channel.
    fn cycle(&mut self, req: &Request) {
        self.device.tick(req, true);
        self.clock.increment(1);
    }

    fn transact(&mut self, req: Request) -> Result<Response, BusError> {
        let deadline = self.timer.deadline_in(self.max_wait);
        while !self.device.req_ready() {
            if self.timer.expired(&deadline) {
                log::warn!(
                    "{}: request to {:#x} not accepted after {} cycles",
                    self.device.name(),
                    req.addr,
                    self.max_wait
                );
                Err(BusError::NoResponse)?
            }
            self.cycle(&Request::IDLE);
        }

        let accepted_at = self.clock.now();
        self.cycle(&req);

        let deadline = self.timer.deadline_in(self.max_wait);
        loop {
            let rsp = self.device.response();
            if rsp.is_pending() {
                // rsp_ready is high: the response is taken during this cycle
                self.cycle(&Request::IDLE);
                if let Some(trace) = &self.trace {
                    trace.record(TraceEntry {
                        cycle: accepted_at,
                        write: req.write,
                        addr: req.addr,
                        data: if req.write { req.data } else { rsp.data },
                        strobe: req.strobe,
                        error: rsp.error,
                    });
                }
                return Ok(rsp);
            }
            if self.timer.expired(&deadline) {
                log::warn!(
                    "{}: no response for {:#x} after {} cycles",
                    self.device.name(),
                    req.addr,
                    self.max_wait
                );
                Err(BusError::NoResponse)?
            }
            self.cycle(&Request::IDLE);
        }
    }
}

impl<D: Device> Bus for Master<D> {
    fn read(&mut self, addr: BusAddr) -> Result<BusData, BusError> {
        let rsp = self.transact(Request::read(addr))?;
        if rsp.error {
            Err(BusError::LoadAccessFault)?
        }
        Ok(rsp.data)
    }

    fn write(&mut self, addr: BusAddr, val: BusData, strobe: BusStrobe) -> Result<(), BusError> {
        let rsp = self.transact(Request::write(addr, val, strobe))?;
        if rsp.error {
            Err(BusError::StoreAccessFault)?
        }
        Ok(())
    }

    fn idle(&mut self, cycles: u64) {
        for _ in 0..cycles {
            self.cycle(&Request::IDLE);
        }
    }

    fn now(&self) -> u64 {
        self.clock.now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeDevice;

    #[test]
    fn test_read_takes_response_one_cycle_after_accept() {
        let clock = Clock::new();
        let mut device = FakeDevice::new();
        device.read_data = 0x1234;
        let trace = BusTrace::new();
        let mut master = Master::new(device, &clock).with_trace(trace.clone());

        assert_eq!(master.read(0x40), Ok(0x1234));
        // accept cycle + response cycle
        assert_eq!(clock.now(), 2);
        assert_eq!(master.device().accepted(), &[Request::read(0x40)]);
        assert_eq!(trace.take().len(), 1);
    }

    #[test]
    fn test_error_maps_to_access_fault() {
        let clock = Clock::new();
        let mut device = FakeDevice::new();
        device.error = true;
        let mut master = Master::new(device, &clock);

        assert_eq!(master.read(0x0), Err(BusError::LoadAccessFault));
        assert_eq!(master.write(0x0, 1, 0xf), Err(BusError::StoreAccessFault));
    }

    #[test]
    fn test_slow_device() {
        let clock = Clock::new();
        let mut device = FakeDevice::new();
        device.latency = 4;
        let mut master = Master::new(device, &clock);

        assert_eq!(master.write(0x8, 0xaa, 0x1), Ok(()));
        assert_eq!(clock.now(), 5);
    }

    #[test]
    fn test_no_response() {
        let clock = Clock::new();
        let mut device = FakeDevice::new();
        device.latency = 100;
        let mut master = Master::new(device, &clock);
        master.set_max_wait(8);

        assert_eq!(master.read(0x8), Err(BusError::NoResponse));
    }

    #[test]
    fn test_never_ready() {
        let clock = Clock::new();
        let mut device = FakeDevice::new();
        device.ready = false;
        let mut master = Master::new(device, &clock);

        assert_eq!(master.read(0x8), Err(BusError::NoResponse));
        assert_eq!(clock.now(), Master::<FakeDevice>::DEFAULT_MAX_WAIT);
        assert!(master.device().accepted().is_empty());
    }

    #[test]
    fn test_idle_advances_clock() {
        let clock = Clock::new();
        let mut master = Master::new(FakeDevice::new(), &clock);
        master.idle(10);
        assert_eq!(master.now(), 10);
        assert!(master.device().accepted().is_empty());
    }
}
