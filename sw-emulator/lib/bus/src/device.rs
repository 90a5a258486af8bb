/*++

Licensed under the Apache-2.0 license.

File Name:

    device.rs

Abstract:

    File contains definition of the Device trait.

--*/

use crate::{Request, Response};

/// A clocked device sitting on the request/response bus.
///
/// All outputs (`req_ready`, `response`) reflect state committed at the
/// previous clock edge. `tick` samples the inputs and commits the next state.
pub trait Device {
    /// Name of the device
    fn name(&self) -> &str;

    /// Request channel ready for the current cycle
    fn req_ready(&self) -> bool;

    /// Response channel as driven in the current cycle
    fn response(&self) -> Response;

    /// Advance one clock cycle
    ///
    /// # Arguments
    ///
    /// * `req` - Request channel for this cycle
    /// * `rsp_ready` - The master takes the pending response this cycle
    fn tick(&mut self, req: &Request, rsp_ready: bool);
}

impl<T: Device + ?Sized> Device for Box<T> {
    fn name(&self) -> &str {
        T::name(self)
    }

    fn req_ready(&self) -> bool {
        T::req_ready(self)
    }

    fn response(&self) -> Response {
        T::response(self)
    }

    fn tick(&mut self, req: &Request, rsp_ready: bool) {
        T::tick(self, req, rsp_ready)
    }
}
