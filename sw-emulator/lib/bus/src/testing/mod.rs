/*++

Licensed under the Apache-2.0 license.

File Name:

    mod.rs

Abstract:

    File contains exports for code useful for testing and tracing bus traffic.

--*/
mod fake_device;
mod trace;

pub use fake_device::FakeDevice;
pub use trace::{BusTrace, TraceEntry};
