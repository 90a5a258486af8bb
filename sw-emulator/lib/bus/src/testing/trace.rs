/*++

Licensed under the Apache-2.0 license.

File Name:

    trace.rs

Abstract:

    File contains a shared record of bus transactions.

--*/
use sha_emu_types::{BusAddr, BusData, BusStrobe};
use std::{
    cell::{Ref, RefCell},
    fmt,
    rc::Rc,
};

/// One completed bus transaction.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TraceEntry {
    /// Cycle in which the request was accepted
    pub cycle: u64,
    pub write: bool,
    pub addr: BusAddr,
    /// Write data, or read data for reads
    pub data: BusData,
    pub strobe: BusStrobe,
    /// The device answered with an error response
    pub error: bool,
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = if self.write { "write" } else { "read " };
        write!(
            f,
            "{:>8} {op} {:#06x} data={:#x} strobe={:#x}",
            self.cycle, self.addr, self.data, self.strobe
        )?;
        if self.error {
            write!(f, " ERROR")?;
        }
        Ok(())
    }
}

/// A transaction log that can be filled without `&mut self`.
///
/// When `BusTrace` is cloned, the clones all share the same underlying
/// buffer, so a test (or the CLI) can keep a handle while a master owns
/// another one.
///
/// # Example
///
/// ```
/// use sha_emu_bus::testing::{BusTrace, TraceEntry};
///
/// let trace = BusTrace::new();
/// trace.clone().record(TraceEntry {
///     cycle: 3, write: true, addr: 0x100, data: 0x61, strobe: 0xf, error: false,
/// });
/// assert_eq!(trace.entries().len(), 1);
/// assert_eq!(trace.take()[0].addr, 0x100);
/// assert!(trace.take().is_empty());
/// ```
#[derive(Clone, Default)]
pub struct BusTrace {
    entries: Rc<RefCell<Vec<TraceEntry>>>,
}

impl BusTrace {
    /// Construct an empty `BusTrace`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, entry: TraceEntry) {
        self.entries.borrow_mut().push(entry);
    }

    /// Access the recorded transactions without removing them.
    pub fn entries(&self) -> Ref<'_, Vec<TraceEntry>> {
        self.entries.borrow()
    }

    /// Removes and returns everything recorded so far.
    pub fn take(&self) -> Vec<TraceEntry> {
        std::mem::take(&mut *self.entries.borrow_mut())
    }

    /// Renders the trace, one transaction per line.
    pub fn render(&self) -> String {
        self.entries
            .borrow()
            .iter()
            .map(|entry| format!("{entry}\n"))
            .collect()
    }
}
