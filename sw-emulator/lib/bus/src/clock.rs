/*++

Licensed under the Apache-2.0 license.

File Name:

    clock.rs

Abstract:

    File contains Clock and Timer types. A single clock domain drives every
    device on the bus; timers let bus masters bound how long they wait.

--*/
use std::{cell::Cell, rc::Rc};

/// Bus masters that want to give up after a number of cycles store a clone
/// of Timer and compare the current time against a [`Deadline`].
///
/// # Example
///
/// ```
/// use sha_emu_bus::Clock;
///
/// let clock = Clock::new();
/// let timer = clock.timer();
/// let deadline = timer.deadline_in(10);
/// clock.increment(9);
/// assert!(!timer.expired(&deadline));
/// clock.increment(1);
/// assert!(timer.expired(&deadline));
/// ```
#[derive(Clone)]
pub struct Timer {
    now: Rc<Cell<u64>>,
}
impl Timer {
    /// Constructs a new timer bound to the specified clock.
    pub fn new(clock: &Clock) -> Self {
        Self {
            now: Rc::clone(&clock.now),
        }
    }

    /// Returns the current time: the number of clock cycles that have elapsed
    /// since simulation start.
    #[inline]
    pub fn now(&self) -> u64 {
        self.now.get()
    }

    /// Returns a deadline `ticks_from_now` cycles in the future.
    pub fn deadline_in(&self, ticks_from_now: u64) -> Deadline {
        Deadline(self.now().saturating_add(ticks_from_now))
    }

    /// Returns true once the clock has reached `deadline`.
    pub fn expired(&self, deadline: &Deadline) -> bool {
        self.now() >= deadline.0
    }
}

/// Point in simulated time returned by [`Timer::deadline_in`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct Deadline(u64);

impl Deadline {
    /// Cycle at which the deadline expires.
    pub fn at(&self) -> u64 {
        self.0
    }
}

/// Cycle counter shared by everything in one clock domain. Cloning a Clock
/// yields another handle to the same counter.
#[derive(Clone)]
pub struct Clock {
    now: Rc<Cell<u64>>,
}
impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
impl Clock {
    /// Constructs a new Clock with the cycle counter set to 0.
    pub fn new() -> Clock {
        Self {
            now: Rc::new(Cell::new(0)),
        }
    }

    /// Constructs a `Timer` associated with this clock.
    pub fn timer(&self) -> Timer {
        Timer::new(self)
    }

    /// Returns the number of simulated clock cycles that have elapsed since
    /// simulation start.
    #[inline]
    pub fn now(&self) -> u64 {
        self.now.get()
    }

    /// Increments the clock by `delta`.
    #[inline]
    pub fn increment(&self, delta: u64) {
        self.now.set(self.now.get().wrapping_add(delta));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_counter() {
        let clock = Clock::new();
        let other = clock.clone();
        clock.increment(5);
        assert_eq!(other.now(), 5);
        other.increment(2);
        assert_eq!(clock.now(), 7);
    }

    #[test]
    fn test_timer_deadline() {
        let clock = Clock::new();
        clock.increment(100);
        let timer = clock.timer();
        let deadline = timer.deadline_in(3);
        assert_eq!(deadline.at(), 103);
        assert!(!timer.expired(&deadline));
        clock.increment(3);
        assert!(timer.expired(&deadline));
    }

    #[test]
    fn test_deadline_saturates() {
        let clock = Clock::new();
        clock.increment(u64::MAX - 1);
        let deadline = clock.timer().deadline_in(10);
        assert_eq!(deadline.at(), u64::MAX);
    }
}
