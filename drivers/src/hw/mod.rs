//! Register Access Layer
//!
//! Typed views over memory-mapped register blocks. Drivers only ever read and
//! write named fields through [`Reg`], [`Task`] and [`Event`]; every access is
//! volatile.

pub mod nrf52;

use core::cell::UnsafeCell;
use core::ops::Deref;
use core::ptr::{read_volatile, write_volatile};

/// A single memory-mapped register.
#[repr(transparent)]
pub struct Reg<T: Copy> {
    value: UnsafeCell<T>,
}

// SAFETY: every access is a single volatile load or store of a `Copy` value;
// the hardware register is shared by definition.
unsafe impl<T: Copy + Send> Sync for Reg<T> {}

impl<T: Copy> Reg<T> {
    pub const fn new(value: T) -> Self {
        Self {
            value: UnsafeCell::new(value),
        }
    }

    #[inline(always)]
    pub fn read(&self) -> T {
        unsafe { read_volatile(self.value.get()) }
    }

    #[inline(always)]
    pub fn write(&self, value: T) {
        unsafe { write_volatile(self.value.get(), value) }
    }

    /// Physical address of the register.
    #[inline(always)]
    pub fn addr(&self) -> usize {
        self.value.get() as usize
    }
}

impl Reg<u32> {
    /// Read-modify-write. Not atomic with respect to interrupts.
    #[inline(always)]
    pub fn modify(&self, f: impl FnOnce(u32) -> u32) {
        self.write(f(self.read()));
    }
}

/// Register wide enough to hold a bus address (32 bits on the target).
pub type AddrReg = Reg<usize>;

/// Task register: writing 1 starts a hardware action.
#[repr(transparent)]
pub struct Task(Reg<u32>);

impl Task {
    #[inline(always)]
    pub fn trigger(&self) {
        self.0.write(1);
    }
}

impl Deref for Task {
    type Target = Reg<u32>;

    fn deref(&self) -> &Reg<u32> {
        &self.0
    }
}

/// Event register: set by hardware when an action happened.
#[repr(transparent)]
pub struct Event(Reg<u32>);

impl Event {
    #[inline(always)]
    pub fn is_set(&self) -> bool {
        self.0.read() != 0
    }

    #[inline(always)]
    pub fn clear(&self) {
        self.0.write(0);
    }
}

impl Deref for Event {
    type Target = Reg<u32>;

    fn deref(&self) -> &Reg<u32> {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reg_read_back_and_modify() {
        let reg = Reg::new(0x10u32);
        reg.write(0x0F);
        reg.modify(|v| v | 0xF0);
        assert_eq!(reg.read(), 0xFF);
    }

    #[test]
    fn task_trigger_writes_one() {
        let task = Task(Reg::new(0));
        task.trigger();
        assert_eq!(task.read(), 1);
    }

    #[test]
    fn event_clear_resets_flag() {
        let event = Event(Reg::new(1));
        assert!(event.is_set());
        event.clear();
        assert!(!event.is_set());
    }

    #[test]
    fn addr_points_at_register() {
        let reg = Reg::new(0u32);
        assert_eq!(reg.addr(), &reg as *const Reg<u32> as usize);
    }
}
