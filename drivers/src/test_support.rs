//! Fixtures shared by the unit tests: RAM-backed register blocks and
//! recording mocks of the interrupt controller and GPIO port.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::hal::gpio::{GpioPort, Pin, PinLevel, PullMode};
use crate::hal::interrupt::{InterruptController, IrqNumber, Priority};

/// A zero-filled value with static lifetime, used as a fake register block.
pub fn leak_zeroed<T>() -> &'static T {
    // SAFETY: only called for register blocks, which are plain integers.
    Box::leak(Box::new(unsafe { core::mem::zeroed::<T>() }))
}

pub fn leak<T>(value: T) -> &'static T {
    Box::leak(Box::new(value))
}

/// A `'static` mutable copy of `bytes`, usable as a DMA buffer.
pub fn leak_buf(bytes: &[u8]) -> &'static mut [u8] {
    Box::leak(bytes.to_vec().into_boxed_slice())
}

/// Interrupt controller that records enabled lines and their priorities.
#[derive(Default)]
pub struct MockNvic {
    enabled: Mutex<HashMap<IrqNumber, Priority>>,
}

impl MockNvic {
    pub fn new() -> &'static Self {
        leak(Self::default())
    }

    pub fn priority(&self, irq: IrqNumber) -> Option<Priority> {
        self.enabled.lock().unwrap().get(&irq).copied()
    }
}

impl InterruptController for MockNvic {
    fn enable(&self, irq: IrqNumber, priority: Priority) {
        self.enabled.lock().unwrap().insert(irq, priority);
    }

    fn disable(&self, irq: IrqNumber) {
        self.enabled.lock().unwrap().remove(&irq);
    }

    fn is_enabled(&self, irq: IrqNumber) -> bool {
        self.enabled.lock().unwrap().contains_key(&irq)
    }

    // Lines never pend without hardware
    fn is_pending(&self, _irq: IrqNumber) -> bool {
        false
    }

    fn clear_pending(&self, _irq: IrqNumber) {}
}

/// How a mock pin is currently configured.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PinMode {
    Output,
    Input(PullMode),
    Disconnected,
}

/// GPIO port that records pin modes and every level written.
#[derive(Default)]
pub struct MockGpio {
    modes: Mutex<HashMap<Pin, PinMode>>,
    levels: Mutex<HashMap<Pin, PinLevel>>,
    writes: Mutex<Vec<(Pin, PinLevel)>>,
}

impl MockGpio {
    pub fn new() -> &'static Self {
        leak(Self::default())
    }

    pub fn mode(&self, pin: Pin) -> Option<PinMode> {
        self.modes.lock().unwrap().get(&pin).copied()
    }

    pub fn level(&self, pin: Pin) -> Option<PinLevel> {
        self.levels.lock().unwrap().get(&pin).copied()
    }

    /// Levels written to `pin`, oldest first.
    pub fn history(&self, pin: Pin) -> Vec<PinLevel> {
        self.writes
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| *p == pin)
            .map(|(_, level)| *level)
            .collect()
    }

    fn drive(&self, pin: Pin, level: PinLevel) {
        self.levels.lock().unwrap().insert(pin, level);
        self.writes.lock().unwrap().push((pin, level));
    }
}

impl GpioPort for MockGpio {
    fn configure_output(&self, pin: Pin, initial: PinLevel) {
        self.drive(pin, initial);
        self.modes.lock().unwrap().insert(pin, PinMode::Output);
    }

    fn configure_input(&self, pin: Pin, pull: PullMode) {
        self.modes.lock().unwrap().insert(pin, PinMode::Input(pull));
    }

    fn disconnect(&self, pin: Pin) {
        self.modes.lock().unwrap().insert(pin, PinMode::Disconnected);
    }

    fn set_high(&self, pin: Pin) {
        self.drive(pin, PinLevel::High);
    }

    fn set_low(&self, pin: Pin) {
        self.drive(pin, PinLevel::Low);
    }

    fn read(&self, pin: Pin) -> PinLevel {
        self.level(pin).unwrap_or(PinLevel::Low)
    }
}
