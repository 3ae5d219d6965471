//! GPIO (General Purpose Input/Output) Hardware Abstraction Layer.
//!
//! This module defines platform-independent traits for GPIO control.

/// A pin identified by port and number within the port.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Pin {
    pub port: u8,
    pub number: u8,
}

impl Pin {
    pub const fn new(port: u8, number: u8) -> Self {
        Self { port, number }
    }

    /// Packed PSEL encoding used by peripheral pin-select registers.
    pub const fn psel(self) -> u32 {
        ((self.port as u32) << 5) | self.number as u32
    }
}

/// Pin logic level.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PinLevel {
    /// Logic low (0V or ground).
    Low,
    /// Logic high (VDD).
    High,
}

impl From<bool> for PinLevel {
    fn from(value: bool) -> Self {
        if value {
            PinLevel::High
        } else {
            PinLevel::Low
        }
    }
}

impl From<PinLevel> for bool {
    fn from(level: PinLevel) -> bool {
        matches!(level, PinLevel::High)
    }
}

/// Internal pull resistor configuration.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PullMode {
    /// No pull resistor (high impedance).
    None,
    /// Enable internal pull-up resistor.
    Up,
    /// Enable internal pull-down resistor.
    Down,
}

/// GPIO port trait.
///
/// Out-of-range pins are programmer errors and panic.
pub trait GpioPort: Sync {
    /// Make `pin` an output, driving `initial` first so it never glitches.
    fn configure_output(&self, pin: Pin, initial: PinLevel);

    /// Make `pin` an input with the given pull resistor.
    fn configure_input(&self, pin: Pin, pull: PullMode);

    /// Return `pin` to its reset state (input buffer disconnected).
    fn disconnect(&self, pin: Pin);

    /// Set a pin to logic high.
    fn set_high(&self, pin: Pin);

    /// Set a pin to logic low.
    fn set_low(&self, pin: Pin);

    /// Read the current logic level of a pin.
    fn read(&self, pin: Pin) -> PinLevel;

    /// Set the pin to a specific level.
    fn set_level(&self, pin: Pin, level: PinLevel) {
        match level {
            PinLevel::High => self.set_high(pin),
            PinLevel::Low => self.set_low(pin),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn psel_packs_port_and_number() {
        assert_eq!(Pin::new(0, 13).psel(), 13);
        assert_eq!(Pin::new(1, 2).psel(), 34);
    }

    #[test]
    fn level_bool_conversions() {
        assert_eq!(PinLevel::from(true), PinLevel::High);
        assert!(!bool::from(PinLevel::Low));
    }
}
