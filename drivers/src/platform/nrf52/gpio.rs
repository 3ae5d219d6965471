//! nRF52 GPIO Port Driver
//!
//! Implements [`GpioPort`] over the P0 (and, on the nRF52840, P1) register
//! blocks. Pin levels are changed through OUTSET/OUTCLR so concurrent
//! updates of different pins never race.

use super::chip;
use crate::hal::gpio::{GpioPort, Pin, PinLevel, PullMode};
use crate::hw::nrf52::gpio::{GpioRegisters, PINS_PER_PORT, PinCnf};

/// Most ports any nRF52 part has.
pub const MAX_PORTS: usize = 2;

impl From<PullMode> for PinCnf {
    fn from(mode: PullMode) -> Self {
        match mode {
            PullMode::None => PinCnf::empty(),
            PullMode::Up => PinCnf::PULL_UP,
            PullMode::Down => PinCnf::PULL_DOWN,
        }
    }
}

pub struct Nrf52Gpio {
    ports: [Option<&'static GpioRegisters>; MAX_PORTS],
}

impl Nrf52Gpio {
    /// Create a driver over the port blocks at `bases` (P0 first).
    ///
    /// # Safety
    ///
    /// Every base must be a GPIO port block (or memory laid out like one)
    /// valid for the rest of the program.
    pub unsafe fn new(bases: &[usize]) -> Self {
        assert!(bases.len() <= MAX_PORTS, "GPIO: {} ports requested", bases.len());
        let mut ports = [None; MAX_PORTS];
        for (slot, &base) in ports.iter_mut().zip(bases) {
            *slot = Some(unsafe { GpioRegisters::from_base(base) });
        }
        Self { ports }
    }

    /// Driver over every port of the selected chip.
    ///
    /// # Safety
    ///
    /// Must run on the selected chip; the port blocks are accessed directly.
    pub unsafe fn for_chip() -> Self {
        unsafe { Self::new(chip::GPIO_PORTS) }
    }

    fn port(&self, pin: Pin) -> (&'static GpioRegisters, u32) {
        assert!(
            pin.number < PINS_PER_PORT,
            "GPIO: pin P{}.{} out of range",
            pin.port,
            pin.number
        );
        match self.ports.get(pin.port as usize).copied().flatten() {
            Some(regs) => (regs, 1 << pin.number),
            None => panic!("GPIO: no port P{} on {}", pin.port, chip::NAME),
        }
    }
}

impl GpioPort for Nrf52Gpio {
    fn configure_output(&self, pin: Pin, initial: PinLevel) {
        self.set_level(pin, initial);
        let (regs, _) = self.port(pin);
        regs.pin_cnf[pin.number as usize].write(PinCnf::DIR_OUTPUT.bits());
    }

    fn configure_input(&self, pin: Pin, pull: PullMode) {
        let (regs, _) = self.port(pin);
        regs.pin_cnf[pin.number as usize].write(PinCnf::from(pull).bits());
    }

    fn disconnect(&self, pin: Pin) {
        let (regs, _) = self.port(pin);
        regs.pin_cnf[pin.number as usize].write(PinCnf::INPUT_DISCONNECT.bits());
    }

    fn set_high(&self, pin: Pin) {
        let (regs, mask) = self.port(pin);
        regs.outset.write(mask);
    }

    fn set_low(&self, pin: Pin) {
        let (regs, mask) = self.port(pin);
        regs.outclr.write(mask);
    }

    fn read(&self, pin: Pin) -> PinLevel {
        let (regs, mask) = self.port(pin);
        PinLevel::from(regs.in_.read() & mask != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::leak_zeroed;

    fn single_port() -> (Nrf52Gpio, &'static GpioRegisters) {
        let regs = leak_zeroed::<GpioRegisters>();
        let gpio = unsafe { Nrf52Gpio::new(&[regs as *const _ as usize]) };
        (gpio, regs)
    }

    #[test]
    fn output_drives_level_before_direction() {
        let (gpio, regs) = single_port();
        gpio.configure_output(Pin::new(0, 5), PinLevel::High);
        assert_eq!(regs.outset.read(), 1 << 5);
        assert_eq!(regs.pin_cnf[5].read(), PinCnf::DIR_OUTPUT.bits());

        gpio.configure_output(Pin::new(0, 6), PinLevel::Low);
        assert_eq!(regs.outclr.read(), 1 << 6);
    }

    #[test]
    fn input_encodes_pull() {
        let (gpio, regs) = single_port();
        gpio.configure_input(Pin::new(0, 1), PullMode::Up);
        gpio.configure_input(Pin::new(0, 2), PullMode::Down);
        gpio.configure_input(Pin::new(0, 3), PullMode::None);
        assert_eq!(regs.pin_cnf[1].read(), 0b1100);
        assert_eq!(regs.pin_cnf[2].read(), 0b0100);
        assert_eq!(regs.pin_cnf[3].read(), 0);
    }

    #[test]
    fn disconnect_restores_reset_configuration() {
        let (gpio, regs) = single_port();
        gpio.configure_output(Pin::new(0, 9), PinLevel::Low);
        gpio.disconnect(Pin::new(0, 9));
        assert_eq!(regs.pin_cnf[9].read(), 0b10);
    }

    #[test]
    fn read_samples_in_register() {
        let (gpio, regs) = single_port();
        regs.in_.write(1 << 31);
        assert_eq!(gpio.read(Pin::new(0, 31)), PinLevel::High);
        assert_eq!(gpio.read(Pin::new(0, 30)), PinLevel::Low);
    }

    #[test]
    fn second_port_is_addressed_separately() {
        let p0 = leak_zeroed::<GpioRegisters>();
        let p1 = leak_zeroed::<GpioRegisters>();
        let gpio =
            unsafe { Nrf52Gpio::new(&[p0 as *const _ as usize, p1 as *const _ as usize]) };
        gpio.set_high(Pin::new(1, 4));
        assert_eq!(p1.outset.read(), 1 << 4);
        assert_eq!(p0.outset.read(), 0);
    }

    #[test]
    #[should_panic(expected = "no port P1")]
    fn missing_port_panics() {
        let (gpio, _) = single_port();
        gpio.set_low(Pin::new(1, 0));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn pin_number_checked() {
        let (gpio, _) = single_port();
        gpio.set_low(Pin::new(0, 32));
    }
}
