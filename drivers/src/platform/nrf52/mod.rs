//! nRF52 family back-ends.

pub mod gpio;
pub mod interrupt;

cfg_if::cfg_if! {
    if #[cfg(feature = "nrf52832")] {
        pub mod nrf52832;
        pub use nrf52832 as chip;
    } else {
        pub mod nrf52840;
        pub use nrf52840 as chip;
    }
}

pub use gpio::Nrf52Gpio;
pub use interrupt::Nvic;

/// Interrupt numbers shared by every nRF52 part.
pub mod irqn {
    use crate::hal::interrupt::IrqNumber;

    pub const POWER_CLOCK: IrqNumber = 0;
    pub const SPIM0: IrqNumber = 3;
    pub const SPIM1: IrqNumber = 4;
    pub const RTC0: IrqNumber = 11;
    pub const RTC1: IrqNumber = 17;
    pub const SPIM2: IrqNumber = 35;
    pub const RTC2: IrqNumber = 36;
    pub const SPIM3: IrqNumber = 47;
}

/// Priority used by unit tables unless the board overrides it.
pub const DEFAULT_PRIORITY: crate::hal::interrupt::Priority = 6;
