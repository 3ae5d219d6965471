//! Peripheral Drivers
//!
//! Interrupt-driven drivers for the on-chip peripherals. Every driver is
//! created by the [`DeviceManager`](crate::device_manager::DeviceManager),
//! registers itself with the interrupt registry in `prepare`, and reports
//! completion from its interrupt handler.
//!
//! # Available Peripherals
//!
//! - [`spim`]: SPI master with EasyDMA
//! - [`rtc`]: Real-time counter
//! - [`clock`]: HFCLK / LFCLK control

pub mod clock;
pub mod rtc;
pub mod spim;
