//! Interrupt-Driven Peripheral Drivers for nRF52
//!
//! This crate provides a layered architecture for hardware abstraction:
//!
//! # Module Organization
//!
//! - [`hal`]: Platform-independent trait definitions
//! - [`hw`]: Typed memory-mapped register blocks
//! - [`platform`]: Chip-specific back-ends and constants
//! - [`peripheral`]: SPIM, RTC and CLOCK drivers
//! - [`irq`]: Interrupt dispatch registry and the process-wide vector hook
//! - [`device_manager`]: Driver arena built from the board table
//!
//! # Start-up
//!
//! ```rust,ignore
//! use periph_drivers::device_manager::{self, BoardConfig, DeviceManager};
//! use periph_drivers::irq::{self, InterruptRegistry};
//! use periph_drivers::platform::chip;
//!
//! static BOARD: BoardConfig = BoardConfig {
//!     spim: &[chip::SPIM0],
//!     rtc: &[],
//!     clock: Some(chip::CLOCK),
//! };
//!
//! let manager = device_manager::install(unsafe { DeviceManager::new(&BOARD, &NVIC, &GPIO)? });
//! let mut registry = InterruptRegistry::new();
//! manager.prepare(&mut registry);
//! irq::vectors::install(registry);
//!
//! let spim = manager.take_spim(0).unwrap();
//! spim.init(&FLASH);
//! spim.select();
//! spim.exchange(&READ_ID, rx);
//! let done = spim.wait().await;
//! ```

#![cfg_attr(not(test), no_std)]

pub mod device_manager;
pub mod hal;
pub mod hw;
pub mod irq;
pub mod peripheral;
pub mod platform;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use device_manager::{BoardConfig, ConfigError, DeviceManager};
pub use hal::gpio::{GpioPort, Pin, PinLevel, PullMode};
pub use hal::interrupt::{InterruptController, InterruptHandler};
pub use irq::InterruptRegistry;
pub use peripheral::spim::{Spim, SpimCallback, SpimConfig, SpimState};
