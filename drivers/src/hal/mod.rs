//! Hardware Abstraction Layer (HAL) - Platform-Independent Traits
//!
//! This module defines generic traits for interacting with hardware
//! peripherals. Peripheral drivers consume these traits, and the platform
//! module supplies the chip-specific implementations.
//!
//! # Available Interfaces
//!
//! - [`gpio`]: General Purpose Input/Output control
//! - [`interrupt`]: Interrupt controller management and interrupt handlers
//! - [`spi`]: SPI bus parameters

pub mod gpio;
pub mod interrupt;
pub mod spi;
