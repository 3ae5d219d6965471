//! Platform Abstraction Layer
//!
//! Chip back-ends for the HAL traits plus per-chip constants (interrupt
//! count, unit tables, DMA limits). Exactly one chip is selected through a
//! Cargo feature.
//!
//! # Usage
//!
//! ```rust,ignore
//! use periph_drivers::platform::chip;
//!
//! let board = BoardConfig {
//!     spim: &[chip::SPIM0.with_priority(2)],
//!     rtc: &[chip::RTC1],
//!     clock: Some(chip::CLOCK),
//! };
//! ```

// Chip selection based on Cargo features
cfg_if::cfg_if! {
    if #[cfg(any(feature = "nrf52832", feature = "nrf52840"))] {
        pub mod nrf52;
        pub use nrf52::chip;
    } else {
        compile_error!(
            "No chip selected!\n\
            Use: cargo build --features nrf52832\n\
            Or:  cargo build --features nrf52840"
        );
    }
}

// Ensure only one chip is selected
#[cfg(all(feature = "nrf52832", feature = "nrf52840"))]
compile_error!("Multiple chips selected! Choose only one: nrf52832 OR nrf52840");
