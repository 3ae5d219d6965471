//! Shared low-level building blocks for the peripheral drivers.
//!
//! - [`sync`]: interrupt masking interface and the atomic state cell used by
//!   every driver state machine
//! - [`arch`]: architecture-specific interrupt masking

#![cfg_attr(not(test), no_std)]

pub mod arch;
pub mod sync;
