//! Interrupt dispatch.
//!
//! [`InterruptRegistry`] maps each interrupt line to the one driver that
//! owns it. Start-up code fills a registry, then seals it with
//! [`vectors::install`]; the vector table forwards every peripheral
//! interrupt to [`vectors::on_irq`].

pub mod registry;
pub mod vectors;

pub use registry::InterruptRegistry;
