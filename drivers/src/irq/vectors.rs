//! Process-wide interrupt table.
//!
//! The platform vector table calls [`on_irq`] with the active line. The
//! table is written once by [`install`] and only read afterwards, so
//! dispatch takes no lock.

use log::debug;
use spin::Once;

use super::InterruptRegistry;
use crate::hal::interrupt::IrqNumber;
use crate::platform::chip::IRQ_COUNT;

static VECTORS: Once<InterruptRegistry<IRQ_COUNT>> = Once::new();

/// Seal `registry` as the table used by [`on_irq`].
///
/// Must run before any peripheral interrupt is unmasked.
///
/// # Panics
///
/// If a table is already installed.
pub fn install(registry: InterruptRegistry<IRQ_COUNT>) -> &'static InterruptRegistry<IRQ_COUNT> {
    let mut fresh = false;
    let table = VECTORS.call_once(|| {
        fresh = true;
        registry
    });
    assert!(fresh, "irq vectors: table already installed");
    debug!("irq vectors: installed {} handlers", table.len());
    table
}

/// The installed table, if any.
pub fn installed() -> Option<&'static InterruptRegistry<IRQ_COUNT>> {
    VECTORS.get()
}

/// Entry point for the vector table.
///
/// # Panics
///
/// If no table is installed or the line has no handler.
pub fn on_irq(irq: IrqNumber) {
    match VECTORS.get() {
        Some(table) => table.dispatch(irq),
        None => panic!("irq vectors: irq {} before install", irq),
    }
}
