//! Interrupt Controller Hardware Abstraction Layer.
//!
//! This module defines platform-independent traits for interrupt management
//! and for the objects that service an interrupt line.

/// Interrupt number type.
pub type IrqNumber = u32;

/// Interrupt priority level.
///
/// Lower values preempt higher values (Cortex-M convention).
pub type Priority = u8;

/// Interrupt controller trait.
///
/// This trait represents the system's interrupt controller. Methods take
/// `&self`: the controller is shared by every driver and each operation is a
/// single register write.
pub trait InterruptController: Sync {
    /// Set the priority of an interrupt line and enable (unmask) it.
    fn enable(&self, irq: IrqNumber, priority: Priority);

    /// Disable (mask) an interrupt line.
    fn disable(&self, irq: IrqNumber);

    /// Check if an interrupt line is currently enabled.
    fn is_enabled(&self, irq: IrqNumber) -> bool;

    /// Check if an interrupt is currently pending.
    fn is_pending(&self, irq: IrqNumber) -> bool;

    /// Clear a pending interrupt.
    fn clear_pending(&self, irq: IrqNumber);
}

/// An object that services one interrupt line.
///
/// The trait object carries both the routine and its context, so a
/// registry entry is a single `&'static dyn InterruptHandler`.
pub trait InterruptHandler: Sync {
    /// Called from interrupt context when the owned line fires.
    fn on_interrupt(&self);
}
