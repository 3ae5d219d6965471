//! nRF52 NVIC driver.

use log::trace;

use super::chip;
use crate::hal::interrupt::{InterruptController, IrqNumber, Priority};
use crate::hw::nrf52::nvic::{NvicRegisters, PRIORITY_BITS};

/// Cortex-M4 NVIC as found on the nRF52.
pub struct Nvic {
    regs: &'static NvicRegisters,
}

impl Nvic {
    /// Create a controller over the NVIC block at `base`.
    ///
    /// # Safety
    ///
    /// `base` must be the NVIC base address (or memory laid out like it) and
    /// stay valid for the rest of the program.
    pub const unsafe fn new(base: usize) -> Self {
        Self {
            regs: unsafe { NvicRegisters::from_base(base) },
        }
    }

    /// Split an interrupt number into its register word and bit.
    fn line(irq: IrqNumber) -> (usize, u32) {
        assert!(
            (irq as usize) < chip::IRQ_COUNT,
            "NVIC: irq {} out of range for {}",
            irq,
            chip::NAME
        );
        ((irq / 32) as usize, 1 << (irq % 32))
    }
}

impl InterruptController for Nvic {
    fn enable(&self, irq: IrqNumber, priority: Priority) {
        assert!(
            priority < (1 << PRIORITY_BITS),
            "NVIC: priority {} out of range",
            priority
        );
        let (word, bit) = Self::line(irq);
        // Only the top PRIORITY_BITS of each IPR byte are implemented
        self.regs.ipr[irq as usize].write(priority << (8 - PRIORITY_BITS));
        self.regs.iser[word].write(bit);
        trace!("NVIC: enabled irq {} at priority {}", irq, priority);
    }

    fn disable(&self, irq: IrqNumber) {
        let (word, bit) = Self::line(irq);
        self.regs.icer[word].write(bit);
        trace!("NVIC: disabled irq {}", irq);
    }

    fn is_enabled(&self, irq: IrqNumber) -> bool {
        let (word, bit) = Self::line(irq);
        self.regs.iser[word].read() & bit != 0
    }

    fn is_pending(&self, irq: IrqNumber) -> bool {
        let (word, bit) = Self::line(irq);
        self.regs.ispr[word].read() & bit != 0
    }

    fn clear_pending(&self, irq: IrqNumber) {
        let (word, bit) = Self::line(irq);
        self.regs.icpr[word].write(bit);
    }
}
