//! GPIO port register block (P0 / P1).

use bitflags::bitflags;

use crate::hw::Reg;

pub const PINS_PER_PORT: u8 = 32;

bitflags! {
    /// PIN_CNF[n] fields used by the drivers.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct PinCnf: u32 {
        /// Pin is an output.
        const DIR_OUTPUT = 1 << 0;
        /// Input buffer disconnected.
        const INPUT_DISCONNECT = 1 << 1;
        const PULL_DOWN = 1 << 2;
        const PULL_UP = 0b11 << 2;
    }
}

#[repr(C)]
pub struct GpioRegisters {
    _reserved0: [Reg<u32>; 321],
    pub out: Reg<u32>,
    pub outset: Reg<u32>,
    pub outclr: Reg<u32>,
    pub in_: Reg<u32>,
    pub dir: Reg<u32>,
    pub dirset: Reg<u32>,
    pub dirclr: Reg<u32>,
    pub latch: Reg<u32>,
    pub detectmode: Reg<u32>,
    _reserved1: [Reg<u32>; 118],
    pub pin_cnf: [Reg<u32>; PINS_PER_PORT as usize],
}

impl GpioRegisters {
    /// View the port register block at `base`.
    ///
    /// # Safety
    ///
    /// `base` must be the address of a GPIO port block (or memory laid out
    /// like one) that stays valid for the rest of the program.
    pub const unsafe fn from_base(base: usize) -> &'static Self {
        unsafe { &*(base as *const Self) }
    }
}

const _: () = {
    use core::mem::offset_of;
    assert!(offset_of!(GpioRegisters, out) == 0x504);
    assert!(offset_of!(GpioRegisters, in_) == 0x510);
    assert!(offset_of!(GpioRegisters, detectmode) == 0x524);
    assert!(offset_of!(GpioRegisters, pin_cnf) == 0x700);
};
