//! Cortex-M NVIC register block, based at 0xE000_E100.

use crate::hw::Reg;

/// Implemented priority bits on nRF52 (eight levels).
pub const PRIORITY_BITS: u8 = 3;

#[repr(C)]
pub struct NvicRegisters {
    pub iser: [Reg<u32>; 8],
    _reserved0: [Reg<u32>; 24],
    pub icer: [Reg<u32>; 8],
    _reserved1: [Reg<u32>; 24],
    pub ispr: [Reg<u32>; 8],
    _reserved2: [Reg<u32>; 24],
    pub icpr: [Reg<u32>; 8],
    _reserved3: [Reg<u32>; 24],
    pub iabr: [Reg<u32>; 8],
    _reserved4: [Reg<u32>; 56],
    pub ipr: [Reg<u8>; 240],
}

impl NvicRegisters {
    /// View the NVIC block at `base`.
    ///
    /// # Safety
    ///
    /// `base` must be the NVIC base address (or memory laid out like it) and
    /// stay valid for the rest of the program.
    pub const unsafe fn from_base(base: usize) -> &'static Self {
        unsafe { &*(base as *const Self) }
    }
}

const _: () = {
    use core::mem::offset_of;
    assert!(offset_of!(NvicRegisters, icer) == 0x080);
    assert!(offset_of!(NvicRegisters, icpr) == 0x180);
    assert!(offset_of!(NvicRegisters, iabr) == 0x200);
    assert!(offset_of!(NvicRegisters, ipr) == 0x300);
};
