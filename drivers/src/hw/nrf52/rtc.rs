//! RTC (real-time counter) register block.

use bitflags::bitflags;

use crate::hw::{Event, Reg, Task};

/// Number of compare channels.
pub const CC_COUNT: usize = 4;

/// Width mask of the PRESCALER register.
pub const PRESCALER_MASK: u32 = 0xFFF;

/// Width mask of the COUNTER and CC registers.
pub const COUNTER_MASK: u32 = 0x00FF_FFFF;

bitflags! {
    /// Bit layout shared by INTENSET/INTENCLR and EVTEN/EVTENSET/EVTENCLR.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct RtcInterrupts: u32 {
        const TICK = 1 << 0;
        const OVRFLW = 1 << 1;
        const COMPARE0 = 1 << 16;
        const COMPARE1 = 1 << 17;
        const COMPARE2 = 1 << 18;
        const COMPARE3 = 1 << 19;
    }
}

#[repr(C)]
pub struct RtcRegisters {
    pub tasks_start: Task,
    pub tasks_stop: Task,
    pub tasks_clear: Task,
    pub tasks_trigovrflw: Task,
    _reserved0: [Reg<u32>; 60],
    pub events_tick: Event,
    pub events_ovrflw: Event,
    _reserved1: [Reg<u32>; 14],
    pub events_compare: [Event; CC_COUNT],
    _reserved2: [Reg<u32>; 109],
    pub intenset: Reg<u32>,
    pub intenclr: Reg<u32>,
    _reserved3: [Reg<u32>; 13],
    pub evten: Reg<u32>,
    pub evtenset: Reg<u32>,
    pub evtenclr: Reg<u32>,
    _reserved4: [Reg<u32>; 110],
    pub counter: Reg<u32>,
    pub prescaler: Reg<u32>,
    _reserved5: [Reg<u32>; 13],
    pub cc: [Reg<u32>; CC_COUNT],
}

impl RtcRegisters {
    /// View the register block at `base`.
    ///
    /// # Safety
    ///
    /// `base` must be the address of an RTC block (or memory laid out like
    /// one) that stays valid for the rest of the program.
    pub const unsafe fn from_base(base: usize) -> &'static Self {
        unsafe { &*(base as *const Self) }
    }
}

const _: () = {
    use core::mem::offset_of;
    assert!(offset_of!(RtcRegisters, events_tick) == 0x100);
    assert!(offset_of!(RtcRegisters, events_compare) == 0x140);
    assert!(offset_of!(RtcRegisters, intenset) == 0x304);
    assert!(offset_of!(RtcRegisters, evten) == 0x340);
    assert!(offset_of!(RtcRegisters, counter) == 0x504);
    assert!(offset_of!(RtcRegisters, cc) == 0x540);
};
