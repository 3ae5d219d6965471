//! CLOCK register block (HFCLK / LFCLK control).

use bitflags::bitflags;

use crate::hw::{Event, Reg, Task};

pub const LFCLKSRC_RC: u32 = 0;
pub const LFCLKSRC_XTAL: u32 = 1;
pub const LFCLKSRC_SYNTH: u32 = 2;

bitflags! {
    /// INTENSET / INTENCLR bits.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct ClockInterrupts: u32 {
        const HFCLKSTARTED = 1 << 0;
        const LFCLKSTARTED = 1 << 1;
        const DONE = 1 << 3;
        const CTTO = 1 << 4;
    }
}

#[repr(C)]
pub struct ClockRegisters {
    pub tasks_hfclkstart: Task,
    pub tasks_hfclkstop: Task,
    pub tasks_lfclkstart: Task,
    pub tasks_lfclkstop: Task,
    pub tasks_cal: Task,
    pub tasks_ctstart: Task,
    pub tasks_ctstop: Task,
    _reserved0: [Reg<u32>; 57],
    pub events_hfclkstarted: Event,
    pub events_lfclkstarted: Event,
    _reserved1: Reg<u32>,
    pub events_done: Event,
    pub events_ctto: Event,
    _reserved2: [Reg<u32>; 124],
    pub intenset: Reg<u32>,
    pub intenclr: Reg<u32>,
    _reserved3: [Reg<u32>; 63],
    pub hfclkrun: Reg<u32>,
    pub hfclkstat: Reg<u32>,
    _reserved4: Reg<u32>,
    pub lfclkrun: Reg<u32>,
    pub lfclkstat: Reg<u32>,
    pub lfclksrccopy: Reg<u32>,
    _reserved5: [Reg<u32>; 62],
    pub lfclksrc: Reg<u32>,
}

impl ClockRegisters {
    /// View the register block at `base`.
    ///
    /// # Safety
    ///
    /// `base` must be the address of the CLOCK block (or memory laid out like
    /// it) that stays valid for the rest of the program.
    pub const unsafe fn from_base(base: usize) -> &'static Self {
        unsafe { &*(base as *const Self) }
    }
}

const _: () = {
    use core::mem::offset_of;
    assert!(offset_of!(ClockRegisters, events_hfclkstarted) == 0x100);
    assert!(offset_of!(ClockRegisters, events_ctto) == 0x110);
    assert!(offset_of!(ClockRegisters, intenset) == 0x304);
    assert!(offset_of!(ClockRegisters, hfclkstat) == 0x40C);
    assert!(offset_of!(ClockRegisters, lfclkstat) == 0x418);
    assert!(offset_of!(ClockRegisters, lfclksrc) == 0x518);
};
