//! SPIM (SPI master with EasyDMA) register block.

use bitflags::bitflags;

use crate::hw::{AddrReg, Event, Reg, Task};

pub const ENABLE_ENABLED: u32 = 7;
pub const ENABLE_DISABLED: u32 = 0;

/// PSEL value for a disconnected pin.
pub const PSEL_DISCONNECTED: u32 = 0xFFFF_FFFF;

// CONFIG register bits
pub const CONFIG_ORDER_LSB_FIRST: u32 = 1 << 0;
pub const CONFIG_CPHA_TRAILING: u32 = 1 << 1;
pub const CONFIG_CPOL_ACTIVE_LOW: u32 = 1 << 2;

bitflags! {
    /// INTENSET / INTENCLR bits.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct SpimInterrupts: u32 {
        const STOPPED = 1 << 1;
        const ENDRX = 1 << 4;
        const END = 1 << 6;
        const ENDTX = 1 << 8;
        const STARTED = 1 << 19;
    }
}

/// EasyDMA channel descriptor (RXD or TXD).
#[repr(C)]
pub struct DmaChannel {
    pub ptr: AddrReg,
    pub maxcnt: Reg<u32>,
    pub amount: Reg<u32>,
    pub list: Reg<u32>,
}

#[repr(C)]
pub struct SpimRegisters {
    _reserved0: [Reg<u32>; 4],
    pub tasks_start: Task,
    pub tasks_stop: Task,
    _reserved1: Reg<u32>,
    pub tasks_suspend: Task,
    pub tasks_resume: Task,
    _reserved2: [Reg<u32>; 56],
    pub events_stopped: Event,
    _reserved3: [Reg<u32>; 2],
    pub events_endrx: Event,
    _reserved4: Reg<u32>,
    pub events_end: Event,
    _reserved5: Reg<u32>,
    pub events_endtx: Event,
    _reserved6: [Reg<u32>; 10],
    pub events_started: Event,
    _reserved7: [Reg<u32>; 44],
    pub shorts: Reg<u32>,
    _reserved8: [Reg<u32>; 64],
    pub intenset: Reg<u32>,
    pub intenclr: Reg<u32>,
    _reserved9: [Reg<u32>; 125],
    pub enable: Reg<u32>,
    _reserved10: Reg<u32>,
    pub psel_sck: Reg<u32>,
    pub psel_mosi: Reg<u32>,
    pub psel_miso: Reg<u32>,
    _reserved11: [Reg<u32>; 4],
    pub frequency: Reg<u32>,
    _reserved12: [Reg<u32>; 3],
    pub rxd: DmaChannel,
    pub txd: DmaChannel,
    pub config: Reg<u32>,
    _reserved13: [Reg<u32>; 26],
    pub orc: Reg<u32>,
}

impl SpimRegisters {
    /// View the register block at `base`.
    ///
    /// # Safety
    ///
    /// `base` must be the address of a SPIM block (or memory laid out like
    /// one) that stays valid for the rest of the program.
    pub const unsafe fn from_base(base: usize) -> &'static Self {
        unsafe { &*(base as *const Self) }
    }
}

#[cfg(target_pointer_width = "32")]
const _: () = {
    use core::mem::offset_of;
    assert!(offset_of!(SpimRegisters, tasks_start) == 0x010);
    assert!(offset_of!(SpimRegisters, events_stopped) == 0x104);
    assert!(offset_of!(SpimRegisters, events_end) == 0x118);
    assert!(offset_of!(SpimRegisters, events_started) == 0x14C);
    assert!(offset_of!(SpimRegisters, intenset) == 0x304);
    assert!(offset_of!(SpimRegisters, enable) == 0x500);
    assert!(offset_of!(SpimRegisters, frequency) == 0x524);
    assert!(offset_of!(SpimRegisters, rxd) == 0x534);
    assert!(offset_of!(SpimRegisters, txd) == 0x544);
    assert!(offset_of!(SpimRegisters, config) == 0x554);
    assert!(offset_of!(SpimRegisters, orc) == 0x5C0);
};
