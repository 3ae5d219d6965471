pub mod clock;
pub mod gpio;
pub mod nvic;
pub mod rtc;
pub mod spim;

pub const CLOCK_BASE: usize = 0x4000_0000;
pub const SPIM0_BASE: usize = 0x4000_3000;
pub const SPIM1_BASE: usize = 0x4000_4000;
pub const RTC0_BASE: usize = 0x4000_B000;
pub const RTC1_BASE: usize = 0x4001_1000;
pub const SPIM2_BASE: usize = 0x4002_3000;
pub const RTC2_BASE: usize = 0x4002_4000;
pub const SPIM3_BASE: usize = 0x4002_F000;
pub const P0_BASE: usize = 0x5000_0000;
pub const P1_BASE: usize = 0x5000_0300;
pub const NVIC_BASE: usize = 0xE000_E100;
