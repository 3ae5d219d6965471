//! nRF52832: three SPIM units, 8-bit EasyDMA counters, one GPIO port.

use super::{DEFAULT_PRIORITY, irqn};
use crate::device_manager::{ClockUnit, RtcUnit, SpimUnit};
use crate::hw::nrf52 as map;

pub const NAME: &str = "nRF52832";

/// Number of external interrupt lines.
pub const IRQ_COUNT: usize = 39;

pub const MAX_SPIM: usize = 3;
pub const MAX_RTC: usize = 3;

/// Largest MAXCNT value the SPIM EasyDMA accepts.
pub const MAX_TRANSFER_LEN: usize = 0xFF;

pub const GPIO_PORTS: &[usize] = &[map::P0_BASE];

pub const SPIM0: SpimUnit = SpimUnit::new(0, map::SPIM0_BASE, irqn::SPIM0, DEFAULT_PRIORITY);
pub const SPIM1: SpimUnit = SpimUnit::new(1, map::SPIM1_BASE, irqn::SPIM1, DEFAULT_PRIORITY);
pub const SPIM2: SpimUnit = SpimUnit::new(2, map::SPIM2_BASE, irqn::SPIM2, DEFAULT_PRIORITY);

pub const RTC0: RtcUnit = RtcUnit::new(0, map::RTC0_BASE, irqn::RTC0, DEFAULT_PRIORITY);
pub const RTC1: RtcUnit = RtcUnit::new(1, map::RTC1_BASE, irqn::RTC1, DEFAULT_PRIORITY);
pub const RTC2: RtcUnit = RtcUnit::new(2, map::RTC2_BASE, irqn::RTC2, DEFAULT_PRIORITY);

pub const CLOCK: ClockUnit = ClockUnit::new(map::CLOCK_BASE, irqn::POWER_CLOCK, DEFAULT_PRIORITY);
