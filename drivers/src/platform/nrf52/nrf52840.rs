//! nRF52840: four SPIM units, 16-bit EasyDMA counters, two GPIO ports.

use super::{DEFAULT_PRIORITY, irqn};
use crate::device_manager::{ClockUnit, RtcUnit, SpimUnit};
use crate::hw::nrf52 as map;

pub const NAME: &str = "nRF52840";

/// Number of external interrupt lines.
pub const IRQ_COUNT: usize = 48;

pub const MAX_SPIM: usize = 4;
pub const MAX_RTC: usize = 3;

/// Largest MAXCNT value the SPIM EasyDMA accepts.
pub const MAX_TRANSFER_LEN: usize = 0xFFFF;

pub const GPIO_PORTS: &[usize] = &[map::P0_BASE, map::P1_BASE];

pub const SPIM0: SpimUnit = SpimUnit::new(0, map::SPIM0_BASE, irqn::SPIM0, DEFAULT_PRIORITY);
pub const SPIM1: SpimUnit = SpimUnit::new(1, map::SPIM1_BASE, irqn::SPIM1, DEFAULT_PRIORITY);
pub const SPIM2: SpimUnit = SpimUnit::new(2, map::SPIM2_BASE, irqn::SPIM2, DEFAULT_PRIORITY);
pub const SPIM3: SpimUnit = SpimUnit::new(3, map::SPIM3_BASE, irqn::SPIM3, DEFAULT_PRIORITY);

pub const RTC0: RtcUnit = RtcUnit::new(0, map::RTC0_BASE, irqn::RTC0, DEFAULT_PRIORITY);
pub const RTC1: RtcUnit = RtcUnit::new(1, map::RTC1_BASE, irqn::RTC1, DEFAULT_PRIORITY);
pub const RTC2: RtcUnit = RtcUnit::new(2, map::RTC2_BASE, irqn::RTC2, DEFAULT_PRIORITY);

pub const CLOCK: ClockUnit = ClockUnit::new(map::CLOCK_BASE, irqn::POWER_CLOCK, DEFAULT_PRIORITY);
