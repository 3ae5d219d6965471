//! Driver arena.
//!
//! The board lists the units it uses in a [`BoardConfig`]; the
//! [`DeviceManager`] builds one driver per unit, registers every driver's
//! interrupt handler in [`prepare`](DeviceManager::prepare) and hands out
//! each driver exactly once.
//!
//! ```rust,ignore
//! static BOARD: BoardConfig = BoardConfig {
//!     spim: &[chip::SPIM0.with_priority(2)],
//!     rtc: &[chip::RTC1],
//!     clock: Some(chip::CLOCK),
//! };
//!
//! let manager = device_manager::install(unsafe { DeviceManager::new(&BOARD, nvic, gpio)? });
//! let mut registry = InterruptRegistry::new();
//! manager.prepare(&mut registry);
//! irq::vectors::install(registry);
//! let flash = manager.take_spim(0).unwrap();
//! ```

use core::fmt;

use heapless::Vec;
use log::debug;
use spin::Once;

use crate::hal::gpio::GpioPort;
use crate::hal::interrupt::{InterruptController, IrqNumber, Priority};
use crate::irq::InterruptRegistry;
use crate::peripheral::clock::Clock;
use crate::peripheral::rtc::Rtc;
use crate::peripheral::spim::Spim;
use crate::platform::chip::{self, MAX_RTC, MAX_SPIM};

/// One SPIM unit used by the board.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SpimUnit {
    pub index: u8,
    pub base: usize,
    pub irq: IrqNumber,
    pub priority: Priority,
}

impl SpimUnit {
    pub const fn new(index: u8, base: usize, irq: IrqNumber, priority: Priority) -> Self {
        Self {
            index,
            base,
            irq,
            priority,
        }
    }

    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

/// One RTC unit used by the board.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RtcUnit {
    pub index: u8,
    pub base: usize,
    pub irq: IrqNumber,
    pub priority: Priority,
}

impl RtcUnit {
    pub const fn new(index: u8, base: usize, irq: IrqNumber, priority: Priority) -> Self {
        Self {
            index,
            base,
            irq,
            priority,
        }
    }

    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ClockUnit {
    pub base: usize,
    pub irq: IrqNumber,
    pub priority: Priority,
}

impl ClockUnit {
    pub const fn new(base: usize, irq: IrqNumber, priority: Priority) -> Self {
        Self {
            base,
            irq,
            priority,
        }
    }

    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

/// Units enabled on this board.
#[derive(Debug, Copy, Clone, Default)]
pub struct BoardConfig {
    pub spim: &'static [SpimUnit],
    pub rtc: &'static [RtcUnit],
    pub clock: Option<ClockUnit>,
}

/// Board table errors.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Same unit index or register block listed twice
    DuplicateUnit { kind: &'static str, index: u8 },
    /// More units than the chip has
    TooManyUnits { kind: &'static str, max: usize },
    /// Unit index the chip does not have
    UnknownUnit { kind: &'static str, index: u8 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::DuplicateUnit { kind, index } => {
                write!(f, "{}{} listed twice", kind, index)
            }
            ConfigError::TooManyUnits { kind, max } => {
                write!(f, "more than {} {} units", max, kind)
            }
            ConfigError::UnknownUnit { kind, index } => {
                write!(f, "{}{} does not exist on {}", kind, index, chip::NAME)
            }
        }
    }
}

trait Unit {
    fn index(&self) -> u8;
    fn base(&self) -> usize;
}

impl Unit for SpimUnit {
    fn index(&self) -> u8 {
        self.index
    }

    fn base(&self) -> usize {
        self.base
    }
}

impl Unit for RtcUnit {
    fn index(&self) -> u8 {
        self.index
    }

    fn base(&self) -> usize {
        self.base
    }
}

fn validate<U: Unit>(kind: &'static str, units: &[U], max: usize) -> Result<(), ConfigError> {
    if units.len() > max {
        return Err(ConfigError::TooManyUnits { kind, max });
    }
    for (n, unit) in units.iter().enumerate() {
        let index = unit.index();
        if index as usize >= max {
            return Err(ConfigError::UnknownUnit { kind, index });
        }
        if units[..n]
            .iter()
            .any(|other| other.index() == index || other.base() == unit.base())
        {
            return Err(ConfigError::DuplicateUnit { kind, index });
        }
    }
    Ok(())
}

/// Owns every driver instance on the board.
pub struct DeviceManager {
    spim: Vec<Spim, MAX_SPIM>,
    rtc: Vec<Rtc, MAX_RTC>,
    clock: Option<Clock>,
}

impl DeviceManager {
    /// Build one driver per unit in `board`.
    ///
    /// # Safety
    ///
    /// Every base address in `board` must address the matching register
    /// block for the rest of the program, and no other code may drive those
    /// blocks.
    pub unsafe fn new(
        board: &BoardConfig,
        intc: &'static dyn InterruptController,
        gpio: &'static dyn GpioPort,
    ) -> Result<Self, ConfigError> {
        validate("SPIM", board.spim, MAX_SPIM)?;
        validate("RTC", board.rtc, MAX_RTC)?;

        let mut spim = Vec::new();
        for unit in board.spim {
            spim.push(unsafe { Spim::new(unit, intc, gpio) })
                .map_err(|_| ConfigError::TooManyUnits {
                    kind: "SPIM",
                    max: MAX_SPIM,
                })?;
        }

        let mut rtc = Vec::new();
        for unit in board.rtc {
            rtc.push(unsafe { Rtc::new(unit, intc) })
                .map_err(|_| ConfigError::TooManyUnits {
                    kind: "RTC",
                    max: MAX_RTC,
                })?;
        }

        let clock = board.clock.map(|unit| unsafe { Clock::new(&unit, intc) });

        debug!(
            "device manager: {} SPIM, {} RTC, clock {}",
            spim.len(),
            rtc.len(),
            clock.is_some()
        );
        Ok(Self { spim, rtc, clock })
    }

    /// Reset every driver and register its interrupt handler.
    ///
    /// Safe to call again; each driver re-registers the same handler.
    pub fn prepare<const N: usize>(&'static self, registry: &mut InterruptRegistry<N>) {
        for spim in &self.spim {
            spim.prepare(registry);
        }
        for rtc in &self.rtc {
            rtc.prepare(registry);
        }
        if let Some(clock) = &self.clock {
            clock.prepare(registry);
        }
    }

    /// Take the SPIM driver for unit `index`. `None` if the board does not
    /// use that unit or it was already taken.
    pub fn take_spim(&'static self, index: u8) -> Option<&'static Spim> {
        self.spim
            .iter()
            .find(|spim| spim.index() == index)
            .filter(|spim| spim.claim())
    }

    pub fn take_rtc(&'static self, index: u8) -> Option<&'static Rtc> {
        self.rtc
            .iter()
            .find(|rtc| rtc.index() == index)
            .filter(|rtc| rtc.claim())
    }

    pub fn take_clock(&'static self) -> Option<&'static Clock> {
        self.clock.as_ref().filter(|clock| clock.claim())
    }
}

static DEVICE_MANAGER: Once<DeviceManager> = Once::new();

/// Store `manager` for the rest of the program.
///
/// # Panics
///
/// If a manager is already installed.
pub fn install(manager: DeviceManager) -> &'static DeviceManager {
    let mut fresh = false;
    let installed = DEVICE_MANAGER.call_once(|| {
        fresh = true;
        manager
    });
    assert!(fresh, "device manager already installed");
    installed
}

pub fn devices() -> Option<&'static DeviceManager> {
    DEVICE_MANAGER.get()
}
