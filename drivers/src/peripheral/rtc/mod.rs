//! RTC (real-time counter) driver.
//!
//! A 24-bit counter clocked from LFCLK through a 12-bit prescaler, with
//! four compare channels. Events are enabled individually; the interrupt
//! handler reports each one that fired through a single callback, in the
//! order tick, overflow, compare 0..3.

use core::cell::Cell;
use core::sync::atomic::{AtomicBool, Ordering};

use critical_section::Mutex;
use log::{debug, trace};
use periph_common::atomic_state;
use periph_common::sync::StateCell;

use crate::device_manager::RtcUnit;
use crate::hal::interrupt::{InterruptController, InterruptHandler, IrqNumber, Priority};
use crate::hw::nrf52::rtc::{CC_COUNT, COUNTER_MASK, PRESCALER_MASK, RtcInterrupts, RtcRegisters};
use crate::hw::{Event, Task};
use crate::irq::InterruptRegistry;

atomic_state! {
    pub enum RtcState {
        Uninit = 0,
        Stopped = 1,
        Running = 2,
    }
}

/// Event reported to the [`RtcCallback`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RtcEvent {
    Tick,
    Overflow,
    Compare0,
    Compare1,
    Compare2,
    Compare3,
}

impl RtcEvent {
    /// Handler order.
    const ALL: [RtcEvent; 6] = [
        RtcEvent::Tick,
        RtcEvent::Overflow,
        RtcEvent::Compare0,
        RtcEvent::Compare1,
        RtcEvent::Compare2,
        RtcEvent::Compare3,
    ];

    /// Event for compare channel `channel`.
    pub fn compare(channel: usize) -> Self {
        match channel {
            0 => RtcEvent::Compare0,
            1 => RtcEvent::Compare1,
            2 => RtcEvent::Compare2,
            3 => RtcEvent::Compare3,
            _ => panic!("RTC: compare channel {} out of range", channel),
        }
    }

    fn mask(self) -> RtcInterrupts {
        match self {
            RtcEvent::Tick => RtcInterrupts::TICK,
            RtcEvent::Overflow => RtcInterrupts::OVRFLW,
            RtcEvent::Compare0 => RtcInterrupts::COMPARE0,
            RtcEvent::Compare1 => RtcInterrupts::COMPARE1,
            RtcEvent::Compare2 => RtcInterrupts::COMPARE2,
            RtcEvent::Compare3 => RtcInterrupts::COMPARE3,
        }
    }

    fn register(self, regs: &RtcRegisters) -> &Event {
        match self {
            RtcEvent::Tick => &regs.events_tick,
            RtcEvent::Overflow => &regs.events_ovrflw,
            RtcEvent::Compare0 => &regs.events_compare[0],
            RtcEvent::Compare1 => &regs.events_compare[1],
            RtcEvent::Compare2 => &regs.events_compare[2],
            RtcEvent::Compare3 => &regs.events_compare[3],
        }
    }
}

/// Tasks whose addresses can be handed to PPI.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RtcTask {
    Start,
    Stop,
    Clear,
    TriggerOverflow,
}

pub type RtcCallback = fn(&Rtc, RtcEvent);

#[derive(Debug, Copy, Clone)]
pub struct RtcConfig {
    pub evt_cb: Option<RtcCallback>,
    /// Counter frequency is 32768 Hz / (prescaler + 1). 12 bits.
    pub prescaler: u16,
}

impl RtcConfig {
    pub const fn new(prescaler: u16) -> Self {
        Self {
            evt_cb: None,
            prescaler,
        }
    }

    pub const fn with_callback(mut self, cb: RtcCallback) -> Self {
        self.evt_cb = Some(cb);
        self
    }
}

pub struct Rtc {
    index: u8,
    regs: &'static RtcRegisters,
    irq: IrqNumber,
    priority: Priority,
    intc: &'static dyn InterruptController,
    state: StateCell<RtcState>,
    config: Mutex<Cell<Option<&'static RtcConfig>>>,
    claimed: AtomicBool,
}

impl Rtc {
    /// # Safety
    ///
    /// `unit.base` must address an RTC register block valid for the rest of
    /// the program, used by no other driver.
    pub(crate) unsafe fn new(unit: &RtcUnit, intc: &'static dyn InterruptController) -> Self {
        Self {
            index: unit.index,
            regs: unsafe { RtcRegisters::from_base(unit.base) },
            irq: unit.irq,
            priority: unit.priority,
            intc,
            state: StateCell::new(RtcState::Uninit),
            config: Mutex::new(Cell::new(None)),
            claimed: AtomicBool::new(false),
        }
    }

    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn state(&self) -> RtcState {
        self.state.load()
    }

    pub(crate) fn claim(&self) -> bool {
        !self.claimed.swap(true, Ordering::AcqRel)
    }

    pub(crate) fn prepare<const N: usize>(&'static self, registry: &mut InterruptRegistry<N>) {
        self.state.store(RtcState::Uninit);
        critical_section::with(|cs| self.config.borrow(cs).set(None));
        registry.register(self.irq, self);
        debug!("RTC{}: prepared on irq {}", self.index, self.irq);
    }

    /// Program the prescaler and enable the interrupt line. All events start
    /// disabled and the counter stopped.
    ///
    /// # Panics
    ///
    /// If already initialized or the prescaler is wider than 12 bits.
    pub fn init(&self, config: &'static RtcConfig) {
        let state = self.state.load();
        assert!(
            state == RtcState::Uninit,
            "RTC{}: init in state {:?}",
            self.index,
            state
        );
        assert!(
            u32::from(config.prescaler) <= PRESCALER_MASK,
            "RTC{}: prescaler {:#x} wider than 12 bits",
            self.index,
            config.prescaler
        );

        let r = self.regs;
        r.tasks_stop.trigger();
        r.prescaler.write(u32::from(config.prescaler));
        for event in RtcEvent::ALL {
            event.register(r).clear();
        }
        r.intenclr.write(u32::MAX);
        r.evtenclr.write(u32::MAX);

        critical_section::with(|cs| self.config.borrow(cs).set(Some(config)));
        self.intc.enable(self.irq, self.priority);
        self.state.store(RtcState::Stopped);
        debug!("RTC{}: initialized, prescaler {}", self.index, config.prescaler);
    }

    /// Route `event` to the interrupt handler and to PPI.
    pub fn enable_event(&self, event: RtcEvent) {
        self.check_active("enable_event");
        let mask = event.mask().bits();
        self.regs.evtenset.write(mask);
        self.regs.intenset.write(mask);
    }

    pub fn disable_event(&self, event: RtcEvent) {
        self.check_active("disable_event");
        let mask = event.mask().bits();
        self.regs.intenclr.write(mask);
        self.regs.evtenclr.write(mask);
    }

    pub fn start(&self) {
        self.check_active("start");
        self.regs.tasks_start.trigger();
        self.state.store(RtcState::Running);
    }

    pub fn stop(&self) {
        self.check_active("stop");
        self.regs.tasks_stop.trigger();
        self.state.store(RtcState::Stopped);
    }

    /// Reset the counter to zero.
    pub fn clear(&self) {
        self.check_active("clear");
        self.regs.tasks_clear.trigger();
    }

    pub fn counter(&self) -> u32 {
        self.regs.counter.read() & COUNTER_MASK
    }

    /// Set compare channel `channel`. `value` is truncated to 24 bits.
    pub fn set_compare(&self, channel: usize, value: u32) {
        self.check_active("set_compare");
        assert!(
            channel < CC_COUNT,
            "RTC{}: compare channel {} out of range",
            self.index,
            channel
        );
        self.regs.cc[channel].write(value & COUNTER_MASK);
    }

    /// Stop the counter, mask every event and disable the interrupt line.
    pub fn deinit(&self) {
        self.check_active("deinit");
        let r = self.regs;
        r.tasks_stop.trigger();
        r.intenclr.write(u32::MAX);
        r.evtenclr.write(u32::MAX);
        self.intc.disable(self.irq);

        critical_section::with(|cs| self.config.borrow(cs).set(None));
        self.state.store(RtcState::Uninit);
        debug!("RTC{}: deinitialized", self.index);
    }

    pub fn task_address(&self, task: RtcTask) -> usize {
        let r = self.regs;
        let reg: &Task = match task {
            RtcTask::Start => &r.tasks_start,
            RtcTask::Stop => &r.tasks_stop,
            RtcTask::Clear => &r.tasks_clear,
            RtcTask::TriggerOverflow => &r.tasks_trigovrflw,
        };
        reg.addr()
    }

    pub fn event_address(&self, event: RtcEvent) -> usize {
        event.register(self.regs).addr()
    }

    fn check_active(&self, op: &str) {
        let state = self.state.load();
        assert!(
            state != RtcState::Uninit,
            "RTC{}: {} in state {:?}",
            self.index,
            op,
            state
        );
    }
}

impl InterruptHandler for Rtc {
    fn on_interrupt(&self) {
        let callback = critical_section::with(|cs| self.config.borrow(cs).get())
            .and_then(|config| config.evt_cb);

        for event in RtcEvent::ALL {
            let flag = event.register(self.regs);
            if !flag.is_set() {
                continue;
            }
            flag.clear();
            trace!("RTC{}: {:?}", self.index, event);
            if let Some(cb) = callback {
                cb(self, event);
            }
        }
    }
}
