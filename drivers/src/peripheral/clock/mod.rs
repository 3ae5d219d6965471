//! CLOCK driver: HFCLK crystal and LFCLK source control.

use core::cell::Cell;
use core::sync::atomic::{AtomicBool, Ordering};

use critical_section::Mutex;
use log::{debug, trace};
use periph_common::atomic_state;
use periph_common::sync::StateCell;

use crate::device_manager::ClockUnit;
use crate::hal::interrupt::{InterruptController, InterruptHandler, IrqNumber, Priority};
use crate::hw::nrf52::clock::{
    ClockInterrupts, ClockRegisters, LFCLKSRC_RC, LFCLKSRC_SYNTH, LFCLKSRC_XTAL,
};
use crate::irq::InterruptRegistry;

atomic_state! {
    pub enum ClockState {
        Uninit = 0,
        Ready = 1,
    }
}

atomic_state! {
    /// High-frequency clock source.
    pub enum HfclkState {
        /// Internal RC oscillator (reset state).
        Rc = 0,
        /// Crystal requested, not yet stable.
        Starting = 1,
        Xtal = 2,
    }
}

atomic_state! {
    pub enum LfclkState {
        Stopped = 0,
        Starting = 1,
        Running = 2,
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ClockEvent {
    HfclkStarted,
    LfclkStarted,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LfclkSource {
    Rc,
    Xtal,
    /// Synthesized from HFCLK.
    Synth,
}

impl LfclkSource {
    fn bits(self) -> u32 {
        match self {
            LfclkSource::Rc => LFCLKSRC_RC,
            LfclkSource::Xtal => LFCLKSRC_XTAL,
            LfclkSource::Synth => LFCLKSRC_SYNTH,
        }
    }
}

pub type ClockCallback = fn(&Clock, ClockEvent);

#[derive(Debug, Copy, Clone)]
pub struct ClockConfig {
    pub evt_cb: Option<ClockCallback>,
    pub lfclk_source: LfclkSource,
}

impl ClockConfig {
    pub const fn new(lfclk_source: LfclkSource) -> Self {
        Self {
            evt_cb: None,
            lfclk_source,
        }
    }

    pub const fn with_callback(mut self, cb: ClockCallback) -> Self {
        self.evt_cb = Some(cb);
        self
    }
}

pub struct Clock {
    regs: &'static ClockRegisters,
    irq: IrqNumber,
    priority: Priority,
    intc: &'static dyn InterruptController,
    state: StateCell<ClockState>,
    hfclk: StateCell<HfclkState>,
    lfclk: StateCell<LfclkState>,
    config: Mutex<Cell<Option<&'static ClockConfig>>>,
    claimed: AtomicBool,
}

impl Clock {
    /// # Safety
    ///
    /// `unit.base` must address the CLOCK block for the rest of the program.
    pub(crate) unsafe fn new(unit: &ClockUnit, intc: &'static dyn InterruptController) -> Self {
        Self {
            regs: unsafe { ClockRegisters::from_base(unit.base) },
            irq: unit.irq,
            priority: unit.priority,
            intc,
            state: StateCell::new(ClockState::Uninit),
            hfclk: StateCell::new(HfclkState::Rc),
            lfclk: StateCell::new(LfclkState::Stopped),
            config: Mutex::new(Cell::new(None)),
            claimed: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> ClockState {
        self.state.load()
    }

    pub fn hfclk_state(&self) -> HfclkState {
        self.hfclk.load()
    }

    pub fn lfclk_state(&self) -> LfclkState {
        self.lfclk.load()
    }

    pub(crate) fn claim(&self) -> bool {
        !self.claimed.swap(true, Ordering::AcqRel)
    }

    pub(crate) fn prepare<const N: usize>(&'static self, registry: &mut InterruptRegistry<N>) {
        self.state.store(ClockState::Uninit);
        self.hfclk.store(HfclkState::Rc);
        self.lfclk.store(LfclkState::Stopped);
        critical_section::with(|cs| self.config.borrow(cs).set(None));
        registry.register(self.irq, self);
        debug!("CLOCK: prepared on irq {}", self.irq);
    }

    pub fn init(&self, config: &'static ClockConfig) {
        let state = self.state.load();
        assert!(
            state == ClockState::Uninit,
            "CLOCK: init in state {:?}",
            state
        );

        let r = self.regs;
        r.intenclr.write(u32::MAX);
        r.events_hfclkstarted.clear();
        r.events_lfclkstarted.clear();
        r.intenset
            .write((ClockInterrupts::HFCLKSTARTED | ClockInterrupts::LFCLKSTARTED).bits());

        critical_section::with(|cs| self.config.borrow(cs).set(Some(config)));
        self.intc.enable(self.irq, self.priority);
        self.state.store(ClockState::Ready);
        debug!("CLOCK: initialized, lfclk source {:?}", config.lfclk_source);
    }

    /// Request the HF crystal. [`ClockEvent::HfclkStarted`] follows once it
    /// is stable.
    pub fn hfclk_start(&self) {
        self.check_ready("hfclk_start");
        self.regs.events_hfclkstarted.clear();
        self.hfclk.store(HfclkState::Starting);
        self.regs.tasks_hfclkstart.trigger();
    }

    /// Release the HF crystal; HFCLK falls back to the RC oscillator.
    pub fn hfclk_stop(&self) {
        self.check_ready("hfclk_stop");
        self.regs.tasks_hfclkstop.trigger();
        self.hfclk.store(HfclkState::Rc);
    }

    /// Select the configured LFCLK source and start it.
    pub fn lfclk_start(&self) {
        let config = self.check_ready("lfclk_start");
        let r = self.regs;
        r.lfclksrc.write(config.lfclk_source.bits());
        r.events_lfclkstarted.clear();
        self.lfclk.store(LfclkState::Starting);
        r.tasks_lfclkstart.trigger();
    }

    pub fn lfclk_stop(&self) {
        self.check_ready("lfclk_stop");
        self.regs.tasks_lfclkstop.trigger();
        self.lfclk.store(LfclkState::Stopped);
    }

    /// Mask the clock interrupts. Running oscillators are left running.
    pub fn deinit(&self) {
        self.check_ready("deinit");
        self.regs
            .intenclr
            .write((ClockInterrupts::HFCLKSTARTED | ClockInterrupts::LFCLKSTARTED).bits());
        self.intc.disable(self.irq);
        critical_section::with(|cs| self.config.borrow(cs).set(None));
        self.state.store(ClockState::Uninit);
        debug!("CLOCK: deinitialized");
    }

    fn check_ready(&self, op: &str) -> &'static ClockConfig {
        let state = self.state.load();
        assert!(
            state == ClockState::Ready,
            "CLOCK: {} in state {:?}",
            op,
            state
        );
        match critical_section::with(|cs| self.config.borrow(cs).get()) {
            Some(config) => config,
            None => panic!("CLOCK: {} without configuration", op),
        }
    }
}

impl InterruptHandler for Clock {
    fn on_interrupt(&self) {
        let r = self.regs;
        let callback = critical_section::with(|cs| self.config.borrow(cs).get())
            .and_then(|config| config.evt_cb);

        if r.events_hfclkstarted.is_set() {
            r.events_hfclkstarted.clear();
            self.hfclk.store(HfclkState::Xtal);
            trace!("CLOCK: hfclk started");
            if let Some(cb) = callback {
                cb(self, ClockEvent::HfclkStarted);
            }
        }

        if r.events_lfclkstarted.is_set() {
            r.events_lfclkstarted.clear();
            self.lfclk.store(LfclkState::Running);
            trace!("CLOCK: lfclk started");
            if let Some(cb) = callback {
                cb(self, ClockEvent::LfclkStarted);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::chip::IRQ_COUNT;
    use crate::platform::nrf52::irqn;
    use crate::test_support::{MockNvic, leak, leak_zeroed};
    use std::sync::Mutex as StdMutex;

    struct Rig {
        clock: &'static Clock,
        regs: &'static ClockRegisters,
        nvic: &'static MockNvic,
        registry: InterruptRegistry<IRQ_COUNT>,
    }

    fn rig() -> Rig {
        let regs = leak_zeroed::<ClockRegisters>();
        let nvic = MockNvic::new();
        let unit = ClockUnit::new(regs as *const _ as usize, irqn::POWER_CLOCK, 1);
        let clock = leak(unsafe { Clock::new(&unit, nvic) });
        let mut registry = InterruptRegistry::new();
        clock.prepare(&mut registry);
        Rig {
            clock,
            regs,
            nvic,
            registry,
        }
    }

    static XTAL: ClockConfig = ClockConfig::new(LfclkSource::Xtal);

    #[test]
    fn prepare_resets_oscillator_tracking() {
        let rig = rig();
        assert_eq!(rig.clock.state(), ClockState::Uninit);
        assert_eq!(rig.clock.hfclk_state(), HfclkState::Rc);
        assert_eq!(rig.clock.lfclk_state(), LfclkState::Stopped);
        assert!(rig.registry.is_registered(irqn::POWER_CLOCK));
    }

    #[test]
    fn init_unmasks_started_events() {
        let rig = rig();
        rig.clock.init(&XTAL);
        assert_eq!(rig.regs.intenset.read(), 0b11);
        assert_eq!(rig.nvic.priority(irqn::POWER_CLOCK), Some(1));
        assert_eq!(rig.clock.state(), ClockState::Ready);
    }

    #[test]
    fn hfclk_tracks_start_until_event() {
        let rig = rig();
        rig.clock.init(&XTAL);
        rig.clock.hfclk_start();
        assert_eq!(rig.regs.tasks_hfclkstart.read(), 1);
        assert_eq!(rig.clock.hfclk_state(), HfclkState::Starting);

        rig.regs.events_hfclkstarted.write(1);
        rig.registry.dispatch(irqn::POWER_CLOCK);
        assert_eq!(rig.clock.hfclk_state(), HfclkState::Xtal);
        assert!(!rig.regs.events_hfclkstarted.is_set());

        rig.clock.hfclk_stop();
        assert_eq!(rig.regs.tasks_hfclkstop.read(), 1);
        assert_eq!(rig.clock.hfclk_state(), HfclkState::Rc);
    }

    #[test]
    fn lfclk_start_selects_source() {
        static SYNTH: ClockConfig = ClockConfig::new(LfclkSource::Synth);
        let rig = rig();
        rig.clock.init(&SYNTH);
        rig.clock.lfclk_start();
        assert_eq!(rig.regs.lfclksrc.read(), LFCLKSRC_SYNTH);
        assert_eq!(rig.clock.lfclk_state(), LfclkState::Starting);

        rig.regs.events_lfclkstarted.write(1);
        rig.registry.dispatch(irqn::POWER_CLOCK);
        assert_eq!(rig.clock.lfclk_state(), LfclkState::Running);

        rig.clock.lfclk_stop();
        assert_eq!(rig.clock.lfclk_state(), LfclkState::Stopped);
    }

    #[test]
    fn callback_receives_both_events() {
        static SEEN: StdMutex<Vec<ClockEvent>> = StdMutex::new(Vec::new());
        fn on_event(clock: &Clock, event: ClockEvent) {
            if event == ClockEvent::HfclkStarted {
                assert_eq!(clock.hfclk_state(), HfclkState::Xtal);
            }
            SEEN.lock().unwrap().push(event);
        }
        static CFG: ClockConfig = ClockConfig::new(LfclkSource::Rc).with_callback(on_event);

        let rig = rig();
        rig.clock.init(&CFG);
        rig.regs.events_lfclkstarted.write(1);
        rig.regs.events_hfclkstarted.write(1);
        rig.registry.dispatch(irqn::POWER_CLOCK);

        assert_eq!(
            *SEEN.lock().unwrap(),
            [ClockEvent::HfclkStarted, ClockEvent::LfclkStarted]
        );
    }

    #[test]
    #[should_panic(expected = "hfclk_start in state Uninit")]
    fn start_requires_init() {
        rig().clock.hfclk_start();
    }

    #[test]
    fn deinit_masks_and_disables_line() {
        let rig = rig();
        rig.clock.init(&XTAL);
        rig.clock.deinit();
        assert_eq!(rig.regs.intenclr.read(), 0b11);
        assert!(!rig.nvic.is_enabled(irqn::POWER_CLOCK));
        assert_eq!(rig.clock.state(), ClockState::Uninit);
    }
}
