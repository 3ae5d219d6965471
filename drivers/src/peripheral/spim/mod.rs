//! SPIM (SPI master with EasyDMA) driver.
//!
//! Transfers are non-blocking: [`Spim::exchange`] programs both DMA
//! channels, triggers START and returns. Completion is reported from the
//! interrupt handler through the configured [`SpimCallback`] and through a
//! one-shot signal that [`Spim::wait`] awaits.
//!
//! # State machine
//!
//! ```text
//!  Uninit --init--> Ready --exchange--> Busy --END irq--> Finish --callback returns--> Ready
//!     ^               |                  ^                  |
//!     +----deinit-----+                  +----exchange------+
//! ```
//!
//! The callback runs while the driver is in `Finish`. A transfer started from
//! the callback moves the driver straight back to `Busy`; otherwise the
//! handler returns it to `Ready`.
//!
//! # Hardware chaining
//!
//! [`Spim::xfer_configure`] programs the buffers without enabling the END
//! interrupt, and [`Spim::task_address`] / [`Spim::event_address`] expose the
//! START task and END event so PPI channels can run transfers without the CPU.

mod config;

use core::cell::{Cell, RefCell};
use core::sync::atomic::{AtomicBool, Ordering};

use critical_section::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use log::{debug, trace};
use periph_common::atomic_state;
use periph_common::sync::StateCell;

pub use config::{Frequency, SpimCallback, SpimConfig};

use crate::device_manager::SpimUnit;
use crate::hal::gpio::{GpioPort, PinLevel, PullMode};
use crate::hal::interrupt::{InterruptController, InterruptHandler, IrqNumber, Priority};
use crate::hw::nrf52::spim::{
    ENABLE_DISABLED, ENABLE_ENABLED, PSEL_DISCONNECTED, SpimInterrupts, SpimRegisters,
};
use crate::irq::InterruptRegistry;
use crate::platform::chip::MAX_TRANSFER_LEN;

atomic_state! {
    /// Transfer state of a SPIM instance.
    pub enum SpimState {
        /// Not configured; only `init` is allowed.
        Uninit = 0,
        /// Configured and idle.
        Ready = 1,
        /// Transfer in flight.
        Busy = 2,
        /// Transfer done, completion callback running.
        Finish = 3,
    }
}

/// Buffers of a finished transfer, handed back by the interrupt handler.
#[derive(Debug)]
pub struct Completed {
    pub tx: &'static [u8],
    pub rx: &'static mut [u8],
    /// Bytes clocked out of `tx` (TXD.AMOUNT).
    pub tx_amount: usize,
    /// Bytes written into `rx` (RXD.AMOUNT).
    pub rx_amount: usize,
}

struct InFlight {
    tx: &'static [u8],
    rx: &'static mut [u8],
}

/// One SPIM unit.
pub struct Spim {
    index: u8,
    regs: &'static SpimRegisters,
    irq: IrqNumber,
    priority: Priority,
    intc: &'static dyn InterruptController,
    gpio: &'static dyn GpioPort,
    state: StateCell<SpimState>,
    config: Mutex<Cell<Option<&'static SpimConfig>>>,
    in_flight: Mutex<RefCell<Option<InFlight>>>,
    done: Signal<CriticalSectionRawMutex, Completed>,
    claimed: AtomicBool,
}

impl Spim {
    /// Create the driver for `unit`.
    ///
    /// # Safety
    ///
    /// `unit.base` must address a SPIM register block valid for the rest of
    /// the program, and no other driver may use the same block.
    pub(crate) unsafe fn new(
        unit: &SpimUnit,
        intc: &'static dyn InterruptController,
        gpio: &'static dyn GpioPort,
    ) -> Self {
        Self {
            index: unit.index,
            regs: unsafe { SpimRegisters::from_base(unit.base) },
            irq: unit.irq,
            priority: unit.priority,
            intc,
            gpio,
            state: StateCell::new(SpimState::Uninit),
            config: Mutex::new(Cell::new(None)),
            in_flight: Mutex::new(RefCell::new(None)),
            done: Signal::new(),
            claimed: AtomicBool::new(false),
        }
    }

    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn state(&self) -> SpimState {
        self.state.load()
    }

    /// First call returns true; used by the device manager to hand out the
    /// instance once.
    pub(crate) fn claim(&self) -> bool {
        !self.claimed.swap(true, Ordering::AcqRel)
    }

    /// Reset transient state and register the interrupt handler.
    ///
    /// Touches no hardware register.
    pub(crate) fn prepare<const N: usize>(&'static self, registry: &mut InterruptRegistry<N>) {
        self.state.store(SpimState::Uninit);
        critical_section::with(|cs| {
            self.config.borrow(cs).set(None);
            self.in_flight.borrow_ref_mut(cs).take();
        });
        self.done.reset();
        registry.register(self.irq, self);
        debug!("SPIM{}: prepared on irq {}", self.index, self.irq);
    }

    /// Configure pins and the peripheral, then enable its interrupt.
    ///
    /// # Panics
    ///
    /// If the instance is already initialized.
    pub fn init(&self, config: &'static SpimConfig) {
        let state = self.state.load();
        assert!(
            state == SpimState::Uninit,
            "SPIM{}: init in state {:?}",
            self.index,
            state
        );

        let idle = if config.mode.cpol() {
            PinLevel::High
        } else {
            PinLevel::Low
        };
        self.gpio.configure_output(config.sck, idle);
        self.gpio.configure_output(config.mosi, PinLevel::Low);
        self.gpio.configure_input(config.miso, PullMode::None);
        self.gpio.configure_output(config.cs, PinLevel::High);

        let r = self.regs;
        r.psel_sck.write(config.sck.psel());
        r.psel_mosi.write(config.mosi.psel());
        r.psel_miso.write(config.miso.psel());
        r.frequency.write(config.frequency as u32);
        r.config.write(config.config_word());
        r.orc.write(config.orc as u32);

        r.txd.maxcnt.write(0);
        r.rxd.maxcnt.write(0);
        self.clear_events();
        r.events_stopped.clear();

        r.intenclr.write(u32::MAX);
        r.intenset.write(SpimInterrupts::END.bits());
        r.enable.write(ENABLE_ENABLED);

        critical_section::with(|cs| self.config.borrow(cs).set(Some(config)));
        self.intc.enable(self.irq, self.priority);
        self.state.store(SpimState::Ready);
        debug!(
            "SPIM{}: initialized ({:?}, {:?})",
            self.index, config.frequency, config.mode
        );
    }

    /// Assert chip select (drive CS low).
    pub fn select(&self) {
        let config = self.active_config("select");
        self.gpio.set_low(config.cs);
    }

    /// Release chip select (drive CS high).
    pub fn unselect(&self) {
        let config = self.active_config("unselect");
        self.gpio.set_high(config.cs);
    }

    /// Start a full-duplex transfer and return immediately.
    ///
    /// An empty `tx` or `rx` skips that direction. When `tx` is shorter than
    /// `rx` the ORC byte is clocked out for the remainder; surplus received
    /// bytes beyond `rx` are discarded by the hardware.
    ///
    /// # Panics
    ///
    /// If the instance is not `Ready` (or `Finish`, inside the completion
    /// callback), or a buffer exceeds the chip's DMA limit.
    pub fn exchange(&self, tx: &'static [u8], rx: &'static mut [u8]) {
        self.check_len("exchange", tx.len(), rx.len());

        if let Err(state) = self
            .state
            .transition(SpimState::Ready, SpimState::Busy)
            .or_else(|_| self.state.transition(SpimState::Finish, SpimState::Busy))
        {
            panic!("SPIM{}: exchange in state {:?}", self.index, state);
        }

        self.program(tx, rx);
        self.clear_events();
        self.regs.intenset.write(SpimInterrupts::END.bits());
        trace!(
            "SPIM{}: start tx {} rx {}",
            self.index,
            tx.len(),
            rx.len()
        );

        critical_section::with(|cs| {
            self.in_flight.borrow_ref_mut(cs).replace(InFlight { tx, rx });
        });
        self.regs.tasks_start.trigger();
    }

    /// Transmit only.
    pub fn send(&self, tx: &'static [u8]) {
        self.exchange(tx, Default::default());
    }

    /// Receive only; the ORC byte is clocked out for every received byte.
    pub fn receive(&self, rx: &'static mut [u8]) {
        self.exchange(Default::default(), rx);
    }

    /// Disable the peripheral and disconnect its pins.
    ///
    /// # Panics
    ///
    /// If the instance is not `Ready`.
    pub fn deinit(&self) {
        let state = self.state.load();
        assert!(
            state == SpimState::Ready,
            "SPIM{}: deinit in state {:?}",
            self.index,
            state
        );
        let config = self.active_config("deinit");

        let r = self.regs;
        r.intenclr.write(SpimInterrupts::END.bits());
        self.intc.disable(self.irq);
        r.enable.write(ENABLE_DISABLED);
        r.psel_sck.write(PSEL_DISCONNECTED);
        r.psel_mosi.write(PSEL_DISCONNECTED);
        r.psel_miso.write(PSEL_DISCONNECTED);
        for pin in [config.sck, config.mosi, config.miso, config.cs] {
            self.gpio.disconnect(pin);
        }

        critical_section::with(|cs| self.config.borrow(cs).set(None));
        self.state.store(SpimState::Uninit);
        debug!("SPIM{}: deinitialized", self.index);
    }

    /// Program the DMA buffers for a hardware-triggered transfer.
    ///
    /// Same descriptors as [`exchange`](Self::exchange), but END stays masked,
    /// START is not triggered and the state does not change. Pair with
    /// [`task_address`](Self::task_address) and
    /// [`event_address`](Self::event_address) on a PPI channel. Do not mix
    /// with interrupt-driven transfers on the same instance.
    ///
    /// The driver keeps the buffers until [`xfer_release`](Self::xfer_release)
    /// or the next `xfer_configure`, which returns the previous pair.
    ///
    /// # Panics
    ///
    /// If the instance is not `Ready`, or a buffer exceeds the DMA limit.
    pub fn xfer_configure(&self, tx: &'static [u8], rx: &'static mut [u8]) -> Option<Completed> {
        let state = self.state.load();
        assert!(
            state == SpimState::Ready,
            "SPIM{}: xfer_configure in state {:?}",
            self.index,
            state
        );
        self.check_len("xfer_configure", tx.len(), rx.len());

        let previous = self.take_parked();
        // No END handler runs to reset the descriptors in this mode
        self.regs.txd.maxcnt.write(0);
        self.regs.rxd.maxcnt.write(0);
        self.program(tx, rx);
        self.regs.intenclr.write(SpimInterrupts::END.bits());
        critical_section::with(|cs| {
            self.in_flight.borrow_ref_mut(cs).replace(InFlight { tx, rx });
        });
        previous
    }

    /// Hand back the buffers of [`xfer_configure`](Self::xfer_configure)
    /// with the byte counts of the last hardware-triggered transfer, and
    /// reset both descriptors.
    ///
    /// The PPI channel driving START must be disabled first.
    ///
    /// # Panics
    ///
    /// If the instance is not `Ready`.
    pub fn xfer_release(&self) -> Option<Completed> {
        let state = self.state.load();
        assert!(
            state == SpimState::Ready,
            "SPIM{}: xfer_release in state {:?}",
            self.index,
            state
        );
        let released = self.take_parked();
        self.regs.txd.maxcnt.write(0);
        self.regs.rxd.maxcnt.write(0);
        released
    }

    /// Address of the START task register.
    pub fn task_address(&self) -> usize {
        self.regs.tasks_start.addr()
    }

    /// Address of the END event register.
    pub fn event_address(&self) -> usize {
        self.regs.events_end.addr()
    }

    /// Wait for the next completed transfer.
    pub async fn wait(&self) -> Completed {
        self.done.wait().await
    }

    /// Take the last completed transfer, if one is pending.
    pub fn try_completed(&self) -> Option<Completed> {
        self.done.try_take()
    }

    fn active_config(&self, op: &str) -> &'static SpimConfig {
        let state = self.state.load();
        assert!(
            matches!(state, SpimState::Ready | SpimState::Finish),
            "SPIM{}: {} in state {:?}",
            self.index,
            op,
            state
        );
        match critical_section::with(|cs| self.config.borrow(cs).get()) {
            Some(config) => config,
            None => panic!("SPIM{}: {} without configuration", self.index, op),
        }
    }

    fn check_len(&self, op: &str, tx: usize, rx: usize) {
        assert!(
            tx <= MAX_TRANSFER_LEN && rx <= MAX_TRANSFER_LEN,
            "SPIM{}: {} of tx {} / rx {} bytes exceeds {}",
            self.index,
            op,
            tx,
            rx,
            MAX_TRANSFER_LEN
        );
    }

    fn program(&self, tx: &[u8], rx: &mut [u8]) {
        let r = self.regs;
        if !tx.is_empty() {
            r.txd.ptr.write(tx.as_ptr() as usize);
            r.txd.maxcnt.write(tx.len() as u32);
        }
        if !rx.is_empty() {
            r.rxd.ptr.write(rx.as_mut_ptr() as usize);
            r.rxd.maxcnt.write(rx.len() as u32);
        }
    }

    fn take_parked(&self) -> Option<Completed> {
        let parked = critical_section::with(|cs| self.in_flight.borrow_ref_mut(cs).take())?;
        Some(Completed {
            tx: parked.tx,
            rx: parked.rx,
            tx_amount: self.regs.txd.amount.read() as usize,
            rx_amount: self.regs.rxd.amount.read() as usize,
        })
    }

    fn clear_events(&self) {
        let r = self.regs;
        r.events_end.clear();
        r.events_endrx.clear();
        r.events_endtx.clear();
        r.events_started.clear();
    }
}

impl InterruptHandler for Spim {
    fn on_interrupt(&self) {
        let r = self.regs;
        if !r.events_end.is_set() {
            trace!("SPIM{}: spurious interrupt", self.index);
            return;
        }
        r.events_end.clear();
        // Not Busy when END came from a PPI-started transfer
        let _ = self.state.transition(SpimState::Busy, SpimState::Finish);

        let tx_amount = r.txd.amount.read() as usize;
        let rx_amount = r.rxd.amount.read() as usize;
        r.txd.maxcnt.write(0);
        r.rxd.maxcnt.write(0);

        let finished = critical_section::with(|cs| self.in_flight.borrow_ref_mut(cs).take());
        if let Some(InFlight { tx, rx }) = finished {
            self.done.signal(Completed {
                tx,
                rx,
                tx_amount,
                rx_amount,
            });
        }
        trace!(
            "SPIM{}: end tx {} rx {}",
            self.index, tx_amount, rx_amount
        );

        let callback = critical_section::with(|cs| self.config.borrow(cs).get())
            .and_then(|config| config.end_cb);
        if let Some(cb) = callback {
            cb(self);
        }

        // Fails when the callback chained another transfer
        let _ = self.state.transition(SpimState::Finish, SpimState::Ready);
    }
}
