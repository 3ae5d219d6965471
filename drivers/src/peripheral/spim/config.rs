//! SPIM instance configuration.

use super::Spim;
use crate::hal::gpio::Pin;
use crate::hal::spi::{BitOrder, Mode};
use crate::hw::nrf52::spim::{CONFIG_CPHA_TRAILING, CONFIG_CPOL_ACTIVE_LOW, CONFIG_ORDER_LSB_FIRST};

/// Called from interrupt context when a transfer completes.
///
/// The driver is in [`SpimState::Finish`](super::SpimState::Finish) for the
/// duration of the call, so the callback may start the next transfer.
pub type SpimCallback = fn(&Spim);

/// SCK frequency, encoded as the FREQUENCY register value.
#[repr(u32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Frequency {
    K125 = 0x0200_0000,
    K250 = 0x0400_0000,
    K500 = 0x0800_0000,
    M1 = 0x1000_0000,
    M2 = 0x2000_0000,
    M4 = 0x4000_0000,
    M8 = 0x8000_0000,
}

/// Per-instance settings handed to [`Spim::init`].
///
/// Built once, usually as a `static`:
///
/// ```rust,ignore
/// static DISPLAY: SpimConfig = SpimConfig::new(SCK, CS, MISO, MOSI)
///     .with_frequency(Frequency::M8)
///     .with_callback(on_display_done);
/// ```
#[derive(Debug, Copy, Clone)]
pub struct SpimConfig {
    pub end_cb: Option<SpimCallback>,
    pub sck: Pin,
    pub cs: Pin,
    pub miso: Pin,
    pub mosi: Pin,
    pub frequency: Frequency,
    pub mode: Mode,
    pub bit_order: BitOrder,
    /// Overrun character, clocked out once the TX buffer is exhausted.
    pub orc: u8,
}

impl SpimConfig {
    /// 4 MHz, mode 0, MSB first, ORC 0xFF, no callback.
    pub const fn new(sck: Pin, cs: Pin, miso: Pin, mosi: Pin) -> Self {
        Self {
            end_cb: None,
            sck,
            cs,
            miso,
            mosi,
            frequency: Frequency::M4,
            mode: Mode::Mode0,
            bit_order: BitOrder::MsbFirst,
            orc: 0xFF,
        }
    }

    pub const fn with_callback(mut self, cb: SpimCallback) -> Self {
        self.end_cb = Some(cb);
        self
    }

    pub const fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    pub const fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub const fn with_bit_order(mut self, bit_order: BitOrder) -> Self {
        self.bit_order = bit_order;
        self
    }

    pub const fn with_orc(mut self, orc: u8) -> Self {
        self.orc = orc;
        self
    }

    /// CONFIG register value.
    pub(crate) const fn config_word(&self) -> u32 {
        let mut word = 0;
        if matches!(self.bit_order, BitOrder::LsbFirst) {
            word |= CONFIG_ORDER_LSB_FIRST;
        }
        if self.mode.cpha() {
            word |= CONFIG_CPHA_TRAILING;
        }
        if self.mode.cpol() {
            word |= CONFIG_CPOL_ACTIVE_LOW;
        }
        word
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: SpimConfig = SpimConfig::new(
        Pin::new(0, 1),
        Pin::new(0, 2),
        Pin::new(0, 3),
        Pin::new(0, 4),
    );

    #[test]
    fn defaults() {
        assert!(BASE.end_cb.is_none());
        assert_eq!(BASE.frequency, Frequency::M4);
        assert_eq!(BASE.orc, 0xFF);
        assert_eq!(BASE.config_word(), 0);
    }

    #[test]
    fn config_word_encodes_order_and_mode() {
        let lsb = BASE.with_bit_order(BitOrder::LsbFirst);
        assert_eq!(lsb.config_word(), 0b001);
        assert_eq!(BASE.with_mode(Mode::Mode1).config_word(), 0b010);
        assert_eq!(BASE.with_mode(Mode::Mode2).config_word(), 0b100);
        assert_eq!(lsb.with_mode(Mode::Mode3).config_word(), 0b111);
    }

    #[test]
    fn frequency_register_values() {
        assert_eq!(Frequency::K125 as u32, 0x0200_0000);
        assert_eq!(Frequency::M8 as u32, 0x8000_0000);
    }
}
