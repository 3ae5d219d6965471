//! SPI bus parameters shared by SPI master drivers.

/// Clock polarity / phase combination.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
    /// CPOL = 0, CPHA = 0.
    Mode0,
    /// CPOL = 0, CPHA = 1.
    Mode1,
    /// CPOL = 1, CPHA = 0.
    Mode2,
    /// CPOL = 1, CPHA = 1.
    Mode3,
}

impl Mode {
    /// Clock idles high.
    pub const fn cpol(self) -> bool {
        matches!(self, Mode::Mode2 | Mode::Mode3)
    }

    /// Data sampled on the trailing clock edge.
    pub const fn cpha(self) -> bool {
        matches!(self, Mode::Mode1 | Mode::Mode3)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BitOrder {
    MsbFirst,
    LsbFirst,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_polarity_and_phase() {
        assert!(!Mode::Mode0.cpol() && !Mode::Mode0.cpha());
        assert!(!Mode::Mode1.cpol() && Mode::Mode1.cpha());
        assert!(Mode::Mode2.cpol() && !Mode::Mode2.cpha());
        assert!(Mode::Mode3.cpol() && Mode::Mode3.cpha());
    }
}
