pub mod irq;
pub use irq::IrqControl;
pub mod state_cell;
pub use state_cell::{AtomicState, StateCell};
