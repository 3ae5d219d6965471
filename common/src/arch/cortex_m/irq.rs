use core::sync::atomic::{Ordering, compiler_fence};

use crate::sync::irq::IrqControl;

const PRIMASK_PM_BIT: u32 = 1 << 0;

pub struct CortexMIrq;

/// Interrupt masking for ARMv7-M cores through PRIMASK.
///
/// # State Management
/// The `State` type is `bool`: `true` when interrupts were enabled before
/// [`IrqControl::disable`] masked them.
///
/// # Assembly Details
///
/// - `mrs {0}, PRIMASK`: read the exception mask register
/// - `cpsid i`: set PRIMASK, masking all configurable-priority interrupts
/// - `cpsie i`: clear PRIMASK
impl IrqControl for CortexMIrq {
    type State = bool;

    #[inline(always)]
    fn disable() -> bool {
        let primask: u32;
        unsafe {
            core::arch::asm!(
                "mrs {0}, PRIMASK",
                "cpsid i",
                out(reg) primask,
                options(nomem, nostack, preserves_flags)
            );
        }
        // Keep memory accesses of the critical section after the mask.
        compiler_fence(Ordering::SeqCst);
        primask & PRIMASK_PM_BIT == 0
    }

    #[inline(always)]
    fn restore(prev_enabled: bool) {
        compiler_fence(Ordering::SeqCst);
        if prev_enabled {
            unsafe {
                core::arch::asm!("cpsie i", options(nomem, nostack, preserves_flags));
            }
        }
    }
}

#[cfg(feature = "critical-section-impl")]
mod critical_section_impl {
    use super::CortexMIrq;
    use crate::sync::irq::IrqControl;

    struct SingleCoreCriticalSection;
    critical_section::set_impl!(SingleCoreCriticalSection);

    unsafe impl critical_section::Impl for SingleCoreCriticalSection {
        unsafe fn acquire() -> critical_section::RawRestoreState {
            CortexMIrq::disable()
        }

        unsafe fn release(was_enabled: critical_section::RawRestoreState) {
            CortexMIrq::restore(was_enabled);
        }
    }
}
