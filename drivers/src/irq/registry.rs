use core::fmt;

use log::debug;

use crate::hal::interrupt::{InterruptHandler, IrqNumber};

/// Fixed-size table of interrupt handlers, one slot per line.
pub struct InterruptRegistry<const N: usize> {
    entries: [Option<&'static dyn InterruptHandler>; N],
}

impl<const N: usize> InterruptRegistry<N> {
    pub const fn new() -> Self {
        Self { entries: [None; N] }
    }

    fn slot(irq: IrqNumber) -> usize {
        let index = irq as usize;
        assert!(index < N, "irq registry: irq {} out of range ({} lines)", irq, N);
        index
    }

    /// Make `handler` the owner of `irq`.
    ///
    /// Registering the same handler twice is a no-op. Does not touch the
    /// interrupt controller.
    ///
    /// # Panics
    ///
    /// If `irq` is out of range or already owned by another handler.
    pub fn register(&mut self, irq: IrqNumber, handler: &'static dyn InterruptHandler) {
        let slot = &mut self.entries[Self::slot(irq)];
        if let Some(owner) = *slot {
            assert!(
                core::ptr::addr_eq(owner, handler),
                "irq registry: irq {} already has a handler",
                irq
            );
            return;
        }
        *slot = Some(handler);
        debug!("irq registry: registered irq {}", irq);
    }

    /// Run the handler that owns `irq`.
    ///
    /// # Panics
    ///
    /// If no handler is registered for `irq`.
    pub fn dispatch(&self, irq: IrqNumber) {
        match self.entries[Self::slot(irq)] {
            Some(handler) => handler.on_interrupt(),
            None => panic!("irq registry: no handler for irq {}", irq),
        }
    }

    pub fn is_registered(&self, irq: IrqNumber) -> bool {
        self.handler(irq).is_some()
    }

    pub fn handler(&self, irq: IrqNumber) -> Option<&'static dyn InterruptHandler> {
        self.entries.get(irq as usize).copied().flatten()
    }

    /// Number of registered lines.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registered lines in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (IrqNumber, &'static dyn InterruptHandler)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(irq, entry)| entry.map(|h| (irq as IrqNumber, h)))
    }
}

impl<const N: usize> Default for InterruptRegistry<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Debug for InterruptRegistry<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter().map(|(irq, _)| irq)).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicUsize, Ordering};

    struct Counter(AtomicUsize);

    impl InterruptHandler for Counter {
        fn on_interrupt(&self) {
            self.0.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn counter() -> &'static Counter {
        Box::leak(Box::new(Counter(AtomicUsize::new(0))))
    }

    #[test]
    fn dispatch_reaches_registered_handler_only() {
        let a = counter();
        let b = counter();
        let mut registry = InterruptRegistry::<8>::new();
        registry.register(3, a);
        registry.register(5, b);

        registry.dispatch(3);
        registry.dispatch(3);
        registry.dispatch(5);

        assert_eq!(a.0.load(Ordering::Relaxed), 2);
        assert_eq!(b.0.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn same_handler_twice_is_noop() {
        let a = counter();
        let mut registry = InterruptRegistry::<4>::new();
        registry.register(1, a);
        registry.register(1, a);
        assert_eq!(registry.len(), 1);
        registry.dispatch(1);
        assert_eq!(a.0.load(Ordering::Relaxed), 1);
    }

    #[test]
    #[should_panic(expected = "already has a handler")]
    fn second_owner_rejected() {
        let mut registry = InterruptRegistry::<4>::new();
        registry.register(2, counter());
        registry.register(2, counter());
    }

    #[test]
    #[should_panic(expected = "no handler for irq 0")]
    fn dispatch_without_handler_panics() {
        InterruptRegistry::<4>::new().dispatch(0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn register_checks_bounds() {
        InterruptRegistry::<4>::new().register(4, counter());
    }

    #[test]
    fn inspection_reports_registered_lines() {
        let mut registry = InterruptRegistry::<16>::new();
        assert!(registry.is_empty());
        registry.register(11, counter());
        registry.register(0, counter());

        assert!(registry.is_registered(11));
        assert!(!registry.is_registered(12));
        assert!(!registry.is_registered(99));
        let lines: Vec<_> = registry.iter().map(|(irq, _)| irq).collect();
        assert_eq!(lines, [0, 11]);
        assert_eq!(format!("{:?}", registry), "[0, 11]");
    }
}
