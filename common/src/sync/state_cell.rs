use core::marker::PhantomData;
use core::sync::atomic::{AtomicU8, Ordering};

/// A state enum that can live inside a [`StateCell`].
///
/// Implement it with [`atomic_state!`](crate::atomic_state) rather than by hand.
pub trait AtomicState: Copy + Eq + core::fmt::Debug {
    /// Raw discriminant stored in the cell.
    fn into_raw(self) -> u8;

    /// Rebuild the state from a discriminant previously produced by
    /// [`AtomicState::into_raw`].
    fn from_raw(raw: u8) -> Self;
}

/// Interrupt-safe state cell shared between normal and interrupt context.
///
/// Concurrency contract:
///
/// - [`load`](Self::load) is `Acquire`: everything the other context wrote
///   before publishing the observed state is visible afterwards.
/// - [`store`](Self::store) is `Release`: everything written before the store
///   is visible to whoever observes the new state.
/// - [`transition`](Self::transition) is a single compare-exchange
///   (`AcqRel` on success, `Acquire` on failure), so two contexts racing on the
///   same edge cannot both win.
///
/// Requires a target with byte-sized compare-and-swap (Cortex-M3 and up).
pub struct StateCell<S: AtomicState> {
    raw: AtomicU8,
    _state: PhantomData<S>,
}

impl<S: AtomicState> StateCell<S> {
    /// Create a cell holding `initial`.
    pub fn new(initial: S) -> Self {
        Self {
            raw: AtomicU8::new(initial.into_raw()),
            _state: PhantomData,
        }
    }

    /// Current state.
    #[inline]
    pub fn load(&self) -> S {
        S::from_raw(self.raw.load(Ordering::Acquire))
    }

    /// Unconditionally publish `state`.
    #[inline]
    pub fn store(&self, state: S) {
        self.raw.store(state.into_raw(), Ordering::Release);
    }

    /// Move from `from` to `to`.
    ///
    /// Returns the state actually found when the cell did not hold `from`.
    #[inline]
    pub fn transition(&self, from: S, to: S) -> Result<(), S> {
        self.raw
            .compare_exchange(
                from.into_raw(),
                to.into_raw(),
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .map(|_| ())
            .map_err(S::from_raw)
    }
}

impl<S: AtomicState> core::fmt::Debug for StateCell<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("StateCell").field(&self.load()).finish()
    }
}

/// Declare a `#[repr(u8)]` state enum usable with [`StateCell`].
///
/// ```
/// periph_common::atomic_state! {
///     pub enum Light {
///         Off = 0,
///         On = 1,
///     }
/// }
/// ```
#[macro_export]
macro_rules! atomic_state {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $value:expr),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq)]
        #[repr(u8)]
        $vis enum $name {
            $($(#[$vmeta])* $variant = $value),+
        }

        impl $crate::sync::AtomicState for $name {
            #[inline]
            fn into_raw(self) -> u8 {
                self as u8
            }

            #[inline]
            fn from_raw(raw: u8) -> Self {
                $(
                    if raw == $name::$variant as u8 {
                        return $name::$variant;
                    }
                )+
                unreachable!("invalid {} discriminant {}", stringify!($name), raw)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::atomic_state! {
        enum Door {
            Closed = 0,
            Open = 1,
            Locked = 7,
        }
    }

    #[test]
    fn new_cell_holds_initial_state() {
        let cell = StateCell::new(Door::Locked);
        assert_eq!(cell.load(), Door::Locked);
    }

    #[test]
    fn store_overwrites_state() {
        let cell = StateCell::new(Door::Closed);
        cell.store(Door::Open);
        assert_eq!(cell.load(), Door::Open);
    }

    #[test]
    fn transition_succeeds_from_expected_state() {
        let cell = StateCell::new(Door::Closed);
        assert_eq!(cell.transition(Door::Closed, Door::Open), Ok(()));
        assert_eq!(cell.load(), Door::Open);
    }

    #[test]
    fn transition_reports_actual_state_on_mismatch() {
        let cell = StateCell::new(Door::Locked);
        assert_eq!(cell.transition(Door::Closed, Door::Open), Err(Door::Locked));
        // Failed transition leaves the cell untouched
        assert_eq!(cell.load(), Door::Locked);
    }

    #[test]
    fn non_contiguous_discriminants_round_trip() {
        assert_eq!(Door::from_raw(Door::Locked.into_raw()), Door::Locked);
        assert_eq!(Door::Locked.into_raw(), 7);
    }

    #[test]
    fn racing_transitions_have_one_winner() {
        let cell = std::sync::Arc::new(StateCell::new(Door::Closed));
        let handles: std::vec::Vec<_> = (0..8)
            .map(|_| {
                let cell = cell.clone();
                std::thread::spawn(move || cell.transition(Door::Closed, Door::Open).is_ok())
            })
            .collect();
        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(winners, 1);
    }
}
