#![forbid(unsafe_code)]

//! Step sequencer state machine.
//!
//! # State Machine
//!
//! ```text
//!            start()                 next() [i+1 < N]
//! ┌────────┐ ───────▶ ┌───────────┐ ─────────────────┐
//! │ Closed │          │ Active(i) │ ◀────────────────┘
//! └────────┘ ◀─────── └───────────┘   previous() [i > 0]
//!      ▲   escape()/close()   │
//!      └──────────────────────┘ next() [i+1 == N]
//! ```
//!
//! # Invariants
//!
//! 1. `Active(i)` implies `0 <= i < N`; there is no out-of-range active state.
//! 2. `previous()` at index 0 and every navigation while `Closed` are no-ops.
//! 3. `next()` on the last step closes the tour.
//! 4. With `N == 0` the sequencer never leaves `Closed`.

/// Where the tour currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TourState {
    #[default]
    Closed,
    Active(usize),
}

/// Result of a sequencer operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A step became current and must be rendered.
    Entered(usize),
    /// The tour closed; `from` was the last shown step.
    Closed { from: usize },
    /// Nothing changed.
    Unchanged,
}

#[derive(Debug, Clone)]
pub struct Sequencer {
    len: usize,
    state: TourState,
}

impl Sequencer {
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Self {
            len,
            state: TourState::Closed,
        }
    }

    /// Number of steps.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub const fn state(&self) -> TourState {
        self.state
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.state, TourState::Active(_))
    }

    /// Current step index while active.
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        match self.state {
            TourState::Active(i) => Some(i),
            TourState::Closed => None,
        }
    }

    /// Enter step 0. Restarts from the beginning when already active.
    pub fn start(&mut self) -> Transition {
        if self.len == 0 {
            return Transition::Unchanged;
        }
        self.state = TourState::Active(0);
        Transition::Entered(0)
    }

    pub fn next(&mut self) -> Transition {
        match self.state {
            TourState::Closed => Transition::Unchanged,
            TourState::Active(i) if i + 1 >= self.len => self.close(),
            TourState::Active(i) => {
                self.state = TourState::Active(i + 1);
                Transition::Entered(i + 1)
            }
        }
    }

    pub fn previous(&mut self) -> Transition {
        match self.state {
            TourState::Active(i) if i > 0 => {
                self.state = TourState::Active(i - 1);
                Transition::Entered(i - 1)
            }
            _ => Transition::Unchanged,
        }
    }

    /// Close immediately. Escape, finish, and the close button all land here.
    pub fn close(&mut self) -> Transition {
        match self.state {
            TourState::Closed => Transition::Unchanged,
            TourState::Active(from) => {
                self.state = TourState::Closed;
                Transition::Closed { from }
            }
        }
    }

    /// Jump straight to `index`, or `None` if it is out of range.
    pub fn jump_to(&mut self, index: usize) -> Option<Transition> {
        if index >= self.len {
            return None;
        }
        self.state = TourState::Active(index);
        Some(Transition::Entered(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_enters_first_step() {
        let mut seq = Sequencer::new(3);
        assert_eq!(seq.state(), TourState::Closed);
        assert_eq!(seq.start(), Transition::Entered(0));
        assert_eq!(seq.index(), Some(0));
        assert!(seq.is_active());
    }

    #[test]
    fn start_with_no_steps_stays_closed() {
        let mut seq = Sequencer::new(0);
        assert!(seq.is_empty());
        assert_eq!(seq.start(), Transition::Unchanged);
        assert!(!seq.is_active());
    }

    #[test]
    fn start_while_active_restarts() {
        let mut seq = Sequencer::new(3);
        seq.start();
        seq.next();
        assert_eq!(seq.start(), Transition::Entered(0));
    }

    #[test]
    fn next_walks_then_closes() {
        let mut seq = Sequencer::new(2);
        seq.start();
        assert_eq!(seq.next(), Transition::Entered(1));
        assert_eq!(seq.next(), Transition::Closed { from: 1 });
        assert_eq!(seq.state(), TourState::Closed);
        assert_eq!(seq.next(), Transition::Unchanged);
    }

    #[test]
    fn previous_at_zero_is_noop() {
        let mut seq = Sequencer::new(3);
        seq.start();
        assert_eq!(seq.previous(), Transition::Unchanged);
        assert_eq!(seq.index(), Some(0));
    }

    #[test]
    fn previous_steps_back() {
        let mut seq = Sequencer::new(3);
        seq.start();
        seq.next();
        seq.next();
        assert_eq!(seq.previous(), Transition::Entered(1));
    }

    #[test]
    fn close_from_any_step() {
        let mut seq = Sequencer::new(3);
        seq.start();
        seq.next();
        assert_eq!(seq.close(), Transition::Closed { from: 1 });
        assert_eq!(seq.close(), Transition::Unchanged);
        assert_eq!(seq.previous(), Transition::Unchanged);
    }

    #[test]
    fn jump_rejects_out_of_range() {
        let mut seq = Sequencer::new(2);
        assert_eq!(seq.jump_to(1), Some(Transition::Entered(1)));
        assert_eq!(seq.jump_to(2), None);
        assert_eq!(seq.index(), Some(1));
    }
}
