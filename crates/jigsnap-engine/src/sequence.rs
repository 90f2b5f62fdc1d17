//! Insert sequences: the strategy that decides which edges get tabs.
//!
//! An [`InsertSequence`] is a counter paired with a generator. Each call
//! to [`next`](InsertSequence::next) produces the insert for the next
//! position along a row or column; the manufacturer asks for complements
//! to make neighbouring edges lock.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use jigsnap_core::Insert;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Maps a position in the sequence to an insert.
pub type Generator = Rc<dyn Fn(usize) -> Insert>;

/// A stateful stream of inserts.
#[derive(Clone)]
pub struct InsertSequence {
    generator: Generator,
    n: usize,
    previous: Option<Insert>,
    current: Option<Insert>,
}

impl fmt::Debug for InsertSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InsertSequence")
            .field("n", &self.n)
            .field("previous", &self.previous)
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl Default for InsertSequence {
    fn default() -> Self {
        Self::two_and_two()
    }
}

impl InsertSequence {
    /// A sequence driven by `generator`.
    pub fn new(generator: impl Fn(usize) -> Insert + 'static) -> Self {
        Self::from_shared(Rc::new(generator))
    }

    fn from_shared(generator: Generator) -> Self {
        Self {
            generator,
            n: 0,
            previous: None,
            current: None,
        }
    }

    // ── Generators ──────────────────────────────────────────────

    /// Always a tab.
    pub fn fixed() -> Self {
        Self::new(|_| Insert::Tab)
    }

    /// Tab, slot, tab, slot...
    pub fn flipflop() -> Self {
        Self::new(|n| if n % 2 == 0 { Insert::Tab } else { Insert::Slot })
    }

    /// Tab, tab, slot, slot...
    pub fn two_and_two() -> Self {
        Self::new(|n| if n % 4 < 2 { Insert::Tab } else { Insert::Slot })
    }

    /// Tabs and slots with equal odds.
    ///
    /// A seed makes the sequence reproducible; without one it is seeded
    /// from the thread-local generator. Copies made with `clone` share the generator state.
    pub fn random(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        let rng = RefCell::new(rng);
        Self::new(move |_| {
            if rng.borrow_mut().random::<bool>() {
                Insert::Tab
            } else {
                Insert::Slot
            }
        })
    }

    // ── Stepping ────────────────────────────────────────────────

    /// Advance and return the next insert.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Insert {
        let insert = (self.generator)(self.n);
        self.n += 1;
        self.previous = self.current;
        self.current = Some(insert);
        insert
    }

    /// The complement of the value before the latest one, or `None` if
    /// there is no such value.
    pub fn previous_complement(&self) -> Insert {
        self.previous.map_or(Insert::None, Insert::complement)
    }

    /// The latest value, or `None` once `max` values have been produced.
    ///
    /// The last piece of a row has no insert on its outer edge.
    pub fn current(&self, max: usize) -> Insert {
        if self.n == max {
            Insert::None
        } else {
            self.current.unwrap_or(Insert::None)
        }
    }

    /// Number of values produced so far.
    pub fn position(&self) -> usize {
        self.n
    }

    /// Rewind to the start, keeping the generator.
    pub fn restart(&mut self) {
        self.n = 0;
        self.previous = None;
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn take(sequence: &mut InsertSequence, n: usize) -> Vec<Insert> {
        (0..n).map(|_| sequence.next()).collect()
    }

    #[test]
    fn fixed_is_always_tab() {
        assert_eq!(take(&mut InsertSequence::fixed(), 3), vec![Insert::Tab; 3]);
    }

    #[test]
    fn flipflop_alternates() {
        use Insert::*;
        assert_eq!(take(&mut InsertSequence::flipflop(), 4), vec![Tab, Slot, Tab, Slot]);
    }

    #[test]
    fn two_and_two_pairs() {
        use Insert::*;
        assert_eq!(
            take(&mut InsertSequence::two_and_two(), 6),
            vec![Tab, Tab, Slot, Slot, Tab, Tab]
        );
    }

    #[test]
    fn previous_complement_lags_one_step() {
        let mut sequence = InsertSequence::flipflop();
        assert_eq!(sequence.previous_complement(), Insert::None);
        sequence.next();
        assert_eq!(sequence.previous_complement(), Insert::None);
        sequence.next();
        // previous = Tab
        assert_eq!(sequence.previous_complement(), Insert::Slot);
        sequence.next();
        assert_eq!(sequence.previous_complement(), Insert::Tab);
    }

    #[test]
    fn current_is_none_at_the_end() {
        let mut sequence = InsertSequence::fixed();
        assert_eq!(sequence.current(2), Insert::None);
        sequence.next();
        assert_eq!(sequence.current(2), Insert::Tab);
        sequence.next();
        assert_eq!(sequence.current(2), Insert::None);
    }

    #[test]
    fn restart_rewinds() {
        let mut sequence = InsertSequence::flipflop();
        take(&mut sequence, 3);
        sequence.restart();
        assert_eq!(sequence.position(), 0);
        assert_eq!(sequence.next(), Insert::Tab);
    }

    #[test]
    fn seeded_random_is_reproducible() {
        let a = take(&mut InsertSequence::random(Some(7)), 32);
        let b = take(&mut InsertSequence::random(Some(7)), 32);
        assert_eq!(a, b);
        assert!(a.iter().all(|i| !i.is_none()));
    }
}
