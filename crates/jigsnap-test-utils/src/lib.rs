//! Test utilities for jigsnap development.
//!
//! Provides the standard puzzles used across the test suites
//! ([`fixtures`]), listeners that record what they observe
//! ([`EventLog`]), and a one-call tracing setup ([`init_tracing`]).

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::cell::RefCell;
use std::rc::Rc;

use jigsnap_engine::{Piece, PieceId};

/// Install a `fmt` subscriber that writes through the test harness.
///
/// Honours `RUST_LOG`. Safe to call from every test; only the first call
/// installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn slot_of(piece: &Piece) -> Option<PieceId> {
    piece.slot()
}

/// Shared, append-only record of listener invocations.
///
/// Clones share the same storage, so a clone can be moved into a listener
/// while the test keeps another handle for assertions.
#[derive(Debug)]
pub struct EventLog<T> {
    events: Rc<RefCell<Vec<T>>>,
}

impl<T> Clone for EventLog<T> {
    fn clone(&self) -> Self {
        Self {
            events: Rc::clone(&self.events),
        }
    }
}

impl<T> Default for EventLog<T> {
    fn default() -> Self {
        Self {
            events: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl<T: Clone> EventLog<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: T) {
        self.events.borrow_mut().push(event);
    }

    /// Snapshot of everything recorded so far.
    pub fn events(&self) -> Vec<T> {
        self.events.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

/// Translation events as `(piece, dx, dy)`.
pub type TranslationLog = EventLog<(Option<PieceId>, f64, f64)>;

/// Connection or disconnection events as `(piece, neighbour)`.
pub type ConnectionLog = EventLog<(Option<PieceId>, Option<PieceId>)>;

impl TranslationLog {
    /// A listener suitable for [`Piece::on_translate`].
    pub fn recorder(&self) -> impl FnMut(&Piece, f64, f64) + 'static {
        let log = self.clone();
        move |piece, dx, dy| log.push((slot_of(piece), dx, dy))
    }
}

impl ConnectionLog {
    /// A listener suitable for [`Piece::on_connect`] and
    /// [`Piece::on_disconnect`].
    pub fn recorder(&self) -> impl FnMut(&Piece, &Piece) + 'static {
        let log = self.clone();
        move |piece, other| log.push((slot_of(piece), slot_of(other)))
    }
}

/// Counts calls, e.g. of a validity listener.
#[derive(Clone, Debug, Default)]
pub struct CallCounter {
    calls: Rc<RefCell<usize>>,
}

impl CallCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hit(&self) {
        *self.calls.borrow_mut() += 1;
    }

    pub fn count(&self) -> usize {
        *self.calls.borrow()
    }
}
