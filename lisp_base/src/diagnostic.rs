//! A module for handling diagnostics in the interpreter.
//!
//! The [`Handler`] trait is the single capability that every phase receives to report errors
//! and debug messages. Phases never print on their own; the caller decides whether the messages
//! are collected, counted, printed or thrown away.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex, MutexGuard,
};

/// Represents a trait responsible for handling diagnostics in the interpreter.
pub trait Handler<T> {
    /// Receives a diagnostic and handles it.
    fn receive(&self, diagnostic: T);

    /// Returns `false` if every diagnostic is thrown away, so that the sender can skip building
    /// it.
    fn is_enabled(&self) -> bool { true }
}

impl<T, H: Handler<T> + ?Sized> Handler<T> for &H {
    fn receive(&self, diagnostic: T) { (**self).receive(diagnostic); }

    fn is_enabled(&self) -> bool { (**self).is_enabled() }
}

/// Is a struct that implements [`Handler`] trait by storing all diagnostics in a vector.
#[derive(Debug)]
pub struct Storage<T> {
    diagnostics: Mutex<Vec<T>>,
}

impl<T> Storage<T> {
    /// Creates a new empty [`Storage`]
    #[must_use]
    pub fn new() -> Self {
        Self {
            diagnostics: Mutex::new(Vec::new()),
        }
    }

    /// Consumes the [`Storage`] and returns the underlying vector of diagnostics.
    pub fn into_vec(self) -> Vec<T> { self.diagnostics.into_inner().unwrap() }

    /// Returns a guard to the underlying vector of diagnostics.
    pub fn as_vec(&self) -> MutexGuard<Vec<T>> { self.diagnostics.lock().unwrap() }

    /// Removes and returns every diagnostic received so far.
    pub fn take(&self) -> Vec<T> { std::mem::take(&mut *self.as_vec()) }

    /// Returns the number of stored diagnostics.
    pub fn len(&self) -> usize { self.as_vec().len() }

    /// Returns `true` if no diagnostic has been received.
    pub fn is_empty(&self) -> bool { self.as_vec().is_empty() }
}

impl<T> Default for Storage<T> {
    fn default() -> Self { Self::new() }
}

impl<T, U> Handler<U> for Storage<T>
where
    U: Into<T>,
{
    fn receive(&self, diagnostic: U) { self.as_vec().push(diagnostic.into()); }
}

/// Is a struct that implements [`Handler`] trait by doing nothing with the diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Dummy;

impl<T> Handler<T> for Dummy {
    fn receive(&self, _diagnostic: T) {}

    fn is_enabled(&self) -> bool { false }
}

/// Is a struct that implements [`Handler`] trait by counting the number of diagnostics received.
#[derive(Debug, Default)]
pub struct Counter {
    counter: AtomicUsize,
}

impl Counter {
    /// Returns the number of diagnostics received.
    #[must_use]
    pub fn count(&self) -> usize { self.counter.load(Ordering::Relaxed) }

    /// Resets the counter to zero.
    pub fn reset(&self) { self.counter.store(0, Ordering::Relaxed); }
}

impl<T> Handler<T> for Counter {
    fn receive(&self, _diagnostic: T) { self.counter.fetch_add(1, Ordering::Relaxed); }
}
