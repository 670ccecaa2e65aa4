//! # Payment State
//!
//! The settlement currently open in the payment dialog. At most one is open
//! at a time; opening a new one replaces it.

use std::sync::{Mutex, PoisonError};
use tableside_core::Settlement;

#[derive(Debug, Default)]
pub struct PaymentState {
    current: Mutex<Option<Settlement>>,
}

impl PaymentState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with the open settlement slot.
    pub fn with_payment_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Option<Settlement>) -> R,
    {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut current)
    }

    /// Closes the dialog. Returns whether a settlement was open.
    pub fn close(&self) -> bool {
        self.with_payment_mut(|current| current.take().is_some())
    }

    pub fn is_open(&self) -> bool {
        self.with_payment_mut(|current| current.is_some())
    }
}
