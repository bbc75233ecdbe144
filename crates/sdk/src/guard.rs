use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Mutual-exclusion flag for operations that call out to the value ledger.
///
/// Clones share the flag, so a collaborator holding a clone observes the
/// engine's guarded section.
#[derive(Debug, Clone, Default)]
pub struct ReentrancyGuard(Arc<AtomicBool>);

/// A held [`ReentrancyGuard`]. Released on drop.
#[derive(Debug)]
#[must_use = "the guard is released as soon as this is dropped"]
pub struct Entered(Arc<AtomicBool>);

impl ReentrancyGuard {
    /// Enter the guarded section.
    ///
    /// # Errors
    /// Returns [`Reentrancy`](arena_model::Error::Reentrancy) if it is already held.
    pub fn enter(&self) -> arena_model::Result<Entered> {
        self.0
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .map_err(|_| arena_model::Error::Reentrancy)?;
        Ok(Entered(self.0.clone()))
    }

    /// Returns whether the guarded section is held.
    pub fn is_entered(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl Drop for Entered {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
