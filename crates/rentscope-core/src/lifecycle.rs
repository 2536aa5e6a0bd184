use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use rentscope_types::RequestUiState;

/// Whether a controller disables its trigger while a request is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusyLock {
    Enabled,
    Disabled,
}

impl From<bool> for BusyLock {
    fn from(enabled: bool) -> Self {
        if enabled {
            BusyLock::Enabled
        } else {
            BusyLock::Disabled
        }
    }
}

/// What happened to one click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// The lifecycle ran to settlement and left the controller in this state
    Completed(RequestUiState),
    /// The trigger was disabled; nothing happened
    Ignored,
}

/// Cooperative single-flight latch standing in for a disabled button.
///
/// There is no request identity behind it: whoever holds the latch owns the
/// trigger until the guard drops.
#[derive(Debug)]
pub(crate) struct TriggerLock {
    mode: BusyLock,
    engaged: Arc<AtomicBool>,
}

impl TriggerLock {
    pub(crate) fn new(mode: BusyLock) -> Self {
        Self {
            mode,
            engaged: Arc::new(AtomicBool::new(false)),
        }
    }

    pub(crate) fn mode(&self) -> BusyLock {
        self.mode
    }

    /// `None` when locking is enabled and another request holds the trigger
    pub(crate) fn try_engage(&self) -> Option<Engaged> {
        match self.mode {
            BusyLock::Disabled => Some(Engaged { flag: None }),
            BusyLock::Enabled => self
                .engaged
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .ok()
                .map(|_| Engaged {
                    flag: Some(self.engaged.clone()),
                }),
        }
    }

    pub(crate) fn is_engaged(&self) -> bool {
        self.engaged.load(Ordering::Acquire)
    }
}

/// Held for the lifetime of one accepted trigger
pub(crate) struct Engaged {
    flag: Option<Arc<AtomicBool>>,
}

impl Drop for Engaged {
    fn drop(&mut self) {
        if let Some(flag) = &self.flag {
            flag.store(false, Ordering::Release);
        }
    }
}

/// Runs its closure exactly once when dropped, including during unwinding
pub(crate) struct OnDrop<F: FnOnce()>(Option<F>);

impl<F: FnOnce()> OnDrop<F> {
    pub(crate) fn new(f: F) -> Self {
        Self(Some(f))
    }
}

impl<F: FnOnce()> Drop for OnDrop<F> {
    fn drop(&mut self) {
        if let Some(f) = self.0.take() {
            f();
        }
    }
}

type Cleanup = OnDrop<Box<dyn FnOnce() + Send>>;

/// An accepted click.
///
/// Taken synchronously when the click lands, so a second click in the same
/// turn already sees the trigger disabled. Dropping the claim, whether after
/// settlement, on panic, or without ever running it, runs the controller's
/// cleanup once and then frees the trigger.
#[must_use = "dropping a claim releases the trigger immediately"]
pub struct Claim {
    cleanup: Option<Cleanup>,
    _engaged: Engaged,
}

impl Claim {
    pub(crate) fn new(engaged: Engaged) -> Self {
        Self {
            cleanup: None,
            _engaged: engaged,
        }
    }

    pub(crate) fn with_cleanup(engaged: Engaged, cleanup: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cleanup: Some(OnDrop::new(Box::new(cleanup))),
            _engaged: engaged,
        }
    }
}

/// Last visible lifecycle state of a controller
#[derive(Debug, Default)]
pub(crate) struct StateCell(Mutex<RequestUiState>);

impl StateCell {
    pub(crate) fn get(&self) -> RequestUiState {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn set(&self, state: RequestUiState) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }
}
