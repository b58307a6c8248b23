#![forbid(unsafe_code)]

//! Late-bound route from DOM callbacks back to the lens.
//!
//! Callbacks never hold the lens strongly; they upgrade a weak handle and
//! borrow it for the duration of one entry point. A callback that fires while
//! the lens is already borrowed is either dropped ([`Dispatcher::dispatch`])
//! or queued and run right after the current borrow ends
//! ([`Dispatcher::dispatch_or_defer`]). Work whose loss would wedge the
//! engine, such as a scheduled frame, must use the latter.

use std::cell::{OnceCell, RefCell};
use std::rc::{Rc, Weak};

use tracing::warn;

type Deferred<T> = Box<dyn FnOnce(&mut T)>;

/// Shared, weakly held route to one target.
pub struct Dispatcher<T> {
    target: Rc<OnceCell<Weak<RefCell<T>>>>,
    deferred: Rc<RefCell<Vec<Deferred<T>>>>,
}

impl<T> Clone for Dispatcher<T> {
    fn clone(&self) -> Self {
        Self {
            target: Rc::clone(&self.target),
            deferred: Rc::clone(&self.deferred),
        }
    }
}

impl<T> Default for Dispatcher<T> {
    fn default() -> Self {
        Self {
            target: Rc::new(OnceCell::new()),
            deferred: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl<T> Dispatcher<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&self, target: &Rc<RefCell<T>>) {
        if self.target.set(Rc::downgrade(target)).is_err() {
            warn!("dispatcher already bound");
        }
    }

    /// Run `f` against the target. `None` when it is gone or busy.
    pub fn dispatch<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let shared = self.target.get()?.upgrade()?;
        let Ok(mut target) = shared.try_borrow_mut() else {
            warn!("lens busy; dropping DOM callback");
            return None;
        };
        let result = f(&mut *target);
        self.drain(&mut *target);
        Some(result)
    }

    /// Run `f` now, or right after the borrow currently holding the target
    /// ends.
    pub fn dispatch_or_defer(&self, f: impl FnOnce(&mut T) + 'static) {
        let Some(shared) = self.target.get().and_then(Weak::upgrade) else {
            return;
        };
        match shared.try_borrow_mut() {
            Ok(mut target) => {
                f(&mut *target);
                self.drain(&mut *target);
            }
            Err(_) => self.deferred.borrow_mut().push(Box::new(f)),
        }
    }

    #[must_use]
    pub fn deferred_len(&self) -> usize {
        self.deferred.borrow().len()
    }

    fn drain(&self, target: &mut T) {
        loop {
            let batch = std::mem::take(&mut *self.deferred.borrow_mut());
            if batch.is_empty() {
                return;
            }
            for job in batch {
                job(&mut *target);
            }
        }
    }
}
