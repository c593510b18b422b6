use std::cell::RefCell;
use std::rc::Rc;

/// Run-once cleanup handle. Hosts return one from
/// [`TimerHost::start_repeating`](crate::TimerHost::start_repeating) to cancel
/// the timer they started.
#[derive(Clone)]
pub struct Dispose(Rc<RefCell<Option<Box<dyn FnOnce()>>>>);

impl Dispose {
    pub fn new(f: impl FnOnce() + 'static) -> Self {
        Self(Rc::new(RefCell::new(Some(Box::new(f)))))
    }

    /// Runs at most once (safe to call multiple times).
    pub fn run(&self) {
        let f = self.0.borrow_mut().take();
        if let Some(f) = f {
            f()
        }
    }

    pub fn is_spent(&self) -> bool {
        self.0.borrow().is_none()
    }
}

impl std::fmt::Debug for Dispose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispose")
            .field("spent", &self.is_spent())
            .finish()
    }
}

/// Repeating timer owned by a single [`Driver`](crate::Driver).
///
/// Dropping it cancels the underlying host timer.
#[derive(Debug)]
pub struct RepeatingTimer {
    cancel: Dispose,
}

impl RepeatingTimer {
    pub fn new(cancel: Dispose) -> Self {
        Self { cancel }
    }

    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for RepeatingTimer {
    fn drop(&mut self) {
        self.cancel.run();
    }
}
