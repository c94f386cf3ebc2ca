use std::cell::{Cell, RefCell};
use std::mem;
use std::rc::Rc;

type FrameCallback = Box<dyn FnOnce()>;

/// "Run this on the next frame" queue, ticked once per redraw.
///
/// Clones share the queue. Callbacks requested while a tick runs land on the
/// following tick.
#[derive(Clone, Default)]
pub struct FrameScheduler {
    queue: Rc<RefCell<Vec<FrameCallback>>>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_frame(&self, callback: impl FnOnce() + 'static) {
        self.queue.borrow_mut().push(Box::new(callback));
    }

    /// Run every callback queued before this call. Returns how many ran.
    pub fn tick(&self) -> usize {
        let batch = mem::take(&mut *self.queue.borrow_mut());
        let ran = batch.len();
        for callback in batch {
            callback();
        }
        ran
    }

    #[cfg(test)]
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }
}

/// Shared cancellation flag for one frame loop.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}
