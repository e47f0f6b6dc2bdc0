use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::Arc;
use std::thread::ThreadId;

use smallvec::SmallVec;

use crate::frame_clock::FrameClock;
use crate::platform::RuntimeScheduler;
use crate::FrameCallbackId;

type FrameCallback = Box<dyn FnOnce(u64) + 'static>;
type LocalTask = Box<dyn FnOnce() + 'static>;

struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<FrameCallback>,
}

struct RuntimeInner {
    scheduler: Arc<dyn RuntimeScheduler>,
    needs_frame: Cell<bool>,
    frame_callbacks: RefCell<VecDeque<FrameCallbackEntry>>,
    next_frame_callback_id: Cell<u64>,
    local_tasks: RefCell<VecDeque<LocalTask>>,
    last_frame_nanos: Cell<Option<u64>>,
    ui_thread_id: ThreadId,
}

impl RuntimeInner {
    fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            scheduler,
            needs_frame: Cell::new(false),
            frame_callbacks: RefCell::new(VecDeque::new()),
            next_frame_callback_id: Cell::new(1),
            local_tasks: RefCell::new(VecDeque::new()),
            last_frame_nanos: Cell::new(None),
            ui_thread_id: std::thread::current().id(),
        }
    }

    fn schedule(&self) {
        if !self.needs_frame.replace(true) {
            self.scheduler.schedule_frame();
        }
    }

    fn has_frame_callbacks(&self) -> bool {
        !self.frame_callbacks.borrow().is_empty()
    }

    fn has_local_tasks(&self) -> bool {
        self.local_tasks
            .try_borrow()
            .map(|tasks| !tasks.is_empty())
            .unwrap_or(true)
    }

    fn settle_needs_frame(&self) {
        if !self.has_frame_callbacks() && !self.has_local_tasks() {
            self.needs_frame.set(false);
        }
    }

    fn register_frame_callback(&self, callback: FrameCallback) -> FrameCallbackId {
        debug_assert_eq!(
            std::thread::current().id(),
            self.ui_thread_id,
            "frame callback registered off the runtime thread",
        );
        let id = self.next_frame_callback_id.get();
        self.next_frame_callback_id.set(id + 1);
        self.frame_callbacks
            .borrow_mut()
            .push_back(FrameCallbackEntry {
                id,
                callback: Some(callback),
            });
        self.schedule();
        id
    }

    fn cancel_frame_callback(&self, id: FrameCallbackId) {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        if let Some(index) = callbacks.iter().position(|entry| entry.id == id) {
            callbacks.remove(index);
        }
        drop(callbacks);
        self.settle_needs_frame();
    }

    fn post_local(&self, task: LocalTask) {
        debug_assert_eq!(
            std::thread::current().id(),
            self.ui_thread_id,
            "local task posted off the runtime thread",
        );
        self.local_tasks.borrow_mut().push_back(task);
        self.schedule();
    }

    fn drain_local_tasks(&self) {
        loop {
            // The borrow must end before the task runs: tasks may post more tasks.
            let task = self.local_tasks.borrow_mut().pop_front();
            match task {
                Some(task) => task(),
                None => break,
            }
        }
    }

    fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        if let Some(previous) = self.last_frame_nanos.get() {
            if frame_time_nanos < previous {
                log::warn!(
                    "frame time went backwards: {} < {}",
                    frame_time_nanos,
                    previous
                );
            }
        }
        self.last_frame_nanos.set(Some(frame_time_nanos));

        let mut callbacks = self.frame_callbacks.borrow_mut();
        let mut pending: SmallVec<[FrameCallback; 4]> = SmallVec::with_capacity(callbacks.len());
        while let Some(mut entry) = callbacks.pop_front() {
            if let Some(callback) = entry.callback.take() {
                pending.push(callback);
            }
        }
        drop(callbacks);
        // Callbacks that re-register during this frame must request a new one.
        self.needs_frame.set(false);
        log::trace!(
            "draining {} frame callbacks at {}ns",
            pending.len(),
            frame_time_nanos
        );
        for callback in pending {
            callback(frame_time_nanos);
        }
        self.drain_local_tasks();
        self.settle_needs_frame();
    }
}

/// Owner of the frame-callback and local-task queues.
///
/// Only the thread that created the runtime may register callbacks or post
/// tasks. Handles are weak: once the `Runtime` is dropped every handle becomes
/// inert.
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new(scheduler)),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn needs_frame(&self) -> bool {
        self.inner.needs_frame.get()
    }

    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        self.inner.drain_frame_callbacks(frame_time_nanos);
    }
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("needs_frame", &self.inner.needs_frame.get())
            .field(
                "frame_callbacks",
                &self.inner.frame_callbacks.borrow().len(),
            )
            .finish()
    }
}

#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
}

impl RuntimeHandle {
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }

    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        self.inner
            .upgrade()
            .map(|inner| inner.register_frame_callback(Box::new(callback)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_frame_callback(id);
        }
    }

    /// Queues `task` to run on the runtime thread once the current frame's
    /// callbacks have all run.
    ///
    /// Returns `false` if the runtime is gone; the task is dropped unrun.
    pub fn post_local(&self, task: impl FnOnce() + 'static) -> bool {
        match self.inner.upgrade() {
            Some(inner) => {
                inner.post_local(Box::new(task));
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for RuntimeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeHandle")
            .field("alive", &self.is_alive())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
