use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::ThreadId;

use smallvec::SmallVec;

use crate::frame_clock::FrameClock;
use crate::platform::RuntimeScheduler;
use crate::{FrameCallbackId, FrameObserverId};

type LogicTask = Box<dyn FnOnce() + Send + 'static>;
type FrameObserver = Rc<RefCell<dyn FnMut(u64) + 'static>>;

struct LogicDispatcherInner {
    scheduler: Arc<dyn RuntimeScheduler>,
    tx: mpsc::Sender<LogicTask>,
    pending: Arc<AtomicUsize>,
}

impl LogicDispatcherInner {
    fn new(scheduler: Arc<dyn RuntimeScheduler>, tx: mpsc::Sender<LogicTask>) -> Self {
        Self {
            scheduler,
            tx,
            pending: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn post(&self, task: LogicTask) {
        self.pending.fetch_add(1, Ordering::SeqCst);
        if self.tx.send(task).is_err() {
            // Executor is gone; nothing will ever run this task.
            self.pending.fetch_sub(1, Ordering::SeqCst);
            log::trace!("logic executor dropped; discarding posted task");
            return;
        }
        self.scheduler.schedule_frame();
    }

    fn has_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst) > 0
    }
}

struct PendingGuard<'a> {
    counter: &'a AtomicUsize,
}

impl<'a> PendingGuard<'a> {
    fn new(counter: &'a AtomicUsize) -> Self {
        Self { counter }
    }
}

impl<'a> Drop for PendingGuard<'a> {
    fn drop(&mut self) {
        let previous = self.counter.fetch_sub(1, Ordering::SeqCst);
        debug_assert!(previous > 0, "logic dispatcher pending count underflowed");
    }
}

/// Sending half of the business-logic channel.
///
/// Posting never blocks and never runs the task inline, so code in the
/// animation domain can hand work to consumers without re-entering itself.
/// Tasks from one dispatcher run in the order they were posted.
#[derive(Clone)]
pub struct LogicDispatcher {
    inner: Arc<LogicDispatcherInner>,
}

impl LogicDispatcher {
    fn new(inner: Arc<LogicDispatcherInner>) -> Self {
        Self { inner }
    }

    pub fn post(&self, task: impl FnOnce() + Send + 'static) {
        self.inner.post(Box::new(task));
    }

    pub fn has_pending(&self) -> bool {
        self.inner.has_pending()
    }
}

/// Receiving half of the business-logic channel.
///
/// Owned by the runtime until [`Runtime::detach_logic_executor`] hands it to
/// whoever runs consumer callbacks, possibly on another thread.
pub struct LogicExecutor {
    rx: mpsc::Receiver<LogicTask>,
    pending: Arc<AtomicUsize>,
}

impl LogicExecutor {
    /// Runs every task that has been posted so far. Returns how many ran.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        while let Ok(task) = self.rx.try_recv() {
            let _guard = PendingGuard::new(&self.pending);
            task();
            ran += 1;
        }
        ran
    }

    /// Blocks for the next task and runs it. Returns `false` once every
    /// dispatcher has been dropped.
    pub fn run_next(&self) -> bool {
        match self.rx.recv() {
            Ok(task) => {
                let _guard = PendingGuard::new(&self.pending);
                task();
                true
            }
            Err(_) => false,
        }
    }
}

struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<Box<dyn FnOnce(u64) + 'static>>,
}

struct FrameObserverEntry {
    id: FrameObserverId,
    observer: FrameObserver,
}

struct RuntimeInner {
    scheduler: Arc<dyn RuntimeScheduler>,
    needs_frame: Cell<bool>,
    frame_callbacks: RefCell<VecDeque<FrameCallbackEntry>>,
    next_frame_callback_id: Cell<u64>,
    frame_observers: RefCell<SmallVec<[FrameObserverEntry; 4]>>,
    next_frame_observer_id: Cell<u64>,
    logic_dispatcher: Arc<LogicDispatcherInner>,
    logic_executor: RefCell<Option<LogicExecutor>>,
    ui_thread_id: ThreadId,
}

impl RuntimeInner {
    fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        let (tx, rx) = mpsc::channel();
        let dispatcher = Arc::new(LogicDispatcherInner::new(scheduler.clone(), tx));
        let executor = LogicExecutor {
            rx,
            pending: Arc::clone(&dispatcher.pending),
        };
        Self {
            scheduler,
            needs_frame: Cell::new(false),
            frame_callbacks: RefCell::new(VecDeque::new()),
            next_frame_callback_id: Cell::new(1),
            frame_observers: RefCell::new(SmallVec::new()),
            next_frame_observer_id: Cell::new(1),
            logic_dispatcher: dispatcher,
            logic_executor: RefCell::new(Some(executor)),
            ui_thread_id: std::thread::current().id(),
        }
    }

    fn schedule(&self) {
        self.needs_frame.set(true);
        self.scheduler.schedule_frame();
    }

    fn has_frame_callbacks(&self) -> bool {
        !self.frame_callbacks.borrow().is_empty()
    }

    fn register_frame_callback(&self, callback: Box<dyn FnOnce(u64) + 'static>) -> FrameCallbackId {
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
        let callbacks_empty = callbacks.is_empty();
        drop(callbacks);
        if callbacks_empty {
            self.needs_frame.set(false);
        }
    }

    fn register_frame_observer(&self, observer: FrameObserver) -> FrameObserverId {
        let id = self.next_frame_observer_id.get();
        self.next_frame_observer_id.set(id + 1);
        self.frame_observers
            .borrow_mut()
            .push(FrameObserverEntry { id, observer });
        id
    }

    fn remove_frame_observer(&self, id: FrameObserverId) {
        self.frame_observers
            .borrow_mut()
            .retain(|entry| entry.id != id);
    }

    fn is_observer_registered(&self, id: FrameObserverId) -> bool {
        self.frame_observers
            .borrow()
            .iter()
            .any(|entry| entry.id == id)
    }

    fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        let mut pending: Vec<Box<dyn FnOnce(u64) + 'static>> = Vec::with_capacity(callbacks.len());
        while let Some(mut entry) = callbacks.pop_front() {
            if let Some(callback) = entry.callback.take() {
                pending.push(callback);
            }
        }
        drop(callbacks);
        for callback in pending {
            callback(frame_time_nanos);
        }

        // Observers see the values animations just wrote for this frame.
        let observers: SmallVec<[(FrameObserverId, FrameObserver); 4]> = self
            .frame_observers
            .borrow()
            .iter()
            .map(|entry| (entry.id, Rc::clone(&entry.observer)))
            .collect();
        for (id, observer) in observers {
            if !self.is_observer_registered(id) {
                continue;
            }
            match observer.try_borrow_mut() {
                Ok(mut observer) => (&mut *observer)(frame_time_nanos),
                Err(_) => log::warn!("frame observer {id} re-entered during its own frame"),
            };
        }

        if !self.has_frame_callbacks() {
            self.needs_frame.set(false);
        }
    }

    fn drain_logic(&self) -> usize {
        match self.logic_executor.try_borrow() {
            Ok(executor) => executor.as_ref().map_or(0, LogicExecutor::run_pending),
            Err(_) => 0,
        }
    }
}

/// Owner of one animation-domain graph.
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
            dispatcher: LogicDispatcher::new(Arc::clone(&self.inner.logic_dispatcher)),
            ui_thread_id: self.inner.ui_thread_id,
        }
    }

    /// True while an animation is waiting for its next frame.
    pub fn needs_frame(&self) -> bool {
        self.inner.needs_frame.get()
    }

    pub fn has_pending_logic(&self) -> bool {
        self.inner.logic_dispatcher.has_pending()
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.handle())
    }

    /// Runs one frame: pending frame callbacks first, then frame observers.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        self.inner.drain_frame_callbacks(frame_time_nanos);
    }

    /// Runs posted business-logic tasks on the calling thread.
    ///
    /// Does nothing once the executor has been detached.
    pub fn drain_logic(&self) -> usize {
        self.inner.drain_logic()
    }

    /// Takes the business-logic executor out of the runtime so it can be
    /// driven elsewhere. Returns `None` if it was already taken.
    pub fn detach_logic_executor(&self) -> Option<LogicExecutor> {
        self.inner.logic_executor.borrow_mut().take()
    }
}

#[derive(Default)]
pub struct DefaultScheduler;

impl RuntimeScheduler for DefaultScheduler {
    fn schedule_frame(&self) {}
}

/// Scheduler that counts frame requests; hosts under test drive frames
/// by hand.
#[derive(Default)]
pub struct TestScheduler {
    requests: AtomicUsize,
}

impl TestScheduler {
    pub fn frame_requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl RuntimeScheduler for TestScheduler {
    fn schedule_frame(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }
}

/// Weak handle to a [`Runtime`], cheap to clone into animation state.
#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
    dispatcher: LogicDispatcher,
    ui_thread_id: ThreadId,
}

impl RuntimeHandle {
    pub fn schedule(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.schedule();
        }
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

    pub fn register_frame_observer(
        &self,
        observer: impl FnMut(u64) + 'static,
    ) -> Option<FrameObserverId> {
        let observer: FrameObserver = Rc::new(RefCell::new(observer));
        self.inner
            .upgrade()
            .map(|inner| inner.register_frame_observer(observer))
    }

    pub fn remove_frame_observer(&self, id: FrameObserverId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.remove_frame_observer(id);
        }
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }

    pub fn assert_ui_thread(&self) {
        debug_assert_eq!(
            std::thread::current().id(),
            self.ui_thread_id,
            "slider state touched off the runtime's thread"
        );
    }

    pub fn dispatcher(&self) -> LogicDispatcher {
        self.dispatcher.clone()
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
