use super::*;
use std::sync::Mutex;

fn test_runtime() -> (Runtime, Arc<TestScheduler>) {
    let scheduler = Arc::new(TestScheduler::default());
    (Runtime::new(scheduler.clone()), scheduler)
}

#[test]
fn frame_callbacks_run_once_with_frame_time() {
    let (runtime, scheduler) = test_runtime();
    let seen = Rc::new(Cell::new(0u64));
    let clock = runtime.frame_clock();
    let registration = {
        let seen = Rc::clone(&seen);
        clock.with_frame_nanos(move |time| seen.set(time))
    };
    assert!(registration.is_active());
    assert!(runtime.needs_frame());
    assert_eq!(scheduler.frame_requests(), 1);

    runtime.drain_frame_callbacks(16_000_000);
    assert_eq!(seen.get(), 16_000_000);
    assert!(!runtime.needs_frame());

    runtime.drain_frame_callbacks(32_000_000);
    assert_eq!(seen.get(), 16_000_000, "one-shot callback must not rerun");
}

#[test]
fn dropping_registration_cancels_callback() {
    let (runtime, _) = test_runtime();
    let fired = Rc::new(Cell::new(false));
    {
        let fired = Rc::clone(&fired);
        let registration = runtime.frame_clock().with_frame_nanos(move |_| fired.set(true));
        drop(registration);
    }
    runtime.drain_frame_callbacks(1);
    assert!(!fired.get());
    assert!(!runtime.needs_frame());
}

#[test]
fn observers_run_after_callbacks_every_frame() {
    let (runtime, _) = test_runtime();
    let log = Rc::new(RefCell::new(Vec::new()));
    let clock = runtime.frame_clock();

    let observer = {
        let log = Rc::clone(&log);
        clock.observe_frames(move |time| log.borrow_mut().push(format!("observe {time}")))
    };
    let _callback = {
        let log = Rc::clone(&log);
        clock.with_frame_nanos(move |time| log.borrow_mut().push(format!("callback {time}")))
    };

    runtime.drain_frame_callbacks(1);
    runtime.drain_frame_callbacks(2);
    drop(observer);
    runtime.drain_frame_callbacks(3);

    assert_eq!(
        *log.borrow(),
        vec!["callback 1", "observe 1", "observe 2"]
    );
}

#[test]
fn logic_tasks_run_in_post_order() {
    let (runtime, _) = test_runtime();
    let order = Arc::new(Mutex::new(Vec::new()));
    let dispatcher = runtime.handle().dispatcher();
    for i in 0..3 {
        let order = Arc::clone(&order);
        dispatcher.post(move || order.lock().unwrap().push(i));
    }
    assert!(runtime.has_pending_logic());
    assert!(order.lock().unwrap().is_empty(), "posting must not run inline");

    assert_eq!(runtime.drain_logic(), 3);
    assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
    assert!(!runtime.has_pending_logic());
}

#[test]
fn detached_executor_runs_on_another_thread() {
    let (runtime, _) = test_runtime();
    let executor = runtime.detach_logic_executor().expect("executor attached");
    assert!(runtime.detach_logic_executor().is_none());

    let dispatcher = runtime.handle().dispatcher();
    let (tx, rx) = mpsc::channel();
    dispatcher.post(move || tx.send(42).unwrap());
    assert_eq!(runtime.drain_logic(), 0);

    let worker = std::thread::spawn(move || executor.run_next());
    assert!(worker.join().unwrap());
    assert_eq!(rx.recv().unwrap(), 42);
}

#[test]
fn detached_executor_stops_once_runtime_is_gone() {
    let (runtime, _) = test_runtime();
    let executor = runtime.detach_logic_executor().expect("executor attached");
    let dispatcher = runtime.handle().dispatcher();
    dispatcher.post(|| {});
    drop(dispatcher);
    drop(runtime);

    assert!(executor.run_next());
    assert!(!executor.run_next());
}
