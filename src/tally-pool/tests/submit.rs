use std::sync::mpsc;

use tally_pool::{Builder, IdlePolicy, TaskFailed, ThreadPool};

#[test]
fn results_match_direct_calls() {
    let pool = ThreadPool::with_threads(4).unwrap();

    let handles: Vec<_> = (0..64u64)
        .map(|i| pool.submit(move || i * i + 1))
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let i = i as u64;
        assert_eq!(handle.get().unwrap(), i * i + 1);
    }
}

#[test]
fn tasks_run_on_worker_threads() {
    let pool = Builder::new()
        .num_threads(2)
        .thread_name("submit-test-worker")
        .build()
        .unwrap();

    let name = pool
        .submit(|| std::thread::current().name().map(str::to_owned))
        .get()
        .unwrap();

    assert_eq!(name.as_deref(), Some("submit-test-worker"));
}

#[test]
fn panics_are_confined_to_the_handle() {
    let pool = ThreadPool::with_threads(2).unwrap();

    let failed = pool.submit(|| -> u32 { panic!("deterministic failure") });
    let ok = pool.submit(|| 7u32);

    match failed.get() {
        Err(TaskFailed::Panicked(msg)) => assert!(msg.contains("deterministic failure")),
        other => panic!("expected a captured panic, got {other:?}"),
    }

    // The worker that ran the panicking task must still be alive.
    assert_eq!(ok.get().unwrap(), 7);
    assert_eq!(pool.submit(|| 8u32).get().unwrap(), 8);
}

#[test]
fn try_get_returns_the_handle_while_running() {
    let pool = ThreadPool::with_threads(1).unwrap();
    let (unblock, blocked) = mpsc::channel::<()>();

    let handle = pool.submit(move || {
        blocked.recv().unwrap();
        99u32
    });

    let handle = match handle.try_get() {
        Err(handle) => handle,
        Ok(outcome) => panic!("task cannot have finished yet: {outcome:?}"),
    };

    unblock.send(()).unwrap();
    assert_eq!(handle.get().unwrap(), 99);
}

#[test]
fn parked_workers_pick_up_late_submissions() {
    let pool = Builder::new()
        .num_threads(2)
        .idle_policy(IdlePolicy::Park)
        .build()
        .unwrap();

    // Let the workers go idle before anything is submitted.
    std::thread::sleep(std::time::Duration::from_millis(50));

    let handles: Vec<_> = (0..16u32).map(|i| pool.submit(move || i + 1)).collect();
    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.get().unwrap(), i as u32 + 1);
    }
}

#[test]
fn single_worker_preserves_fifo_order() {
    let pool = ThreadPool::with_threads(1).unwrap();
    let (tx, rx) = mpsc::channel();

    let handles: Vec<_> = (0..32u32)
        .map(|i| {
            let tx = tx.clone();
            pool.submit(move || tx.send(i).unwrap())
        })
        .collect();

    for handle in handles {
        handle.get().unwrap();
    }
    drop(tx);

    let order: Vec<_> = rx.iter().collect();
    assert_eq!(order, (0..32).collect::<Vec<_>>());
}
