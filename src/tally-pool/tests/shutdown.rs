use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use tally_pool::{Builder, IdlePolicy, ThreadPool};

#[test]
fn drop_runs_every_submitted_task() {
    let counter = Arc::new(AtomicUsize::new(0));

    let pool = ThreadPool::with_threads(3).unwrap();
    for _ in 0..128 {
        let counter = counter.clone();
        pool.submit(move || {
            counter.fetch_add(1, Ordering::Relaxed);
        });
    }

    drop(pool);
    assert_eq!(counter.load(Ordering::Relaxed), 128);
}

#[test]
fn handles_survive_pool_teardown() {
    let pool = ThreadPool::with_threads(2).unwrap();

    let handles: Vec<_> = (0..32u64).map(|i| pool.submit(move || i * 3)).collect();

    // Teardown drains all pending work, so every handle must already
    // hold its value when we read it afterwards.
    drop(pool);

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.get().unwrap(), i as u64 * 3);
    }
}

#[test]
fn idle_parked_pool_tears_down() {
    let pool = Builder::new()
        .num_threads(4)
        .idle_policy(IdlePolicy::Park)
        .build()
        .unwrap();

    assert_eq!(pool.thread_count(), 4);
    assert_eq!(pool.pending_tasks(), 0);

    // Workers are parked on the condition variable by now; dropping
    // the pool must wake and join all of them.
    std::thread::sleep(std::time::Duration::from_millis(50));
    drop(pool);
}

#[test]
fn teardown_with_no_submissions() {
    let pool = ThreadPool::with_threads(2).unwrap();
    drop(pool);
}
