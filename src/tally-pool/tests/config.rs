use tally_pool::ThreadPool;

// A single test mutating the environment; splitting this up would
// race between tests sharing the process.
#[test]
fn worker_count_from_environment() {
    std::env::set_var("TALLY_WORKER_THREADS", "not a number");
    assert!(ThreadPool::new().is_err());

    std::env::set_var("TALLY_WORKER_THREADS", "0");
    assert!(ThreadPool::new().is_err());

    std::env::set_var("TALLY_WORKER_THREADS", "3");
    let pool = ThreadPool::new().unwrap();
    assert_eq!(pool.thread_count(), 3);

    std::env::remove_var("TALLY_WORKER_THREADS");
    let pool = ThreadPool::new().unwrap();
    assert!(pool.thread_count() >= 1);
}
