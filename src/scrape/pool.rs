// pool.rs
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

/// Runs `task` over every item with at most `max_concurrency` calls in
/// flight and returns each outcome in input order.
///
/// Workers claim the next item through a shared atomic index, so the cap
/// holds no matter how many items there are. Returns only after every item
/// has settled; a failing item never stops its siblings. A cap of zero is
/// treated as one.
pub fn run_bounded<I, T, E, F>(items: &[I], max_concurrency: usize, task: F) -> Vec<Result<T, E>>
where
    I: Sync,
    T: Send,
    E: Send,
    F: Fn(&I) -> Result<T, E> + Sync,
{
    if items.is_empty() {
        return Vec::new();
    }

    let workers = max_concurrency.max(1).min(items.len());
    let next = AtomicUsize::new(0);

    let mut indexed: Vec<(usize, Result<T, E>)> = thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                scope.spawn(|| {
                    let mut done = Vec::new();
                    loop {
                        let idx = next.fetch_add(1, Ordering::SeqCst);
                        let Some(item) = items.get(idx) else {
                            break;
                        };
                        done.push((idx, task(item)));
                    }
                    done
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|h| match h.join() {
                Ok(done) => done,
                // a panicking task is a bug, surface it on the caller
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    });

    indexed.sort_by_key(|(idx, _)| *idx);
    indexed.into_iter().map(|(_, outcome)| outcome).collect()
}
