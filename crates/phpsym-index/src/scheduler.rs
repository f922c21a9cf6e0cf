//! Sliding-window task throttling.
//!
//! At most `limit` tasks are in flight; the moment any one settles, the next
//! unstarted task begins. Results come back in input order no matter which
//! task finished first.

use futures_util::stream::{self, StreamExt};
use std::convert::Infallible;
use std::future::Future;

/// Run deferred tasks with at most `limit` of them in flight.
///
/// Element `i` of the result is the value of task `i`. Fail-fast: the first
/// task error is returned immediately, in-flight tasks are dropped and tasks
/// not yet started are never started. A `limit` of zero is treated as one.
pub async fn throttle<T, E, F, Fut>(tasks: Vec<F>, limit: usize) -> Result<Vec<T>, E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let total = tasks.len();
    if total == 0 {
        return Ok(Vec::new());
    }

    // Tag each task with its input position; completion order is arbitrary.
    let mut in_flight = std::pin::pin!(
        stream::iter(tasks.into_iter().enumerate())
            .map(|(order, task)| async move { (order, task().await) })
            .buffer_unordered(limit.max(1))
    );

    let mut slots: Vec<Option<T>> = std::iter::repeat_with(|| None).take(total).collect();
    while let Some((order, result)) = in_flight.next().await {
        slots[order] = Some(result?);
    }

    Ok(slots.into_iter().flatten().collect())
}

/// [`throttle`] for tasks that cannot fail.
pub async fn throttle_all<T, F, Fut>(tasks: Vec<F>, limit: usize) -> Vec<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = T>,
{
    let tasks: Vec<_> = tasks
        .into_iter()
        .map(|task| move || async move { Ok::<T, Infallible>(task().await) })
        .collect();
    match throttle(tasks, limit).await {
        Ok(values) => values,
        Err(never) => match never {},
    }
}
