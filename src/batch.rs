//! Windowed batch execution.
//!
//! Items run in windows of at most `width` concurrent operations. A window is
//! joined completely before the next one starts, and a fixed pause separates
//! consecutive windows. Results come back in input order.

use std::{future::Future, time::Duration};

use futures::future::join_all;
use tokio::time::sleep;

/// Concurrent operations per window.
pub const DEFAULT_WINDOW: usize = 3;

/// Pause between the end of one window and the start of the next.
pub const DEFAULT_PAUSE: Duration = Duration::from_millis(100);

/// Runs `op` over `items` window by window.
///
/// Every item produces exactly one result. Failures are values of `R` (use a
/// `Result` or an outcome enum), so one item failing never cancels its
/// siblings in the same or later windows. A `width` of zero is treated as 1.
pub async fn run_windowed<T, R, F, Fut>(
    items: Vec<T>,
    width: usize,
    pause: Duration,
    op: F,
) -> Vec<R>
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = R>,
{
    let width = width.max(1);
    let mut results = Vec::with_capacity(items.len());
    let mut items = items.into_iter().peekable();

    loop {
        let window: Vec<Fut> = items.by_ref().take(width).map(&op).collect();
        if window.is_empty() {
            break;
        }
        results.extend(join_all(window).await);

        if items.peek().is_some() && !pause.is_zero() {
            sleep(pause).await;
        }
    }

    results
}
