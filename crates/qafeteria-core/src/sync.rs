use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Lock a std mutex, recovering the guard if a holder panicked.
///
/// Every guarded value in this crate is left consistent between
/// statements, so a poisoned lock carries no torn state.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Suspend for `delay`, returning `false` if `scope` is cancelled first.
pub(crate) async fn pause(delay: Duration, scope: &CancellationToken) -> bool {
    tokio::select! {
        biased;
        () = scope.cancelled() => false,
        () = tokio::time::sleep(delay) => true,
    }
}
