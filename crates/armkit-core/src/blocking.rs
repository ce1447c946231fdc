//! Blocking entry points
//!
//! The poller and the pager are written once, as async code. Their blocking
//! twins drive the same futures on a process-wide runtime that is built on
//! first use and lives until exit, so pooled connections opened by one
//! blocking call stay usable by the next.

use crate::error::{CoreError, Result};
use std::future::Future;
use std::sync::OnceLock;
use tokio::runtime::{Builder, Handle, Runtime};
use tracing::debug;

static RUNTIME: OnceLock<Runtime> = OnceLock::new();

fn runtime() -> Result<&'static Runtime> {
    if let Some(rt) = RUNTIME.get() {
        return Ok(rt);
    }
    debug!("Starting blocking runtime");
    let rt = Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("armkit-blocking")
        .enable_all()
        .build()
        .map_err(CoreError::Runtime)?;
    // A concurrent first call may have won the race; its runtime is kept and ours dropped.
    Ok(RUNTIME.get_or_init(|| rt))
}

/// Run `future` to completion on the calling thread
///
/// Returns [`CoreError::BlockingInAsyncContext`] when called from inside a
/// tokio runtime, where blocking would stall the executor.
pub fn block_on<F: Future>(future: F) -> Result<F::Output> {
    if Handle::try_current().is_ok() {
        return Err(CoreError::BlockingInAsyncContext);
    }
    Ok(runtime()?.block_on(future))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_on_runs_future() {
        let value = block_on(async { 40 + 2 }).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_block_on_drives_timers() {
        let value = block_on(async {
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
            "slept"
        })
        .unwrap();
        assert_eq!(value, "slept");
    }

    #[tokio::test]
    async fn test_block_on_inside_runtime_is_rejected() {
        let err = block_on(async {}).unwrap_err();
        assert!(matches!(err, CoreError::BlockingInAsyncContext));
    }
}
