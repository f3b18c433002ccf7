//! Shared tokio runtime for the blocking API.
//!
//! Blocking façade methods on an executor that only implements the async
//! half of [`CommandExecutor`](crate::executor::CommandExecutor) are driven
//! to completion on this runtime.

use std::sync::OnceLock;
use tokio::runtime::Runtime;

/// Global tokio runtime, initialized once on first use.
static RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Env var overriding the worker thread count.
pub const THREADS_ENV: &str = "REDIS_MODULES_RUNTIME_THREADS";

/// Get (or initialize) the global tokio runtime.
///
/// Multi-threaded with the default number of workers unless
/// `REDIS_MODULES_RUNTIME_THREADS` holds a positive integer.
pub fn get_runtime() -> &'static Runtime {
    RUNTIME.get_or_init(|| {
        let mut builder = tokio::runtime::Builder::new_multi_thread();
        builder.enable_all();

        if let Ok(threads) = std::env::var(THREADS_ENV) {
            match threads.parse::<usize>() {
                Ok(n) if n > 0 => {
                    builder.worker_threads(n);
                }
                _ => tracing::warn!(value = %threads, "ignoring invalid {THREADS_ENV}"),
            }
        }

        match builder.thread_name("redis-modules-rt").build() {
            Ok(rt) => rt,
            // OnceLock::get_or_init cannot return an error; runtime creation
            // failing (e.g. ulimit too low) leaves nothing to fall back to.
            Err(e) => panic!("redis-modules: failed to create tokio runtime: {e}"),
        }
    })
}

/// Block on a future using the global runtime.
///
/// Must NOT be called from within an async context (tokio panics); use the
/// `_async` façade methods there.
pub fn block_on<F: std::future::Future>(future: F) -> F::Output {
    get_runtime().block_on(future)
}

// ── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_is_same_instance() {
        let rt1 = get_runtime();
        let rt2 = get_runtime();
        assert!(std::ptr::eq(rt1, rt2));
    }

    #[test]
    fn block_on_works() {
        let result = block_on(async { "hello" });
        assert_eq!(result, "hello");
    }

    #[test]
    fn block_on_supports_timer() {
        block_on(async {
            tokio::time::sleep(std::time::Duration::from_millis(1)).await;
        });
    }
}
