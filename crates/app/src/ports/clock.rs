//! Timer port used between poll ticks.

use std::future::Future;
use std::time::Duration;

/// Source of delays (`gloo-timers` in the browser, `tokio::time` natively).
pub trait Sleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}
