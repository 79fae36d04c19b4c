use std::time::Duration;

use frostwatch_app::ports::Sleeper;
use gloo_timers::future::TimeoutFuture;

/// [`Sleeper`] backed by `setTimeout`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooSleeper;

impl Sleeper for GlooSleeper {
    async fn sleep(&self, duration: Duration) {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        TimeoutFuture::new(millis).await;
    }
}
