//! Event-loop timer backed by `setTimeout`.

use async_trait::async_trait;
use clipchat_core::ports::TimerPort;
use gloo_timers::future::TimeoutFuture;

#[derive(Debug, Default, Clone, Copy)]
pub struct GlooTimer;

impl GlooTimer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait(?Send)]
impl TimerPort for GlooTimer {
    async fn sleep(&self, ms: u64) {
        let ms = u32::try_from(ms).unwrap_or(u32::MAX);
        TimeoutFuture::new(ms).await;
    }
}
