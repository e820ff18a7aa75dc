

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Inter-item delay applied by the drain loop after every processed item.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn wait(&self);
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPacer {
    delay: Duration,
}

impl FixedPacer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// A pacer that never sleeps.
    pub fn none() -> Self {
        Self::new(Duration::ZERO)
    }


    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl Pacer for FixedPacer {
    async fn wait(&self) {
        if self.delay.is_zero() {
            return;
        }
        debug!("Pacing for {:?}", self.delay);
        tokio::time::sleep(self.delay).await;
    }
}
