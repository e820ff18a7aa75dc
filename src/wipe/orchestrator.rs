

use std::sync::Arc;
use tracing::info;

use super::drain::{DrainLoop, DrainReport};
use super::pacer::{FixedPacer, Pacer};
use crate::client::{ResourceClass, TimelineClient, TwitterClient};
use crate::core::config::WipeConfig;
use crate::core::error::Result;


#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub posts: Option<DrainReport>,
    pub likes: Option<DrainReport>,
}

impl RunSummary {
    pub fn total_deleted(&self) -> usize {
        self.reports().map(|r| r.deleted).sum()
    }


    pub fn total_failed(&self) -> usize {
        self.reports().map(|r| r.failed).sum()
    }

    fn reports(&self) -> impl Iterator<Item = &DrainReport> {
        self.posts.iter().chain(self.likes.iter())
    }
}

/// Runs the posts drain and then the likes drain, each only when its actions are enabled.
pub struct RunOrchestrator {
    drain: DrainLoop,
}

impl RunOrchestrator {
    pub fn new(client: Arc<dyn TimelineClient>, pacer: Arc<dyn Pacer>, config: &WipeConfig) -> Self {
        Self {
            drain: DrainLoop::new(client, pacer, config),
        }
    }

    /// Wires the Twitter client and a fixed-delay pacer from the configuration.
    pub fn from_config(config: &WipeConfig) -> Result<Self> {
        let client = TwitterClient::from_config(config)?;
        let pacer = FixedPacer::new(config.delay);
        Ok(Self::new(Arc::new(client), Arc::new(pacer), config))
    }


    pub async fn run(&self) -> Result<RunSummary> {
        let actions = self.drain.actions();
        let mut summary = RunSummary::default();

        if actions.wants_posts() {
            info!("Deleting tweets and retweets..");
            summary.posts = Some(self.drain.run(ResourceClass::Posts).await?);
        }

        if actions.wants_likes() {
            info!("Deleting likes..");
            summary.likes = Some(self.drain.run(ResourceClass::Likes).await?);
        }

        info!(
            "Done. deleted={} failed={}",
            summary.total_deleted(),
            summary.total_failed()
        );
        Ok(summary)
    }
}
