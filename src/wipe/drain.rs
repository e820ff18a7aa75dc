

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::pacer::Pacer;
use crate::client::{ResourceClass, TimelineClient};
use crate::core::config::{ActionFlags, DeleteErrorPolicy, WipeConfig};
use crate::core::error::{Result, WipeError};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainOutcome {
    /// The remote returned an empty page.
    Drained,
    /// A fetched page yielded no successful deletes, so re-fetching it would not make progress.
    Stalled,
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrainReport {
    pub class: ResourceClass,
    pub pages: usize,
    pub deleted: usize,
    pub failed: usize,
    pub skipped: usize,
    pub outcome: DrainOutcome,
}

impl DrainReport {
    fn new(class: ResourceClass) -> Self {
        Self {
            class,
            pages: 0,
            deleted: 0,
            failed: 0,
            skipped: 0,
            outcome: DrainOutcome::Drained,
        }
    }
}


fn empty_message(class: ResourceClass) -> &'static str {
    match class {
        ResourceClass::Posts => "No (re)tweets remain.",
        ResourceClass::Likes => "No likes remain.",
    }
}

/// Empties one resource class by re-fetching the head page until it comes back empty.
///
/// No cursor is kept between pages. Progress depends on deleted items
/// disappearing from subsequent listings.
pub struct DrainLoop {
    client: Arc<dyn TimelineClient>,
    pacer: Arc<dyn Pacer>,
    subject: String,
    actions: ActionFlags,
    page_size: usize,
    delete_error_policy: DeleteErrorPolicy,
    stop_when_stalled: bool,
}

impl DrainLoop {
    pub fn new(client: Arc<dyn TimelineClient>, pacer: Arc<dyn Pacer>, config: &WipeConfig) -> Self {
        Self {
            client,
            pacer,
            subject: config.username.clone(),
            actions: config.actions,
            page_size: config.page_size,
            delete_error_policy: config.delete_error_policy,
            stop_when_stalled: config.stop_when_stalled,
        }
    }


    pub fn actions(&self) -> ActionFlags {
        self.actions
    }


    pub async fn run(&self, class: ResourceClass) -> Result<DrainReport> {
        let mut report = DrainReport::new(class);

        loop {
            let page = self
                .client
                .list_page(class, &self.subject, self.page_size)
                .await
                .map_err(|source| WipeError::ListFailed { class, source })?;
            report.pages += 1;

            if page.is_empty() {
                info!("{}", empty_message(class));
                report.outcome = DrainOutcome::Drained;
                return Ok(report);
            }

            debug!("Fetched page {} of {} ({} items)", report.pages, class, page.len());

            let mut deleted_on_page = 0usize;
            for item in &page {
                let variant = item.classify(class);

                if self.actions.allows(variant) {
                    info!("Deleting: {} id: {}", variant.action_label(), item.id);

                    match self.client.delete_item(&item.id, variant).await {
                        Ok(()) => {
                            report.deleted += 1;
                            deleted_on_page += 1;
                        }
                        Err(source) => {
                            report.failed += 1;
                            match self.delete_error_policy {
                                DeleteErrorPolicy::Continue => {
                                    warn!("Failed to delete {} {}: {}", variant, item.id, source);
                                }
                                DeleteErrorPolicy::Abort => {
                                    return Err(WipeError::DeleteFailed {
                                        variant,
                                        id: item.id.clone(),
                                        source,
                                    });
                                }
                            }
                        }
                    }
                } else {
                    report.skipped += 1;
                    debug!("Skipping: {} id: {}", variant.action_label(), item.id);
                }

                self.pacer.wait().await;
            }

            if deleted_on_page == 0 && self.stop_when_stalled {
                warn!(
                    "Stopping {} drain: none of the {} items on the head page could be deleted",
                    class,
                    page.len()
                );
                report.outcome = DrainOutcome::Stalled;
                return Ok(report);
            }
        }
    }
}
