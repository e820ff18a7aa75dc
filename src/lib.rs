

pub mod client;
pub mod core;
pub mod utils;
pub mod wipe;

#[cfg(test)]
pub(crate) mod testing;

pub use utils::{safe_truncate, safe_truncate_ellipsis};


pub use client::{ClientError, Item, ResourceClass, TimelineClient, TwitterClient, Variant};
pub use crate::core::config::{ActionFlags, Credentials, DeleteErrorPolicy, WipeConfig};
pub use crate::core::error::{Result, WipeError};
pub use wipe::{DrainLoop, DrainOutcome, DrainReport, FixedPacer, Pacer, RunOrchestrator, RunSummary};


pub const DEFAULT_API_BASE_URL: &str = "https://api.twitter.com/1.1";


pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Upper bound accepted by the timeline and favorites endpoints.
pub const MAX_PAGE_SIZE: usize = 200;


pub const DEFAULT_DELAY_SECS: u64 = 10;


pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;


pub const DEFAULT_CONFIG_PATH: &str = "config.json";
