

pub mod drain;
pub mod orchestrator;
pub mod pacer;

pub use drain::{DrainLoop, DrainOutcome, DrainReport};
pub use orchestrator::{RunOrchestrator, RunSummary};
pub use pacer::{FixedPacer, Pacer};
