pub mod analysis;
pub mod cache;
pub mod history;
pub mod orchestrator;

pub use cache::{Cache, CachePolicy};
pub use history::HistoryService;
pub use orchestrator::AnalysisService;
