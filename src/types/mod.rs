pub mod analysis;
pub mod history;

pub use analysis::*;
pub use history::*;
