//! Replay orchestration module.

mod driver;
mod report;

pub use driver::{Dashboard, Replay, ReplayConfig};
pub use report::{print_dashboard, ReplayStats};
