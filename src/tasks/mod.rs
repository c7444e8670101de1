//! Daily task catalog and lifecycle.
//!
//! Rollover is lazy: the first access on a new local day replaces the whole
//! set. There is no background timer.

pub mod data;
pub mod logic;
pub mod types;

pub use data::DEFAULT_TASKS;
pub use logic::{advance_task, ensure_today, fresh_tasks, update_progress};
pub use types::{DailyTaskDefinition, DailyTaskInstance, DailyTaskView};
