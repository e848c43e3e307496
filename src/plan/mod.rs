//! Interval merging and per-subject clip planning.

mod builder;
mod interval;

pub use builder::{ClipPlan, MergedPlan, build_plans};
pub use interval::{TimeInterval, merge_intervals};
