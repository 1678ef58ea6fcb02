//! belief_fusion_combinator
//!
//! Batch orchestration layer for `belief_fusion_core`.
//!
//! Responsibilities:
//! - reduce a batch of belief systems into one consensus system
//! - offer distinct reduction shapes (left fold, anchor plus batch,
//!   pairwise tree) with one limit convention
//! - extract aligned label/weight series for external charting
//!
//! Non-goals:
//! - no IO
//! - no async
//! - no combination rules (live in core)

pub mod reduce;
pub mod report;

pub use reduce::{combine_all, combine_all_lns, combine_pairwise_tree};

pub use report::{ComparisonGraphData, REPORT_SERIES_MAX};
