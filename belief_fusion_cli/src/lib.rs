//! belief_fusion_cli
//!
//! File and console adapters for the belief fusion crates. This is the only
//! crate in the workspace that touches the filesystem or a terminal; the
//! core and combinator crates stay IO-free.

pub mod adapter;
pub mod error;

pub use adapter::{load_system, store_system, write_combination_trace};
pub use error::{Error, Result};
