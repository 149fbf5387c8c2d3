//! Display model implementations for table and JSON output
//!
//! Display models turn indexer and cache types into CLI rows with
//! column names and human-readable amounts.

mod baker;
mod cache;
pub mod common;

pub use baker::{BakerDisplay, RewardDisplay};
pub use cache::CacheEntryDisplay;
