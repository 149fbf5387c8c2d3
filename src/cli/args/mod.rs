//! Reusable CLI argument types

mod common;

pub use common::{OutputFormat, SortDir};
