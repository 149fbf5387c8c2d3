//! tezbake - cached access to Tezos baking data
//!
//! A tiered cache (memory plus an optional SQLite mirror) with per-category
//! TTL policies and stale-while-revalidate, in front of a TzKT-compatible
//! indexer. [`service::BakingService`] is the entry point; the `tezbake`
//! binary wires it to the command line.

pub mod cache;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod service;

pub use error::{Error, Result};
