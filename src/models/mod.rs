// src/models/mod.rs

//! Domain models for the bulletin crawler.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod bulletin;
mod config;
mod source;

// Re-export all public types
pub use bulletin::{BulletinRecord, sentinel_date};
pub use config::{Config, HttpConfig, StorageConfig};
pub use source::{
    CompiledDetail, CompiledListing, DateRule, DetailSelectors, ListingSelectors, Replacement,
    SourceConfig, parse_selector,
};
