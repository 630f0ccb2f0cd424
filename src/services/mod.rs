//! Service layer for the bulletin crawler.
//!
//! - Listing parsing and latest-entry selection (`listing`)
//! - Date extraction and parsing (`dates`)
//! - Detail page language selection (`detail`)
//! - Record assembly with change detection (`BulletinAssembler`)
//! - Per-source resolution (`SourceResolver`)
//! - The public entry point (`BulletinService`)

mod assembler;
mod bulletins;
pub mod dates;
pub mod detail;
pub mod listing;
mod resolver;

pub use assembler::BulletinAssembler;
pub use bulletins::BulletinService;
pub use listing::ListingEntry;
pub use resolver::{Resolver, SourceResolver};
