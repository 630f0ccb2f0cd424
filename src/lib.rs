// src/lib.rs

//! Bulletin Crawler Library
//!
//! Finds the latest COVID-19 health bulletin published by several Indian
//! state health departments and keeps a local copy of each PDF.

pub mod error;
pub mod events;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod sources;
pub mod storage;
pub mod utils;
