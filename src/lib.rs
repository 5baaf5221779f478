// src/lib.rs

//! equisync Library
//!
//! Enumerates equity symbols from the Yahoo Finance screener and syncs
//! per-symbol company data into a MongoDB collection.

pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
