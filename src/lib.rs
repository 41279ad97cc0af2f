//! Time card rule engine for meal-break shortfalls and minimum calls.
//!
//! This crate reads one worker's clock intervals for a day, applies the
//! contract's meal-break and minimum-call rules, and replaces the card's
//! synthesized unworked entries with the result.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
