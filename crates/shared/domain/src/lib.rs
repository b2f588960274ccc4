//! # Domain Models
//!
//! This crate contains pure shipping domain types with a single dependency (`serde`).
//! Keep it lean: no I/O, no eligibility rules, just data and simple helpers.

pub mod config;
pub mod constants;
pub mod method;
pub mod rate;
pub mod record;
