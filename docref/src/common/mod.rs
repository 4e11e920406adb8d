//! Common types and utilities shared across the crate.

pub mod constants;
mod value;

pub use constants::*;
pub use value::*;

use std::time::{SystemTime, UNIX_EPOCH};

// Fast path: returns 0 on any error instead of double error handling
#[inline]
pub fn get_current_time_or_zero() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}
