//! Application utilities

/// Cooperative delays used between retries and renewal ticks
pub mod delay;

pub use delay::{delay, delay_or_cancel};
