//! Shared building blocks: constants, the error type, and the clock.

pub mod clock;
pub mod constants;
pub mod error;

pub use clock::{Clock, FixedClock, SystemClock};
pub use constants::*;
pub use error::{LoyaltyError, Result};
