//! Core application primitives (cycle runner, scheduler)

pub mod cycle;
pub mod rate_limiter;
pub mod scheduler;

pub use cycle::*;
pub use rate_limiter::RateLimiter;
pub use scheduler::*;
