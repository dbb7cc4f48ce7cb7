//! Types shared across the content-engine boundary.

mod core;
mod surface;

pub use self::core::*;
pub use surface::*;
