//! API request handlers.

mod negatives;
mod report;
mod session;

pub use negatives::*;
pub use report::*;
pub use session::*;
