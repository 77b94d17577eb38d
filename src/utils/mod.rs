//! Shared utilities

pub mod error;
pub mod logging;

pub use error::{CoreError, CoreResult};
pub use logging::init_logging;
