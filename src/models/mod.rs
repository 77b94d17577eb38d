//! Data models

mod organization;
mod rbac;
mod user;

pub use organization::*;
pub use rbac::*;
pub use user::*;
