mod error;
mod guard;
mod mirror;

pub use error::*;
pub use mirror::*;
