mod error;
mod interface;
mod reversible;
mod shuffle;

pub use error::*;
pub use interface::*;
pub use reversible::*;
