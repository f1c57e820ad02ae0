mod cache;
mod decoration;
mod encoder;
mod interface;

pub use cache::*;
pub use decoration::*;
pub use encoder::*;
pub use interface::*;
