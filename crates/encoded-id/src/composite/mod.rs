mod builder;
mod error;
mod parser;
mod slug;

pub use builder::*;
pub use error::*;
pub use parser::*;
pub use slug::*;
