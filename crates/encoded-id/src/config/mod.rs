mod configuration;
mod error;
mod settings;

pub use configuration::*;
pub use error::*;
pub use settings::*;
