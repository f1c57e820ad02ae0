#![doc = include_str!("../README.md")]

mod alphabet;
mod coder;
mod composite;
mod config;
mod error;
mod finder;
mod model;
mod persists;
mod salt;
mod separator;
mod store;

pub use crate::alphabet::*;
pub use crate::coder::*;
pub use crate::composite::*;
pub use crate::config::*;
pub use crate::error::*;
pub use crate::finder::*;
pub use crate::model::*;
pub use crate::persists::*;
pub use crate::salt::*;
pub use crate::separator::*;
pub use crate::store::*;
