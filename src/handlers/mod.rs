//! Handler implementations

pub mod console;
pub mod file;
pub mod rotation;

pub use console::ConsoleHandler;
pub use file::FileHandler;
pub use rotation::RollPolicy;

pub use crate::core::{Handler, SharedHandler};
