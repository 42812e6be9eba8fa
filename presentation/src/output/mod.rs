//! Report formatting and analysis rendering.

pub mod analysis;
pub mod console;
