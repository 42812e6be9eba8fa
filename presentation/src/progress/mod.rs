//! Loading indicators for planning runs.

pub mod reporter;
