//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! must implement.

pub mod analysis_renderer;
pub mod geocoder;
pub mod llm_gateway;
pub mod map_surface;
pub mod pacer;
pub mod progress;
pub mod run_logger;
