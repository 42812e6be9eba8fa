//! Application layer for routewise
//!
//! This crate contains use cases, port definitions, and planner parameters.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::PlannerParams;
pub use ports::{
    analysis_renderer::{AnalysisRenderer, RawAnalysis},
    geocoder::{GeocodeError, Geocoder},
    llm_gateway::{ChatRequest, GatewayError, LlmGateway},
    map_surface::{LineStyle, MapError, MapSurface, RouteRequest, default_stop_label},
    pacer::{FixedIntervalPacer, NoPacing, RequestPacer},
    progress::{LoadingGuard, NoProgress, PlanProgressNotifier, PlanWarning},
    run_logger::{NoRunLogger, RunEvent, RunLogger},
};
pub use use_cases::plan_trip::{
    PlanReport, PlanRun, PlanTripError, PlanTripInput, PlanTripUseCase,
};
pub use use_cases::present_route::{PresentRouteUseCase, PresentedRoute};
pub use use_cases::resolve_coordinates::{ResolveCoordinatesUseCase, ResolvedCoordinates};
pub use use_cases::sequence_waypoints::{
    AiStageError, SequenceWaypointsInput, SequenceWaypointsUseCase, SequencerFailure,
};
