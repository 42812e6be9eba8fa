//! Plan Trip use case
//!
//! Orchestrates a full planning run:
//!
//! ```text
//! validate ──▶ sequence (LLM) ──▶ waypoint policy ──▶ resolve (geocode) ──▶ present (map)
//! ```
//!
//! Each stage gates the next. Validation and AI-stage failures, and fewer
//! than two resolved points, abort the run with one error. Per-place lookup
//! problems, ordering mismatches under a lenient policy, and route drawing
//! problems are warnings.

use crate::config::PlannerParams;
use crate::ports::analysis_renderer::{AnalysisRenderer, RawAnalysis};
use crate::ports::geocoder::Geocoder;
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::map_surface::MapSurface;
use crate::ports::pacer::{FixedIntervalPacer, RequestPacer};
use crate::ports::progress::{LoadingGuard, PlanProgressNotifier, PlanWarning};
use crate::ports::run_logger::{NoRunLogger, RunEvent, RunLogger};
use crate::use_cases::present_route::PresentRouteUseCase;
use crate::use_cases::resolve_coordinates::ResolveCoordinatesUseCase;
use crate::use_cases::sequence_waypoints::{
    AiStageError, SequenceWaypointsInput, SequenceWaypointsUseCase, SequencerFailure,
};
use routewise_domain::{
    PlanSession, ProviderEndpoint, RawTripInput, ResolvedPlace, TripPlan, ValidationError,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that end a planning run.
#[derive(Error, Debug)]
pub enum PlanTripError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    AiStage(#[from] AiStageError),

    #[error(
        "Not enough valid coordinates to draw a route (resolved {resolved}, need at least 2). Check that the place names are correct."
    )]
    InsufficientCoordinates { resolved: usize },
}

impl PlanTripError {
    /// Pipeline stage the error came from.
    pub fn stage(&self) -> &'static str {
        match self {
            PlanTripError::Validation(_) => "validation",
            PlanTripError::AiStage(_) => "sequencer",
            PlanTripError::InsufficientCoordinates { .. } => "resolver",
        }
    }
}

/// Input for the [`PlanTripUseCase`].
#[derive(Debug, Clone)]
pub struct PlanTripInput {
    /// Raw form fields; validated by the use case.
    pub form: RawTripInput,
    /// Provider selected by the user, already looked up in the registry.
    pub provider: ProviderEndpoint,
}

impl PlanTripInput {
    pub fn new(form: RawTripInput, provider: ProviderEndpoint) -> Self {
        Self { form, provider }
    }
}

/// Everything a successful run produced.
#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    pub provider: String,
    pub model: String,
    pub plan: TripPlan,
    /// Analysis after the analysis renderer ran.
    pub rendered_analysis: String,
    /// Resolved stops in visiting order.
    pub places: Vec<ResolvedPlace>,
    /// Non-fatal problems, in the order they were surfaced.
    pub warnings: Vec<String>,
    /// Whether the road line was drawn.
    pub routed: bool,
}

/// Session and outcome of one run.
///
/// The session is always handed back, including on failure, so the caller
/// can pass it to the next run.
#[derive(Debug)]
pub struct PlanRun {
    pub session: PlanSession,
    pub outcome: Result<PlanReport, PlanTripError>,
}

/// Use case for running the full planning pipeline.
pub struct PlanTripUseCase {
    sequencer: SequenceWaypointsUseCase,
    resolver: ResolveCoordinatesUseCase,
    presenter: PresentRouteUseCase,
    renderer: Arc<dyn AnalysisRenderer>,
    run_logger: Arc<dyn RunLogger>,
    params: PlannerParams,
}

impl PlanTripUseCase {
    pub fn new(
        gateway: Arc<dyn LlmGateway>,
        geocoder: Arc<dyn Geocoder>,
        surface: Arc<dyn MapSurface>,
        params: PlannerParams,
    ) -> Self {
        let pacer = Arc::new(FixedIntervalPacer::new(params.geocode_interval));
        Self {
            sequencer: SequenceWaypointsUseCase::new(gateway),
            resolver: ResolveCoordinatesUseCase::new(geocoder, pacer),
            presenter: PresentRouteUseCase::new(surface),
            renderer: Arc::new(RawAnalysis),
            run_logger: Arc::new(NoRunLogger),
            params,
        }
    }

    /// Replace the geocoding pacer.
    pub fn with_pacer(mut self, pacer: Arc<dyn RequestPacer>) -> Self {
        self.resolver = self.resolver.with_pacer(pacer);
        self
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn AnalysisRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Create with a run logger.
    pub fn with_run_logger(mut self, logger: Arc<dyn RunLogger>) -> Self {
        self.resolver = self.resolver.with_run_logger(logger.clone());
        self.run_logger = logger;
        self
    }

    /// Execute a planning run.
    ///
    /// `session` is the session returned by the previous run (or
    /// [`PlanSession::new`]). The map is only touched once validation passed.
    pub async fn execute(
        &self,
        session: PlanSession,
        input: PlanTripInput,
        progress: &dyn PlanProgressNotifier,
    ) -> PlanRun {
        let validated = match input.form.validate() {
            Ok(v) => v,
            Err(e) => {
                warn!("Input rejected: {}", e);
                return PlanRun {
                    session,
                    outcome: Err(e.into()),
                };
            }
        };

        let loading = LoadingGuard::show(
            progress,
            &format!("Asking {} to order the stops...", input.provider.id),
        );

        let (session, stale) = session.begin_run();
        self.presenter.clear(stale).await;

        info!(
            "Run {}: {} -> {} via {} waypoints",
            session.generation(),
            validated.query.start,
            validated.query.end,
            validated.query.waypoints.len()
        );

        let mut warnings = Vec::new();

        // Stage 1: AI ordering
        self.run_logger.log(RunEvent::PlanRequested {
            provider: input.provider.id.clone(),
            model: input.provider.model.clone(),
            waypoints: validated.query.waypoints.len(),
        });

        let sequence_input = SequenceWaypointsInput {
            query: validated.query.clone(),
            provider: input.provider.clone(),
            credential: validated.credential,
            temperature: self.params.temperature,
        };
        let plan = match self.sequencer.execute(&sequence_input).await {
            Ok(plan) => plan,
            Err(e) => return self.fail(session, e.into()),
        };

        let outcome = match self
            .params
            .waypoint_policy
            .apply(&validated.query.waypoints, plan.sorted_waypoints.clone())
        {
            Ok(outcome) => outcome,
            Err(mismatch) => {
                let error = AiStageError::from(SequencerFailure::from(mismatch));
                return self.fail(session, error.into());
            }
        };
        if let Some(mismatch) = &outcome.mismatch {
            warn!("{} (policy: {})", mismatch, self.params.waypoint_policy);
            let warning = PlanWarning::OrderingMismatch {
                details: mismatch.to_string(),
            };
            progress.on_warning(&warning);
            warnings.push(warning);
        }
        let plan = TripPlan::new(outcome.waypoints, plan.analysis);

        self.run_logger.log(RunEvent::PlanReceived {
            sorted_waypoints: plan.sorted_waypoints.clone(),
            analysis_bytes: plan.analysis.len(),
        });

        let rendered_analysis = self.renderer.render(&plan.analysis);
        progress.on_plan_ready(&plan, &rendered_analysis);

        // Stage 2: coordinates
        let names = validated.query.itinerary(&plan.sorted_waypoints);
        loading.update(&format!(
            "Searching coordinates for {} places (this takes a moment)...",
            names.len()
        ));

        let resolved = self.resolver.execute(&names, progress).await;
        warnings.extend(resolved.warnings.iter().cloned());

        if resolved.len() < 2 {
            return self.fail(
                session,
                PlanTripError::InsufficientCoordinates {
                    resolved: resolved.len(),
                },
            );
        }

        // Stage 3: map
        loading.update("Drawing the route...");
        let places = resolved.places;
        let presented = self
            .presenter
            .draw(session, places.clone(), self.params.line_style.clone())
            .await;
        if let Some(warning) = &presented.warning {
            progress.on_warning(warning);
            warnings.push(warning.clone());
        }

        self.run_logger.log(RunEvent::RouteDrawn {
            stops: places.len(),
            routed: presented.routed,
        });

        PlanRun {
            session: presented.session,
            outcome: Ok(PlanReport {
                provider: input.provider.id,
                model: input.provider.model,
                plan,
                rendered_analysis,
                places,
                warnings: warnings.iter().map(ToString::to_string).collect(),
                routed: presented.routed,
            }),
        }
    }

    fn fail(&self, session: PlanSession, error: PlanTripError) -> PlanRun {
        warn!("Run {} failed: {}", session.generation(), error);
        self.run_logger.log(RunEvent::RunFailed {
            stage: error.stage(),
            error: error.to_string(),
        });
        PlanRun {
            session,
            outcome: Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::geocoder::GeocodeError;
    use crate::ports::llm_gateway::{ChatRequest, GatewayError};
    use crate::ports::map_surface::{MapError, RouteRequest};
    use crate::ports::pacer::NoPacing;
    use async_trait::async_trait;
    use routewise_domain::{GeoPoint, RouteHandle, WaypointPolicy};
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    struct ScriptedGateway {
        replies: Mutex<VecDeque<Result<String, GatewayError>>>,
        calls: Mutex<usize>,
    }

    impl ScriptedGateway {
        fn new(replies: Vec<Result<String, GatewayError>>) -> Self {
            Self {
                replies: Mutex::new(VecDeque::from(replies)),
                calls: Mutex::new(0),
            }
        }

        fn replying(text: &str) -> Self {
            Self::new(vec![Ok(text.to_string())])
        }
    }

    #[async_trait]
    impl LlmGateway for ScriptedGateway {
        async fn complete(&self, _request: &ChatRequest) -> Result<String, GatewayError> {
            *self.calls.lock().unwrap() += 1;
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GatewayError::UnexpectedResponse("no reply".to_string())))
        }
    }

    struct TableGeocoder {
        table: HashMap<String, GeoPoint>,
        calls: Mutex<Vec<String>>,
    }

    impl TableGeocoder {
        fn new(entries: &[(&str, f64, f64)]) -> Self {
            Self {
                table: entries
                    .iter()
                    .map(|(name, lat, lon)| (name.to_string(), GeoPoint::new(*lat, *lon)))
                    .collect(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn beijing() -> Self {
            Self::new(&[
                ("Beijing Railway Station", 39.9029, 116.4270),
                ("Forbidden City", 39.9163, 116.3972),
                ("Temple of Heaven", 39.8822, 116.4066),
                ("Beijing Capital Airport", 40.0799, 116.6031),
            ])
        }
    }

    #[async_trait]
    impl Geocoder for TableGeocoder {
        async fn lookup(&self, name: &str) -> Result<Option<GeoPoint>, GeocodeError> {
            self.calls.lock().unwrap().push(name.to_string());
            if name == "Broken Place" {
                return Err(GeocodeError::ConnectionError("reset".to_string()));
            }
            Ok(self.table.get(name).copied())
        }
    }

    struct FakeSurface {
        fail_routing: bool,
        next_id: Mutex<u64>,
        added: Mutex<Vec<RouteRequest>>,
        removed: Mutex<Vec<RouteHandle>>,
    }

    impl FakeSurface {
        fn new(fail_routing: bool) -> Self {
            Self {
                fail_routing,
                next_id: Mutex::new(0),
                added: Mutex::new(Vec::new()),
                removed: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl MapSurface for FakeSurface {
        async fn add_route(&self, request: RouteRequest) -> Result<RouteHandle, MapError> {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            let handle = RouteHandle::new(*next);
            self.added.lock().unwrap().push(request);
            if self.fail_routing {
                return Err(MapError::RoutingFailed {
                    handle,
                    message: "routing service busy".to_string(),
                });
            }
            Ok(handle)
        }

        async fn remove_route(&self, handle: RouteHandle) -> Result<(), MapError> {
            self.removed.lock().unwrap().push(handle);
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<String>>,
        warnings: Mutex<Vec<PlanWarning>>,
    }

    impl RecordingProgress {
        fn hides(&self) -> usize {
            self.events
                .lock()
                .unwrap()
                .iter()
                .filter(|e| *e == "hide")
                .count()
        }
    }

    impl PlanProgressNotifier for RecordingProgress {
        fn show_status(&self, status: &str) {
            self.events.lock().unwrap().push(format!("show:{}", status));
        }
        fn hide(&self) {
            self.events.lock().unwrap().push("hide".to_string());
        }
        fn on_warning(&self, warning: &PlanWarning) {
            self.warnings.lock().unwrap().push(warning.clone());
        }
        fn on_plan_ready(&self, _plan: &TripPlan, rendered: &str) {
            self.events.lock().unwrap().push(format!("plan:{}", rendered));
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<&'static str>>,
    }

    impl RunLogger for RecordingLogger {
        fn log(&self, event: RunEvent) {
            self.events.lock().unwrap().push(event.event_type());
        }
    }

    // ==================== Helpers ====================

    struct Harness {
        gateway: Arc<ScriptedGateway>,
        geocoder: Arc<TableGeocoder>,
        surface: Arc<FakeSurface>,
        use_case: PlanTripUseCase,
    }

    fn harness(gateway: ScriptedGateway, geocoder: TableGeocoder, fail_routing: bool) -> Harness {
        harness_with(gateway, geocoder, fail_routing, PlannerParams::default())
    }

    fn harness_with(
        gateway: ScriptedGateway,
        geocoder: TableGeocoder,
        fail_routing: bool,
        params: PlannerParams,
    ) -> Harness {
        let gateway = Arc::new(gateway);
        let geocoder = Arc::new(geocoder);
        let surface = Arc::new(FakeSurface::new(fail_routing));
        let use_case =
            PlanTripUseCase::new(gateway.clone(), geocoder.clone(), surface.clone(), params)
                .with_pacer(Arc::new(NoPacing));
        Harness {
            gateway,
            geocoder,
            surface,
            use_case,
        }
    }

    fn beijing_input(waypoints: &str) -> PlanTripInput {
        PlanTripInput::new(
            RawTripInput::new(
                "sk-test",
                "Beijing Railway Station",
                "Beijing Capital Airport",
                waypoints,
            ),
            ProviderEndpoint::new(
                "deepseek",
                "https://api.deepseek.com/chat/completions",
                "deepseek-chat",
            ),
        )
    }

    const ORDERED_REPLY: &str =
        r#"{"sortedWaypoints":["Forbidden City","Temple of Heaven"],"analysis":"Metro line 2, then line 5."}"#;

    // ==================== Scenarios ====================

    #[tokio::test]
    async fn test_full_run_presents_four_ordered_points() {
        let h = harness(
            ScriptedGateway::replying(ORDERED_REPLY),
            TableGeocoder::beijing(),
            false,
        );
        let progress = RecordingProgress::default();

        let run = h
            .use_case
            .execute(
                PlanSession::new(),
                beijing_input("Temple of Heaven\nForbidden City"),
                &progress,
            )
            .await;

        let report = run.outcome.unwrap();
        assert!(report.routed);
        assert!(report.warnings.is_empty());
        assert_eq!(report.plan.analysis, "Metro line 2, then line 5.");

        let added = h.surface.added.lock().unwrap();
        assert_eq!(added.len(), 1);
        let names: Vec<_> = added[0].stops.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Beijing Railway Station",
                "Forbidden City",
                "Temple of Heaven",
                "Beijing Capital Airport"
            ]
        );
        assert_eq!(added[0].stops[0].point, GeoPoint::new(39.9029, 116.4270));
        assert_eq!(run.session.route(), Some(RouteHandle::new(1)));
        assert_eq!(run.session.generation(), 1);
        assert_eq!(progress.hides(), 1);
    }

    #[tokio::test]
    async fn test_fenced_reply_with_no_waypoints() {
        let h = harness(
            ScriptedGateway::replying("```json\n{\"sortedWaypoints\":[],\"analysis\":\"ok\"}\n```"),
            TableGeocoder::beijing(),
            false,
        );

        let run = h
            .use_case
            .execute(PlanSession::new(), beijing_input(""), &RecordingProgress::default())
            .await;

        let report = run.outcome.unwrap();
        assert!(report.plan.sorted_waypoints.is_empty());
        assert_eq!(report.places.len(), 2);
    }

    #[tokio::test]
    async fn test_one_failed_lookup_still_draws_two_points() {
        let h = harness(
            ScriptedGateway::replying(
                r#"{"sortedWaypoints":["Broken Place"],"analysis":"..."}"#,
            ),
            TableGeocoder::beijing(),
            false,
        );
        let progress = RecordingProgress::default();

        let run = h
            .use_case
            .execute(PlanSession::new(), beijing_input("Broken Place"), &progress)
            .await;

        let report = run.outcome.unwrap();
        assert_eq!(report.places.len(), 2);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("Broken Place"));
        assert_eq!(progress.warnings.lock().unwrap().len(), 1);
        assert_eq!(h.surface.added.lock().unwrap()[0].stops.len(), 2);
    }

    #[tokio::test]
    async fn test_html_404_reports_misconfigured_provider() {
        let h = harness(
            ScriptedGateway::new(vec![Err(GatewayError::ProviderMisconfigured {
                provider: "deepseek".to_string(),
                status: 404,
            })]),
            TableGeocoder::beijing(),
            false,
        );
        let progress = RecordingProgress::default();

        let run = h
            .use_case
            .execute(PlanSession::new(), beijing_input("Forbidden City"), &progress)
            .await;

        match run.outcome {
            Err(PlanTripError::AiStage(e)) => assert!(e.is_misconfigured()),
            other => panic!("expected AI stage error, got {other:?}"),
        }
        assert!(h.geocoder.calls.lock().unwrap().is_empty());
        assert!(h.surface.added.lock().unwrap().is_empty());
        assert_eq!(progress.hides(), 1);
    }

    #[tokio::test]
    async fn test_fewer_than_two_points_is_fatal_and_skips_presenter() {
        let h = harness(
            ScriptedGateway::replying(r#"{"sortedWaypoints":[],"analysis":""}"#),
            TableGeocoder::new(&[("Beijing Railway Station", 39.9, 116.4)]),
            false,
        );
        let progress = RecordingProgress::default();

        let run = h
            .use_case
            .execute(PlanSession::new(), beijing_input(""), &progress)
            .await;

        assert!(matches!(
            run.outcome,
            Err(PlanTripError::InsufficientCoordinates { resolved: 1 })
        ));
        assert!(h.surface.added.lock().unwrap().is_empty());
        assert_eq!(progress.hides(), 1);
    }

    #[tokio::test]
    async fn test_validation_error_never_starts_pipeline() {
        let h = harness(
            ScriptedGateway::replying(ORDERED_REPLY),
            TableGeocoder::beijing(),
            false,
        );
        let progress = RecordingProgress::default();
        let previous = PlanSession::new().with_route(RouteHandle::new(42));

        let mut input = beijing_input("Forbidden City");
        input.form.credential = "  ".to_string();
        let run = h.use_case.execute(previous.clone(), input, &progress).await;

        assert!(matches!(
            run.outcome,
            Err(PlanTripError::Validation(ValidationError::MissingCredential))
        ));
        assert_eq!(run.session, previous);
        assert_eq!(*h.gateway.calls.lock().unwrap(), 0);
        assert!(h.surface.removed.lock().unwrap().is_empty());
        assert!(progress.events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_second_run_replaces_previous_route() {
        let h = harness(
            ScriptedGateway::new(vec![
                Ok(ORDERED_REPLY.to_string()),
                Ok(ORDERED_REPLY.to_string()),
            ]),
            TableGeocoder::beijing(),
            false,
        );
        let progress = RecordingProgress::default();
        let input = beijing_input("Forbidden City\nTemple of Heaven");

        let first = h
            .use_case
            .execute(PlanSession::new(), input.clone(), &progress)
            .await;
        let second = h.use_case.execute(first.session, input, &progress).await;

        assert!(second.outcome.is_ok());
        assert_eq!(*h.surface.removed.lock().unwrap(), vec![RouteHandle::new(1)]);
        assert_eq!(second.session.route(), Some(RouteHandle::new(2)));
        assert_eq!(second.session.generation(), 2);
    }

    #[tokio::test]
    async fn test_failed_run_still_clears_previous_route() {
        let h = harness(
            ScriptedGateway::replying("no json here"),
            TableGeocoder::beijing(),
            false,
        );
        let previous = PlanSession::new().with_route(RouteHandle::new(5));

        let run = h
            .use_case
            .execute(previous, beijing_input(""), &RecordingProgress::default())
            .await;

        assert!(run.outcome.is_err());
        assert_eq!(*h.surface.removed.lock().unwrap(), vec![RouteHandle::new(5)]);
        assert!(run.session.route().is_none());
    }

    #[tokio::test]
    async fn test_routing_failure_is_warning_not_error() {
        let h = harness(
            ScriptedGateway::replying(ORDERED_REPLY),
            TableGeocoder::beijing(),
            true,
        );
        let progress = RecordingProgress::default();

        let run = h
            .use_case
            .execute(
                PlanSession::new(),
                beijing_input("Forbidden City\nTemple of Heaven"),
                &progress,
            )
            .await;

        let report = run.outcome.unwrap();
        assert!(!report.routed);
        assert_eq!(report.places.len(), 4);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(run.session.route(), Some(RouteHandle::new(1)));
        assert!(matches!(
            progress.warnings.lock().unwrap()[0],
            PlanWarning::RouteNotDrawn { .. }
        ));
    }

    #[tokio::test]
    async fn test_reject_policy_fails_on_renamed_waypoint() {
        let h = harness_with(
            ScriptedGateway::replying(
                r#"{"sortedWaypoints":["The Forbidden City"],"analysis":""}"#,
            ),
            TableGeocoder::beijing(),
            false,
            PlannerParams::default().with_waypoint_policy(WaypointPolicy::Reject),
        );

        let run = h
            .use_case
            .execute(
                PlanSession::new(),
                beijing_input("Forbidden City"),
                &RecordingProgress::default(),
            )
            .await;

        match run.outcome {
            Err(PlanTripError::AiStage(e)) => {
                assert!(matches!(e.failure(), SequencerFailure::OrderingMismatch(_)))
            }
            other => panic!("expected ordering mismatch, got {other:?}"),
        }
        assert!(h.geocoder.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_repair_policy_restores_requested_waypoints() {
        let h = harness_with(
            ScriptedGateway::replying(
                r#"{"sortedWaypoints":["Temple of Heaven","Summer Palace"],"analysis":""}"#,
            ),
            TableGeocoder::beijing(),
            false,
            PlannerParams::default().with_waypoint_policy(WaypointPolicy::Repair),
        );
        let progress = RecordingProgress::default();

        let run = h
            .use_case
            .execute(
                PlanSession::new(),
                beijing_input("Forbidden City\nTemple of Heaven"),
                &progress,
            )
            .await;

        let report = run.outcome.unwrap();
        assert_eq!(
            report.plan.sorted_waypoints,
            vec!["Temple of Heaven", "Forbidden City"]
        );
        assert!(matches!(
            progress.warnings.lock().unwrap()[0],
            PlanWarning::OrderingMismatch { .. }
        ));
        assert!(!h
            .geocoder
            .calls
            .lock()
            .unwrap()
            .contains(&"Summer Palace".to_string()));
    }

    #[tokio::test]
    async fn test_trust_policy_geocodes_model_output_as_is() {
        let h = harness(
            ScriptedGateway::replying(
                r#"{"sortedWaypoints":["Summer Palace"],"analysis":""}"#,
            ),
            TableGeocoder::beijing(),
            false,
        );

        let run = h
            .use_case
            .execute(
                PlanSession::new(),
                beijing_input("Forbidden City"),
                &RecordingProgress::default(),
            )
            .await;

        let report = run.outcome.unwrap();
        assert_eq!(report.places.len(), 2);
        assert_eq!(report.warnings.len(), 2);
        assert_eq!(
            h.geocoder.calls.lock().unwrap()[1],
            "Summer Palace".to_string()
        );
    }

    #[tokio::test]
    async fn test_analysis_is_rendered_before_geocoding() {
        struct Upper;
        impl AnalysisRenderer for Upper {
            fn render(&self, markdown: &str) -> String {
                markdown.to_uppercase()
            }
        }

        let h = harness(
            ScriptedGateway::replying(ORDERED_REPLY),
            TableGeocoder::beijing(),
            false,
        );
        let use_case = h.use_case.with_renderer(Arc::new(Upper));
        let progress = RecordingProgress::default();

        let run = use_case
            .execute(
                PlanSession::new(),
                beijing_input("Forbidden City\nTemple of Heaven"),
                &progress,
            )
            .await;

        assert_eq!(
            run.outcome.unwrap().rendered_analysis,
            "METRO LINE 2, THEN LINE 5."
        );
        let events = progress.events.lock().unwrap();
        let plan_at = events.iter().position(|e| e.starts_with("plan:")).unwrap();
        let search_at = events
            .iter()
            .position(|e| e.starts_with("show:Searching place"))
            .unwrap();
        assert!(plan_at < search_at);
    }

    #[tokio::test]
    async fn test_run_events_are_logged() {
        let logger = Arc::new(RecordingLogger::default());
        let h = harness(
            ScriptedGateway::replying(ORDERED_REPLY),
            TableGeocoder::beijing(),
            false,
        );
        let use_case = h.use_case.with_run_logger(logger.clone());

        let run = use_case
            .execute(
                PlanSession::new(),
                beijing_input("Forbidden City\nTemple of Heaven"),
                &RecordingProgress::default(),
            )
            .await;

        assert!(run.outcome.is_ok());
        assert_eq!(
            *logger.events.lock().unwrap(),
            vec![
                "plan_requested",
                "plan_received",
                "place_resolved",
                "place_resolved",
                "place_resolved",
                "place_resolved",
                "route_drawn"
            ]
        );
    }
}
