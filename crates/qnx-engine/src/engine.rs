//! The orchestration surface: initialize once, update KPIs, query state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use qnx_config::QnxConfig;
use qnx_core::snapshot::{ActionPlan, EngineSnapshot, UpdateOutcome};

use crate::error::{EngineError, InitializationError};
use crate::ingest::{self, LoadReport};
use crate::loader::DataLoader;
use crate::model::{Model, ScoringPolicy};

#[derive(Debug)]
struct Loaded {
    model: Model,
    report: LoadReport,
}

/// Clears the in-flight flag when initialization ends, including when the
/// initializing future is dropped mid-load.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Scores organizational coherence over the dodecahedron.
///
/// Constructed empty, populated once by [`initialize`](Self::initialize),
/// then mutated only through [`update_kpi`](Self::update_kpi). All scoring is
/// synchronous; the state lock is never held across the loader await.
#[derive(Debug)]
pub struct CoherenceEngine {
    policy: ScoringPolicy,
    load_timeout: Duration,
    state: RwLock<Option<Loaded>>,
    initializing: AtomicBool,
}

impl Default for CoherenceEngine {
    fn default() -> Self {
        Self::new(&QnxConfig::default())
    }
}

impl CoherenceEngine {
    #[must_use]
    pub fn new(config: &QnxConfig) -> Self {
        Self::with_policy(ScoringPolicy::from(&config.scoring), config.data.load_timeout())
    }

    #[must_use]
    pub const fn with_policy(policy: ScoringPolicy, load_timeout: Duration) -> Self {
        Self {
            policy,
            load_timeout,
            state: RwLock::new(None),
            initializing: AtomicBool::new(false),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<Loaded>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Loaded>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetch rows from `loader` and build the full model.
    ///
    /// On any failure the engine stays uninitialized and may be retried.
    ///
    /// # Errors
    ///
    /// - [`EngineError::AlreadyInitializing`] if another call is in flight.
    /// - [`EngineError::AlreadyInitialized`] after a successful call.
    /// - [`EngineError::Initialization`] for loader failures, timeouts, and
    ///   malformed topology.
    pub async fn initialize<L>(&self, loader: &L) -> Result<LoadReport, EngineError>
    where
        L: DataLoader + ?Sized,
    {
        if self
            .initializing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(EngineError::AlreadyInitializing);
        }
        let _in_flight = InFlight(&self.initializing);

        if self.is_initialized() {
            return Err(EngineError::AlreadyInitialized);
        }

        let (kpi_rows, topology) = tokio::time::timeout(self.load_timeout, async {
            tokio::try_join!(loader.load_kpi_rows(), loader.load_topology())
        })
        .await
        .map_err(|_| InitializationError::Timeout(self.load_timeout))?
        .map_err(InitializationError::Loader)?;

        let mut report = LoadReport::default();
        let records = ingest::parse_kpis(&kpi_rows, &mut report);
        let edges = ingest::parse_edges(&topology.edges, &mut report)?;
        let vertices = ingest::parse_vertices(&topology.vertices, &mut report)?;
        ingest::validate_topology(&edges, &vertices)?;

        let model = Model::build(self.policy.clone(), records, edges, vertices);
        for face in model.faces().filter(|face| face.is_empty()) {
            report.empty_faces.push(face.id());
            tracing::warn!(face = %face.id(), name = face.name(), "face has no KPIs; energy is 0");
        }

        tracing::info!(
            kpis = report.kpis_loaded,
            skipped_rows = report.skipped_rows(),
            empty_faces = report.empty_faces.len(),
            global_coherence = model.global_coherence(),
            "coherence engine initialized"
        );

        let mut state = self.write();
        if state.is_some() {
            return Err(EngineError::AlreadyInitialized);
        }
        *state = Some(Loaded {
            model,
            report: report.clone(),
        });
        Ok(report)
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.read().is_some()
    }

    /// Set a KPI's value and propagate to its face, incident edges and
    /// vertices, and the global score.
    ///
    /// # Errors
    ///
    /// [`EngineError::NotFound`] if no KPI has `kpi_id` (including before
    /// initialization); [`EngineError::InvalidValue`] for NaN or infinite
    /// values. Neither mutates state.
    pub fn update_kpi(&self, kpi_id: &str, value: f64) -> Result<UpdateOutcome, EngineError> {
        let mut state = self.write();
        let loaded = state
            .as_mut()
            .ok_or_else(|| EngineError::kpi_not_found(kpi_id))?;
        let outcome = loaded.model.update_kpi(kpi_id, value)?;
        tracing::debug!(
            kpi_id,
            value,
            face = %outcome.face_id,
            score = outcome.normalized_score,
            global_coherence = outcome.global_coherence,
            "KPI updated"
        );
        Ok(outcome)
    }

    /// Cached global coherence in `[0, 1]`; 0 before initialization.
    #[must_use]
    pub fn global_coherence(&self) -> f64 {
        self.read()
            .as_ref()
            .map_or(0.0, |loaded| loaded.model.global_coherence())
    }

    /// # Errors
    ///
    /// [`EngineError::NotInitialized`] before a successful initialization.
    pub fn state(&self) -> Result<EngineSnapshot, EngineError> {
        self.read()
            .as_ref()
            .map(|loaded| loaded.model.snapshot())
            .ok_or(EngineError::NotInitialized)
    }

    /// Highest-leverage single KPI improvement; `None` when every KPI is ideal.
    ///
    /// # Errors
    ///
    /// [`EngineError::NotInitialized`] before a successful initialization.
    pub fn action_plan(&self) -> Result<Option<ActionPlan>, EngineError> {
        self.read()
            .as_ref()
            .map(|loaded| loaded.model.action_plan())
            .ok_or(EngineError::NotInitialized)
    }

    /// What the successful load kept and skipped.
    #[must_use]
    pub fn load_report(&self) -> Option<LoadReport> {
        self.read().as_ref().map(|loaded| loaded.report.clone())
    }
}
