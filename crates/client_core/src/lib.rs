//! Client-side data orchestration for the supply-risk dashboard.
//!
//! The orchestrator owns the canonical copies of the supplier and warehouse
//! data computed by the backend pipeline service, drives the fetch lifecycle
//! (initial load, per-city reload, pipeline re-run), and publishes immutable
//! [`DashboardState`] snapshots over a watch channel. Presentation layers
//! (table, dashboard, map, warehouse views) subscribe and re-render from each
//! snapshot; they never mutate state directly, only request changes through
//! [`DashboardOrchestrator::select_city`] and
//! [`DashboardOrchestrator::run_pipeline_and_reload`].

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use shared::{
    domain::{SupplierRecord, WarehouseRecord},
    error::BackendError,
    protocol::BestSuppliersResponse,
};
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

/// The pipeline-trigger endpoint can take a long while; anything beyond this
/// is surfaced as a transport failure.
const BACKEND_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Seam to the backend pipeline service.
#[async_trait]
pub trait RiskBackend: Send + Sync {
    /// Fetch the supplier/warehouse payload, optionally filtered by a
    /// distribution-center city. `None` leaves the choice to the backend.
    async fn fetch_suppliers(
        &self,
        dc_city: Option<&str>,
    ) -> Result<BestSuppliersResponse, BackendError>;

    /// Trigger a pipeline re-run. Success is judged by HTTP status alone;
    /// the response body carries no data the client consumes.
    async fn run_pipeline(&self) -> Result<(), BackendError>;
}

/// [`RiskBackend`] over plain HTTP, talking to the two REST endpoints the
/// backend exposes.
pub struct HttpRiskBackend {
    http: Client,
    base_url: String,
}

impl HttpRiskBackend {
    pub fn new(base_url: impl Into<String>) -> Result<Self, BackendError> {
        let http = Client::builder()
            .timeout(BACKEND_REQUEST_TIMEOUT)
            .build()
            .map_err(|err| BackendError::Transport(err.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }
}

fn transport(err: reqwest::Error) -> BackendError {
    BackendError::Transport(err.to_string())
}

#[async_trait]
impl RiskBackend for HttpRiskBackend {
    async fn fetch_suppliers(
        &self,
        dc_city: Option<&str>,
    ) -> Result<BestSuppliersResponse, BackendError> {
        let mut request = self.http.get(format!("{}/best-suppliers", self.base_url));
        if let Some(city) = dc_city {
            request = request.query(&[("dc_city", city)]);
        }

        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status {
                status: status.as_u16(),
            });
        }
        response
            .json()
            .await
            .map_err(|err| BackendError::Decode(err.to_string()))
    }

    async fn run_pipeline(&self) -> Result<(), BackendError> {
        let response = self
            .http
            .get(format!("{}/run-pipeline", self.base_url))
            .send()
            .await
            .map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

/// Lifecycle stage of the one-shot initial load. City-change reactions are
/// honored only in `Ready`; the stage reaches `Ready` exactly once, whether
/// or not the initial fetch itself succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStage {
    #[default]
    NotStarted,
    Loading,
    Ready,
}

/// Immutable snapshot published to presentation consumers.
///
/// The four backend-sourced collections are always replaced together from a
/// single response payload. `version` increments on every published
/// replacement; `refreshed_at` records the last successful fetch.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub best_suppliers: Vec<SupplierRecord>,
    pub all_suppliers: Vec<SupplierRecord>,
    pub warehouses: Vec<WarehouseRecord>,
    pub unique_cities: Vec<String>,
    pub selected_city: Option<String>,
    pub is_loading: bool,
    pub status: String,
    pub load_stage: LoadStage,
    pub version: u64,
    pub refreshed_at: Option<DateTime<Utc>>,
}

struct OrchestratorInner {
    state: DashboardState,
    /// Sequence id of the most recently issued supplier fetch. A response is
    /// applied only if its fetch still carries this id; earlier responses
    /// arriving late are discarded instead of overwriting newer data.
    latest_fetch_seq: u64,
}

impl OrchestratorInner {
    fn begin_fetch(&mut self) -> u64 {
        self.latest_fetch_seq += 1;
        self.latest_fetch_seq
    }

    fn is_latest(&self, seq: u64) -> bool {
        self.latest_fetch_seq == seq
    }
}

/// Owns the fetch lifecycle and the canonical dashboard state.
pub struct DashboardOrchestrator {
    backend: Arc<dyn RiskBackend>,
    inner: Mutex<OrchestratorInner>,
    state_tx: watch::Sender<DashboardState>,
}

impl DashboardOrchestrator {
    pub fn new(backend: Arc<dyn RiskBackend>) -> Arc<Self> {
        let state = DashboardState::default();
        let (state_tx, _) = watch::channel(state.clone());
        Arc::new(Self {
            backend,
            inner: Mutex::new(OrchestratorInner {
                state,
                latest_fetch_seq: 0,
            }),
            state_tx,
        })
    }

    /// Subscribe to snapshot replacements. The receiver always observes the
    /// latest snapshot; intermediate ones may be skipped.
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.state_tx.subscribe()
    }

    pub async fn snapshot(&self) -> DashboardState {
        self.inner.lock().await.state.clone()
    }

    fn publish(&self, inner: &mut OrchestratorInner) {
        inner.state.version += 1;
        self.state_tx.send_replace(inner.state.clone());
    }

    /// Replace the four backend-sourced collections atomically and repair
    /// `selected_city` against the new city list: an already-selected city
    /// is kept if still present, otherwise selection falls back to the first
    /// city returned (or none).
    fn apply_payload(state: &mut DashboardState, payload: BestSuppliersResponse) {
        state.best_suppliers = payload.best_suppliers;
        state.all_suppliers = payload.all_suppliers;
        state.warehouses = payload.warehouses;
        state.unique_cities = payload.unique_cities;

        let selection_still_valid = state
            .selected_city
            .as_deref()
            .map(|city| state.unique_cities.iter().any(|c| c == city))
            .unwrap_or(false);
        if !selection_still_valid {
            state.selected_city = state.unique_cities.first().cloned();
        }
        state.refreshed_at = Some(Utc::now());
    }

    /// One-shot startup load with no city filter. Repeated calls are ignored.
    ///
    /// Whether the fetch succeeds or fails, the load stage advances to
    /// `Ready` so that city selections are honored from here on; a failed
    /// initial load leaves the (empty) data collections untouched and only
    /// reports through the status message.
    pub async fn initial_load(&self) {
        let seq = {
            let mut inner = self.inner.lock().await;
            if inner.state.load_stage != LoadStage::NotStarted {
                warn!("initial load requested more than once; ignoring");
                return;
            }
            inner.state.load_stage = LoadStage::Loading;
            inner.state.is_loading = true;
            inner.state.status = "Loading initial data.".to_string();
            let seq = inner.begin_fetch();
            self.publish(&mut inner);
            seq
        };

        let result = self.backend.fetch_suppliers(None).await;

        let mut inner = self.inner.lock().await;
        inner.state.load_stage = LoadStage::Ready;
        if !inner.is_latest(seq) {
            debug!(seq, "discarding stale initial-load response");
            self.publish(&mut inner);
            return;
        }
        match result {
            Ok(payload) => {
                Self::apply_payload(&mut inner.state, payload);
                info!(
                    suppliers = inner.state.all_suppliers.len(),
                    cities = inner.state.unique_cities.len(),
                    "initial data loaded"
                );
                inner.state.status = format!(
                    "Loaded {} suppliers across {} distribution-center cities.",
                    inner.state.all_suppliers.len(),
                    inner.state.unique_cities.len()
                );
            }
            Err(err) => {
                warn!(error = %err, "initial load failed");
                inner.state.status = format!("Failed to load initial data: {err}");
            }
        }
        inner.state.is_loading = false;
        self.publish(&mut inner);
    }

    /// React to the user picking a distribution-center city.
    ///
    /// Idempotent for the already-selected city, a no-op before the initial
    /// load has completed, and defensively ignores cities not in the current
    /// list (a well-behaved presentation layer only offers valid members).
    pub async fn select_city(&self, city: &str) {
        {
            let mut inner = self.inner.lock().await;
            if inner.state.load_stage != LoadStage::Ready {
                debug!(city, "ignoring city selection before initial load completed");
                return;
            }
            if inner.state.selected_city.as_deref() == Some(city) {
                return;
            }
            if !inner.state.unique_cities.iter().any(|c| c == city) {
                warn!(city, "ignoring selection of unknown distribution-center city");
                return;
            }
            inner.state.selected_city = Some(city.to_string());
            self.publish(&mut inner);
        }

        self.reload(Some(city.to_string())).await;
    }

    /// Fetch supplier data filtered by `city` (or the backend default) and
    /// replace the published snapshot. Shared by [`Self::select_city`] and
    /// the post-pipeline refresh.
    pub async fn reload(&self, city: Option<String>) {
        let seq = {
            let mut inner = self.inner.lock().await;
            inner.state.is_loading = true;
            inner.state.status = match &city {
                Some(c) => format!("Loading data for {c}."),
                None => "Loading data for the default distribution center.".to_string(),
            };
            let seq = inner.begin_fetch();
            self.publish(&mut inner);
            seq
        };

        let result = self.backend.fetch_suppliers(city.as_deref()).await;

        let mut inner = self.inner.lock().await;
        if !inner.is_latest(seq) {
            // A newer fetch owns the loading flag and the next snapshot.
            debug!(seq, "discarding stale supplier fetch response");
            return;
        }
        match result {
            Ok(payload) => {
                Self::apply_payload(&mut inner.state, payload);
                inner.state.status = match inner.state.selected_city.as_deref() {
                    Some(c) => format!("Data refreshed for {c}."),
                    None => "Data refreshed.".to_string(),
                };
            }
            Err(err) => {
                warn!(error = %err, "supplier data reload failed");
                inner.state.status = format!("Failed to refresh data: {err}");
            }
        }
        inner.state.is_loading = false;
        self.publish(&mut inner);
    }

    /// Trigger a backend pipeline re-run, then refresh with the currently
    /// selected city. The selection may no longer exist after the re-run;
    /// [`Self::reload`] repairs it against the fresh city list.
    pub async fn run_pipeline_and_reload(&self) {
        {
            let mut inner = self.inner.lock().await;
            inner.state.is_loading = true;
            inner.state.status = "Running pipeline.".to_string();
            self.publish(&mut inner);
        }

        if let Err(err) = self.backend.run_pipeline().await {
            warn!(error = %err, "pipeline trigger failed");
            let mut inner = self.inner.lock().await;
            inner.state.status = format!("Pipeline run failed: {err}");
            inner.state.is_loading = false;
            self.publish(&mut inner);
            return;
        }

        let selected = {
            let mut inner = self.inner.lock().await;
            inner.state.status = "Pipeline complete, fetching updated data.".to_string();
            self.publish(&mut inner);
            inner.state.selected_city.clone()
        };
        self.reload(selected).await;
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
