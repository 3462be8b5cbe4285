//! # Prometheus Metrics
//!
//! Operational metrics for the registry node, scraped at `/metrics` on the
//! configured metrics port.
//!
//! All metrics live in a dedicated [`prometheus::Registry`] with the
//! `starledger` prefix so they do not collide with the default global one.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};
use std::sync::Arc;

use starledger_protocol::StarRegistry;

/// Holds all Prometheus metric handles for the node.
#[derive(Clone)]
pub struct RegistryMetrics {
    registry: Registry,
    /// Star claims committed to the ledger.
    pub records_appended_total: IntCounter,
    /// Rejected submissions, labelled by error kind.
    pub submissions_rejected_total: IntCounterVec,
    /// Height of the chain tip, refreshed from the ledger on every scrape.
    pub chain_height: IntGauge,
}

impl RegistryMetrics {
    /// Creates and registers all metrics. Call once at startup.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new_custom(Some("starledger".into()), None)?;

        let records_appended_total = IntCounter::new(
            "records_appended_total",
            "Total number of star claims committed to the ledger",
        )?;
        registry.register(Box::new(records_appended_total.clone()))?;

        let submissions_rejected_total = IntCounterVec::new(
            Opts::new(
                "submissions_rejected_total",
                "Total number of rejected star submissions by reason",
            ),
            &["reason"],
        )?;
        registry.register(Box::new(submissions_rejected_total.clone()))?;

        let chain_height = IntGauge::new("chain_height", "Height of the chain tip")?;
        registry.register(Box::new(chain_height.clone()))?;

        Ok(Self {
            registry,
            records_appended_total,
            submissions_rejected_total,
            chain_height,
        })
    }

    /// Record the current tip height. A chain without genesis reports -1.
    pub fn observe_height(&self, height: Option<u64>) {
        let value = height.map_or(-1, |h| i64::try_from(h).unwrap_or(i64::MAX));
        self.chain_height.set(value);
    }

    /// Encodes all registered metrics into the Prometheus text exposition format.
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

/// Shared metrics state passed to axum handlers.
pub type SharedMetrics = Arc<RegistryMetrics>;

/// State of the metrics router: the metric handles plus the registry the
/// chain gauge is read from.
#[derive(Clone)]
pub struct MetricsState {
    pub metrics: SharedMetrics,
    pub registry: Arc<StarRegistry>,
}

/// Router serving `GET /metrics`, bound to the metrics port.
pub fn create_metrics_router(state: MetricsState) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

/// Axum handler that renders `/metrics` in Prometheus text format.
async fn metrics_handler(State(state): State<MetricsState>) -> impl IntoResponse {
    let metrics = &state.metrics;
    metrics.observe_height(state.registry.height());

    match metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to encode metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "metrics encoding failed").into_response()
        }
    }
}
