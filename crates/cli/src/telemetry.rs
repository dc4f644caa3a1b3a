//! Observability wiring.
//!
//! Installs a `tracing-subscriber` registry with:
//!
//! - an [`EnvFilter`] from `RUST_LOG` (default `info`);
//! - a JSON formatting layer writing to stderr, so stdout carries only the
//!   human-readable result lines;
//! - a `tracing-opentelemetry` layer exporting spans over OTLP/gRPC, enabled
//!   only when `OTEL_EXPORTER_OTLP_ENDPOINT` is set.

use anyhow::{Context, Result};
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::{runtime, trace::TracerProvider};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable that switches on OTLP span export.
pub const OTLP_ENDPOINT_VAR: &str = "OTEL_EXPORTER_OTLP_ENDPOINT";

const SERVICE_TRACER: &str = "synapse-spark";

/// Keeps the tracer provider alive so buffered spans can be flushed on exit.
pub struct Telemetry {
    provider: Option<TracerProvider>,
}

impl Telemetry {
    /// Flushes and stops the OTLP exporter, if one was installed.
    pub fn shutdown(self) {
        if let Some(provider) = self.provider {
            if let Err(e) = provider.shutdown() {
                eprintln!("failed to flush OpenTelemetry spans: {e}");
            }
        }
    }
}

/// Installs the global subscriber. Must be called from within the tokio runtime.
pub fn init() -> Result<Telemetry> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(std::io::stderr);

    let provider = if std::env::var_os(OTLP_ENDPOINT_VAR).is_some() {
        let exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .build()
            .context("failed to build the OTLP span exporter")?;
        Some(
            TracerProvider::builder()
                .with_batch_exporter(exporter, runtime::Tokio)
                .build(),
        )
    } else {
        None
    };

    let otel_layer = provider
        .as_ref()
        .map(|p| tracing_opentelemetry::layer().with_tracer(p.tracer(SERVICE_TRACER)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init()
        .context("failed to install the tracing subscriber")?;

    Ok(Telemetry { provider })
}
