//! Logging for the todoctl CLI
//!
//! `RUST_LOG` overrides the level picked by `--debug`. Built with the
//! `telemetry` feature, `--otel` also exports spans to
//! `OTEL_EXPORTER_OTLP_ENDPOINT` (default `http://localhost:4317`).

use anyhow::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    pub debug: bool,
    pub otel: bool,
}

impl TracingConfig {
    fn filter(&self) -> EnvFilter {
        let fallback = if self.debug { "debug" } else { "info" };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
    }
}

/// Install the global subscriber. Fails if one is already set.
pub fn init(config: &TracingConfig) -> Result<()> {
    let console = fmt::layer().with_target(config.debug).compact();
    let registry = tracing_subscriber::registry()
        .with(config.filter())
        .with(console);

    #[cfg(feature = "telemetry")]
    if config.otel {
        registry.with(otel::layer()?).try_init()?;
        tracing::info!(service = otel::SERVICE_NAME, "exporting spans over OTLP");
        return Ok(());
    }

    #[cfg(not(feature = "telemetry"))]
    if config.otel {
        eprintln!("warning: --otel requires the `telemetry` feature; using console logging");
    }

    registry.try_init()?;
    Ok(())
}

/// Flush spans still queued for export.
pub fn shutdown_otel() {
    #[cfg(feature = "telemetry")]
    otel::shutdown();
}

#[cfg(feature = "telemetry")]
mod otel {
    use anyhow::{Context, Result};
    use opentelemetry::trace::TracerProvider as _;
    use opentelemetry::KeyValue;
    use opentelemetry_otlp::WithExportConfig;
    use opentelemetry_sdk::trace::{Tracer, TracerProvider};
    use opentelemetry_sdk::{runtime, Resource};
    use tracing::Subscriber;
    use tracing_opentelemetry::OpenTelemetryLayer;
    use tracing_subscriber::registry::LookupSpan;

    pub const SERVICE_NAME: &str = "todoctl";

    pub fn layer<S>() -> Result<OpenTelemetryLayer<S, Tracer>>
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        let endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .unwrap_or_else(|_| "http://localhost:4317".to_owned());

        let exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(&endpoint)
            .build()
            .with_context(|| format!("Failed to create OTLP exporter for {}", endpoint))?;

        let provider = TracerProvider::builder()
            .with_batch_exporter(exporter, runtime::Tokio)
            .with_resource(Resource::new(vec![KeyValue::new(
                "service.name",
                SERVICE_NAME,
            )]))
            .build();
        let tracer = provider.tracer(SERVICE_NAME);

        // Held globally until shutdown() flushes it
        let _ = opentelemetry::global::set_tracer_provider(provider);

        Ok(tracing_opentelemetry::layer().with_tracer(tracer))
    }

    pub fn shutdown() {
        opentelemetry::global::shutdown_tracer_provider();
    }
}
