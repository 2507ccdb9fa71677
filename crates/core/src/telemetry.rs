//! OpenTelemetry export for logs and traces, behind the `otel` feature.
//!
//! Configures a tracer provider and a logger provider that ship data to an
//! OTLP-compatible backend over HTTP, tagged with the service name, version,
//! run id, and hostname. The endpoint comes from the
//! `OTEL_EXPORTER_OTLP_ENDPOINT` environment variable or, failing that, the
//! `otlp-endpoint` logging setting; with neither set, export is disabled
//! and [`init_telemetry`] returns `Ok(None)`.

use crate::settings::LoggingSettings;
use anyhow::{Context as ResultExt, Error};
use gethostname::gethostname;
use opentelemetry::{global, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::logs::{BatchLogProcessor, LoggerProvider as SdkLoggerProvider};
use opentelemetry_sdk::trace::{
    BatchSpanProcessor, Config as TraceConfig, TracerProvider as SdkTracerProvider,
};
use opentelemetry_sdk::{runtime, Resource};
use std::sync::{mpsc, OnceLock};
use std::thread;
use std::time::Duration;

const GIT_VERSION: &str = env!("GIT_VERSION");
const SERVICE_NAME: &str = "pagedeck";
static TRACER_PROVIDER: OnceLock<SdkTracerProvider> = OnceLock::new();
static LOGGER_PROVIDER: OnceLock<SdkLoggerProvider> = OnceLock::new();

/// Initializes OpenTelemetry export.
///
/// Returns the log-bridge layer to attach to the tracing subscriber, or
/// `None` when no OTLP endpoint is configured.
///
/// # Errors
///
/// Fails when an exporter or provider cannot be built.
pub fn init_telemetry(
    settings: &LoggingSettings,
    run_id: &str,
) -> Result<
    Option<
        opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge<
            SdkLoggerProvider,
            opentelemetry_sdk::logs::Logger,
        >,
    >,
    Error,
> {
    let endpoint = match otel_endpoint(settings) {
        Some(endpoint) => endpoint,
        None => return Ok(None),
    };

    let hostname = gethostname().to_string_lossy().into_owned();

    let resource = Resource::new([
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.version", GIT_VERSION),
        KeyValue::new("pagedeck.run_id", run_id.to_string()),
        KeyValue::new("hostname", hostname),
    ]);

    let tracer_provider = build_tracer_provider(&endpoint, resource.clone())?;
    let logger_provider = build_logger_provider(&endpoint, resource)?;

    let tracer_provider = TRACER_PROVIDER.get_or_init(|| tracer_provider);
    let logger_provider = LOGGER_PROVIDER.get_or_init(|| logger_provider);

    global::set_tracer_provider(tracer_provider.clone());

    let layer =
        opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge::new(logger_provider);

    println!(
        "Initialized OpenTelemetry telemetry with endpoint {}",
        endpoint
    );

    Ok(Some(layer))
}

/// Runs `shutdown` on a helper thread so connection failures can't block
/// process exit past `timeout`.
fn shutdown_with_timeout(shutdown: impl FnOnce() + Send + 'static, timeout: Duration) {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        shutdown();
        let _ = tx.send(());
    });

    let _ = rx.recv_timeout(timeout);
}

/// Flushes and shuts down the telemetry providers.
///
/// Idempotent; safe to call at every exit path.
pub fn shutdown_telemetry() {
    let timeout = Duration::from_millis(1500);

    if let Some(provider) = TRACER_PROVIDER.get() {
        shutdown_with_timeout(
            {
                move || {
                    let _ = provider.shutdown();
                }
            },
            timeout,
        );
    }

    if let Some(provider) = LOGGER_PROVIDER.get() {
        shutdown_with_timeout(
            {
                move || {
                    let _ = provider.shutdown();
                }
            },
            timeout,
        );
    }

    global::shutdown_tracer_provider();
}

fn otel_endpoint(settings: &LoggingSettings) -> Option<String> {
    if let Ok(value) = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT") {
        return Some(value);
    }

    settings.otlp_endpoint.clone()
}

fn build_tracer_provider(endpoint: &str, resource: Resource) -> Result<SdkTracerProvider, Error> {
    let exporter = opentelemetry_otlp::new_exporter()
        .http()
        .with_endpoint(endpoint)
        .build_span_exporter()
        .context("can't build otlp span exporter")?;
    let processor = BatchSpanProcessor::builder(exporter, runtime::TokioCurrentThread).build();
    let config = TraceConfig::default().with_resource(resource);

    Ok(SdkTracerProvider::builder()
        .with_span_processor(processor)
        .with_config(config)
        .build())
}

fn build_logger_provider(endpoint: &str, resource: Resource) -> Result<SdkLoggerProvider, Error> {
    let exporter = opentelemetry_otlp::new_exporter()
        .http()
        .with_endpoint(format!("{}/v1/logs", endpoint.trim_end_matches('/')))
        .build_log_exporter()
        .context("can't build otlp log exporter")?;
    let processor = BatchLogProcessor::builder(exporter, runtime::TokioCurrentThread).build();

    Ok(SdkLoggerProvider::builder()
        .with_log_processor(processor)
        .with_resource(resource)
        .build())
}
