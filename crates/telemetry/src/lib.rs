//! Logging bootstrap.

use library_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over `telemetry.log_level`. Calling this more
/// than once is harmless; later calls leave the first subscriber in place.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let filter = build_filter(settings)?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match settings.log_format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    if installed.is_ok() {
        tracing::debug!(
            target: "library-telemetry",
            format = ?settings.log_format,
            "tracing initialized"
        );
    }
    Ok(())
}

fn build_filter(settings: &TelemetrySettings) -> anyhow::Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&settings.log_level).map_err(|e| {
            anyhow::anyhow!("invalid telemetry.log_level '{}': {}", settings.log_level, e)
        }),
    }
}
