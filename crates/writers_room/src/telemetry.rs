use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence. Otherwise only warnings are shown, or
/// debug output for the writers' room crates when `verbose` is set.
/// `json` switches to one JSON object per event.
pub fn init_logging(verbose: bool, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let default_filter = if verbose {
        "info,writers_room=debug,writers_room_narrative=debug,writers_room_models=debug"
    } else {
        "warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    }

    Ok(())
}
