use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize the tracing subscriber
/// This should be called once at application startup
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_target(false)
            .compact()
            .init();

        tracing::info!("Logging system initialized");
    });
}
