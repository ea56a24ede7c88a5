/// Install the global `tracing` subscriber.
///
/// Call once from a binary or test harness; library code only emits events.
pub fn init() {
    tracing_subscriber::fmt().with_env_filter("info").init();
}
