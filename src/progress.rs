use std::sync::Arc;

/// Callback receiving one human-readable line per pipeline stage.
pub type ProgressCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Progress callback that prints each stage line to stderr.
pub fn stderr_progress() -> ProgressCallback {
    Arc::new(|msg: &str| eprintln!("{msg}"))
}
