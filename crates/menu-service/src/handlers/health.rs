//! Health check handler.

/// Liveness probe handler.
///
/// Returns a simple "OK" to indicate the process is running. Does NOT
/// check dependencies - failure means the process is hung.
pub async fn health_check() -> &'static str {
    "OK"
}
