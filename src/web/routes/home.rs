pub const HOME_MSG: &str = "API is running";

/// Liveness check.
pub async fn home() -> &'static str {
    HOME_MSG
}
