//! Root banner.

pub const BANNER: &str = "✅ AI Dev System Backend Running!";

/// GET /: plain-text banner confirming the backend is up.
pub async fn index() -> &'static str {
    BANNER
}
