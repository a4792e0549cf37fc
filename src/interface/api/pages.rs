//! Staff and display pages, embedded at build time

use axum::response::{Html, IntoResponse};

const STAFF_HTML: &str = include_str!("../../../templates/staff.html");
const DISPLAY_HTML: &str = include_str!("../../../templates/display.html");

/// GET / - Staff page for calling numbers
pub async fn staff_page() -> impl IntoResponse {
    Html(STAFF_HTML)
}

/// GET /display - Public display screen
pub async fn display_page() -> impl IntoResponse {
    Html(DISPLAY_HTML)
}
