//! In-process fixture site for audit tests

use axum::response::Html;
use axum::{routing::get, Router};
use std::net::SocketAddr;

/// Complete page: image, navigation landmark, heading, clean console.
const GOOD_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Home</title></head>
<body>
<nav><a href="/company/">Company</a></nav>
<h1>Welcome</h1>
<img src="data:image/gif;base64,R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAIBRAA7" alt="logo">
<p>Fixture home page.</p>
</body>
</html>"#;

/// Structurally complete page that logs one console error and one warning.
const NOISY_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Company</title></head>
<body>
<nav><a href="/">Home</a></nav>
<h2>Company</h2>
<img src="data:image/gif;base64,R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAIBRAA7" alt="team">
<script>
console.error('boom');
console.warn('creaky');
</script>
</body>
</html>"#;

/// Page with none of the structural quality indicators.
const BARE_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Platform</title></head>
<body>
<p>Nothing to see here.</p>
</body>
</html>"#;

/// Serve the fixture site on an ephemeral port and return its address
pub async fn spawn_fixture_site() -> SocketAddr {
    let app = Router::new()
        .route("/", get(|| async { Html(GOOD_PAGE) }))
        .route("/company/", get(|| async { Html(NOISY_PAGE) }))
        .route("/platform/", get(|| async { Html(BARE_PAGE) }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Should bind fixture site");
    let addr = listener.local_addr().expect("Should have a local address");

    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Fixture site should serve");
    });

    addr
}

/// Check if a local server is answering
#[allow(dead_code)]
pub async fn is_server_available(url: &str) -> bool {
    match reqwest::get(url).await {
        Ok(resp) => resp.status().is_success(),
        Err(_) => false,
    }
}

/// Reserve an ephemeral port with nothing listening on it
pub fn unused_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Should bind");
    let port = listener.local_addr().expect("Should have an address").port();
    drop(listener);
    port
}
