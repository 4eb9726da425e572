//! Tests for the HTTP health endpoint.
//! Spins up the IPC server on a random port and sends a GET /health request.

use std::sync::Arc;

use taskdeskd::{config::DaemonConfig, ipc, storage::Storage, AppContext};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// Find a free local port by binding to port 0.
fn find_free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// Build a minimal AppContext on a random port for testing.
async fn make_test_ctx(dir: &TempDir, port: u16) -> Arc<AppContext> {
    let config = Arc::new(DaemonConfig::new(
        Some(port),
        Some(dir.path().to_path_buf()),
        Some("error".to_string()),
        None,
    ));
    let storage = Arc::new(Storage::new(dir.path()).await.unwrap());
    Arc::new(AppContext::new(config, storage))
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let dir = TempDir::new().unwrap();
    let port = find_free_port();
    let ctx = make_test_ctx(&dir, port).await;

    let server = tokio::spawn(ipc::run(ctx));

    // Give the listener a moment to bind, then retry the connect briefly.
    let mut stream = None;
    for _ in 0..50 {
        match TcpStream::connect(("127.0.0.1", port)).await {
            Ok(s) => {
                stream = Some(s);
                break;
            }
            Err(_) => tokio::time::sleep(std::time::Duration::from_millis(20)).await,
        }
    }
    let mut stream = stream.expect("server did not start");

    stream
        .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();

    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).await.unwrap();
    let response = String::from_utf8_lossy(&buf);

    assert!(response.starts_with("HTTP/1.1 200 OK"));
    assert!(response.contains("\"status\":\"ok\""));
    assert!(response.contains(&format!("\"port\":{port}")));

    server.abort();
}
