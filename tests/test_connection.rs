use std::fs;
use std::sync::Arc;
use std::time::Duration;

use lantern::http::connection::Connection;
use lantern::routing::RouteRegistry;
use lantern::server::{Dispatcher, ServerHandle, StaticFiles};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt, duplex};

async fn exchange(root: &TempDir, request: &[u8], read_timeout: Duration) -> String {
    let dispatcher = Arc::new(Dispatcher::new(
        RouteRegistry::new(),
        StaticFiles::new(root.path()),
        "duplex",
        ServerHandle::new(),
    ));
    let (mut client, server) = duplex(64 * 1024);

    let task = tokio::spawn(async move {
        let mut conn = Connection::new(server, dispatcher, read_timeout);
        conn.run().await
    });

    client.write_all(request).await.unwrap();
    let mut response = Vec::new();
    client.read_to_end(&mut response).await.unwrap();
    task.await.unwrap().unwrap();

    String::from_utf8(response).unwrap()
}

fn site() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("index.html"), "<p>hi</p>").unwrap();
    dir
}

#[tokio::test]
async fn test_full_request_with_headers() {
    let root = site();
    let response = exchange(
        &root,
        b"GET / HTTP/1.1\r\nHost: localhost\r\nUser-Agent: test\r\n\r\n",
        Duration::from_secs(2),
    )
    .await;

    assert_eq!(
        response,
        "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 9\r\n\r\n<p>hi</p>"
    );
}

#[tokio::test]
async fn test_bare_request_line() {
    let root = site();
    let response = exchange(&root, b"GET /name\n", Duration::from_secs(2)).await;

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(response.ends_with("The Server name is: duplex"));
}

#[tokio::test]
async fn test_empty_line_is_bad_request() {
    let root = site();
    let response = exchange(&root, b"\r\n", Duration::from_secs(2)).await;

    assert!(response.starts_with("HTTP/1.1 400 Bad Request\r\n"));
    assert!(response.contains("Content-Type: text/plain; charset=UTF-8\r\n"));
    assert!(response.contains("Access-Control-Allow-Origin: *\r\n"));
    assert!(response.ends_with("\r\n\r\nBad Request"));
}

#[tokio::test]
async fn test_silent_client_times_out_with_bad_request() {
    let root = site();
    let response = exchange(&root, b"", Duration::from_millis(50)).await;

    assert!(response.starts_with("HTTP/1.1 400 Bad Request\r\n"));
}

#[tokio::test]
async fn test_missing_file_is_not_found() {
    let root = site();
    let response = exchange(&root, b"GET /nope.png HTTP/1.1\r\n\r\n", Duration::from_secs(2)).await;

    assert!(response.starts_with("HTTP/1.1 404 Not Found\r\n"));
    assert!(response.contains("Content-Length: 9\r\n"));
    assert!(response.ends_with("Not Found"));
}

#[tokio::test]
async fn test_stalled_reader_hits_write_timeout() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join("big.bin"), vec![7u8; 256 * 1024]).unwrap();
    let dispatcher = Arc::new(Dispatcher::new(
        RouteRegistry::new(),
        StaticFiles::new(root.path()),
        "duplex",
        ServerHandle::new(),
    ));
    let (mut client, server) = duplex(1024);

    let task = tokio::spawn(async move {
        let mut conn = Connection::new(server, dispatcher, Duration::from_secs(2))
            .with_write_timeout(Duration::from_millis(100));
        conn.run().await
    });

    client.write_all(b"GET /big.bin HTTP/1.1\r\n\r\n").await.unwrap();
    // Never read: the response cannot drain through the 1 KiB pipe.
    let result = tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("connection stayed blocked on a client that does not read")
        .unwrap();

    assert!(result.is_err());
    drop(client);
}
