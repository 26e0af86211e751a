// Fetch module tests.

use std::time::Duration;

use httptest::{matchers::*, responders::*, Expectation, Server};
use reqwest::Client;
use tokio_util::sync::CancellationToken;

use super::{fetch, Fetcher};
use crate::error_handling::{ErrorKind, FetchError};

const TEST_BODY: &str = "sometext";
const TIMEOUT: Duration = Duration::from_millis(200);
const SLOW_RESPONSE: Duration = Duration::from_millis(1000);

fn fetcher() -> Fetcher {
    Fetcher::new(Client::new(), TIMEOUT, CancellationToken::new())
}

#[tokio::test]
async fn test_fetch_returns_exact_body_length() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/page"))
            .respond_with(status_code(200).body(TEST_BODY)),
    );

    let length = fetcher()
        .fetch(&server.url_str("/page"))
        .await
        .expect("page should be fetched");
    assert_eq!(length, TEST_BODY.len() as u64);
}

#[tokio::test]
async fn test_fetch_counts_large_bodies() {
    let body = "x".repeat(256 * 1024);
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/large"))
            .respond_with(status_code(200).body(body.clone())),
    );

    let length = fetcher()
        .fetch(&server.url_str("/large"))
        .await
        .expect("large page should be fetched");
    assert_eq!(length, body.len() as u64);
}

#[tokio::test]
async fn test_fetch_empty_body_is_success() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/empty")).respond_with(status_code(200)),
    );

    let length = fetcher()
        .fetch(&server.url_str("/empty"))
        .await
        .expect("empty page is still a 200");
    assert_eq!(length, 0);
}

#[tokio::test]
async fn test_fetch_non_ok_status_is_error() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/404"))
            .respond_with(status_code(404).body("404\n")),
    );

    let err = fetcher()
        .fetch(&server.url_str("/404"))
        .await
        .expect_err("404 is not a success");
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.kind(), ErrorKind::Status);
    assert!(err.to_string().contains("Status is not OK"));
}

#[tokio::test]
async fn test_fetch_only_200_counts_as_success() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/created"))
            .respond_with(status_code(201).body(TEST_BODY)),
    );

    let err = fetcher()
        .fetch(&server.url_str("/created"))
        .await
        .expect_err("201 is not the success code");
    assert!(matches!(err, FetchError::Status(201)));
}

#[tokio::test]
async fn test_fetch_follows_redirects() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/moved"))
            .respond_with(status_code(302).append_header("Location", "/page")),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/page"))
            .respond_with(status_code(200).body(TEST_BODY)),
    );

    let length = fetcher()
        .fetch(&server.url_str("/moved"))
        .await
        .expect("redirect target should be fetched");
    assert_eq!(length, TEST_BODY.len() as u64);
}

#[tokio::test]
async fn test_fetch_timeout_is_classified() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/sleep")).respond_with(
            delay_and_then(SLOW_RESPONSE, status_code(200).body(TEST_BODY)),
        ),
    );

    let err = fetcher()
        .fetch(&server.url_str("/sleep"))
        .await
        .expect_err("server is slower than the timeout");
    assert!(err.is_timeout(), "expected timeout, got {err:?}");
    assert_eq!(err.kind(), ErrorKind::TransportTimeout);
}

#[tokio::test]
async fn test_fetch_missing_scheme_makes_no_request() {
    // No expectations: any request reaching the server fails the test.
    let _server = Server::run();

    let err = fetcher().fetch("::").await.expect_err("not a URI");
    assert_eq!(err.kind(), ErrorKind::Construct);
    assert!(err.to_string().contains("missing protocol scheme"));
}

#[tokio::test]
async fn test_fetch_unsupported_scheme() {
    let err = fetcher()
        .fetch("ftp://127.0.0.1/file")
        .await
        .expect_err("ftp is not fetched");
    assert_eq!(err.kind(), ErrorKind::Construct);
    assert!(err.to_string().contains("unsupported protocol scheme"));
}

#[tokio::test]
async fn test_fetch_connection_refused_is_other_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let err = fetcher()
        .fetch(&format!("http://{addr}/page"))
        .await
        .expect_err("nothing listens on the port");
    assert_eq!(err.kind(), ErrorKind::TransportOther);
    assert!(!err.is_timeout());
}

#[tokio::test]
async fn test_fetch_canceled_token_aborts_request() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/sleep"))
            .times(0..=1)
            .respond_with(delay_and_then(
                SLOW_RESPONSE,
                status_code(200).body(TEST_BODY),
            )),
    );

    let cancel = CancellationToken::new();
    let client = Client::new();
    let url = server.url_str("/sleep");

    let canceller = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        canceller.cancel();
    });

    let err = fetch(&cancel, &client, Duration::from_secs(10), &url)
        .await
        .expect_err("cancellation wins over the slow server");
    assert!(matches!(err, FetchError::Canceled));
    assert_eq!(err.kind(), ErrorKind::TransportOther);
}

#[tokio::test]
async fn test_fetch_truncated_body_is_read_error() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.expect("read request");
            if n == 0 {
                return;
            }
            request.extend_from_slice(&buf[..n]);
        }
        socket
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\n0123456789")
            .await
            .expect("write response");
        socket.shutdown().await.expect("shutdown");
    });

    let err = fetcher()
        .fetch(&format!("http://{addr}/short"))
        .await
        .expect_err("body ends before Content-Length");
    assert_eq!(err.kind(), ErrorKind::Read);
    assert!(matches!(err, FetchError::Read(_)));
    assert_eq!(err.status(), None);
    assert!(err.to_string().starts_with("read request:"), "{err}");
}
