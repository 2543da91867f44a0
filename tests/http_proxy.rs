use httpmock::Method::GET;
use httpmock::MockServer;
use ripper_http::config::HttpSettings;
use ripper_http::error::HttpError;
use ripper_http::http::Http;
use ripper_http::utils::UrlUtils;
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

fn proxy_settings(port: u16) -> HttpSettings {
    HttpSettings {
        timeout: Duration::from_secs(2),
        https_proxy: Some(format!("u:p@127.0.0.1:{}", port)),
        ..HttpSettings::default()
    }
}

/// Accept one connection, hand back its request head, then refuse the tunnel.
fn spawn_proxy(listener: TcpListener) -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let Ok((stream, _)) = listener.accept() else {
            return;
        };
        let mut reader = BufReader::new(stream);
        let mut head = String::new();
        loop {
            let mut line = String::new();
            match reader.read_line(&mut line) {
                Ok(0) | Err(_) => break,
                Ok(_) if line == "\r\n" => break,
                Ok(_) => head.push_str(&line),
            }
        }
        let mut stream = reader.into_inner();
        let _ = stream.write_all(b"HTTP/1.1 502 Bad Gateway\r\ncontent-length: 0\r\n\r\n");
        let _ = tx.send(head);
    });
    rx
}

#[test]
fn test_https_target_tunnels_through_configured_proxy() {
    if !can_bind_localhost() {
        return;
    }

    let listener = TcpListener::bind("127.0.0.1:0").expect("bind proxy");
    let port = listener.local_addr().expect("local addr").port();
    let received = spawn_proxy(listener);

    let url = UrlUtils::validate_url("https://example.invalid/album").expect("valid url");
    let err = Http::with_settings(url, &proxy_settings(port))
        .response()
        .expect_err("proxy refuses the tunnel");
    assert!(matches!(err, HttpError::RetriesExhausted { attempts: 1, .. }));

    let head = received
        .recv_timeout(Duration::from_secs(5))
        .expect("proxy was contacted");
    assert!(
        head.starts_with("CONNECT example.invalid:443 "),
        "request head: {}",
        head
    );
    assert!(
        !head.to_ascii_lowercase().contains("proxy-authorization"),
        "credentials leaked: {}",
        head
    );
}

#[test]
fn test_http_target_bypasses_configured_proxy() {
    if !can_bind_localhost() {
        return;
    }

    let listener = TcpListener::bind("127.0.0.1:0").expect("bind proxy");
    let port = listener.local_addr().expect("local addr").port();
    listener.set_nonblocking(true).expect("nonblocking");

    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/plain");
        then.status(200).header("content-type", "text/html").body("ok");
    });

    let url = UrlUtils::validate_url(&server.url("/plain")).expect("valid url");
    let builder = Http::with_settings(url, &proxy_settings(port));
    assert!(builder.connection().proxy().is_none());
    builder.response().expect("request should succeed");

    mock.assert();
    match listener.accept() {
        Err(e) => assert_eq!(e.kind(), ErrorKind::WouldBlock),
        Ok((_, peer)) => panic!("proxy contacted by {}", peer),
    }
}
