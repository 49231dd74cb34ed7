use crate::config::{build_upstream, create_upstream};
use crate::models::ErrorResponse;
use crate::services::upstream::Upstream;
use crate::{build_rocket, AppState};
use rocket::http::{ContentType, Header, Status};
use rocket::local::asynchronous::Client;
use rocket::serde::json::Value;
use rocket::tokio::io::{AsyncReadExt, AsyncWriteExt};
use rocket::tokio::net::TcpListener;
use rocket::tokio::time::sleep;
use std::time::Duration;

/// Nothing listens on the discard port, so every upstream call fails fast.
const UNREACHABLE_BACKEND: &str = "http://127.0.0.1:9";

async fn client() -> Client {
    client_for(create_upstream(UNREACHABLE_BACKEND).expect("valid upstream")).await
}

async fn client_for(upstream: Upstream) -> Client {
    let state = AppState { upstream };
    let cors = rocket_cors::CorsOptions::default()
        .to_cors()
        .expect("default cors");
    Client::tracked(build_rocket(state, cors))
        .await
        .expect("valid rocket instance")
}

#[rocket::async_test]
async fn health_is_ok() {
    let client = client().await;
    let response = client.get("/health").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().await.expect("json body");
    assert_eq!(body["status"], "ok");
}

#[rocket::async_test]
async fn similar_videos_transport_failure_is_500() {
    let client = client().await;
    let response = client.get("/api/similar-videos/abc123").dispatch().await;
    assert_eq!(response.status(), Status::InternalServerError);

    let body: ErrorResponse = response.into_json().await.expect("error body");
    assert_eq!(body.error, "Failed to process similar videos request");
    assert!(body.details.is_some());
}

#[rocket::async_test]
async fn search_transport_failure_is_json_error() {
    let client = client().await;
    let response = client
        .post("/api/search")
        .header(ContentType::JSON)
        .body(r#"{"query_text":"octopus","options":["visual"],"page_limit":15}"#)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::InternalServerError);

    let body: ErrorResponse = response.into_json().await.expect("error body");
    assert_eq!(body.error, "Failed to process search request");
}

#[rocket::async_test]
async fn next_page_transport_failure_is_json_error() {
    let client = client().await;
    let response = client
        .post("/api/search/next")
        .header(ContentType::JSON)
        .body(r#"{"page_token":"t2"}"#)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::InternalServerError);

    let body: ErrorResponse = response.into_json().await.expect("error body");
    assert_eq!(body.error, "Failed to process next page request");
}

#[rocket::async_test]
async fn video_stream_failure_is_plain_text() {
    let client = client().await;
    let response = client
        .get("/api/video/Red%20Fox.mp4")
        .header(Header::new("Range", "bytes=100-"))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::InternalServerError);
    assert_eq!(response.content_type(), Some(ContentType::Plain));
    assert_eq!(
        response.into_string().await.as_deref(),
        Some("Error streaming video")
    );
}

/// Serves one 206 response whose body stalls halfway for `pause`.
async fn stalling_video_backend(pause: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let address = listener.local_addr().expect("local address");

    rocket::tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else {
            return;
        };
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => return,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }

        let head = "HTTP/1.1 206 Partial Content\r\n\
                    Content-Type: video/mp4\r\n\
                    Content-Length: 10\r\n\
                    Content-Range: bytes 0-9/10\r\n\r\n";
        let _ = socket.write_all(head.as_bytes()).await;
        let _ = socket.write_all(b"01234").await;
        let _ = socket.flush().await;
        sleep(pause).await;
        let _ = socket.write_all(b"56789").await;
        let _ = socket.flush().await;
    });

    format!("http://{address}")
}

#[rocket::async_test]
async fn slow_video_body_outlives_request_timeout() {
    let backend = stalling_video_backend(Duration::from_millis(1500)).await;
    let upstream = build_upstream(&backend, Duration::from_secs(1)).expect("valid upstream");
    let client = client_for(upstream).await;

    let response = client.get("/api/video/Red%20Fox.mp4").dispatch().await;
    assert_eq!(response.status(), Status::PartialContent);
    assert_eq!(response.headers().get_one("Content-Length"), Some("10"));
    assert_eq!(response.headers().get_one("Content-Range"), Some("bytes 0-9/10"));
    assert_eq!(response.headers().get_one("Accept-Ranges"), Some("bytes"));
    assert_eq!(
        response.into_bytes().await.as_deref(),
        Some(&b"0123456789"[..])
    );
}
