//! 検出クライアントのテスト
//!
//! wiremockで検出サービスを立て、成功・失敗時の挙動を検証

use sar_detect::client::DetectClient;
use sar_detect::error::SarDetectError;
use sar_detect::input::load_image;
use sar_detect_common::ApiEndpoint;
use std::time::Duration;
use tempfile::tempdir;
use wiremock::matchers::{body_string_contains, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ANNOTATED_PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR-annotated";

fn client_for(server: &MockServer) -> DetectClient {
    let endpoint = ApiEndpoint::parse(&server.uri()).expect("mock server uri");
    DetectClient::new(endpoint, Duration::from_secs(5)).expect("client build")
}

/// 成功時は注釈付き画像を返す
#[tokio::test]
async fn test_detect_success_returns_image() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/detect"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(ANNOTATED_PNG.to_vec(), "image/png"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let detected = client
        .detect_bytes("uav.jpg", "image/jpeg", b"jpeg-bytes".to_vec())
        .await
        .expect("detection should succeed");

    assert_eq!(detected.bytes, ANNOTATED_PNG);
    assert_eq!(detected.content_type.as_deref(), Some("image/png"));
    assert_eq!(detected.file_extension(), "png");
}

/// multipartの `file` フィールドにファイル名付きで送る
#[tokio::test]
async fn test_detect_sends_file_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/detect"))
        .and(header_exists("content-type"))
        .and(body_string_contains("name=\"file\"; filename=\"uav_0042.jpg\""))
        .and(body_string_contains("jpeg-bytes"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(ANNOTATED_PNG.to_vec(), "image/png"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let image_path = dir.path().join("uav_0042.jpg");
    std::fs::write(&image_path, b"jpeg-bytes").unwrap();
    let image = load_image(&image_path).unwrap();

    let client = client_for(&server);
    let result = client.detect(&image).await;
    assert!(result.is_ok(), "request did not match: {:?}", result.err());
}

/// 成功以外のステータスは DetectionFailed
#[tokio::test]
async fn test_detect_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/detect"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model crashed"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .detect_bytes("uav.jpg", "image/jpeg", b"jpeg-bytes".to_vec())
        .await
        .unwrap_err();

    assert!(matches!(err, SarDetectError::DetectionFailed(500)));
    assert!(err.to_string().contains("Detection failed"));
}

/// 画像以外のレスポンスは UnexpectedContent
#[tokio::test]
async fn test_detect_non_image_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/detect"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(br#"{"detail":"no people"}"#.to_vec(), "application/json"),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .detect_bytes("uav.jpg", "image/jpeg", b"jpeg-bytes".to_vec())
        .await
        .unwrap_err();

    assert!(matches!(err, SarDetectError::UnexpectedContent(ct) if ct == "application/json"));
}

/// ベースURLにパスがある場合も `/detect` を付ける
#[tokio::test]
async fn test_detect_with_path_prefix() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/detect"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(ANNOTATED_PNG.to_vec(), "image/png"))
        .expect(1)
        .mount(&server)
        .await;

    let endpoint = ApiEndpoint::parse(&format!("{}/api/v1/", server.uri())).unwrap();
    let client = DetectClient::new(endpoint, Duration::from_secs(5)).unwrap();
    assert!(client.endpoint().detect_url().ends_with("/api/v1/detect"));

    client
        .detect_bytes("uav.jpg", "image/jpeg", b"jpeg-bytes".to_vec())
        .await
        .expect("detection should succeed");
}

/// 接続できない場合は Http
#[tokio::test]
async fn test_detect_connection_refused() {
    let endpoint = ApiEndpoint::parse("http://127.0.0.1:1").unwrap();
    let client = DetectClient::new(endpoint, Duration::from_secs(5)).unwrap();

    let err = client
        .detect_bytes("uav.jpg", "image/jpeg", b"jpeg-bytes".to_vec())
        .await
        .unwrap_err();

    assert!(matches!(err, SarDetectError::Http(_)));
}
