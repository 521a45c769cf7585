use std::io::Write;
use std::sync::Arc;

use bytes::Bytes;

use ollama_api::blob::blob_digest;
use ollama_api::transport::MockTransport;
use ollama_api::types::HttpVerb;
use ollama_api::{Client, Error};

fn client_with(mock: &MockTransport) -> Client {
    Client::builder()
        .transport(Arc::new(mock.clone()))
        .build()
        .unwrap()
}

#[test]
fn test_digest_format() {
    assert_eq!(
        blob_digest(b"hello world"),
        "sha256:b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
    );
}

#[test]
fn test_digest_of_empty_input() {
    assert_eq!(
        blob_digest(b""),
        "sha256:e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[tokio::test]
async fn test_create_blob_uploads_to_digest_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"hello world").unwrap();

    let mock = MockTransport::new().with_response(201, "");
    let client = client_with(&mock);

    let digest = client.create_blob(file.path()).await.unwrap();
    assert_eq!(
        digest,
        "sha256:b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
    );

    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].verb, HttpVerb::Post);
    assert_eq!(requests[0].path, format!("/api/blobs/{digest}"));
    assert_eq!(requests[0].raw, Some(Bytes::from_static(b"hello world")));
}

#[tokio::test]
async fn test_create_blob_missing_file() {
    let mock = MockTransport::new();
    let client = client_with(&mock);

    let err = client
        .create_blob("/nonexistent/path/to/blob")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Client(_)), "got {err:?}");
    // Nothing was sent.
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_check_blob_found() {
    let mock = MockTransport::new().with_response(200, "");
    let client = client_with(&mock);

    let exists = client.check_blob("sha256:abc123").await.unwrap();
    assert!(exists);

    let requests = mock.requests();
    assert_eq!(requests[0].verb, HttpVerb::Head);
    assert_eq!(requests[0].path, "/api/blobs/sha256:abc123");
}

#[tokio::test]
async fn test_check_blob_missing_is_false_not_an_error() {
    let mock = MockTransport::new().with_response(404, r#"{"error":"blob not found"}"#);
    let client = client_with(&mock);

    let exists = client.check_blob("sha256:abc123").await.unwrap();
    assert!(!exists);
}

#[tokio::test]
async fn test_check_blob_server_failure_is_an_error() {
    let mock = MockTransport::new().with_response(500, "Internal Server Error");
    let client = client_with(&mock);

    let err = client.check_blob("sha256:abc123").await.unwrap_err();
    assert_eq!(err.status(), Some(500));
}
