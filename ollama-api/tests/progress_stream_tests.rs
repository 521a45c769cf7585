use bytes::Bytes;
use futures::{stream, Stream, StreamExt};

use ollama_api::stream::EventStream;
use ollama_api::types::ProgressResponse;
use ollama_api::{Error, Result};

fn progress_stream(
    bodies: &[&str],
) -> EventStream<impl Stream<Item = Result<Bytes>> + Send + Unpin, ProgressResponse> {
    let chunks: Vec<Result<Bytes>> = bodies
        .iter()
        .map(|b| Ok(Bytes::from(format!("{b}\n"))))
        .collect();
    EventStream::new(stream::iter(chunks), "pull")
}

#[tokio::test]
async fn test_all_progress_events_are_delivered() {
    let mut stream = progress_stream(&[
        r#"{"status":"pulling manifest"}"#,
        r#"{"status":"pulling sha256:abc123","digest":"sha256:abc123","total":500,"completed":100}"#,
        r#"{"status":"pulling sha256:abc123","digest":"sha256:abc123","total":500,"completed":500}"#,
        r#"{"status":"verifying sha256 digest"}"#,
        r#"{"status":"success"}"#,
    ]);

    let first = stream.next().await.unwrap().unwrap();
    assert_eq!(first.status, "pulling manifest");
    assert!(first.digest.is_empty());

    let second = stream.next().await.unwrap().unwrap();
    assert_eq!(second.digest, "sha256:abc123");
    assert_eq!(second.total, 500);
    assert_eq!(second.completed, 100);

    let mut rest = Vec::new();
    while let Some(event) = stream.next().await {
        rest.push(event.unwrap().status);
    }
    assert_eq!(
        rest,
        vec![
            "pulling sha256:abc123",
            "verifying sha256 digest",
            "success"
        ]
    );
}

#[tokio::test]
async fn test_progress_streams_end_only_at_end_of_body() {
    // No event is terminal, not even "success"; the body closing is what
    // ends the stream.
    let mut stream = progress_stream(&[r#"{"status":"success"}"#, r#"{"status":"trailing"}"#]);

    assert_eq!(stream.next().await.unwrap().unwrap().status, "success");
    assert_eq!(stream.next().await.unwrap().unwrap().status, "trailing");
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn test_error_frame_in_progress_stream() {
    let mut stream = progress_stream(&[
        r#"{"status":"pulling manifest"}"#,
        r#"{"error":"pull model manifest: file does not exist"}"#,
    ]);

    assert!(stream.next().await.unwrap().is_ok());
    let err = stream.next().await.unwrap().unwrap_err();
    match err {
        Error::Server(message) => {
            assert_eq!(message, "pull model manifest: file does not exist")
        }
        other => panic!("expected server error, got {other:?}"),
    }
    assert!(stream.next().await.is_none());
}
