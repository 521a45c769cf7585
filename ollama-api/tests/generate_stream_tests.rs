use bytes::Bytes;
use futures::{stream, Stream, StreamExt};
use tokio::time::{timeout, Duration};

use ollama_api::stream::EventStream;
use ollama_api::types::generate::GenerateResponse;
use ollama_api::{Error, Result};

fn frames(bodies: &[&str]) -> impl Stream<Item = Result<Bytes>> + Send + Unpin {
    let chunks: Vec<Result<Bytes>> = bodies
        .iter()
        .map(|b| Ok(Bytes::from(format!("{b}\n"))))
        .collect();
    stream::iter(chunks)
}

fn generate_stream(
    bodies: &[&str],
) -> EventStream<impl Stream<Item = Result<Bytes>> + Send + Unpin, GenerateResponse> {
    EventStream::new(frames(bodies), "generate")
}

#[tokio::test]
async fn test_chunks_arrive_in_order_until_done() {
    let mut stream = generate_stream(&[
        r#"{"model":"m","response":"Hello","done":false}"#,
        r#"{"model":"m","response":" world","done":false}"#,
        r#"{"model":"m","response":"","done":true,"done_reason":"stop","eval_count":2}"#,
    ]);

    let first = stream.next().await.unwrap().unwrap();
    assert_eq!(first.response, "Hello");
    assert!(!first.done);

    let second = stream.next().await.unwrap().unwrap();
    assert_eq!(second.response, " world");

    let last = stream.next().await.unwrap().unwrap();
    assert!(last.done);
    assert_eq!(last.done_reason.as_deref(), Some("stop"));
    assert_eq!(last.eval_count, 2);

    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn test_nothing_is_delivered_after_done() {
    let mut stream = generate_stream(&[
        r#"{"response":"only","done":true}"#,
        r#"{"response":"late","done":false}"#,
    ]);

    let event = stream.next().await.unwrap().unwrap();
    assert_eq!(event.response, "only");
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn test_inline_thinking_is_split_per_event() {
    let mut stream =
        generate_stream(&[r#"{"response":"<think>count legs</think>Spiders have eight.","done":true}"#]);

    let event = stream.next().await.unwrap().unwrap();
    assert_eq!(event.response, "Spiders have eight.");
    assert_eq!(event.thinking, "count legs");
}

#[tokio::test]
async fn test_structured_thinking_is_not_overwritten() {
    let mut stream = generate_stream(&[
        r#"{"response":"<think>inline</think>text","thinking":"from server","done":true}"#,
    ]);

    let event = stream.next().await.unwrap().unwrap();
    assert_eq!(event.response, "<think>inline</think>text");
    assert_eq!(event.thinking, "from server");
}

#[tokio::test]
async fn test_error_frame_ends_the_stream() {
    let mut stream = generate_stream(&[
        r#"{"response":"partial","done":false}"#,
        r#"{"error":"model requires more system memory"}"#,
        r#"{"response":"never seen","done":true}"#,
    ]);

    assert!(stream.next().await.unwrap().is_ok());

    let err = stream.next().await.unwrap().unwrap_err();
    match err {
        Error::Server(message) => assert_eq!(message, "model requires more system memory"),
        other => panic!("expected server error, got {other:?}"),
    }

    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn test_undecodable_frame_is_fatal() {
    let mut stream = generate_stream(&[
        r#"{"done":"not a bool"}"#,
        r#"{"response":"never seen","done":true}"#,
    ]);

    let err = stream.next().await.unwrap().unwrap_err();
    assert!(matches!(err, Error::Decode { context: "generate", .. }), "got {err:?}");
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn test_dropping_mid_stream_after_a_timeout_race() {
    let body = stream::iter(vec![Ok::<_, Error>(Bytes::from_static(
        b"{\"response\":\"first\",\"done\":false}\n",
    ))])
    .chain(stream::pending());
    let mut stream = EventStream::<_, GenerateResponse>::new(body, "generate");

    let event = stream.next().await.unwrap().unwrap();
    assert_eq!(event.response, "first");

    // The server stalls; racing next() against a timer cancels the wait
    // without losing the frame already delivered.
    let raced = timeout(Duration::from_millis(20), stream.next()).await;
    assert!(raced.is_err());

    drop(stream);
}
