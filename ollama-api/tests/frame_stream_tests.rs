use bytes::Bytes;
use futures::{stream, Stream, StreamExt};

use ollama_api::decode::{FrameScanner, FrameStream};
use ollama_api::{Error, Result};

fn byte_stream(chunks: Vec<Vec<u8>>) -> impl Stream<Item = Result<Bytes>> + Send + Unpin {
    stream::iter(chunks.into_iter().map(|c| Ok(Bytes::from(c))))
}

async fn collect_strings(
    stream: impl Stream<Item = Result<Bytes>> + Send + Unpin,
) -> Vec<Result<String>> {
    FrameStream::new(stream)
        .map(|item| item.map(|frame| String::from_utf8_lossy(&frame).into_owned()))
        .collect()
        .await
}

#[tokio::test]
async fn test_back_to_back_values_in_one_chunk() {
    let body = br#"{"a":1}{"b":2}"#.to_vec();
    let frames = collect_strings(byte_stream(vec![body])).await;

    let frames: Vec<String> = frames.into_iter().map(|f| f.unwrap()).collect();
    assert_eq!(frames, vec![r#"{"a":1}"#, r#"{"b":2}"#]);
}

#[tokio::test]
async fn test_newline_delimited_values() {
    let body = b"{\"a\":1}\n{\"b\":2}\n".to_vec();
    let frames = collect_strings(byte_stream(vec![body])).await;

    let frames: Vec<String> = frames.into_iter().map(|f| f.unwrap()).collect();
    assert_eq!(frames, vec![r#"{"a":1}"#, r#"{"b":2}"#]);
}

#[tokio::test]
async fn test_chunk_boundaries_do_not_alter_output() {
    let values = [
        r#"{"a":{"b":[1,2,3]}}"#,
        r#"{"s":"}{ \" ][ not a boundary"}"#,
        r#"{"done":true}"#,
    ];
    let body = values.join("\n");

    // Byte-by-byte is the worst case; every boundary lands mid-value.
    let chunks: Vec<Vec<u8>> = body.bytes().map(|b| vec![b]).collect();
    let frames = collect_strings(byte_stream(chunks)).await;
    let frames: Vec<String> = frames.into_iter().map(|f| f.unwrap()).collect();
    assert_eq!(frames, values);

    // And a couple of arbitrary split points for good measure.
    for split in [1, 5, 12, body.len() - 2] {
        let (head, tail) = body.as_bytes().split_at(split);
        let frames = collect_strings(byte_stream(vec![head.to_vec(), tail.to_vec()])).await;
        let frames: Vec<String> = frames.into_iter().map(|f| f.unwrap()).collect();
        assert_eq!(frames, values, "split at {split}");
    }
}

#[tokio::test]
async fn test_value_split_mid_string() {
    let frames = collect_strings(byte_stream(vec![
        br#"{"s":"hello "#.to_vec(),
        br#"world"}"#.to_vec(),
    ]))
    .await;

    let frames: Vec<String> = frames.into_iter().map(|f| f.unwrap()).collect();
    assert_eq!(frames, vec![r#"{"s":"hello world"}"#]);
}

#[tokio::test]
async fn test_whitespace_only_tail_is_clean_end() {
    let frames = collect_strings(byte_stream(vec![b"{\"a\":1}  \n\t ".to_vec()])).await;

    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].as_ref().unwrap(), r#"{"a":1}"#);
}

#[tokio::test]
async fn test_truncated_final_value_is_swallowed() {
    let frames = collect_strings(byte_stream(vec![br#"{"a":1}{"b":"#.to_vec()])).await;

    // The complete frame is delivered; the truncated tail ends the stream
    // cleanly instead of erroring.
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].as_ref().unwrap(), r#"{"a":1}"#);
}

#[tokio::test]
async fn test_non_json_bytes_mid_stream_are_an_error() {
    let mut stream = FrameStream::new(byte_stream(vec![br#"{"a":1}garbage"#.to_vec()]));

    let frame = stream.next().await.unwrap().unwrap();
    assert_eq!(&frame[..], br#"{"a":1}"#);

    let err = stream.next().await.unwrap().unwrap_err();
    assert!(matches!(err, Error::Protocol(_)), "got {err:?}");

    // Errors fuse the stream.
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn test_transport_error_propagates_once() {
    let inner = stream::iter(vec![
        Ok(Bytes::from_static(br#"{"a":1}"#)),
        Err(Error::Client("connection reset".to_string())),
    ]);
    let mut stream = FrameStream::new(inner);

    assert!(stream.next().await.unwrap().is_ok());
    let err = stream.next().await.unwrap().unwrap_err();
    assert!(matches!(err, Error::Client(_)));
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn test_empty_body() {
    let frames = collect_strings(byte_stream(vec![])).await;
    assert!(frames.is_empty());
}

#[test]
fn test_scanner_reports_partial_value() {
    let mut scanner = FrameScanner::new();
    scanner.push(br#"{"a":1}{"b""#);

    assert_eq!(&scanner.next_frame().unwrap().unwrap()[..], br#"{"a":1}"#);
    assert!(scanner.next_frame().unwrap().is_none());
    assert!(scanner.has_partial());

    scanner.push(br#":2}"#);
    assert_eq!(&scanner.next_frame().unwrap().unwrap()[..], br#"{"b":2}"#);
    assert!(!scanner.has_partial());
}

#[test]
fn test_scanner_handles_top_level_arrays() {
    let mut scanner = FrameScanner::new();
    scanner.push(br#"[1,2,{"x":[]}] [3]"#);

    assert_eq!(
        &scanner.next_frame().unwrap().unwrap()[..],
        br#"[1,2,{"x":[]}]"#
    );
    assert_eq!(&scanner.next_frame().unwrap().unwrap()[..], br#"[3]"#);
    assert!(scanner.next_frame().unwrap().is_none());
}
