use ollama_api::think::extract_thinking;
use ollama_api::types::generate::GenerateResponse;

#[test]
fn test_well_formed_block_is_split_and_trimmed() {
    let (visible, thinking) =
        extract_thinking("<think> weighing the options </think>\nThe answer is 4.");
    assert_eq!(visible, "The answer is 4.");
    assert_eq!(thinking, "weighing the options");
}

#[test]
fn test_leading_whitespace_before_marker() {
    let (visible, thinking) = extract_thinking("  \n<think>plan</think>go");
    assert_eq!(visible, "go");
    assert_eq!(thinking, "plan");
}

#[test]
fn test_no_marker_returns_text_unchanged() {
    let (visible, thinking) = extract_thinking("  just an answer ");
    assert_eq!(visible, "  just an answer ");
    assert_eq!(thinking, "");
}

#[test]
fn test_unterminated_block_is_never_partially_extracted() {
    let text = "<think>still going and the end marker never arrives";
    let (visible, thinking) = extract_thinking(text);
    assert_eq!(visible, text);
    assert_eq!(thinking, "");
}

#[test]
fn test_empty_block() {
    let (visible, thinking) = extract_thinking("<think></think>answer");
    assert_eq!(visible, "answer");
    assert_eq!(thinking, "");
}

#[test]
fn test_close_marker_without_open_is_left_alone() {
    let text = "answer </think> trailing";
    let (visible, thinking) = extract_thinking(text);
    assert_eq!(visible, text);
    assert_eq!(thinking, "");
}

#[test]
fn test_only_first_block_is_extracted() {
    let (visible, thinking) = extract_thinking("<think>one</think>mid<think>two</think>end");
    assert_eq!(thinking, "one");
    assert_eq!(visible, "mid<think>two</think>end");
}

#[test]
fn test_response_with_populated_thinking_field_is_untouched() {
    let mut response = GenerateResponse {
        response: "<think>inline</think>visible".to_string(),
        thinking: "structured".to_string(),
        ..Default::default()
    };
    response.split_thinking();

    // A server-populated thinking field wins over inline markers.
    assert_eq!(response.response, "<think>inline</think>visible");
    assert_eq!(response.thinking, "structured");
}

#[test]
fn test_response_without_thinking_field_gets_extraction() {
    let mut response = GenerateResponse {
        response: "<think>inline</think>visible".to_string(),
        ..Default::default()
    };
    response.split_thinking();

    assert_eq!(response.response, "visible");
    assert_eq!(response.thinking, "inline");
}
