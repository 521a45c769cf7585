//! Extraction of inline `<think>...</think>` blocks from model output.
//!
//! Some models emit their deliberation inline in the visible text instead of
//! the structured `thinking` field. [`extract_thinking`] splits the two
//! channels apart again.
//!
//! The function operates on whatever text it is given. On the streaming path
//! that is one chunk at a time, so a delimiter pair that straddles a chunk
//! boundary is not detected mid-stream; callers that need cross-chunk
//! extraction must accumulate the full text and call this once at the end.

const THINK_OPEN: &str = "<think>";
const THINK_CLOSE: &str = "</think>";

/// Splits a `<think>...</think>` block out of `text`.
///
/// Returns `(visible, thinking)`, both trimmed. When no start marker is
/// present, or a start marker has no matching end marker, the original text
/// comes back untouched with an empty thinking part; unterminated blocks are
/// never partially extracted.
pub fn extract_thinking(text: &str) -> (String, String) {
    let Some(start) = text.find(THINK_OPEN) else {
        return (text.to_string(), String::new());
    };
    let inner_start = start + THINK_OPEN.len();
    let Some(end) = text[inner_start..].find(THINK_CLOSE) else {
        return (text.to_string(), String::new());
    };
    let inner_end = inner_start + end;

    let thinking = text[inner_start..inner_end].trim().to_string();
    let mut visible = String::with_capacity(text.len() - (THINK_OPEN.len() + THINK_CLOSE.len()));
    visible.push_str(&text[..start]);
    visible.push_str(&text[inner_end + THINK_CLOSE.len()..]);
    (visible.trim().to_string(), thinking)
}

/// Applies extraction to a content/thinking field pair under the rule that a
/// server-populated thinking field wins: when `thinking` is already non-empty
/// neither field is touched, and an extraction that finds no block leaves
/// `content` as-is.
pub(crate) fn split_inline_thinking(content: &mut String, thinking: &mut String) {
    if !thinking.is_empty() {
        return;
    }
    let (visible, extracted) = extract_thinking(content);
    if extracted.is_empty() {
        return;
    }
    *content = visible;
    *thinking = extracted;
}
