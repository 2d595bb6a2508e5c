//! Utilities for extracting structured data from model responses.
//!
//! Responses often wrap JSON in markdown code blocks or surround it with
//! explanatory text. These helpers recover the document before parsing.

use writers_room_error::JsonError;

/// Extract JSON from a response that may contain markdown or extra text.
///
/// Strategies, in order:
/// 1. Markdown code blocks: ```json ... ```
/// 2. Whichever balanced structure, `{ ... }` or `[ ... ]`, starts first
///
/// # Errors
///
/// Returns an error if no JSON structure is found.
///
/// # Examples
///
/// ```
/// use writers_room_narrative::extract_json;
///
/// let response = "Here is the plan:\n```json\n{\"heading\": \"EXT. PIER - DAWN\"}\n```\n";
/// let json = extract_json(response).unwrap();
/// assert!(json.starts_with('{'));
/// ```
pub fn extract_json(response: &str) -> Result<String, JsonError> {
    if let Some(json) = extract_from_code_block(response, "json") {
        return Ok(json);
    }

    let bracket_pos = response.find('[');
    let brace_pos = response.find('{');

    let array_first = match (bracket_pos, brace_pos) {
        (Some(bracket), Some(brace)) => bracket < brace,
        (Some(_), None) => true,
        _ => false,
    };

    let (first, second) = if array_first {
        (('[', ']'), ('{', '}'))
    } else {
        (('{', '}'), ('[', ']'))
    };

    if let Some(json) = extract_balanced(response, first.0, first.1) {
        return Ok(json);
    }
    if let Some(json) = extract_balanced(response, second.0, second.1) {
        return Ok(json);
    }

    tracing::debug!(response_length = response.len(), "No JSON found in model response");

    Err(JsonError::no_document(response.len()))
}

/// Extract content from a markdown code block.
///
/// Accepts a fence with the given language tag or an untagged fence. A
/// missing closing fence is treated as a truncated response and everything
/// after the opening fence is returned.
fn extract_from_code_block(response: &str, language: &str) -> Option<String> {
    let pattern = format!("```{}", language);

    if let Some(start) = response.find(&pattern) {
        let content_start = start + pattern.len();
        let content = match response[content_start..].find("```") {
            Some(end) => &response[content_start..content_start + end],
            None => &response[content_start..],
        };
        return Some(content.trim().to_string());
    }

    let start = response.find("```")?;
    let content_start = start + 3;
    let skip_to = response[content_start..]
        .find('\n')
        .map(|n| content_start + n + 1)
        .unwrap_or(content_start);

    let content = match response[skip_to..].find("```") {
        Some(end) => &response[skip_to..skip_to + end],
        None => &response[skip_to..],
    };
    Some(content.trim().to_string())
}

/// Extract content between balanced delimiters, ignoring delimiters inside strings.
fn extract_balanced(response: &str, open: char, close: char) -> Option<String> {
    let start = response.find(open)?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in response[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(response[start..start + i + ch.len_utf8()].to_string());
                }
            }
            _ => {}
        }
    }

    None
}

/// Parse JSON into a specific type.
///
/// # Errors
///
/// Returns an error naming the serde failure and a short preview of the input.
///
/// # Examples
///
/// ```
/// use writers_room_narrative::parse_json;
/// use writers_room_core::SceneEndJudgment;
///
/// let json = r#"{"should_end": true, "reason": "resolved"}"#;
/// let verdict: SceneEndJudgment = parse_json(json).unwrap();
/// assert!(verdict.should_end);
/// ```
pub fn parse_json<T>(json_str: &str) -> Result<T, JsonError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(json_str).map_err(|e| {
        tracing::debug!(error = %e, json_length = json_str.len(), "JSON parsing failed");
        JsonError::undecodable(e, json_str)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_from_code_block() {
        let response = r#"
Here's the scene plan:

```json
{
  "scene_number": 1,
  "heading": "INT. LIGHTHOUSE - NIGHT"
}
```

Let me know if you want changes.
"#;
        let json = extract_json(response).unwrap();
        assert!(json.contains("\"scene_number\": 1"));
    }

    #[test]
    fn test_extract_json_from_untagged_fence() {
        let response = "```\n{\"should_end\": false}\n```";
        assert_eq!(extract_json(response).unwrap(), "{\"should_end\": false}");
    }

    #[test]
    fn test_extract_json_balanced_braces() {
        let response = r#"Sure! {"summary": "They argue", "key_events": ["a {brace} in text"]} Done."#;
        let json = extract_json(response).unwrap();
        assert!(json.starts_with('{'));
        assert!(json.ends_with('}'));
        assert!(json.contains("{brace}"));
    }

    #[test]
    fn test_extract_json_prefers_first_structure() {
        let response = r#"[{"name": "Mara"}, {"name": "Ilse"}] and also {"ignored": true}"#;
        let json = extract_json(response).unwrap();
        assert!(json.starts_with('['));
        assert!(json.ends_with(']'));
    }

    #[test]
    fn test_extract_json_with_string_escapes() {
        let response = r#"{"dialogue": "She said \"leave\" and left"}"#;
        let json = extract_json(response).unwrap();
        assert_eq!(json, response);
    }

    #[test]
    fn test_extract_json_truncated_fence() {
        let response = "```json\n{\"summary\": \"cut off\"}";
        assert_eq!(extract_json(response).unwrap(), "{\"summary\": \"cut off\"}");
    }

    #[test]
    fn test_no_json_found() {
        let err = extract_json("The director shrugs.").unwrap_err();
        assert_eq!(err.message, "No JSON found in response (length: 20)");
    }

    #[test]
    fn test_parse_json_reports_preview() {
        let err = parse_json::<serde_json::Value>("{not json").unwrap_err();
        assert!(err.message.contains("{not json"));
    }
}
