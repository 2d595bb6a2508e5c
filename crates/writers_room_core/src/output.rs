//! Output types from driver responses.

use serde::{Deserialize, Serialize};

/// An output produced by a text-generation driver.
///
/// Structured agent results arrive as text and are parsed by the agent
/// client, so text is the only variant drivers produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Output {
    /// Plain text output
    Text(String),
}

impl Output {
    /// The output's text.
    pub fn as_text(&self) -> &str {
        match self {
            Self::Text(text) => text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_output_serializes_tagged() {
        let output = Output::Text("INT. KITCHEN - NIGHT".to_string());
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["type"], "Text");
        assert_eq!(json["data"], "INT. KITCHEN - NIGHT");
        assert_eq!(output.as_text(), "INT. KITCHEN - NIGHT");
    }

    #[test]
    fn test_response_text_joins_outputs_in_order() {
        let response = crate::GenerateResponse {
            outputs: vec![
                Output::Text("Nell: ".to_string()),
                Output::Text("Hello.".to_string()),
            ],
        };
        assert_eq!(response.text(), "Nell: Hello.");
    }
}
