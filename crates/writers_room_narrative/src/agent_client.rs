//! Agent client over a raw text-generation driver.

use crate::extraction::{extract_json, parse_json};
use crate::prompts;
use async_trait::async_trait;
use std::collections::HashSet;
use tracing::{debug, instrument, warn};
use writers_room_core::{
    CharacterProfile, DialogueLine, GenerateRequest, Message, SamplingConfig, SceneEndJudgment,
    ScenePlan, SummaryDraft,
};
use writers_room_error::{GenerationError, GenerationErrorKind, GenerationResult};
use writers_room_interface::{
    AgentClient, AgentOutput, AgentRequest, OutputShape, WritersRoomDriver,
};

/// Turns typed agent requests into driver calls and validated results.
///
/// Structured shapes are requested as JSON. When the driver supports a
/// native JSON mode it is switched on, but the response always goes through
/// the same extraction and validation path, so the orchestrator never sees
/// which one produced the result. Dialogue is requested as plain text.
///
/// The client keeps no state between calls and never retries.
#[derive(Debug, Clone)]
pub struct StructuredAgentClient<D> {
    driver: D,
}

impl<D: WritersRoomDriver> StructuredAgentClient<D> {
    /// Wrap a driver.
    pub fn new(driver: D) -> Self {
        Self { driver }
    }

    /// The wrapped driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }
}

#[async_trait]
impl<D: WritersRoomDriver> AgentClient for StructuredAgentClient<D> {
    #[instrument(
        skip(self, request, sampling),
        fields(role = %request.role(), shape = %request.shape(), model = self.driver.model_name())
    )]
    async fn invoke(
        &self,
        request: &AgentRequest,
        sampling: &SamplingConfig,
    ) -> GenerationResult<AgentOutput> {
        let shape = request.shape();
        let prompt = prompts::render(request);

        let generate = GenerateRequest {
            messages: vec![Message::system(prompt.system), Message::user(prompt.user)],
            max_tokens: *sampling.max_output_tokens(),
            temperature: Some(*sampling.temperature()),
            model: None,
            json_mode: shape != OutputShape::Dialogue && self.driver.supports_json_mode(),
        };

        let response = self.driver.generate(&generate).await?;
        let text = response.text();
        debug!(response_len = text.len(), "Received agent response");

        let output = match request {
            AgentRequest::Cast { .. } => AgentOutput::Cast(parse_cast(&text)?),
            AgentRequest::PlanScene { .. } => AgentOutput::ScenePlan(parse_scene_plan(&text)?),
            AgentRequest::Dialogue { character, .. } => {
                AgentOutput::Dialogue(parse_dialogue(&text, &character.name)?)
            }
            AgentRequest::Summarize { .. } => AgentOutput::Summary(parse_summary(&text)?),
            AgentRequest::JudgeSceneEnd { .. } => {
                AgentOutput::SceneEnd(parse_structured::<SceneEndJudgment>(shape, &text)?)
            }
        };

        Ok(output)
    }
}

/// Extract and deserialize a JSON document of the given shape.
fn parse_structured<T>(shape: OutputShape, raw: &str) -> GenerationResult<T>
where
    T: serde::de::DeserializeOwned,
{
    let json = extract_json(raw)
        .map_err(|e| GenerationError::malformed(shape.to_string(), e.message, raw))?;
    parse_json(&json).map_err(|e| {
        warn!(shape = %shape, "Structured output failed to parse");
        GenerationError::malformed(shape.to_string(), e.message, raw)
    })
}

/// Parse a cast, accepting either `{"characters": [...]}` or a bare array.
fn parse_cast(raw: &str) -> GenerationResult<Vec<CharacterProfile>> {
    let shape = OutputShape::Cast;
    let value: serde_json::Value = parse_structured(shape, raw)?;

    let list = match value {
        serde_json::Value::Object(mut object) => object
            .remove("characters")
            .ok_or_else(|| {
                GenerationError::malformed(shape.to_string(), "missing `characters` array", raw)
            })?,
        array @ serde_json::Value::Array(_) => array,
        _ => {
            return Err(GenerationError::malformed(
                shape.to_string(),
                "expected an object or an array",
                raw,
            ));
        }
    };

    let profiles: Vec<CharacterProfile> = serde_json::from_value(list)
        .map_err(|e| GenerationError::malformed(shape.to_string(), e.to_string(), raw))?;

    if profiles.is_empty() {
        return Err(GenerationError::malformed(shape.to_string(), "no characters returned", raw));
    }

    let mut seen = HashSet::new();
    for profile in &profiles {
        let name = profile.name.trim();
        if name.is_empty() {
            return Err(GenerationError::malformed(
                shape.to_string(),
                "character without a name",
                raw,
            ));
        }
        if !seen.insert(name.to_string()) {
            return Err(GenerationError::malformed(
                shape.to_string(),
                format!("duplicate character name `{}`", name),
                raw,
            ));
        }
    }

    Ok(profiles
        .into_iter()
        .map(|profile| CharacterProfile {
            name: profile.name.trim().to_string(),
            ..profile
        })
        .collect())
}

fn parse_scene_plan(raw: &str) -> GenerationResult<ScenePlan> {
    let shape = OutputShape::ScenePlan;
    let plan: ScenePlan = parse_structured(shape, raw)?;

    if plan.heading.trim().is_empty() {
        return Err(GenerationError::malformed(shape.to_string(), "empty heading", raw));
    }
    if plan.objective.trim().is_empty() {
        return Err(GenerationError::malformed(shape.to_string(), "empty objective", raw));
    }

    Ok(plan)
}

fn parse_summary(raw: &str) -> GenerationResult<SummaryDraft> {
    let shape = OutputShape::SceneSummary;
    let draft: SummaryDraft = parse_structured(shape, raw)?;

    if draft.summary.trim().is_empty() {
        return Err(GenerationError::malformed(shape.to_string(), "empty summary", raw));
    }

    Ok(draft)
}

/// Clean a free-text line.
///
/// Strips a leading `Name:` prefix and wrapping quotes, and splits off a
/// leading parenthetical as the action.
fn parse_dialogue(raw: &str, speaker: &str) -> GenerationResult<DialogueLine> {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix(speaker) {
        if let Some(rest) = rest.trim_start().strip_prefix(':') {
            text = rest.trim();
        }
    }

    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        text = text[1..text.len() - 1].trim();
    }

    if text.is_empty() {
        return Err(GenerationError::new(GenerationErrorKind::EmptyResponse));
    }

    if let Some(inner) = text.strip_prefix('(') {
        if let Some(close) = inner.find(')') {
            let action = inner[..close].trim();
            let dialogue = inner[close + 1..].trim();
            if !action.is_empty() && !dialogue.is_empty() {
                return Ok(DialogueLine {
                    dialogue: dialogue.to_string(),
                    action: Some(action.to_string()),
                });
            }
        }
    }

    Ok(DialogueLine {
        dialogue: text.to_string(),
        action: None,
    })
}
