//! Role-aware agent invocations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use writers_room_core::{
    AgentRole, Character, CharacterProfile, DialogueLine, SamplingConfig, SceneEndJudgment,
    ScenePlan, SceneSummary, SummaryDraft,
};
use writers_room_error::{GenerationError, GenerationErrorKind, GenerationResult};

/// The output shape an invocation asks for.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OutputShape {
    /// A list of character profiles
    Cast,
    /// A scene plan
    ScenePlan,
    /// Free-form dialogue text
    Dialogue,
    /// A scene summary
    SceneSummary,
    /// A scene-end verdict
    SceneEnd,
}

/// One agent invocation, carrying the context the agent needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AgentRequest {
    /// Generate the cast for a theme.
    Cast {
        /// The user's premise
        theme: String,
        /// Number of characters to create
        cast_size: usize,
    },
    /// Plan the next scene.
    PlanScene {
        /// The user's premise
        theme: String,
        /// Full roster
        roster: Vec<Character>,
        /// Summaries of every prior scene
        summaries: Vec<SceneSummary>,
        /// Number of the scene to plan
        scene_number: u32,
    },
    /// Produce the next line for a character.
    Dialogue {
        /// Speaking character
        character: Character,
        /// Current scene plan
        plan: ScenePlan,
        /// Most recent `"speaker: line"` entries, oldest first
        recent_lines: Vec<String>,
    },
    /// Summarize a finished scene.
    Summarize {
        /// Scene number
        scene_number: u32,
        /// Plan the scene was shot from
        plan: ScenePlan,
        /// Scene transcript, one line per script line
        transcript: String,
    },
    /// Decide whether the scene has run its course.
    JudgeSceneEnd {
        /// Scene objective
        objective: String,
        /// Most recent `"speaker: line"` entries, oldest first
        recent_lines: Vec<String>,
        /// Turns completed so far
        turn_count: u32,
    },
}

impl AgentRequest {
    /// The agent role answering this request.
    pub fn role(&self) -> AgentRole {
        match self {
            Self::Cast { .. } | Self::PlanScene { .. } | Self::JudgeSceneEnd { .. } => {
                AgentRole::Director
            }
            Self::Dialogue { .. } => AgentRole::Actor,
            Self::Summarize { .. } => AgentRole::Summarizer,
        }
    }

    /// The output shape this request expects.
    pub fn shape(&self) -> OutputShape {
        match self {
            Self::Cast { .. } => OutputShape::Cast,
            Self::PlanScene { .. } => OutputShape::ScenePlan,
            Self::Dialogue { .. } => OutputShape::Dialogue,
            Self::Summarize { .. } => OutputShape::SceneSummary,
            Self::JudgeSceneEnd { .. } => OutputShape::SceneEnd,
        }
    }
}

/// A parsed, validated agent result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AgentOutput {
    /// Proposed cast
    Cast(Vec<CharacterProfile>),
    /// Scene plan
    ScenePlan(ScenePlan),
    /// A single line of dialogue
    Dialogue(DialogueLine),
    /// Summary of a scene
    Summary(SummaryDraft),
    /// Scene-end verdict
    SceneEnd(SceneEndJudgment),
}

impl AgentOutput {
    /// The shape of this output.
    pub fn shape(&self) -> OutputShape {
        match self {
            Self::Cast(_) => OutputShape::Cast,
            Self::ScenePlan(_) => OutputShape::ScenePlan,
            Self::Dialogue(_) => OutputShape::Dialogue,
            Self::Summary(_) => OutputShape::SceneSummary,
            Self::SceneEnd(_) => OutputShape::SceneEnd,
        }
    }

    #[track_caller]
    fn mismatch(self, expected: OutputShape) -> GenerationError {
        GenerationError::new(GenerationErrorKind::ShapeMismatch {
            expected: expected.to_string(),
            actual: self.shape().to_string(),
        })
    }

    /// Unwrap a cast, or fail with a shape mismatch.
    #[track_caller]
    pub fn into_cast(self) -> GenerationResult<Vec<CharacterProfile>> {
        match self {
            Self::Cast(profiles) => Ok(profiles),
            other => Err(other.mismatch(OutputShape::Cast)),
        }
    }

    /// Unwrap a scene plan, or fail with a shape mismatch.
    #[track_caller]
    pub fn into_scene_plan(self) -> GenerationResult<ScenePlan> {
        match self {
            Self::ScenePlan(plan) => Ok(plan),
            other => Err(other.mismatch(OutputShape::ScenePlan)),
        }
    }

    /// Unwrap a dialogue line, or fail with a shape mismatch.
    #[track_caller]
    pub fn into_dialogue(self) -> GenerationResult<DialogueLine> {
        match self {
            Self::Dialogue(line) => Ok(line),
            other => Err(other.mismatch(OutputShape::Dialogue)),
        }
    }

    /// Unwrap a summary draft, or fail with a shape mismatch.
    #[track_caller]
    pub fn into_summary(self) -> GenerationResult<SummaryDraft> {
        match self {
            Self::Summary(draft) => Ok(draft),
            other => Err(other.mismatch(OutputShape::SceneSummary)),
        }
    }

    /// Unwrap a scene-end verdict, or fail with a shape mismatch.
    #[track_caller]
    pub fn into_scene_end(self) -> GenerationResult<SceneEndJudgment> {
        match self {
            Self::SceneEnd(judgment) => Ok(judgment),
            other => Err(other.mismatch(OutputShape::SceneEnd)),
        }
    }
}

/// A role-aware model client.
///
/// Implementations own prompt construction and output parsing; callers only
/// see typed results. Any failure is reported as a [`GenerationError`] and
/// the caller decides whether it is fatal.
#[async_trait]
pub trait AgentClient: Send + Sync {
    /// Run one agent invocation.
    async fn invoke(
        &self,
        request: &AgentRequest,
        sampling: &SamplingConfig,
    ) -> GenerationResult<AgentOutput>;
}

#[async_trait]
impl<T: AgentClient + ?Sized> AgentClient for std::sync::Arc<T> {
    async fn invoke(
        &self,
        request: &AgentRequest,
        sampling: &SamplingConfig,
    ) -> GenerationResult<AgentOutput> {
        (**self).invoke(request, sampling).await
    }
}
