//! Scene summarization.

use tracing::{info, instrument, warn};
use writers_room_core::{SamplingConfig, ScenePlan, SceneSummary, ScriptLine};
use writers_room_error::{SoftError, SoftErrorKind};
use writers_room_interface::{AgentClient, AgentRequest};

/// Render script lines as a scene transcript, one line each.
///
/// Dialogue becomes `"speaker: line"`; headings and actions are verbatim.
pub fn transcript(lines: &[ScriptLine]) -> String {
    lines
        .iter()
        .map(ScriptLine::transcript_text)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Result of summarizing a scene.
#[derive(Debug, Clone)]
pub enum SummaryOutcome {
    /// The agent produced a summary
    Generated(SceneSummary),
    /// The agent failed and the fallback was substituted
    Fallback {
        /// The fallback summary
        summary: SceneSummary,
        /// Why the agent's summary was not used
        error: SoftError,
    },
}

impl SummaryOutcome {
    /// The summary to record.
    pub fn summary(&self) -> &SceneSummary {
        match self {
            Self::Generated(summary) | Self::Fallback { summary, .. } => summary,
        }
    }

    /// Take the summary to record.
    pub fn into_summary(self) -> SceneSummary {
        match self {
            Self::Generated(summary) | Self::Fallback { summary, .. } => summary,
        }
    }

    /// Whether the fallback was used.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Compresses a finished scene into a summary for future planning.
pub struct SceneSummarizer<'a, C: ?Sized> {
    client: &'a C,
    sampling: &'a SamplingConfig,
}

impl<'a, C: AgentClient + ?Sized> SceneSummarizer<'a, C> {
    /// Bind a summarizer to a client.
    pub fn new(client: &'a C, sampling: &'a SamplingConfig) -> Self {
        Self { client, sampling }
    }

    /// Summarize a scene. Never fails.
    #[instrument(skip(self, plan, transcript), fields(transcript_len = transcript.len()))]
    pub async fn summarize(
        &self,
        scene_number: u32,
        plan: &ScenePlan,
        transcript: String,
    ) -> SummaryOutcome {
        let request = AgentRequest::Summarize {
            scene_number,
            plan: plan.clone(),
            transcript,
        };

        let result = self
            .client
            .invoke(&request, self.sampling)
            .await
            .and_then(|output| output.into_summary());

        match result {
            Ok(draft) => {
                info!(key_events = draft.key_events.len(), "Scene summarized");
                SummaryOutcome::Generated(draft.into_summary(scene_number))
            }
            Err(e) => {
                let error = SoftError::new(SoftErrorKind::SummaryFallback {
                    scene_number,
                    reason: e.to_string(),
                });
                warn!(error = %error, "Using fallback summary");
                SummaryOutcome::Fallback {
                    summary: SceneSummary::fallback(scene_number),
                    error,
                }
            }
        }
    }
}
