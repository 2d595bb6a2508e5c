//! Scene planning.

use tracing::{debug, info, instrument};
use writers_room_core::{Character, SamplingConfig, ScenePlan, SceneSummary};
use writers_room_error::{OrchestrationError, OrchestrationErrorKind};
use writers_room_interface::{AgentClient, AgentRequest};

/// Asks the director for the next scene's plan.
///
/// The planner sees the theme, the roster and prior summaries only; raw
/// dialogue of earlier scenes is never passed along.
pub struct ScenePlanner<'a, C: ?Sized> {
    client: &'a C,
    sampling: &'a SamplingConfig,
}

impl<'a, C: AgentClient + ?Sized> ScenePlanner<'a, C> {
    /// Bind a planner to a client.
    pub fn new(client: &'a C, sampling: &'a SamplingConfig) -> Self {
        Self { client, sampling }
    }

    /// Plan scene `scene_number`.
    ///
    /// The returned plan always carries the requested number, whatever the
    /// agent wrote.
    ///
    /// # Errors
    ///
    /// Any agent failure is a fatal planning error.
    #[instrument(
        skip(self, theme, roster, summaries),
        fields(roster = roster.len(), prior_scenes = summaries.len())
    )]
    pub async fn plan(
        &self,
        theme: &str,
        roster: &[Character],
        summaries: &[SceneSummary],
        scene_number: u32,
    ) -> Result<ScenePlan, OrchestrationError> {
        let request = AgentRequest::PlanScene {
            theme: theme.to_string(),
            roster: roster.to_vec(),
            summaries: summaries.to_vec(),
            scene_number,
        };

        let mut plan = self
            .client
            .invoke(&request, self.sampling)
            .await
            .and_then(|output| output.into_scene_plan())
            .map_err(|e| {
                OrchestrationError::new(OrchestrationErrorKind::Planning {
                    scene_number,
                    message: e.to_string(),
                })
            })?;

        if plan.scene_number != scene_number {
            debug!(returned = plan.scene_number, "Renumbering scene plan");
            plan.scene_number = scene_number;
        }

        info!(heading = %plan.heading, is_final = plan.is_final_scene, "Scene planned");
        Ok(plan)
    }
}
