//! Scripted agent client for orchestration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use tokio::sync::Notify;
use writers_room_config::{PolicyConfig, WritersRoomConfig};
use writers_room_core::{
    CharacterProfile, DialogueFailurePolicy, DialogueLine, PacingConfig, ResumeMode,
    SamplingConfig, SceneEndJudgment, ScenePlan, SummaryDraft,
};
use writers_room_error::{GenerationError, GenerationErrorKind, GenerationResult};
use writers_room_interface::{AgentClient, AgentOutput, AgentRequest, OutputShape};

/// Holds one agent call until the test releases it.
///
/// Dialogue gates count actor calls; planning and summary gates match the
/// scene number.
#[derive(Clone)]
pub struct CallGate {
    pub at: u32,
    pub reached: Arc<Notify>,
    pub release: Arc<Notify>,
}

impl CallGate {
    pub fn at(at: u32) -> Self {
        Self {
            at,
            reached: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
        }
    }

    async fn hold_if(&self, value: u32) {
        if self.at == value {
            self.reached.notify_one();
            self.release.notified().await;
        }
    }
}

/// Agent client answering from a fixed script.
pub struct ScriptedClient {
    cast: Vec<String>,
    fail_cast: bool,
    final_scene: u32,
    fail_plan_at: Option<u32>,
    fail_summaries: bool,
    judge_ends: bool,
    fail_judgments: bool,
    silent_character: Option<String>,
    gate: Option<CallGate>,
    plan_gate: Option<CallGate>,
    summary_gate: Option<CallGate>,
    dialogue_calls: AtomicU32,
    calls: Mutex<Vec<AgentRequest>>,
}

impl ScriptedClient {
    pub fn new(cast: &[&str]) -> Self {
        Self {
            cast: cast.iter().map(|name| name.to_string()).collect(),
            fail_cast: false,
            final_scene: 1,
            fail_plan_at: None,
            fail_summaries: false,
            judge_ends: true,
            fail_judgments: false,
            silent_character: None,
            gate: None,
            plan_gate: None,
            summary_gate: None,
            dialogue_calls: AtomicU32::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn final_scene(mut self, scene_number: u32) -> Self {
        self.final_scene = scene_number;
        self
    }

    pub fn failing_cast(mut self) -> Self {
        self.fail_cast = true;
        self
    }

    pub fn failing_plan_at(mut self, scene_number: u32) -> Self {
        self.fail_plan_at = Some(scene_number);
        self
    }

    pub fn failing_summaries(mut self) -> Self {
        self.fail_summaries = true;
        self
    }

    pub fn never_ending(mut self) -> Self {
        self.judge_ends = false;
        self
    }

    pub fn failing_judgments(mut self) -> Self {
        self.fail_judgments = true;
        self
    }

    pub fn silent(mut self, name: &str) -> Self {
        self.silent_character = Some(name.to_string());
        self
    }

    pub fn gated(mut self, gate: CallGate) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn gated_plan(mut self, gate: CallGate) -> Self {
        self.plan_gate = Some(gate);
        self
    }

    pub fn gated_summary(mut self, gate: CallGate) -> Self {
        self.summary_gate = Some(gate);
        self
    }

    pub fn count(&self, shape: OutputShape) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|request| request.shape() == shape)
            .count()
    }

    pub fn requests(&self) -> Vec<AgentRequest> {
        self.calls.lock().clone()
    }

    fn plan(&self, scene_number: u32) -> ScenePlan {
        ScenePlan {
            scene_number,
            heading: format!("INT. LOCATION {} - NIGHT", scene_number),
            setting: "A cramped room".to_string(),
            objective: format!("Objective {}", scene_number),
            characters_present: self.cast.clone(),
            mood: "tense".to_string(),
            opening_action: format!("Scene {} opens.", scene_number),
            is_final_scene: scene_number >= self.final_scene,
        }
    }
}

fn failure(message: &str) -> GenerationError {
    GenerationError::new(GenerationErrorKind::Transport(message.to_string()))
}

#[async_trait]
impl AgentClient for ScriptedClient {
    async fn invoke(
        &self,
        request: &AgentRequest,
        _sampling: &SamplingConfig,
    ) -> GenerationResult<AgentOutput> {
        self.calls.lock().push(request.clone());

        match request {
            AgentRequest::Cast { .. } => {
                if self.fail_cast {
                    return Err(failure("casting unavailable"));
                }
                Ok(AgentOutput::Cast(
                    self.cast
                        .iter()
                        .map(|name| CharacterProfile {
                            name: name.clone(),
                            bio: format!("{} has a past.", name),
                            personality_traits: vec!["guarded".to_string()],
                            speaking_style: "Plain".to_string(),
                        })
                        .collect(),
                ))
            }
            AgentRequest::PlanScene { scene_number, .. } => {
                if let Some(gate) = &self.plan_gate {
                    gate.hold_if(*scene_number).await;
                }
                if self.fail_plan_at == Some(*scene_number) {
                    return Err(failure("director unavailable"));
                }
                Ok(AgentOutput::ScenePlan(self.plan(*scene_number)))
            }
            AgentRequest::Dialogue { character, .. } => {
                let call = self.dialogue_calls.fetch_add(1, Ordering::SeqCst) + 1;
                if let Some(gate) = &self.gate {
                    gate.hold_if(call).await;
                }
                if self.silent_character.as_deref() == Some(character.name.as_str()) {
                    return Err(failure("actor unavailable"));
                }
                Ok(AgentOutput::Dialogue(DialogueLine {
                    dialogue: format!("{} speaks line {}.", character.name, call),
                    action: None,
                }))
            }
            AgentRequest::Summarize { scene_number, .. } => {
                if let Some(gate) = &self.summary_gate {
                    gate.hold_if(*scene_number).await;
                }
                if self.fail_summaries {
                    return Err(failure("analyst unavailable"));
                }
                Ok(AgentOutput::Summary(SummaryDraft {
                    summary: format!("Scene {} happened.", scene_number),
                    key_events: vec!["Something changed".to_string()],
                }))
            }
            AgentRequest::JudgeSceneEnd { .. } => {
                if self.fail_judgments {
                    return Err(failure("judgment unavailable"));
                }
                Ok(AgentOutput::SceneEnd(SceneEndJudgment {
                    should_end: self.judge_ends,
                    reason: "The objective is met".to_string(),
                }))
            }
        }
    }
}

/// Configuration with no pacing delays.
pub fn fast_config() -> WritersRoomConfig {
    WritersRoomConfig::default().with_pacing(PacingConfig::immediate())
}

/// Fast configuration with explicit policies.
pub fn config_with(
    dialogue_failure: DialogueFailurePolicy,
    resume: ResumeMode,
) -> WritersRoomConfig {
    fast_config().with_policy(PolicyConfig::new(dialogue_failure, resume))
}
