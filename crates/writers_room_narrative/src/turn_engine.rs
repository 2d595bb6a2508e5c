//! The per-scene acting loop.
//!
//! One call to [`TurnEngine::run_scene`] performs a scene's dialogue until
//! the scene wraps or a stop is requested. Each turn:
//!
//! 1. checks the stop token and the paused flag
//! 2. selects a speaker, never the previous one when anyone else is present
//! 3. asks the actor for a line and appends it to the script
//! 4. applies the termination check, consulting the director inside the
//!    judgment band

use crate::{NarrativeStore, RandomSource, StopToken};
use std::collections::VecDeque;
use tracing::{debug, info, instrument, warn};
use writers_room_config::WritersRoomConfig;
use writers_room_core::{
    ActivityLog, AgentRole, Character, DialogueFailurePolicy, LogKind, ScenePlan, ScriptLine,
    TurnPolicy,
};
use writers_room_error::{OrchestrationError, OrchestrationErrorKind, SoftError, SoftErrorKind};
use writers_room_interface::{AgentClient, AgentRequest};

/// Running state of one scene's dialogue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnState {
    /// Ids of recent speakers, oldest first
    pub recent_speakers: VecDeque<String>,
    /// Recent `"speaker: line"` entries, oldest first
    pub recent_lines: VecDeque<String>,
    /// Turns taken so far, including skipped ones
    pub turn_count: u32,
}

impl TurnState {
    /// Id of the previous speaker.
    pub fn last_speaker(&self) -> Option<&str> {
        self.recent_speakers.back().map(String::as_str)
    }

    /// The last `n` lines, oldest first.
    pub fn recent(&self, n: usize) -> Vec<String> {
        let skip = self.recent_lines.len().saturating_sub(n);
        self.recent_lines.iter().skip(skip).cloned().collect()
    }

    /// Remember a speaker and, when a line was delivered, the line.
    ///
    /// Both lists are bounded by `window`.
    pub fn record(&mut self, speaker_id: &str, line: Option<String>, window: usize) {
        self.recent_speakers.push_back(speaker_id.to_string());
        while self.recent_speakers.len() > window.max(1) {
            self.recent_speakers.pop_front();
        }

        if let Some(line) = line {
            self.recent_lines.push_back(line);
            while self.recent_lines.len() > window {
                self.recent_lines.pop_front();
            }
        }
    }
}

/// Choose who speaks next.
///
/// Characters named in the plan are available; with nobody available the
/// first roster member speaks. After the first turn the previous speaker is
/// excluded and the choice among the rest is random. On the first turn, or
/// when only the previous speaker is available, the choice is round-robin
/// on the turn count.
///
/// Returns `None` only for an empty roster.
///
/// # Examples
///
/// ```
/// use writers_room_core::{Character, ScenePlan};
/// use writers_room_narrative::{select_speaker, SequenceRandom};
///
/// let cast: Vec<Character> = ["A", "B"]
///     .iter()
///     .enumerate()
///     .map(|(i, name)| Character {
///         id: format!("char_{}", i + 1),
///         name: name.to_string(),
///         bio: String::new(),
///         personality_traits: vec![],
///         speaking_style: String::new(),
///     })
///     .collect();
/// let plan = ScenePlan {
///     scene_number: 1,
///     heading: "INT. ROOM - DAY".to_string(),
///     setting: String::new(),
///     objective: String::new(),
///     characters_present: vec!["A".to_string(), "B".to_string()],
///     mood: String::new(),
///     opening_action: String::new(),
///     is_final_scene: false,
/// };
/// let rng = SequenceRandom::new([0]);
///
/// let first = select_speaker(&cast, &plan, None, 0, &rng).unwrap();
/// assert_eq!(first.name, "A");
/// let second = select_speaker(&cast, &plan, Some("char_1"), 1, &rng).unwrap();
/// assert_eq!(second.name, "B");
/// ```
pub fn select_speaker<'a>(
    roster: &'a [Character],
    plan: &ScenePlan,
    last_speaker: Option<&str>,
    turn_count: u32,
    rng: &dyn RandomSource,
) -> Option<&'a Character> {
    let mut available: Vec<&Character> = roster
        .iter()
        .filter(|character| plan.features(&character.name))
        .collect();

    if available.is_empty() {
        available.push(roster.first()?);
    }

    let others: Vec<&Character> = available
        .iter()
        .copied()
        .filter(|character| Some(character.id.as_str()) != last_speaker)
        .collect();

    if turn_count > 0 && !others.is_empty() {
        return Some(others[rng.pick_index(others.len())]);
    }

    Some(available[turn_count as usize % available.len()])
}

/// What the termination policy says after a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum TerminationCheck {
    /// Below the floor; keep going without asking
    Continue,
    /// Inside the band; the director decides
    AskDirector,
    /// At the cap; the scene ends
    Wrap,
}

/// Apply the turn bounds to a completed turn count.
///
/// # Examples
///
/// ```
/// use writers_room_core::TurnPolicy;
/// use writers_room_narrative::{termination_check, TerminationCheck};
///
/// let policy = TurnPolicy::default();
/// assert_eq!(termination_check(7, &policy), TerminationCheck::Continue);
/// assert_eq!(termination_check(8, &policy), TerminationCheck::AskDirector);
/// assert_eq!(termination_check(12, &policy), TerminationCheck::Wrap);
/// ```
pub fn termination_check(turn_count: u32, policy: &TurnPolicy) -> TerminationCheck {
    if turn_count >= *policy.max_turns() {
        TerminationCheck::Wrap
    } else if turn_count < *policy.min_turns() {
        TerminationCheck::Continue
    } else {
        TerminationCheck::AskDirector
    }
}

/// Why a scene ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WrapReason {
    /// The hard turn cap was reached
    TurnCap,
    /// The director called the scene
    DirectorCall(String),
}

/// Result of running a scene's dialogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneOutcome {
    /// The scene ended normally
    Wrapped {
        /// Turns taken
        turns: u32,
        /// Why it ended
        reason: WrapReason,
    },
    /// A stop or pause was observed before a turn
    Interrupted {
        /// State to continue from
        state: TurnState,
    },
}

/// Runs the acting loop of one scene.
pub struct TurnEngine<'a, C: ?Sized> {
    client: &'a C,
    store: &'a NarrativeStore,
    stop: &'a StopToken,
    rng: &'a dyn RandomSource,
    config: &'a WritersRoomConfig,
}

impl<'a, C: AgentClient + ?Sized> TurnEngine<'a, C> {
    /// Bind the engine to a session.
    pub fn new(
        client: &'a C,
        store: &'a NarrativeStore,
        stop: &'a StopToken,
        rng: &'a dyn RandomSource,
        config: &'a WritersRoomConfig,
    ) -> Self {
        Self {
            client,
            store,
            stop,
            rng,
            config,
        }
    }

    fn should_stop(&self) -> bool {
        self.stop.is_cancelled() || self.store.is_paused() || self.store.is_retired()
    }

    /// Run the scene's dialogue, starting from `state`.
    ///
    /// # Errors
    ///
    /// Returns an [`OrchestrationError`] for an empty roster, or for a failed
    /// line under [`DialogueFailurePolicy::Abort`].
    #[instrument(
        skip(self, plan, state),
        fields(scene_number = plan.scene_number, start_turn = state.turn_count)
    )]
    pub async fn run_scene(
        &self,
        plan: &ScenePlan,
        mut state: TurnState,
    ) -> Result<SceneOutcome, OrchestrationError> {
        let roster = self.store.characters();
        let policy = self.config.turns();
        let window = policy.context_window();

        loop {
            if self.should_stop() {
                info!(turn = state.turn_count, "Acting interrupted");
                return Ok(SceneOutcome::Interrupted { state });
            }

            let speaker = select_speaker(
                &roster,
                plan,
                state.last_speaker(),
                state.turn_count,
                self.rng,
            )
            .ok_or_else(|| OrchestrationError::new(OrchestrationErrorKind::EmptyRoster))?;

            self.store.log(
                ActivityLog::new(
                    AgentRole::Actor,
                    LogKind::Thinking,
                    format!("{} is thinking...", speaker.name),
                )
                .with_agent_name(&speaker.name),
            );

            let line = self.deliver_line(speaker, plan, &state).await?;
            state.record(&speaker.id, line, window);
            state.turn_count += 1;

            match termination_check(state.turn_count, policy) {
                TerminationCheck::Continue => {}
                TerminationCheck::Wrap => {
                    info!(turns = state.turn_count, "Scene reached the turn cap");
                    return Ok(SceneOutcome::Wrapped {
                        turns: state.turn_count,
                        reason: WrapReason::TurnCap,
                    });
                }
                TerminationCheck::AskDirector => {
                    if let Some(reason) = self.judge(plan, &state).await {
                        info!(
                            turns = state.turn_count,
                            reason = %reason,
                            "Director called the scene"
                        );
                        return Ok(SceneOutcome::Wrapped {
                            turns: state.turn_count,
                            reason: WrapReason::DirectorCall(reason),
                        });
                    }
                }
            }

            let delay = self.config.pacing().turn_delay();
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
    }

    /// Generate and append one line. Returns the transcript entry, or `None` for a skipped turn.
    async fn deliver_line(
        &self,
        speaker: &Character,
        plan: &ScenePlan,
        state: &TurnState,
    ) -> Result<Option<String>, OrchestrationError> {
        let request = AgentRequest::Dialogue {
            character: speaker.clone(),
            plan: plan.clone(),
            recent_lines: state.recent(*self.config.turns().dialogue_window()),
        };
        let sampling = self.config.sampling().dialogue();

        let result = self
            .client
            .invoke(&request, sampling)
            .await
            .and_then(|output| output.into_dialogue());

        match result {
            Ok(line) => {
                let script_line = ScriptLine::Dialogue {
                    content: line.script_text(),
                    speaker: speaker.name.clone(),
                    character_id: speaker.id.clone(),
                };
                let transcript = script_line.transcript_text();
                self.store.append_line(script_line);
                self.store.log(
                    ActivityLog::new(AgentRole::Actor, LogKind::Action, line.script_text())
                        .with_agent_name(&speaker.name),
                );
                debug!(turn = state.turn_count, speaker = %speaker.name, "Line delivered");
                Ok(Some(transcript))
            }
            Err(e) => match self.config.policy().dialogue_failure() {
                DialogueFailurePolicy::Abort => Err(OrchestrationError::new(
                    OrchestrationErrorKind::Dialogue {
                        character: speaker.name.clone(),
                        message: e.to_string(),
                    },
                )),
                DialogueFailurePolicy::SkipTurn => {
                    let soft = SoftError::new(SoftErrorKind::TurnSkipped {
                        turn: state.turn_count,
                        character: speaker.name.clone(),
                        reason: e.to_string(),
                    });
                    warn!(error = %soft, "Skipping turn");
                    self.store.log(
                        ActivityLog::new(
                            AgentRole::System,
                            LogKind::Info,
                            format!("{} could not deliver a line; skipping the turn", speaker.name),
                        )
                        .with_agent_name(&speaker.name),
                    );
                    Ok(None)
                }
            },
        }
    }

    /// Ask the director whether to cut. Returns the reason when the scene should end.
    ///
    /// A failed judgment means the scene goes on.
    async fn judge(&self, plan: &ScenePlan, state: &TurnState) -> Option<String> {
        let request = AgentRequest::JudgeSceneEnd {
            objective: plan.objective.clone(),
            recent_lines: state.recent(*self.config.turns().judgment_window()),
            turn_count: state.turn_count,
        };
        let sampling = self.config.sampling().scene_end();

        let result = self
            .client
            .invoke(&request, sampling)
            .await
            .and_then(|output| output.into_scene_end());

        match result {
            Ok(judgment) if judgment.should_end => {
                self.store.note(
                    AgentRole::Director,
                    LogKind::Complete,
                    format!("Cut! {}", judgment.reason),
                );
                Some(judgment.reason)
            }
            Ok(_) => None,
            Err(e) => {
                let soft = SoftError::new(SoftErrorKind::JudgmentFallback {
                    turn: state.turn_count,
                    reason: e.to_string(),
                });
                warn!(error = %soft, "Scene-end judgment failed; continuing the scene");
                self.store.note(
                    AgentRole::System,
                    LogKind::Info,
                    "Scene-end judgment unavailable; the scene continues",
                );
                None
            }
        }
    }
}
