//! The director loop and its control surface.

use crate::{
    NarrativeStore, RandomSource, SceneOutcome, SceneProgress, ScenePlanner, SceneSummarizer,
    StopToken, SummaryOutcome, ThreadRandom, TurnEngine, TurnState, cast_characters, transcript,
};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error, info, instrument};
use writers_room_config::WritersRoomConfig;
use writers_room_core::{
    ActivityLog, AgentRole, LogKind, OrchestratorPhase, ResumeMode, ScenePlan, ScriptLine,
    SessionSnapshot,
};
use writers_room_error::{OrchestrationError, OrchestrationErrorKind, WritersRoomResult};
use writers_room_interface::AgentClient;

/// The store and stop token of the current session.
#[derive(Debug, Clone)]
struct Session {
    store: Arc<NarrativeStore>,
    stop: StopToken,
}

impl Session {
    fn fresh(activity_tx: broadcast::Sender<ActivityLog>) -> Self {
        Self {
            store: Arc::new(NarrativeStore::with_activity_sender(activity_tx)),
            stop: StopToken::new(),
        }
    }
}

struct Inner<C> {
    client: C,
    config: WritersRoomConfig,
    rng: Arc<dyn RandomSource>,
    activity_tx: broadcast::Sender<ActivityLog>,
    session: RwLock<Session>,
}

/// Drives a writing session: casting, then plan, act and summarize per
/// scene until the director marks a scene final.
///
/// The orchestrator is a cheap handle; clones share the session. Only one
/// director loop runs per session, so a `start_writing` or `resume` issued
/// while one is active returns immediately.
///
/// # Example
///
/// ```rust,ignore
/// use writers_room_narrative::Orchestrator;
///
/// let orchestrator = Orchestrator::new(client, config);
/// orchestrator.initialize("A lighthouse keeper finds a message in a bottle").await?;
/// orchestrator.start_writing().await?;
/// let snapshot = orchestrator.snapshot();
/// println!("{}", writers_room_narrative::format_fountain(&snapshot.story().script_lines));
/// ```
pub struct Orchestrator<C> {
    inner: Arc<Inner<C>>,
}

impl<C> Clone for Orchestrator<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: AgentClient> Orchestrator<C> {
    /// Create an orchestrator using thread-local randomness.
    pub fn new(client: C, config: WritersRoomConfig) -> Self {
        Self::with_random(client, config, ThreadRandom)
    }

    /// Create an orchestrator with an explicit random source.
    pub fn with_random(
        client: C,
        config: WritersRoomConfig,
        rng: impl RandomSource + 'static,
    ) -> Self {
        let (activity_tx, _) = broadcast::channel(crate::store::ACTIVITY_CHANNEL_CAPACITY);
        let session = Session::fresh(activity_tx.clone());
        Self {
            inner: Arc::new(Inner {
                client,
                config,
                rng: Arc::new(rng),
                activity_tx,
                session: RwLock::new(session),
            }),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &WritersRoomConfig {
        &self.inner.config
    }

    /// The agent client.
    pub fn client(&self) -> &C {
        &self.inner.client
    }

    fn session(&self) -> Session {
        self.inner.session.read().clone()
    }

    /// Store of the current session.
    pub fn store(&self) -> Arc<NarrativeStore> {
        self.session().store
    }

    /// Subscribe to the activity stream. The subscription survives resets.
    pub fn subscribe(&self) -> broadcast::Receiver<ActivityLog> {
        self.inner.activity_tx.subscribe()
    }

    /// Copy of the current session.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.store().snapshot()
    }

    /// Visible phase of the current session.
    pub fn phase(&self) -> OrchestratorPhase {
        self.store().phase()
    }

    fn fail(&self, store: &NarrativeStore, err: &OrchestrationError) {
        error!(error = %err, "Session failed");
        store.fail(err.kind.to_string());
        store.note(AgentRole::System, LogKind::Info, format!("Error: {}", err.kind));
    }

    /// Cast the characters for a theme.
    ///
    /// Runs once per session and leaves the session ready to write; it
    /// does not start writing.
    ///
    /// # Errors
    ///
    /// Fails if the session already has a cast, if it is in the error
    /// phase, or if casting fails. A casting failure moves the session to
    /// the error phase.
    #[instrument(skip(self, theme), fields(theme_len = theme.len()))]
    pub async fn initialize(&self, theme: &str) -> WritersRoomResult<()> {
        let Session { store, .. } = self.session();
        let Some(_guard) = store.try_begin_run() else {
            debug!("Session busy; initialize ignored");
            return Ok(());
        };

        if store.phase() == OrchestratorPhase::Error {
            return Err(session_failed(&store).into());
        }
        if store.has_cast() {
            return Err(
                OrchestrationError::new(OrchestrationErrorKind::AlreadyInitialized).into(),
            );
        }

        store.begin(theme);
        store.note(
            AgentRole::System,
            LogKind::Info,
            format!("Initializing the writers' room: {}", theme),
        );

        store.set_phase(OrchestratorPhase::Casting);
        store.note(AgentRole::Director, LogKind::Thinking, "Casting characters...");

        let config = &self.inner.config;
        let cast = cast_characters(
            &self.inner.client,
            theme,
            *config.casting().cast_size(),
            config.sampling().cast(),
        )
        .await;

        match cast {
            Ok(characters) => {
                let names = characters
                    .iter()
                    .map(|character| character.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                let count = characters.len();
                store.set_characters(characters);
                store.append_line(ScriptLine::Header {
                    content: theme.to_string(),
                });
                store.note(
                    AgentRole::Director,
                    LogKind::Complete,
                    format!("Cast {} characters: {}", count, names),
                );
                info!(count, "Session initialized");
                Ok(())
            }
            Err(e) => {
                self.fail(&store, &e);
                Err(e.into())
            }
        }
    }

    /// Run the director loop until the story finishes or writing is paused.
    ///
    /// Returns immediately when a loop is already running, the story is
    /// finished, or the session is paused.
    ///
    /// # Errors
    ///
    /// Fails if the session has no cast or is in the error phase, or with
    /// the fatal error that halted the loop. A fatal error moves the
    /// session to the error phase.
    #[instrument(skip(self))]
    pub async fn start_writing(&self) -> WritersRoomResult<()> {
        let Session { store, stop } = self.session();
        loop {
            {
                let Some(_guard) = store.try_begin_run() else {
                    debug!("Director loop already running");
                    return Ok(());
                };

                if store.phase() == OrchestratorPhase::Error {
                    return Err(session_failed(&store).into());
                }
                if !store.has_cast() {
                    return Err(
                        OrchestrationError::new(OrchestrationErrorKind::NotInitialized).into(),
                    );
                }
                if store.is_finished() || store.is_paused() {
                    debug!(
                        finished = store.is_finished(),
                        paused = store.is_paused(),
                        "Nothing to run"
                    );
                    return Ok(());
                }

                store.note(AgentRole::System, LogKind::Info, "Writing started");

                if let Err(e) = self.run_loop(&store, &stop).await {
                    self.fail(&store, &e);
                    return Err(e.into());
                }
            }

            // A resume that lost the race for the run slot left the work to us.
            if is_idle(&store, &stop) {
                return Ok(());
            }
            debug!("Resumed while the director loop was suspending; restarting");
        }
    }

    /// Suspend writing at the next turn or scene boundary.
    ///
    /// A generation call already in flight completes and its result is kept.
    #[instrument(skip(self))]
    pub fn pause(&self) {
        let Session { store, stop } = self.session();
        let phase = store.phase();
        if phase.is_terminal() || phase == OrchestratorPhase::Idle || store.is_paused() {
            debug!(phase = %phase, "Nothing to pause");
            return;
        }

        stop.cancel();
        store.set_paused(true);
        store.note(AgentRole::System, LogKind::Info, "Writing paused");
        info!("Pause requested");
    }

    /// Clear the pause and restart the director loop.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`start_writing`](Self::start_writing).
    #[instrument(skip(self))]
    pub async fn resume(&self) -> WritersRoomResult<()> {
        let Session { store, stop } = self.session();
        if !store.is_paused() {
            debug!("Not paused; resume ignored");
            return Ok(());
        }

        store.set_paused(false);
        stop.clear();
        store.note(AgentRole::System, LogKind::Info, "Writing resumed");
        info!("Resuming");

        self.start_writing().await
    }

    /// Discard the session and return to idle.
    ///
    /// A loop still running against the discarded session stops at its
    /// next check point and can no longer write anything.
    #[instrument(skip(self))]
    pub fn reset(&self) {
        let mut session = self.inner.session.write();
        session.stop.cancel();
        session.store.retire();
        *session = Session::fresh(self.inner.activity_tx.clone());
        session
            .store
            .note(AgentRole::System, LogKind::Info, "Session reset");
        info!("Session reset");
    }

    async fn run_loop(
        &self,
        store: &NarrativeStore,
        stop: &StopToken,
    ) -> Result<(), OrchestrationError> {
        let config = &self.inner.config;
        let client = &self.inner.client;

        loop {
            if store.is_finished() {
                return Ok(());
            }
            if stop.is_cancelled() || store.is_paused() || store.is_retired() {
                info!("Director loop suspended");
                return Ok(());
            }

            let (plan, scene_start, turn_state) = match store.take_progress() {
                Some(progress) => {
                    store.note(
                        AgentRole::Director,
                        LogKind::Info,
                        format!(
                            "Resuming scene {} at turn {}",
                            progress.plan.scene_number, progress.turn_state.turn_count
                        ),
                    );
                    (progress.plan, progress.scene_start, progress.turn_state)
                }
                None => self.plan_next(store).await?,
            };
            let scene_number = plan.scene_number;

            store.set_phase(OrchestratorPhase::Acting);
            let engine = TurnEngine::new(client, store, stop, self.inner.rng.as_ref(), config);
            match engine.run_scene(&plan, turn_state).await? {
                SceneOutcome::Interrupted { state } => {
                    if *config.policy().resume() == ResumeMode::ContinueScene {
                        store.save_progress(SceneProgress {
                            plan,
                            scene_start,
                            turn_state: state,
                        });
                    }
                    info!(scene_number, "Director loop suspended mid-scene");
                    return Ok(());
                }
                SceneOutcome::Wrapped { turns, .. } => {
                    store.note(
                        AgentRole::Director,
                        LogKind::Complete,
                        format!("Scene {} wrapped after {} lines", scene_number, turns),
                    );
                }
            }

            store.set_phase(OrchestratorPhase::Summarizing);
            store.note(
                AgentRole::Summarizer,
                LogKind::Thinking,
                format!("Summarizing scene {}...", scene_number),
            );
            let outcome = SceneSummarizer::new(client, config.sampling().scene_summary())
                .summarize(scene_number, &plan, transcript(&store.lines_from(scene_start)))
                .await;
            match &outcome {
                SummaryOutcome::Generated(summary) => {
                    store.note(AgentRole::Summarizer, LogKind::Complete, summary.summary.clone())
                }
                SummaryOutcome::Fallback { .. } => store.note(
                    AgentRole::System,
                    LogKind::Info,
                    format!("Summary of scene {} unavailable; using a placeholder", scene_number),
                ),
            }
            store.add_summary(outcome.into_summary());

            if plan.is_final_scene {
                store.finish();
                store.note(
                    AgentRole::Director,
                    LogKind::Complete,
                    "That's a wrap! The story is complete.",
                );
                info!(scenes = scene_number, "Story complete");
                return Ok(());
            }

            store.advance_scene();

            let delay = config.pacing().scene_delay();
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
    }

    /// Plan the next scene and open it in the script.
    async fn plan_next(
        &self,
        store: &NarrativeStore,
    ) -> Result<(ScenePlan, usize, TurnState), OrchestrationError> {
        let scene_number = store.current_scene_index() + 1;
        store.set_phase(OrchestratorPhase::PlanningScene);
        store.note(
            AgentRole::Director,
            LogKind::Thinking,
            format!("Planning scene {}...", scene_number),
        );

        let plan = ScenePlanner::new(&self.inner.client, self.inner.config.sampling().scene_plan())
            .plan(
                &store.theme(),
                &store.characters(),
                &store.summaries(),
                scene_number,
            )
            .await?;

        store.record_scene(plan.clone());
        let scene_start = store
            .append_line(ScriptLine::SceneHeading {
                content: plan.heading.clone(),
            })
            .unwrap_or_else(|| store.script_len());
        if !plan.opening_action.trim().is_empty() {
            store.append_line(ScriptLine::Action {
                content: plan.opening_action.clone(),
            });
        }
        store.note(
            AgentRole::Director,
            LogKind::Action,
            format!("Scene {}: {}", scene_number, plan.heading),
        );

        Ok((plan, scene_start, TurnState::default()))
    }
}

/// Whether the director loop has nothing left to do for now.
fn is_idle(store: &NarrativeStore, stop: &StopToken) -> bool {
    store.is_finished() || stop.is_cancelled() || store.is_paused() || store.is_retired()
}

#[track_caller]
fn session_failed(store: &NarrativeStore) -> OrchestrationError {
    OrchestrationError::new(OrchestrationErrorKind::SessionFailed(
        store.error().unwrap_or_else(|| "unknown error".to_string()),
    ))
}
