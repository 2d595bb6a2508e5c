//! The narrative store: the single shared mutable state of a session.

use crate::TurnState;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::broadcast;
use tracing::{debug, trace};
use writers_room_core::{
    ActivityLog, AgentRole, Character, LogKind, OrchestratorPhase, ScenePlan, SceneRecord,
    SceneSummary, ScriptLine, SessionSnapshot, StoryState,
};

/// Capacity of the activity broadcast channel.
pub const ACTIVITY_CHANNEL_CAPACITY: usize = 256;

/// An interrupted scene, kept so resume can continue it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneProgress {
    /// Plan of the interrupted scene
    pub plan: ScenePlan,
    /// Index of the scene's heading in the script
    pub scene_start: usize,
    /// Turn state at the interruption
    pub turn_state: TurnState,
}

#[derive(Debug, Default)]
struct StoreState {
    story: StoryState,
    phase: OrchestratorPhase,
    is_paused: bool,
    error: Option<String>,
    activity: Vec<ActivityLog>,
    progress: Option<SceneProgress>,
}

/// Atomic mutation surface over one session's story.
///
/// The store carries no business logic. Every mutation is serialized
/// through one lock, so script lines keep their append order. Once
/// [`retire`](Self::retire)d the store ignores every mutation, which keeps
/// a generation that completes after a reset out of the next session.
#[derive(Debug)]
pub struct NarrativeStore {
    state: RwLock<StoreState>,
    activity_tx: broadcast::Sender<ActivityLog>,
    retired: AtomicBool,
    running: AtomicBool,
}

impl Default for NarrativeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NarrativeStore {
    /// An idle store with its own activity channel.
    pub fn new() -> Self {
        let (activity_tx, _) = broadcast::channel(ACTIVITY_CHANNEL_CAPACITY);
        Self::with_activity_sender(activity_tx)
    }

    /// An idle store broadcasting activity on an existing channel.
    pub fn with_activity_sender(activity_tx: broadcast::Sender<ActivityLog>) -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            activity_tx,
            retired: AtomicBool::new(false),
            running: AtomicBool::new(false),
        }
    }

    /// Subscribe to activity entries recorded from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<ActivityLog> {
        self.activity_tx.subscribe()
    }

    /// Apply a mutation unless the store is retired.
    fn mutate<R>(&self, f: impl FnOnce(&mut StoreState) -> R) -> Option<R> {
        let mut state = self.state.write();
        if self.retired.load(Ordering::SeqCst) {
            trace!("Ignoring mutation on retired store");
            return None;
        }
        Some(f(&mut state))
    }

    // ============================================================================
    // Lifecycle
    // ============================================================================

    /// Stop accepting mutations for good.
    pub fn retire(&self) {
        let _state = self.state.write();
        self.retired.store(true, Ordering::SeqCst);
        debug!("Narrative store retired");
    }

    /// Whether the store has been retired.
    pub fn is_retired(&self) -> bool {
        self.retired.load(Ordering::SeqCst)
    }

    /// Claim the single director-loop slot.
    ///
    /// Returns `None` when a loop already holds it. The slot is released
    /// when the guard drops.
    pub fn try_begin_run(&self) -> Option<RunGuard<'_>> {
        self.running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| RunGuard { store: self })
    }

    /// Whether a director loop currently holds the run slot.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    // ============================================================================
    // Mutations
    // ============================================================================

    /// Start a session for a theme.
    pub fn begin(&self, theme: &str) {
        self.mutate(|state| {
            state.story = StoryState::with_theme(theme);
            state.phase = OrchestratorPhase::Initializing;
            state.error = None;
        });
    }

    /// Move to a phase.
    ///
    /// While paused the phase is remembered and reported once resumed.
    pub fn set_phase(&self, phase: OrchestratorPhase) {
        self.mutate(|state| {
            debug!(from = %state.phase, to = %phase, "Phase transition");
            state.phase = phase;
        });
    }

    /// Store the cast.
    pub fn set_characters(&self, characters: Vec<Character>) {
        self.mutate(|state| state.story.characters = characters);
    }

    /// Append a script line, returning its index.
    pub fn append_line(&self, line: ScriptLine) -> Option<usize> {
        self.mutate(|state| {
            state.story.script_lines.push(line);
            state.story.script_lines.len() - 1
        })
    }

    /// Record a planned scene.
    ///
    /// A re-planned scene replaces the record with the same number so scene
    /// numbers stay gap-free.
    pub fn record_scene(&self, plan: ScenePlan) {
        self.mutate(|state| {
            let record = SceneRecord::new(plan);
            let scenes = &mut state.story.scenes;
            match scenes.last_mut() {
                Some(last) if last.plan.scene_number == record.plan.scene_number => {
                    debug!(scene_number = record.plan.scene_number, "Replacing re-planned scene");
                    *last = record;
                }
                _ => scenes.push(record),
            }
        });
    }

    /// Append a scene summary and extend the running synopsis.
    pub fn add_summary(&self, summary: SceneSummary) {
        self.mutate(|state| {
            let story = &mut state.story;
            if !story.summary_so_far.is_empty() {
                story.summary_so_far.push_str("\n\n");
            }
            story
                .summary_so_far
                .push_str(&format!("Scene {}: {}", summary.scene_number, summary.summary));
            story.summaries.push(summary);
        });
    }

    /// Count one more committed scene.
    pub fn advance_scene(&self) {
        self.mutate(|state| state.story.current_scene_index += 1);
    }

    /// Mark the story finished.
    pub fn finish(&self) {
        self.mutate(|state| {
            state.story.is_finished = true;
            state.phase = OrchestratorPhase::Completed;
            state.progress = None;
        });
    }

    /// Record an unrecovered failure.
    pub fn fail(&self, message: impl Into<String>) {
        self.mutate(|state| {
            state.error = Some(message.into());
            state.phase = OrchestratorPhase::Error;
        });
    }

    /// Set or clear the paused flag.
    pub fn set_paused(&self, paused: bool) {
        self.mutate(|state| state.is_paused = paused);
    }

    /// Keep an interrupted scene for resume.
    pub fn save_progress(&self, progress: SceneProgress) {
        self.mutate(|state| state.progress = Some(progress));
    }

    /// Take the interrupted scene, if any.
    pub fn take_progress(&self) -> Option<SceneProgress> {
        self.mutate(|state| state.progress.take()).flatten()
    }

    /// Record and broadcast an activity entry.
    pub fn log(&self, entry: ActivityLog) {
        let recorded = self.mutate(|state| state.activity.push(entry.clone()));
        if recorded.is_some() {
            // No subscribers is fine.
            let _ = self.activity_tx.send(entry);
        }
    }

    /// Shorthand for [`log`](Self::log).
    pub fn note(&self, agent: AgentRole, kind: LogKind, message: impl Into<String>) {
        self.log(ActivityLog::new(agent, kind, message));
    }

    // ============================================================================
    // Reads
    // ============================================================================

    /// Visible phase. `Paused` masks non-terminal phases while paused.
    pub fn phase(&self) -> OrchestratorPhase {
        let state = self.state.read();
        visible_phase(&state)
    }

    /// Whether writing is suspended.
    pub fn is_paused(&self) -> bool {
        self.state.read().is_paused
    }

    /// Whether the final scene has been written.
    pub fn is_finished(&self) -> bool {
        self.state.read().story.is_finished
    }

    /// Last recorded error.
    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    /// The user's premise.
    pub fn theme(&self) -> String {
        self.state.read().story.theme.clone()
    }

    /// The cast.
    pub fn characters(&self) -> Vec<Character> {
        self.state.read().story.characters.clone()
    }

    /// Whether a cast exists.
    pub fn has_cast(&self) -> bool {
        !self.state.read().story.characters.is_empty()
    }

    /// Summaries so far.
    pub fn summaries(&self) -> Vec<SceneSummary> {
        self.state.read().story.summaries.clone()
    }

    /// Committed scene count.
    pub fn current_scene_index(&self) -> u32 {
        self.state.read().story.current_scene_index
    }

    /// Number of script lines.
    pub fn script_len(&self) -> usize {
        self.state.read().story.script_lines.len()
    }

    /// Script lines from `start` to the end.
    pub fn lines_from(&self, start: usize) -> Vec<ScriptLine> {
        self.state
            .read()
            .story
            .script_lines
            .get(start..)
            .map(<[ScriptLine]>::to_vec)
            .unwrap_or_default()
    }

    /// Whether an interrupted scene is waiting.
    pub fn has_progress(&self) -> bool {
        self.state.read().progress.is_some()
    }

    /// Copy of the story.
    pub fn story(&self) -> StoryState {
        self.state.read().story.clone()
    }

    /// Copy of everything a host renders.
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.read();
        SessionSnapshot::new(
            state.story.clone(),
            visible_phase(&state),
            state.is_paused,
            state.error.clone(),
            state.activity.clone(),
        )
    }
}

fn visible_phase(state: &StoreState) -> OrchestratorPhase {
    if state.is_paused && !state.phase.is_terminal() {
        OrchestratorPhase::Paused
    } else {
        state.phase
    }
}

/// Holds the director-loop slot of a [`NarrativeStore`].
#[derive(Debug)]
pub struct RunGuard<'a> {
    store: &'a NarrativeStore,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.store.running.store(false, Ordering::SeqCst);
    }
}
