mod common;

use common::{CallGate, ScriptedClient, config_with, fast_config};
use std::sync::Arc;
use writers_room_core::{
    AgentRole, DialogueFailurePolicy, OrchestratorPhase, ResumeMode, SceneSummary, ScriptLine,
    StoryState, TurnPolicy,
};
use writers_room_error::{OrchestrationErrorKind, WritersRoomError};
use writers_room_interface::{AgentRequest, OutputShape};
use writers_room_narrative::{Orchestrator, SequenceRandom};

fn orchestrator(client: &Arc<ScriptedClient>) -> Orchestrator<Arc<ScriptedClient>> {
    Orchestrator::new(Arc::clone(client), fast_config())
}

fn orchestration_kind(err: &WritersRoomError) -> OrchestrationErrorKind {
    err.as_orchestration()
        .map(|e| e.kind.clone())
        .expect("orchestration error")
}

/// Speakers of each scene's dialogue, in order.
fn speakers_by_scene(story: &StoryState) -> Vec<Vec<String>> {
    let mut scenes: Vec<Vec<String>> = Vec::new();
    for line in &story.script_lines {
        match line {
            ScriptLine::SceneHeading { .. } => scenes.push(Vec::new()),
            ScriptLine::Dialogue { speaker, .. } => {
                if let Some(scene) = scenes.last_mut() {
                    scene.push(speaker.clone());
                }
            }
            _ => {}
        }
    }
    scenes
}

#[tokio::test]
async fn test_final_first_scene_completes_after_one_scene() {
    let client = Arc::new(ScriptedClient::new(&["Ava", "Ben", "Cy"]).final_scene(1));
    let orchestrator = orchestrator(&client);

    orchestrator.initialize("A heist at the opera").await.unwrap();
    orchestrator.start_writing().await.unwrap();

    let snapshot = orchestrator.snapshot();
    let story = snapshot.story();
    assert_eq!(*snapshot.phase(), OrchestratorPhase::Completed);
    assert!(story.is_finished);
    assert_eq!(story.scenes.len(), 1);
    assert_eq!(story.summaries.len(), 1);
    assert_eq!(client.count(OutputShape::ScenePlan), 1);

    assert_eq!(
        story.script_lines[0],
        ScriptLine::Header {
            content: "A heist at the opera".to_string()
        }
    );
    assert!(matches!(story.script_lines[1], ScriptLine::SceneHeading { .. }));
    assert!(matches!(story.script_lines[2], ScriptLine::Action { .. }));

    // The director ends the scene as soon as it is asked.
    assert_eq!(story.dialogue_count(), *TurnPolicy::default().min_turns() as usize);
}

#[tokio::test]
async fn test_scenes_are_numbered_without_gaps() {
    let client = Arc::new(ScriptedClient::new(&["Ava", "Ben"]).final_scene(3));
    let orchestrator = orchestrator(&client);

    orchestrator.initialize("Three nights in a lighthouse").await.unwrap();
    orchestrator.start_writing().await.unwrap();

    let story = orchestrator.snapshot().into_story();
    let ids: Vec<&str> = story.scenes.iter().map(|record| record.id.as_str()).collect();
    assert_eq!(ids, vec!["scene_1", "scene_2", "scene_3"]);

    let numbers: Vec<u32> = story.summaries.iter().map(|s| s.scene_number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert!(story.summary_so_far.contains("Scene 1: Scene 1 happened."));
    assert!(story.summary_so_far.contains("Scene 3: Scene 3 happened."));

    let headings = story
        .script_lines
        .iter()
        .filter(|line| matches!(line, ScriptLine::SceneHeading { .. }))
        .count();
    assert_eq!(headings, 3);
}

#[tokio::test]
async fn test_later_scenes_are_planned_with_earlier_summaries() {
    let client = Arc::new(ScriptedClient::new(&["Ava", "Ben"]).final_scene(2));
    let orchestrator = orchestrator(&client);

    orchestrator.initialize("A border crossing").await.unwrap();
    orchestrator.start_writing().await.unwrap();

    let plan_requests: Vec<_> = client
        .requests()
        .into_iter()
        .filter_map(|request| match request {
            writers_room_interface::AgentRequest::PlanScene {
                summaries,
                scene_number,
                ..
            } => Some((scene_number, summaries.len())),
            _ => None,
        })
        .collect();
    assert_eq!(plan_requests, vec![(1, 0), (2, 1)]);
}

#[tokio::test]
async fn test_scene_wraps_at_turn_cap() {
    let client = Arc::new(ScriptedClient::new(&["Ava", "Ben", "Cy"]).never_ending());
    let orchestrator = orchestrator(&client);

    orchestrator.initialize("An endless argument").await.unwrap();
    orchestrator.start_writing().await.unwrap();

    let story = orchestrator.snapshot().into_story();
    let policy = TurnPolicy::default();
    assert_eq!(story.dialogue_count(), *policy.max_turns() as usize);

    // Judgments are only requested inside the band.
    let judged = (*policy.max_turns() - *policy.min_turns()) as usize;
    assert_eq!(client.count(OutputShape::SceneEnd), judged);
}

#[tokio::test]
async fn test_failed_judgment_keeps_scene_going() {
    let client = Arc::new(ScriptedClient::new(&["Ava", "Ben"]).failing_judgments());
    let orchestrator = orchestrator(&client);

    orchestrator.initialize("A quiet standoff").await.unwrap();
    orchestrator.start_writing().await.unwrap();

    let story = orchestrator.snapshot().into_story();
    assert!(story.is_finished);
    assert_eq!(
        story.dialogue_count(),
        *TurnPolicy::default().max_turns() as usize
    );
}

#[tokio::test]
async fn test_no_character_speaks_twice_in_a_row() {
    let client = Arc::new(
        ScriptedClient::new(&["Ava", "Ben", "Cy", "Dee"])
            .final_scene(3)
            .never_ending(),
    );
    let orchestrator = orchestrator(&client);

    orchestrator.initialize("A family reunion").await.unwrap();
    orchestrator.start_writing().await.unwrap();

    let story = orchestrator.snapshot().into_story();
    for scene in speakers_by_scene(&story) {
        for pair in scene.windows(2) {
            assert_ne!(pair[0], pair[1], "speaker repeated in {:?}", scene);
        }
    }
}

#[tokio::test]
async fn test_two_characters_alternate() {
    let client = Arc::new(ScriptedClient::new(&["A", "B"]));
    let orchestrator =
        Orchestrator::with_random(Arc::clone(&client), fast_config(), SequenceRandom::new([0]));

    orchestrator.initialize("Two strangers on a train").await.unwrap();
    orchestrator.start_writing().await.unwrap();

    let story = orchestrator.snapshot().into_story();
    let speakers = &speakers_by_scene(&story)[0];
    assert_eq!(&speakers[..4], &["A", "B", "A", "B"]);
}

#[tokio::test]
async fn test_summary_failure_uses_fallback_and_continues() {
    let client = Arc::new(
        ScriptedClient::new(&["Ava", "Ben"])
            .final_scene(2)
            .failing_summaries(),
    );
    let orchestrator = orchestrator(&client);

    orchestrator.initialize("A storm at sea").await.unwrap();
    orchestrator.start_writing().await.unwrap();

    let story = orchestrator.snapshot().into_story();
    assert!(story.is_finished);
    assert_eq!(story.summaries.len(), 2);
    assert_eq!(story.summaries[0], SceneSummary::fallback(1));
    assert_eq!(story.summaries[1], SceneSummary::fallback(2));
}

#[tokio::test]
async fn test_planning_failure_enters_error_phase() {
    let client = Arc::new(
        ScriptedClient::new(&["Ava", "Ben"])
            .final_scene(3)
            .failing_plan_at(2),
    );
    let orchestrator = orchestrator(&client);

    orchestrator.initialize("A collapsing empire").await.unwrap();
    let err = orchestrator.start_writing().await.unwrap_err();
    assert!(matches!(
        orchestration_kind(&err),
        OrchestrationErrorKind::Planning { scene_number: 2, .. }
    ));

    let snapshot = orchestrator.snapshot();
    assert_eq!(*snapshot.phase(), OrchestratorPhase::Error);
    assert!(snapshot.error().is_some());
    assert_eq!(snapshot.story().scenes.len(), 1);

    let err = orchestrator.start_writing().await.unwrap_err();
    assert!(matches!(
        orchestration_kind(&err),
        OrchestrationErrorKind::SessionFailed(_)
    ));
}

#[tokio::test]
async fn test_casting_failure_enters_error_phase() {
    let client = Arc::new(ScriptedClient::new(&["Ava"]).failing_cast());
    let orchestrator = orchestrator(&client);

    let err = orchestrator.initialize("A haunted mill").await.unwrap_err();
    assert!(matches!(
        orchestration_kind(&err),
        OrchestrationErrorKind::Casting(_)
    ));
    assert_eq!(orchestrator.phase(), OrchestratorPhase::Error);
    assert!(orchestrator.snapshot().story().characters.is_empty());
}

#[tokio::test]
async fn test_initialize_twice_is_rejected() {
    let client = Arc::new(ScriptedClient::new(&["Ava", "Ben"]));
    let orchestrator = orchestrator(&client);

    orchestrator.initialize("A small-town election").await.unwrap();
    let err = orchestrator.initialize("Something else").await.unwrap_err();
    assert!(matches!(
        orchestration_kind(&err),
        OrchestrationErrorKind::AlreadyInitialized
    ));
    assert_eq!(client.count(OutputShape::Cast), 1);
    assert_eq!(orchestrator.snapshot().story().theme, "A small-town election");
}

#[tokio::test]
async fn test_start_without_cast_is_rejected() {
    let client = Arc::new(ScriptedClient::new(&["Ava"]));
    let orchestrator = orchestrator(&client);

    let err = orchestrator.start_writing().await.unwrap_err();
    assert!(matches!(
        orchestration_kind(&err),
        OrchestrationErrorKind::NotInitialized
    ));
    assert_eq!(orchestrator.phase(), OrchestratorPhase::Idle);
}

#[tokio::test]
async fn test_abort_policy_fails_session_on_actor_error() {
    let client = Arc::new(ScriptedClient::new(&["Ava"]).silent("Ava"));
    let orchestrator = orchestrator(&client);

    orchestrator.initialize("A monologue").await.unwrap();
    let err = orchestrator.start_writing().await.unwrap_err();
    assert!(matches!(
        orchestration_kind(&err),
        OrchestrationErrorKind::Dialogue { .. }
    ));
    assert_eq!(orchestrator.phase(), OrchestratorPhase::Error);
}

#[tokio::test]
async fn test_skip_turn_policy_continues_past_actor_errors() {
    let client = Arc::new(ScriptedClient::new(&["A", "B"]).silent("B"));
    let orchestrator = Orchestrator::with_random(
        Arc::clone(&client),
        config_with(DialogueFailurePolicy::SkipTurn, ResumeMode::ContinueScene),
        SequenceRandom::new([0]),
    );

    orchestrator.initialize("A one-sided phone call").await.unwrap();
    orchestrator.start_writing().await.unwrap();

    let story = orchestrator.snapshot().into_story();
    assert!(story.is_finished);

    let speakers = &speakers_by_scene(&story)[0];
    assert!(speakers.iter().all(|speaker| speaker == "A"));
    // Skipped turns still count toward the floor.
    assert_eq!(speakers.len(), *TurnPolicy::default().min_turns() as usize / 2);
}

#[tokio::test]
async fn test_pause_mid_scene_stops_within_one_turn() {
    let gate = CallGate::at(3);
    let client = Arc::new(ScriptedClient::new(&["Ava", "Ben"]).gated(gate.clone()));
    let orchestrator = orchestrator(&client);
    orchestrator.initialize("A tense negotiation").await.unwrap();

    let runner = orchestrator.clone();
    let handle = tokio::spawn(async move { runner.start_writing().await });

    gate.reached.notified().await;
    orchestrator.pause();
    gate.release.notify_one();
    handle.await.unwrap().unwrap();

    let snapshot = orchestrator.snapshot();
    assert_eq!(*snapshot.phase(), OrchestratorPhase::Paused);
    assert!(*snapshot.is_paused());
    // The in-flight line is kept; nothing after it is generated.
    assert_eq!(snapshot.story().dialogue_count(), 3);
    assert_eq!(client.count(OutputShape::Dialogue), 3);
    assert_eq!(client.count(OutputShape::SceneSummary), 0);
}

#[tokio::test]
async fn test_resume_continues_interrupted_scene() {
    let gate = CallGate::at(3);
    let client = Arc::new(ScriptedClient::new(&["Ava", "Ben"]).gated(gate.clone()));
    let orchestrator = orchestrator(&client);
    orchestrator.initialize("A tense negotiation").await.unwrap();

    let runner = orchestrator.clone();
    let handle = tokio::spawn(async move { runner.start_writing().await });
    gate.reached.notified().await;
    orchestrator.pause();
    gate.release.notify_one();
    handle.await.unwrap().unwrap();

    orchestrator.resume().await.unwrap();

    let story = orchestrator.snapshot().into_story();
    assert!(story.is_finished);
    assert_eq!(client.count(OutputShape::ScenePlan), 1);
    assert_eq!(story.scenes.len(), 1);
    assert_eq!(speakers_by_scene(&story).len(), 1);
    // The turn count carried over, so the scene ends at the usual floor.
    assert_eq!(
        story.dialogue_count(),
        *TurnPolicy::default().min_turns() as usize
    );
}

#[tokio::test]
async fn test_resume_replans_interrupted_scene() {
    let gate = CallGate::at(2);
    let client = Arc::new(ScriptedClient::new(&["Ava", "Ben"]).gated(gate.clone()));
    let orchestrator = Orchestrator::new(
        Arc::clone(&client),
        config_with(DialogueFailurePolicy::Abort, ResumeMode::ReplanScene),
    );
    orchestrator.initialize("A tense negotiation").await.unwrap();

    let runner = orchestrator.clone();
    let handle = tokio::spawn(async move { runner.start_writing().await });
    gate.reached.notified().await;
    orchestrator.pause();
    gate.release.notify_one();
    handle.await.unwrap().unwrap();

    orchestrator.resume().await.unwrap();

    let story = orchestrator.snapshot().into_story();
    assert!(story.is_finished);
    assert_eq!(client.count(OutputShape::ScenePlan), 2);
    // The replanned scene replaces the interrupted record.
    assert_eq!(story.scenes.len(), 1);
    assert_eq!(story.scenes[0].id, "scene_1");
    assert_eq!(story.summaries.len(), 1);
}

#[tokio::test]
async fn test_resume_without_pause_is_noop() {
    let client = Arc::new(ScriptedClient::new(&["Ava", "Ben"]));
    let orchestrator = orchestrator(&client);
    orchestrator.initialize("An ordinary day").await.unwrap();

    orchestrator.resume().await.unwrap();
    assert_eq!(client.count(OutputShape::ScenePlan), 0);
    assert_eq!(orchestrator.phase(), OrchestratorPhase::Casting);
}

#[tokio::test]
async fn test_second_start_while_running_is_noop() {
    let gate = CallGate::at(1);
    let client = Arc::new(ScriptedClient::new(&["Ava", "Ben"]).gated(gate.clone()));
    let orchestrator = orchestrator(&client);
    orchestrator.initialize("A crowded elevator").await.unwrap();

    let runner = orchestrator.clone();
    let handle = tokio::spawn(async move { runner.start_writing().await });
    gate.reached.notified().await;

    orchestrator.start_writing().await.unwrap();
    assert_eq!(client.count(OutputShape::ScenePlan), 1);

    gate.release.notify_one();
    handle.await.unwrap().unwrap();

    let story = orchestrator.snapshot().into_story();
    assert!(story.is_finished);
    assert_eq!(story.scenes.len(), 1);
}

#[tokio::test]
async fn test_reset_returns_to_idle() {
    let client = Arc::new(ScriptedClient::new(&["Ava", "Ben"]).final_scene(2));
    let orchestrator = orchestrator(&client);
    orchestrator.initialize("A wedding gone wrong").await.unwrap();
    orchestrator.start_writing().await.unwrap();

    orchestrator.reset();

    let snapshot = orchestrator.snapshot();
    assert_eq!(*snapshot.phase(), OrchestratorPhase::Idle);
    assert!(!*snapshot.is_paused());
    assert!(snapshot.error().is_none());
    let story = snapshot.story();
    assert!(story.script_lines.is_empty());
    assert!(story.characters.is_empty());
    assert!(story.scenes.is_empty());
    assert!(story.summaries.is_empty());
    assert!(!story.is_finished);

    // The session can be started over.
    orchestrator.initialize("A funeral gone right").await.unwrap();
    assert_eq!(orchestrator.snapshot().story().theme, "A funeral gone right");
}

#[tokio::test]
async fn test_reset_during_run_discards_late_results() {
    let gate = CallGate::at(2);
    let client = Arc::new(ScriptedClient::new(&["Ava", "Ben"]).gated(gate.clone()));
    let orchestrator = orchestrator(&client);
    orchestrator.initialize("A collapsing bridge").await.unwrap();

    let runner = orchestrator.clone();
    let handle = tokio::spawn(async move { runner.start_writing().await });
    gate.reached.notified().await;

    orchestrator.reset();
    gate.release.notify_one();
    handle.await.unwrap().unwrap();

    let snapshot = orchestrator.snapshot();
    assert_eq!(*snapshot.phase(), OrchestratorPhase::Idle);
    assert!(snapshot.story().script_lines.is_empty());
    assert_eq!(client.count(OutputShape::Dialogue), 2);
    assert_eq!(client.count(OutputShape::SceneSummary), 0);
}

#[tokio::test]
async fn test_error_phase_recovers_after_reset() {
    let client = Arc::new(ScriptedClient::new(&["Ava"]).failing_cast());
    let orchestrator = orchestrator(&client);

    assert!(orchestrator.initialize("A doomed voyage").await.is_err());
    orchestrator.reset();
    assert_eq!(orchestrator.phase(), OrchestratorPhase::Idle);
}

#[tokio::test]
async fn test_activity_stream_reports_progress() {
    let client = Arc::new(ScriptedClient::new(&["Ava", "Ben"]));
    let orchestrator = orchestrator(&client);
    let mut activity = orchestrator.subscribe();

    orchestrator.initialize("A midnight bakery").await.unwrap();
    orchestrator.start_writing().await.unwrap();

    let mut received = Vec::new();
    while let Ok(entry) = activity.try_recv() {
        received.push(entry);
    }

    assert!(received.iter().any(|entry| entry.agent == AgentRole::Actor
        && entry.agent_name.as_deref() == Some("Ava")));
    assert!(received.iter().any(|entry| entry.message.contains("wrap")));
    assert_eq!(received.len(), orchestrator.snapshot().activity().len());
}

#[tokio::test]
async fn test_context_windows_are_bounded() {
    let client = Arc::new(ScriptedClient::new(&["Ava", "Ben"]).never_ending());
    let orchestrator = orchestrator(&client);
    orchestrator.initialize("A long night shift").await.unwrap();
    orchestrator.start_writing().await.unwrap();

    let mut dialogue_windows = Vec::new();
    let mut judge_windows = Vec::new();
    for request in client.requests() {
        match request {
            AgentRequest::Dialogue { recent_lines, .. } => dialogue_windows.push(recent_lines.len()),
            AgentRequest::JudgeSceneEnd {
                recent_lines,
                turn_count,
                ..
            } => judge_windows.push((turn_count, recent_lines.len())),
            _ => {}
        }
    }

    // Actors see at most six lines; the director always sees the last eight.
    assert_eq!(dialogue_windows, vec![0, 1, 2, 3, 4, 5, 6, 6, 6, 6, 6, 6]);
    assert_eq!(judge_windows, vec![(8, 8), (9, 8), (10, 8), (11, 8)]);
}

#[tokio::test]
async fn test_pause_while_planning_keeps_the_plan() {
    let gate = CallGate::at(1);
    let client = Arc::new(ScriptedClient::new(&["Ava", "Ben"]).gated_plan(gate.clone()));
    let orchestrator = orchestrator(&client);
    orchestrator.initialize("A storm over the harbor").await.unwrap();

    let runner = orchestrator.clone();
    let handle = tokio::spawn(async move { runner.start_writing().await });
    gate.reached.notified().await;
    orchestrator.pause();
    gate.release.notify_one();
    handle.await.unwrap().unwrap();

    let story = orchestrator.snapshot().into_story();
    assert_eq!(story.scenes.len(), 1);
    assert_eq!(story.dialogue_count(), 0);
    assert_eq!(client.count(OutputShape::Dialogue), 0);

    orchestrator.resume().await.unwrap();

    let story = orchestrator.snapshot().into_story();
    assert!(story.is_finished);
    assert_eq!(client.count(OutputShape::ScenePlan), 1);
    assert_eq!(story.scenes.len(), 1);
    assert_eq!(speakers_by_scene(&story).len(), 1);
}

#[tokio::test]
async fn test_pause_while_summarizing_finishes_the_scene() {
    let gate = CallGate::at(1);
    let client = Arc::new(
        ScriptedClient::new(&["Ava", "Ben"])
            .final_scene(2)
            .gated_summary(gate.clone()),
    );
    let orchestrator = orchestrator(&client);
    orchestrator.initialize("Two days in a border town").await.unwrap();

    let runner = orchestrator.clone();
    let handle = tokio::spawn(async move { runner.start_writing().await });
    gate.reached.notified().await;
    orchestrator.pause();
    gate.release.notify_one();
    handle.await.unwrap().unwrap();

    let snapshot = orchestrator.snapshot();
    assert_eq!(*snapshot.phase(), OrchestratorPhase::Paused);
    let story = snapshot.story();
    assert!(!story.is_finished);
    assert_eq!(story.summaries.len(), 1);
    assert_eq!(story.current_scene_index, 1);
    assert_eq!(client.count(OutputShape::ScenePlan), 1);
    assert_eq!(
        client.count(OutputShape::Dialogue),
        *TurnPolicy::default().min_turns() as usize
    );
    assert_eq!(story.dialogue_count(), client.count(OutputShape::Dialogue));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_resume_racing_a_suspending_loop_still_finishes() {
    for _ in 0..50 {
        let gate = CallGate::at(3);
        let client = Arc::new(ScriptedClient::new(&["Ava", "Ben"]).gated(gate.clone()));
        let orchestrator = orchestrator(&client);
        orchestrator.initialize("A tense negotiation").await.unwrap();

        let runner = orchestrator.clone();
        let handle = tokio::spawn(async move { runner.start_writing().await });
        gate.reached.notified().await;
        orchestrator.pause();

        // The resume and the loop noticing the pause run concurrently.
        let resumer = orchestrator.clone();
        let resumed = tokio::spawn(async move { resumer.resume().await });
        gate.release.notify_one();
        handle.await.unwrap().unwrap();
        resumed.await.unwrap().unwrap();

        let snapshot = orchestrator.snapshot();
        assert!(!*snapshot.is_paused());
        assert!(snapshot.story().is_finished);
        assert_eq!(client.count(OutputShape::ScenePlan), 1);
    }
}
