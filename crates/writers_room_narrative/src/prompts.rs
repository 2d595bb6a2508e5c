//! Role-specific prompt construction.

use writers_room_core::{Character, ScenePlan, SceneSummary};
use writers_room_interface::{AgentRequest, OutputShape};

/// System and user text for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// Role framing
    pub system: String,
    /// Task and context
    pub user: String,
}

/// Build the prompt for a request.
///
/// Structured shapes end with an explicit JSON-only instruction and an
/// example document. Native JSON modes also require the word "JSON" to
/// appear in the prompt.
pub fn render(request: &AgentRequest) -> Prompt {
    let mut prompt = match request {
        AgentRequest::Cast { theme, cast_size } => cast_prompt(theme, *cast_size),
        AgentRequest::PlanScene {
            theme,
            roster,
            summaries,
            scene_number,
        } => plan_prompt(theme, roster, summaries, *scene_number),
        AgentRequest::Dialogue {
            character,
            plan,
            recent_lines,
        } => dialogue_prompt(character, plan, recent_lines),
        AgentRequest::Summarize {
            scene_number,
            plan,
            transcript,
        } => summary_prompt(*scene_number, plan, transcript),
        AgentRequest::JudgeSceneEnd {
            objective,
            recent_lines,
            turn_count,
        } => scene_end_prompt(objective, recent_lines, *turn_count),
    };

    if let Some(example) = json_example(request.shape()) {
        prompt.user.push_str(
            "\n\nIMPORTANT: Respond with a single valid JSON document and nothing else. \
             Do not use markdown fences or add commentary.\n\nExample format:\n",
        );
        prompt.user.push_str(example);
    }

    prompt
}

/// Example document for a structured shape. Dialogue is plain text.
pub fn json_example(shape: OutputShape) -> Option<&'static str> {
    match shape {
        OutputShape::Cast => Some(
            r#"{
  "characters": [
    {
      "name": "Mara Voss",
      "bio": "A retired harbor pilot who knows every secret the docks keep.",
      "personality_traits": ["stubborn", "loyal", "sardonic"],
      "speaking_style": "Clipped sentences peppered with nautical slang"
    }
  ]
}"#,
        ),
        OutputShape::ScenePlan => Some(
            r#"{
  "scene_number": 1,
  "heading": "INT. DETECTIVE'S OFFICE - NIGHT",
  "setting": "A dim office with case photos pinned to every wall",
  "objective": "The detective takes on a mysterious client",
  "characters_present": ["Mara Voss", "Ilse Brandt"],
  "mood": "tense, secretive",
  "opening_action": "Rain streaks the window. The phone rings once and stops.",
  "is_final_scene": false
}"#,
        ),
        OutputShape::SceneSummary => Some(
            r#"{
  "summary": "A nervous client hires the detective to find her missing brother, but hides why he left.",
  "key_events": ["Client arrives", "Disappearance described", "Detective accepts the case"]
}"#,
        ),
        OutputShape::SceneEnd => Some(
            r#"{
  "should_end": true,
  "reason": "The objective is met and the conflict is on the table"
}"#,
        ),
        OutputShape::Dialogue => None,
    }
}

fn cast_prompt(theme: &str, cast_size: usize) -> Prompt {
    Prompt {
        system: "You are a veteran character designer for film.".to_string(),
        user: format!(
            "Create {cast_size} distinct, complementary characters for a film with this theme.\n\n\
             Theme: {theme}\n\n\
             Requirements:\n\
             1. The characters are varied and have potential for conflict\n\
             2. Each has a clear motivation and background (bio of 2-3 sentences)\n\
             3. Give 3-4 concrete, playable personality traits\n\
             4. Give each a recognizable speaking style\n\n\
             Return an object with a \"characters\" array."
        ),
    }
}

fn plan_prompt(
    theme: &str,
    roster: &[Character],
    summaries: &[SceneSummary],
    scene_number: u32,
) -> Prompt {
    let characters = roster
        .iter()
        .map(|character| format!("- {}: {}", character.name, character.bio))
        .collect::<Vec<_>>()
        .join("\n");

    let history = if summaries.is_empty() {
        "This is the first scene.".to_string()
    } else {
        summaries
            .iter()
            .map(|summary| format!("Scene {}: {}", summary.scene_number, summary.summary))
            .collect::<Vec<_>>()
            .join("\n")
    };

    Prompt {
        system: "You are a visionary film director. You plan the structure of scenes; \
                 you never write dialogue."
            .to_string(),
        user: format!(
            "Film theme: {theme}\n\n\
             Characters:\n{characters}\n\n\
             Completed scenes:\n{history}\n\n\
             Plan scene {scene_number}:\n\
             1. Set the dramatic objective and conflict\n\
             2. Choose which characters appear, using their exact names\n\
             3. Establish the mood and location\n\
             4. Write an opening action line without dialogue\n\
             5. Decide whether the story should end with this scene; aim for a 5-8 scene arc \
             and set is_final_scene to true only when the arc should close\n\n\
             Use a heading such as \"INT. DETECTIVE'S OFFICE - NIGHT\"."
        ),
    }
}

fn dialogue_prompt(character: &Character, plan: &ScenePlan, recent_lines: &[String]) -> Prompt {
    let recent = if recent_lines.is_empty() {
        "(The scene is just starting.)".to_string()
    } else {
        recent_lines.join("\n")
    };

    Prompt {
        system: format!(
            "You are a method actor playing {}.\n\n\
             Background: {}\n\
             Personality: {}\n\
             Speaking style: {}",
            character.name,
            character.bio,
            character.personality_traits.join(", "),
            character.speaking_style,
        ),
        user: format!(
            "Scene:\n\
             - Location: {}\n\
             - Mood: {}\n\
             - Objective: {}\n\n\
             Recent dialogue:\n{recent}\n\n\
             Say your next line as {}. Stay in character, keep your speaking style, push the \
             scene toward its objective, and keep it to 1-3 sentences. You may start with an \
             action in parentheses, like: (hesitating) I don't know what to do.\n\n\
             Output only the line itself, without your name.",
            plan.setting, plan.mood, plan.objective, character.name,
        ),
    }
}

fn summary_prompt(scene_number: u32, plan: &ScenePlan, transcript: &str) -> Prompt {
    Prompt {
        system: "You are a script analyst.".to_string(),
        user: format!(
            "Summarize this scene.\n\n\
             Scene number: {scene_number}\n\
             Heading: {}\n\
             Objective: {}\n\n\
             Scene content:\n{transcript}\n\n\
             Provide a concise summary (2-3 sentences) and 3-5 key events.",
            plan.heading, plan.objective,
        ),
    }
}

fn scene_end_prompt(objective: &str, recent_lines: &[String], turn_count: u32) -> Prompt {
    Prompt {
        system: "You are a film director deciding where to cut.".to_string(),
        user: format!(
            "Decide whether the current scene should end.\n\n\
             Scene objective: {objective}\n\n\
             Recent dialogue:\n{}\n\n\
             {turn_count} lines have been spoken.\n\n\
             Consider whether the objective has been met, whether the conflict has unfolded, \
             and whether this is a natural stopping point.",
            recent_lines.join("\n"),
        ),
    }
}
