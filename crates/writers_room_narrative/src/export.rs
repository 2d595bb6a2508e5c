//! Rendering the script for export.
//!
//! Both formats are pure functions of the script lines.

use serde::{Deserialize, Serialize};
use writers_room_core::ScriptLine;

/// Supported export formats.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ExportFormat {
    /// Fountain screenplay markup
    #[default]
    Fountain,
    /// Plain text with underlined headings
    #[strum(to_string = "text", serialize = "plain_text")]
    PlainText,
}

impl ExportFormat {
    /// Conventional file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Fountain => "fountain",
            Self::PlainText => "txt",
        }
    }
}

/// Render lines in the given format.
pub fn export(format: ExportFormat, lines: &[ScriptLine]) -> String {
    match format {
        ExportFormat::Fountain => format_fountain(lines),
        ExportFormat::PlainText => format_plain_text(lines),
    }
}

/// Render lines as Fountain.
///
/// A leading parenthetical in a dialogue line goes on its own line under
/// the character cue.
///
/// # Examples
///
/// ```
/// use writers_room_core::ScriptLine;
/// use writers_room_narrative::format_fountain;
///
/// let lines = vec![
///     ScriptLine::Header { content: "The Long Tide".to_string() },
///     ScriptLine::SceneHeading { content: "EXT. PIER - DAWN".to_string() },
///     ScriptLine::Dialogue {
///         content: "(quietly) It's done.".to_string(),
///         speaker: "Mara".to_string(),
///         character_id: "char_1".to_string(),
///     },
/// ];
/// assert_eq!(
///     format_fountain(&lines),
///     "Title: The Long Tide\n\nEXT. PIER - DAWN\n\nMARA\n(quietly)\nIt's done.\n"
/// );
/// ```
pub fn format_fountain(lines: &[ScriptLine]) -> String {
    lines
        .iter()
        .map(|line| match line {
            ScriptLine::Header { content } => format!("Title: {}\n", content),
            ScriptLine::SceneHeading { content } => format!("\n{}\n", content),
            ScriptLine::Action { content } => format!("\n{}\n", content),
            ScriptLine::Dialogue {
                content, speaker, ..
            } => match split_parenthetical(content) {
                Some((parenthetical, rest)) => {
                    format!("\n{}\n{}\n{}\n", speaker.to_uppercase(), parenthetical, rest)
                }
                None => format!("\n{}\n{}\n", speaker.to_uppercase(), content),
            },
        })
        .collect()
}

/// Render lines as plain text.
///
/// # Examples
///
/// ```
/// use writers_room_core::ScriptLine;
/// use writers_room_narrative::format_plain_text;
///
/// let lines = vec![
///     ScriptLine::Header { content: "Tide".to_string() },
///     ScriptLine::Dialogue {
///         content: "Hold the line.".to_string(),
///         speaker: "Mara".to_string(),
///         character_id: "char_1".to_string(),
///     },
/// ];
/// assert_eq!(format_plain_text(&lines), "Tide\n====\n\n[Mara]\nHold the line.\n");
/// ```
pub fn format_plain_text(lines: &[ScriptLine]) -> String {
    lines
        .iter()
        .map(|line| match line {
            ScriptLine::Header { content } => {
                format!("{}\n{}\n", content, "=".repeat(content.chars().count()))
            }
            ScriptLine::SceneHeading { content } => {
                format!("\n{}\n{}\n", content, "-".repeat(content.chars().count()))
            }
            ScriptLine::Action { content } => format!("\n{}\n", content),
            ScriptLine::Dialogue {
                content, speaker, ..
            } => format!("\n[{}]\n{}\n", speaker, content),
        })
        .collect()
}

/// Split `"(action) text"` into `("(action)", "text")`.
fn split_parenthetical(content: &str) -> Option<(&str, &str)> {
    if !content.starts_with('(') {
        return None;
    }
    let close = content.find(')')?;
    let rest = content[close + 1..].trim();
    if rest.is_empty() {
        return None;
    }
    Some((&content[..=close], rest))
}
