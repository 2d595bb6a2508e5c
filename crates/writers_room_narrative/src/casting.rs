//! Character generation.

use tracing::{info, instrument};
use writers_room_core::{Character, SamplingConfig};
use writers_room_error::{OrchestrationError, OrchestrationErrorKind};
use writers_room_interface::{AgentClient, AgentRequest};

/// Generate the cast for a theme.
///
/// Characters receive ids `char_1..char_n` in the order the agent returned them.
///
/// # Errors
///
/// Any agent failure, or an empty cast, is a fatal casting error.
#[instrument(skip(client, sampling), fields(theme_len = theme.len()))]
pub async fn cast_characters<C: AgentClient + ?Sized>(
    client: &C,
    theme: &str,
    cast_size: usize,
    sampling: &SamplingConfig,
) -> Result<Vec<Character>, OrchestrationError> {
    let request = AgentRequest::Cast {
        theme: theme.to_string(),
        cast_size,
    };

    let profiles = client
        .invoke(&request, sampling)
        .await
        .and_then(|output| output.into_cast())
        .map_err(|e| OrchestrationError::new(OrchestrationErrorKind::Casting(e.to_string())))?;

    if profiles.is_empty() {
        return Err(OrchestrationError::new(OrchestrationErrorKind::Casting(
            "the agent returned no characters".to_string(),
        )));
    }

    let characters: Vec<Character> = profiles
        .into_iter()
        .enumerate()
        .map(|(i, profile)| profile.into_character(i + 1))
        .collect();

    info!(count = characters.len(), "Cast assembled");
    Ok(characters)
}
