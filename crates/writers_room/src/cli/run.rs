//! Command handlers.

use crate::cli::WriteArgs;
use std::path::Path;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{info, warn};
use writers_room::{ActivityLog, WritersRoomConfig, WritersRoomResult, connect, export};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn load_config(path: Option<&Path>) -> WritersRoomResult<WritersRoomConfig> {
    match path {
        Some(path) => WritersRoomConfig::from_file(path),
        None => WritersRoomConfig::load(),
    }
}

/// Print the effective configuration.
pub fn show_config(path: Option<&Path>) -> CliResult<()> {
    let config = load_config(path)?;
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

/// Write a screenplay for a theme and export it.
///
/// Ctrl-C pauses the room; the line in flight completes and the partial
/// script is exported.
pub async fn write_screenplay(args: WriteArgs) -> CliResult<()> {
    let config = load_config(args.config.as_deref())?;
    let room = connect(config)?;

    let reporter = if args.quiet {
        None
    } else {
        Some(tokio::spawn(report_activity(BroadcastStream::new(
            room.subscribe(),
        ))))
    };

    room.initialize(&args.theme).await?;

    let runner = room.clone();
    let mut writing = tokio::spawn(async move { runner.start_writing().await });

    let outcome = tokio::select! {
        result = &mut writing => result,
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted; waiting for the current line");
            room.pause();
            writing.await
        }
    };

    let story = room.snapshot().into_story();
    let script = export(args.format, &story.script_lines);
    match &args.output {
        Some(path) => {
            std::fs::write(path, &script)?;
            info!(path = %path.display(), format = %args.format, "Script written");
        }
        None => print!("{}", script),
    }

    // Dropping the last handle closes the activity stream.
    drop(room);
    if let Some(reporter) = reporter {
        reporter.await?;
    }

    outcome??;

    if !story.is_finished {
        eprintln!(
            "Stopped after {} completed scene(s); the partial script was exported.",
            story.summaries.len()
        );
    }

    Ok(())
}

async fn report_activity(mut activity: BroadcastStream<ActivityLog>) {
    while let Some(entry) = activity.next().await {
        match entry {
            Ok(entry) => eprintln!("{}", describe(&entry)),
            Err(e) => warn!(error = %e, "Activity stream lagged"),
        }
    }
}

/// One activity entry as a console line.
fn describe(entry: &ActivityLog) -> String {
    let who = entry
        .agent_name
        .clone()
        .unwrap_or_else(|| entry.agent.to_string());
    format!(
        "[{}] {}: {}",
        entry.timestamp.format("%H:%M:%S"),
        who,
        entry.message
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use writers_room::{AgentRole, LogKind};

    #[test]
    fn test_describe_prefers_character_name() {
        let entry = ActivityLog::new(AgentRole::Actor, LogKind::Action, "Not tonight.")
            .with_agent_name("Mara");
        let line = describe(&entry);
        assert!(line.ends_with("] Mara: Not tonight."));
    }

    #[test]
    fn test_describe_falls_back_to_role() {
        let entry = ActivityLog::new(AgentRole::Director, LogKind::Thinking, "Planning scene 2...");
        assert!(describe(&entry).ends_with("] director: Planning scene 2..."));
    }
}
